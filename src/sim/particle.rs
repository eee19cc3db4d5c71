//! Particle state and the id-keyed collection a system owns

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{SlotArena, SlotId};

/// Number of components in a particle state (x, y, vx, vy, age)
pub const STATE_LEN: usize = 5;

/// One simulated point.
///
/// The same shape doubles as a derivative: `(dx, dy, dvx, dvy, dage)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age: f32,
}

impl ParticleState {
    pub const fn new(x: f32, y: f32, vx: f32, vy: f32, age: f32) -> Self {
        Self { x, y, vx, vy, age }
    }

    /// Fresh particle at `pos` moving with `vel`
    pub fn spawned(pos: Vec2, vel: Vec2) -> Self {
        Self::new(pos.x, pos.y, vel.x, vel.y, 0.0)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    #[inline]
    pub fn to_array(self) -> [f32; STATE_LEN] {
        [self.x, self.y, self.vx, self.vy, self.age]
    }

    #[inline]
    pub fn from_array(a: [f32; STATE_LEN]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4])
    }
}

/// Particles keyed by ids that are never reused within one collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleCollection {
    particles: SlotArena<ParticleState>,
}

impl ParticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle, returning its id
    pub fn add(&mut self, state: ParticleState) -> SlotId {
        self.particles.insert(state)
    }

    /// Append several particles (ids assigned in order)
    pub fn extend(&mut self, states: impl IntoIterator<Item = ParticleState>) {
        for state in states {
            self.particles.insert(state);
        }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<ParticleState> {
        self.particles.remove(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&ParticleState> {
        self.particles.get(id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ids(&self) -> Vec<SlotId> {
        self.particles.ids()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &ParticleState)> + '_ {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut ParticleState)> + '_ {
        self.particles.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(SlotId, &ParticleState) -> bool) {
        self.particles.retain(keep);
    }
}
