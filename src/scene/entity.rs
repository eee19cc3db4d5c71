//! Scene entities
//!
//! A closed set of sprite kinds sharing one capability surface:
//! `step`, `render`, `is_dead` and `kill`.

use super::collapse::CollapsingPoint;
use super::level::Level;
use super::registry::EntityIds;
use super::scheduler::SimContext;
use crate::renderer::Surface;
use crate::sim::ParticleSystem;

#[derive(Debug)]
pub enum SpriteKind {
    Particles(ParticleSystem),
    Collapse(CollapsingPoint),
    Level(Level),
}

/// A registered entity plus the registry slots it occupies
#[derive(Debug)]
pub struct Sprite {
    ids: EntityIds,
    pub kind: SpriteKind,
}

impl Sprite {
    pub fn new(kind: SpriteKind) -> Self {
        Self {
            ids: EntityIds::default(),
            kind,
        }
    }

    pub fn particles(system: ParticleSystem) -> Self {
        Self::new(SpriteKind::Particles(system))
    }

    pub fn collapse(point: CollapsingPoint) -> Self {
        Self::new(SpriteKind::Collapse(point))
    }

    pub fn level(level: Level) -> Self {
        Self::new(SpriteKind::Level(level))
    }

    pub fn ids(&self) -> EntityIds {
        self.ids
    }

    pub fn set_ids(&mut self, ids: EntityIds) {
        self.ids = ids;
    }

    /// One logic tick
    pub fn step(&mut self, ctx: &mut SimContext) {
        match &mut self.kind {
            SpriteKind::Particles(system) => {
                system.cull();
                system.tick(ctx.dt, &mut ctx.rng);
            }
            SpriteKind::Collapse(point) => point.step(ctx),
            SpriteKind::Level(level) => level.step(ctx),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match &self.kind {
            SpriteKind::Particles(system) => system.render(surface),
            SpriteKind::Collapse(point) => point.render(surface),
            // Levels only schedule other sprites
            SpriteKind::Level(_) => {}
        }
    }

    pub fn is_dead(&self) -> bool {
        match &self.kind {
            SpriteKind::Particles(system) => system.is_dead(),
            SpriteKind::Collapse(point) => point.is_dead(),
            SpriteKind::Level(level) => level.is_dead(),
        }
    }

    /// Release kind-specific resources and leave both registries.
    /// Safe to call more than once.
    pub fn kill(&mut self, ctx: &mut SimContext) {
        if let SpriteKind::Level(level) = &mut self.kind {
            level.cancel_pending();
        }
        ctx.registry.remove(self.ids);
    }

    pub fn as_particles(&self) -> Option<&ParticleSystem> {
        match &self.kind {
            SpriteKind::Particles(system) => Some(system),
            _ => None,
        }
    }

    pub fn as_collapse(&self) -> Option<&CollapsingPoint> {
        match &self.kind {
            SpriteKind::Collapse(point) => Some(point),
            _ => None,
        }
    }

    pub fn as_level(&self) -> Option<&Level> {
        match &self.kind {
            SpriteKind::Level(level) => Some(level),
            _ => None,
        }
    }
}
