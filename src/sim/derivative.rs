//! Derivative rules: map a particle state to its rate of change
//!
//! A derivative has the same shape as the state: `(vx, vy, ax, ay, 1)`.
//! Age always advances at rate 1.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particle::ParticleState;

/// Anything that can evaluate a particle's instantaneous rate of change
pub trait Derivative {
    fn eval(&self, state: &ParticleState) -> ParticleState;
}

impl<F> Derivative for F
where
    F: Fn(&ParticleState) -> ParticleState,
{
    fn eval(&self, state: &ParticleState) -> ParticleState {
        self(state)
    }
}

/// Built-in motion rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DerivativeRule {
    /// Constant velocity
    Drift,
    /// Velocity decays exponentially with damping constant `k`
    Drag { k: f32 },
    /// Acceleration along the line from `center` to the particle.
    /// Positive `accel` pushes outward, negative pulls inward.
    Radial { center: Vec2, accel: f32 },
}

impl DerivativeRule {
    /// Acceleration this rule applies to `state`
    pub fn acceleration(&self, state: &ParticleState) -> Vec2 {
        match *self {
            DerivativeRule::Drift => Vec2::ZERO,
            DerivativeRule::Drag { k } => -k * state.vel(),
            DerivativeRule::Radial { center, accel } => {
                radial_acceleration(center, accel, state.pos())
            }
        }
    }
}

impl Derivative for DerivativeRule {
    fn eval(&self, state: &ParticleState) -> ParticleState {
        let a = self.acceleration(state);
        ParticleState::new(state.vx, state.vy, a.x, a.y, 1.0)
    }
}

/// Radial acceleration of magnitude `accel` at `pos` relative to `center`.
///
/// A particle on the centre's vertical axis gets a vertical-only push; a
/// particle exactly on the centre gets none.
fn radial_acceleration(center: Vec2, accel: f32, pos: Vec2) -> Vec2 {
    let offset = pos - center;
    if offset.x == 0.0 {
        if offset.y == 0.0 {
            return Vec2::ZERO;
        }
        return Vec2::new(0.0, accel * offset.y.signum());
    }
    let angle = offset.y.atan2(offset.x);
    Vec2::new(accel * angle.cos(), accel * angle.sin())
}
