//! Geometry and colour curves for particle marks

use glam::Vec2;

use super::Rgb;
use crate::consts::WHITE;
use crate::sim::ParticleState;

/// Fraction of life left, `1 - age / max_age`, clamped to 0-1
#[inline]
pub fn remaining_life(age: f32, max_age: f32) -> f32 {
    if max_age <= 0.0 {
        return 0.0;
    }
    (1.0 - age / max_age).clamp(0.0, 1.0)
}

/// Endpoints of a short streak centred on the particle and aligned with its
/// velocity. Screen y points down, so the angle is `atan2(-vy, vx)`.
pub fn streak(state: &ParticleState, length: f32) -> (Vec2, Vec2) {
    let angle = (-state.vy).atan2(state.vx);
    let half = 0.5 * length;
    let (sin, cos) = angle.sin_cos();
    let from = Vec2::new(state.x - half * cos, state.y + half * sin);
    let to = Vec2::new(state.x + half * cos, state.y - half * sin);
    (from, to)
}

/// Age-scaled colour: fresh particles flash toward white, old ones fade to black
pub fn fade(base: Rgb, remaining: f32) -> Rgb {
    let heat = (remaining - 0.8).max(0.0) * 5.0;
    base.lerp(WHITE, heat * 0.6).scaled(remaining)
}
