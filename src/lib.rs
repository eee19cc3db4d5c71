//! Blackhole Hunt - particle effects around a hidden black hole
//!
//! Core modules:
//! - `sim`: Numerical particle core (state, derivative rules, integrators, systems)
//! - `scene`: Entity registry, levels and the dual-clock scheduler
//! - `renderer`: Render surface contract and a headless recording surface
//! - `settings`: Data-driven tick periods and quality

pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{Scene, SimContext};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;
use rand::Rng;

/// Scene configuration constants
pub mod consts {
    use crate::renderer::Rgb;

    /// Default logic tick period (ms)
    pub const LOGIC_TICK_MS: f32 = 5.0;
    /// Default render tick period (ms, ~30 fps)
    pub const RENDER_TICK_MS: f32 = 33.0;
    /// Maximum logic ticks run per `advance` call before the backlog is dropped
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Default surface size
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
    /// Particles may drift this far off-screen before being culled
    pub const BOUNDS_MARGIN: f32 = 20.0;

    /// Length of a particle streak (px)
    pub const STREAK_LENGTH: f32 = 10.0;
    /// Width of a particle streak (px)
    pub const STREAK_WIDTH: f32 = 1.5;
    /// Per-axis velocity jitter as a fraction of base speed
    pub const EMIT_JITTER: f32 = 0.3;

    /// Tell sequence geometry
    pub const TELL_BURSTS: u32 = 5;
    pub const TELL_SPACING: f32 = 30.0;
    pub const TELL_TIMING_MS: f32 = 400.0;
    pub const TELL_TIMING_FAST_MS: f32 = 300.0;

    /// Black hole hit radius (px)
    pub const BLACK_HOLE_RADIUS: f32 = 20.0;
    /// How long a black hole stays catchable (render frames)
    pub const BLACK_HOLE_WINDOW: f32 = 90.0;

    /// Palette
    pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BURST_BLUE: Rgb = Rgb::new(110, 170, 255);
    pub const SPARK_GOLD: Rgb = Rgb::new(255, 215, 90);
    pub const HOLE_VIOLET: Rgb = Rgb::new(150, 60, 210);
}

/// Uniform random value in [min, max)
#[inline]
pub fn bounded_rand<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bounded_rand_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = bounded_rand(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
        // Empty range collapses to min
        assert_eq!(bounded_rand(&mut rng, 4.0, 4.0), 4.0);
    }

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        // Odd multiples of π sit on the wrap boundary; rounding picks the side
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        let wrapped = normalize_angle(7.0 * PI);
        assert!((-PI..PI).contains(&wrapped));
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
