//! Particle systems: emission, stepping, culling and drawing
//!
//! Every effect in the scene is one `ParticleSystem` configured with a
//! derivative rule and an emission policy. Bursts, sparks and
//! wormholes differ only in those values.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::derivative::DerivativeRule;
use super::integrator::Integrator;
use super::particle::{ParticleCollection, ParticleState};
use crate::consts::{EMIT_JITTER, SPARK_GOLD, STREAK_LENGTH, STREAK_WIDTH, WHITE};
use crate::polar_to_cartesian;
use crate::renderer::{Rgb, Surface, shapes};

/// Axis-aligned culling region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The visible surface grown by `margin` on every side
    pub fn from_surface(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min: Vec2::splat(-margin),
            max: Vec2::new(width + margin, height + margin),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// How a system spawns new particles each emitting tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionPolicy {
    /// Upper bound on particles per tick (0 disables emission)
    pub rate: u32,
    /// Base launch speed; negative launches toward the centre
    pub speed: f32,
    /// Per-axis velocity jitter as a fraction of `speed`
    pub jitter: f32,
    /// Spawn on a ring of this radius instead of at the centre
    pub spawn_radius: f32,
}

impl EmissionPolicy {
    pub fn new(rate: u32, speed: f32) -> Self {
        Self {
            rate,
            speed,
            jitter: EMIT_JITTER,
            spawn_radius: 0.0,
        }
    }

    pub fn with_spawn_radius(mut self, radius: f32) -> Self {
        self.spawn_radius = radius;
        self
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    /// Emitter position
    pub center: Vec2,
    particles: ParticleCollection,
    pub emission: EmissionPolicy,
    pub rule: DerivativeRule,
    pub integrator: Integrator,
    /// Particles at or beyond this age are culled
    pub max_age: f32,
    /// Ticks during which the system emits
    pub emitting_age: u32,
    /// Ticks since creation
    age: u32,
    pub bounds: Option<Bounds>,
    pub color: Rgb,
    pub streak_length: f32,
    pub streak_width: f32,
}

impl ParticleSystem {
    pub fn new(
        center: Vec2,
        rule: DerivativeRule,
        emission: EmissionPolicy,
        max_age: f32,
        emitting_age: u32,
    ) -> Self {
        Self {
            center,
            particles: ParticleCollection::new(),
            emission,
            rule,
            integrator: Integrator::default(),
            max_age,
            emitting_age,
            age: 0,
            bounds: None,
            color: WHITE,
            streak_length: STREAK_LENGTH,
            streak_width: STREAK_WIDTH,
        }
    }

    /// Outward radial explosion
    pub fn burst(center: Vec2, color: Rgb) -> Self {
        Self::new(
            center,
            DerivativeRule::Radial { center, accel: 0.08 },
            EmissionPolicy::new(6, 1.5),
            30.0,
            40,
        )
        .with_color(color)
    }

    /// Straight-line sparks; no acceleration so single-stage stepping is exact
    pub fn spark(center: Vec2) -> Self {
        Self::new(center, DerivativeRule::Drift, EmissionPolicy::new(8, 2.5), 20.0, 20)
            .with_integrator(Integrator::Euler)
            .with_color(SPARK_GOLD)
    }

    /// Particles launched inward from a ring and pulled into the centre
    pub fn wormhole(center: Vec2, radius: f32, color: Rgb, emitting_age: u32) -> Self {
        Self::new(
            center,
            DerivativeRule::Radial { center, accel: -0.12 },
            EmissionPolicy::new(2, -0.5).with_spawn_radius(radius * 3.0),
            25.0,
            emitting_age,
        )
        .with_color(color)
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Scale the emission rate, keeping at least one particle per tick
    pub fn scale_emission(mut self, factor: f32) -> Self {
        if self.emission.rate > 0 {
            self.emission.rate = ((self.emission.rate as f32 * factor).round() as u32).max(1);
        }
        self
    }

    pub fn particles(&self) -> &ParticleCollection {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Ticks since creation
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_emitting(&self) -> bool {
        self.age < self.emitting_age
    }

    /// End the emitting phase now; existing particles keep animating
    pub fn stop_emitting(&mut self) {
        self.emitting_age = self.emitting_age.min(self.age);
    }

    /// Add a particle directly, bypassing the emission policy
    pub fn add_particle(&mut self, state: ParticleState) {
        self.particles.add(state);
    }

    /// Emit `1..=rate` particles spread evenly around the circle with jitter.
    /// Returns the number spawned.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let policy = self.emission;
        if policy.rate == 0 {
            return 0;
        }
        let count = rng.random_range(1..=policy.rate);
        let phase = rng.random_range(0.0..TAU);
        let spread = policy.jitter.abs() * policy.speed.abs();

        for i in 0..count {
            let angle = phase + i as f32 * TAU / count as f32;
            let dir = polar_to_cartesian(1.0, angle);
            let mut vel = dir * policy.speed;
            if spread > 0.0 {
                vel += Vec2::new(
                    rng.random_range(-spread..=spread),
                    rng.random_range(-spread..=spread),
                );
            }
            let pos = self.center + dir * policy.spawn_radius;
            self.particles.add(ParticleState::spawned(pos, vel));
        }
        count as usize
    }

    /// Advance one tick: integrate, then emit while still emitting.
    ///
    /// Particles emitted this tick join after integration, so they start the
    /// next tick at age 0.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.integrator.step_in_place(&mut self.particles, &self.rule, dt);
        if self.is_emitting() {
            self.spawn(rng);
        }
        self.age = self.age.saturating_add(1);
    }

    /// Remove particles that reached `max_age` or left the bounds.
    /// Returns the number removed.
    pub fn cull(&mut self) -> usize {
        let before = self.particles.len();
        let max_age = self.max_age;
        let bounds = self.bounds;
        self.particles.retain(|_, p| {
            p.age < max_age && bounds.is_none_or(|b| b.contains(p.pos()))
        });
        before - self.particles.len()
    }

    /// Dead once the emitting phase is over and every particle has gone
    pub fn is_dead(&self) -> bool {
        !self.is_emitting() && self.particles.is_empty()
    }

    /// Draw each particle as a streak whose colour and width fade with age
    pub fn render(&self, surface: &mut dyn Surface) {
        for (_, p) in self.particles.iter() {
            let remaining = shapes::remaining_life(p.age, self.max_age);
            if remaining <= 0.0 {
                continue;
            }
            let (from, to) = shapes::streak(p, self.streak_length);
            let width = self.streak_width * (0.5 + 0.5 * remaining);
            surface.draw_line(from, to, width, shapes::fade(self.color, remaining));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn single_shot() -> ParticleSystem {
        ParticleSystem::new(
            Vec2::ZERO,
            DerivativeRule::Drift,
            EmissionPolicy::new(1, 1.0),
            10.0,
            1,
        )
        .with_integrator(Integrator::Euler)
    }

    #[test]
    fn test_single_burst_lifecycle() {
        let mut rng = rng();
        let mut sys = single_shot();

        sys.tick(1.0, &mut rng);
        assert_eq!(sys.particle_count(), 1);
        let (_, p) = sys.particles().iter().next().unwrap();
        assert_eq!(p.age, 0.0);

        for _ in 0..10 {
            sys.tick(1.0, &mut rng);
            assert!(!sys.is_dead());
        }
        assert_eq!(sys.particle_count(), 1);
        let (_, p) = sys.particles().iter().next().unwrap();
        assert_eq!(p.age, 10.0);

        assert_eq!(sys.cull(), 1);
        assert!(sys.is_dead());
    }

    #[test]
    fn test_two_phase_death() {
        let mut rng = rng();
        let mut sys = ParticleSystem::new(
            Vec2::ZERO,
            DerivativeRule::Drift,
            EmissionPolicy::new(4, 1.0),
            5.0,
            2,
        );
        sys.tick(1.0, &mut rng);
        sys.tick(1.0, &mut rng);
        assert!(!sys.is_emitting());
        assert!(sys.particle_count() > 0);
        assert!(!sys.is_dead());

        let mut ticks = 0;
        while !sys.is_dead() {
            sys.cull();
            sys.tick(1.0, &mut rng);
            ticks += 1;
            assert!(ticks < 20, "system never drained");
        }
        assert_eq!(sys.particle_count(), 0);
    }

    #[test]
    fn test_cull_is_idempotent_on_live_particles() {
        let mut rng = rng();
        let mut sys = ParticleSystem::burst(Vec2::new(100.0, 100.0), WHITE)
            .with_bounds(Bounds::from_surface(200.0, 200.0, 10.0));
        sys.tick(0.2, &mut rng);
        sys.tick(0.2, &mut rng);
        let before: Vec<_> = sys.particles().iter().map(|(id, p)| (id, *p)).collect();
        assert_eq!(sys.cull(), 0);
        let after: Vec<_> = sys.particles().iter().map(|(id, p)| (id, *p)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_cull_out_of_bounds() {
        let mut sys = single_shot().with_bounds(Bounds::from_surface(100.0, 100.0, 5.0));
        sys.add_particle(ParticleState::new(50.0, 50.0, 0.0, 0.0, 0.0));
        sys.add_particle(ParticleState::new(-6.0, 50.0, 0.0, 0.0, 0.0));
        sys.add_particle(ParticleState::new(50.0, 104.0, 0.0, 0.0, 0.0));
        assert_eq!(sys.cull(), 1);
        assert_eq!(sys.particle_count(), 2);
    }

    #[test]
    fn test_spawn_count_and_jitter() {
        let mut rng = rng();
        let speed = 2.0;
        let mut sys = ParticleSystem::new(
            Vec2::new(10.0, 10.0),
            DerivativeRule::Drift,
            EmissionPolicy::new(12, speed),
            10.0,
            100,
        );
        for _ in 0..50 {
            let n = sys.spawn(&mut rng);
            assert!((1..=12).contains(&n));
        }
        for (_, p) in sys.particles().iter() {
            assert_eq!(p.age, 0.0);
            assert_eq!(p.pos(), Vec2::new(10.0, 10.0));
            // |v| within speed +- jitter on each axis
            assert!(p.vel().length() <= speed * (1.0 + EMIT_JITTER * 2.0f32.sqrt()) + 1e-4);
        }
    }

    #[test]
    fn test_spawn_even_directions_without_jitter() {
        let mut rng = rng();
        let mut sys = ParticleSystem::new(
            Vec2::ZERO,
            DerivativeRule::Drift,
            EmissionPolicy::new(1, 3.0).with_jitter(0.0),
            10.0,
            10,
        );
        sys.emission.rate = 1;
        sys.spawn(&mut rng);
        let (_, p) = sys.particles().iter().next().unwrap();
        assert!((p.vel().length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_wormhole_spawns_on_ring_moving_inward() {
        let mut rng = rng();
        let center = Vec2::new(200.0, 200.0);
        let mut sys = ParticleSystem::wormhole(center, 10.0, WHITE, 10);
        sys.emission.jitter = 0.0;
        sys.spawn(&mut rng);
        for (_, p) in sys.particles().iter() {
            let offset = p.pos() - center;
            assert!((offset.length() - 30.0).abs() < 1e-3);
            assert!(p.vel().dot(offset) < 0.0);
        }
    }

    #[test]
    fn test_zero_rate_never_spawns() {
        let mut rng = rng();
        let mut sys = single_shot();
        sys.emission.rate = 0;
        assert_eq!(sys.spawn(&mut rng), 0);
        sys.tick(1.0, &mut rng);
        assert!(sys.is_dead());
    }

    #[test]
    fn test_stop_emitting() {
        let mut rng = rng();
        let mut sys = ParticleSystem::spark(Vec2::ZERO);
        sys.tick(1.0, &mut rng);
        sys.stop_emitting();
        let count = sys.particle_count();
        sys.tick(1.0, &mut rng);
        assert_eq!(sys.particle_count(), count);
        assert!(!sys.is_emitting());
    }

    #[test]
    fn test_scale_emission() {
        let sys = ParticleSystem::burst(Vec2::ZERO, WHITE).scale_emission(0.01);
        assert_eq!(sys.emission.rate, 1);
        let sys = ParticleSystem::burst(Vec2::ZERO, WHITE).scale_emission(1.5);
        assert_eq!(sys.emission.rate, 9);
    }

    #[test]
    fn test_render_draws_one_streak_per_live_particle() {
        let mut sys = single_shot();
        sys.add_particle(ParticleState::new(5.0, 5.0, 1.0, 0.0, 0.0));
        sys.add_particle(ParticleState::new(5.0, 5.0, 1.0, 0.0, 4.0));
        // Fully aged: invisible
        sys.add_particle(ParticleState::new(5.0, 5.0, 1.0, 0.0, 10.0));
        let mut surface = RecordingSurface::new(50.0, 50.0);
        sys.render(&mut surface);
        assert_eq!(surface.line_count(), 2);
    }
}
