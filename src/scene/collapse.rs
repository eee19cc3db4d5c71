//! The hidden black hole: a wormhole effect with a pointer hit test

use glam::Vec2;

use super::entity::Sprite;
use super::registry::EntityIds;
use super::scheduler::SimContext;
use crate::consts::{HOLE_VIOLET, WHITE};
use crate::renderer::{Surface, shapes};
use crate::sim::ParticleSystem;

#[derive(Debug)]
pub struct CollapsingPoint {
    pub center: Vec2,
    pub radius: f32,
    system: ParticleSystem,
    found: bool,
    /// Logic ticks during which the point can be caught
    window: u32,
    age: u32,
}

impl CollapsingPoint {
    pub fn new(center: Vec2, radius: f32, window: u32) -> Self {
        Self {
            center,
            radius,
            system: ParticleSystem::wormhole(center, radius, HOLE_VIOLET, window),
            found: false,
            window,
            age: 0,
        }
    }

    /// Register for drawing and logic
    pub fn show(mut self, ctx: &mut SimContext) -> EntityIds {
        self.system = ctx.prepare_system(self.system);
        log::info!(
            "Black hole at ({:.0}, {:.0}) for {} ticks",
            self.center.x,
            self.center.y,
            self.window
        );
        ctx.add_entity(Sprite::collapse(self), true, true)
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Still open and not yet found
    pub fn is_catchable(&self) -> bool {
        !self.found && self.age < self.window
    }

    pub fn hit_test(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }

    pub fn step(&mut self, ctx: &mut SimContext) {
        if self.is_catchable() && ctx.pointer.is_some_and(|p| self.hit_test(p)) {
            self.found = true;
            self.system.stop_emitting();
            ctx.targets_found += 1;
            log::info!("Black hole found after {} ticks", self.age);
            // Registered now, stepped from the next tick on
            let spark = ctx.prepare_system(ParticleSystem::spark(self.center));
            ctx.add_entity(Sprite::particles(spark), true, true);
        }

        self.system.cull();
        self.system.tick(ctx.dt, &mut ctx.rng);
        self.age = self.age.saturating_add(1);
    }

    /// Dead once the window closed (or it was found) and its particles drained
    pub fn is_dead(&self) -> bool {
        !self.is_catchable() && self.system.is_dead()
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.system.render(surface);
        if self.is_catchable() {
            // Core shrinks as the window closes
            let remaining = shapes::remaining_life(self.age as f32, self.window as f32);
            let core = self.radius * 0.25 * (0.5 + 0.5 * remaining);
            surface.draw_disc(self.center, core, shapes::fade(HOLE_VIOLET, remaining));
        } else if self.found {
            surface.draw_disc(self.center, self.radius * 0.2, WHITE.scaled(0.5));
        }
    }
}
