//! Dual-clock scheduler
//!
//! Logic ticks step every logic participant in ascending id order. Render
//! ticks walk the drawables, reap the dead ones and paint the rest. Both
//! passes iterate a snapshot of ids, so sprites added mid-pass are first
//! seen on the next tick and sprites removed mid-pass are skipped.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{ClockTicks, DualClock};
use super::entity::Sprite;
use super::level::{Level, LevelKind};
use super::registry::{EntityIds, Registry, SpriteRef};
use super::timeline::ms_to_ticks;
use crate::consts::BACKGROUND;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{Bounds, ParticleSystem, SlotId};

/// Everything a sprite may touch during a tick
pub struct SimContext {
    pub width: f32,
    pub height: f32,
    /// Integration step in render-frame units
    pub dt: f32,
    pub logic_tick_ms: f32,
    pub bounds_margin: f32,
    /// Quality multiplier for emission rates
    pub emit_scale: f32,
    pub logic_frame: u64,
    pub render_frame: u64,
    /// Latest pointer position in surface coordinates
    pub pointer: Option<Vec2>,
    /// Black holes caught so far
    pub targets_found: u32,
    pub rng: Pcg32,
    pub registry: Registry,
}

impl SimContext {
    pub fn new(settings: &Settings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            dt: settings.dt(),
            logic_tick_ms: settings.logic_tick_ms,
            bounds_margin: settings.bounds_margin,
            emit_scale: settings.quality.emit_scale(),
            logic_frame: 0,
            render_frame: 0,
            pointer: None,
            targets_found: 0,
            rng: Pcg32::seed_from_u64(settings.seed()),
            registry: Registry::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Visible area plus the culling margin
    pub fn bounds(&self) -> Bounds {
        Bounds::from_surface(self.width, self.height, self.bounds_margin)
    }

    /// Register a sprite; returns the slots it was given
    pub fn add_entity(
        &mut self,
        sprite: Sprite,
        wants_draw: bool,
        wants_logic: bool,
    ) -> EntityIds {
        self.registry.add(sprite, wants_draw, wants_logic).0
    }

    pub fn remove_entity(&mut self, ids: EntityIds) {
        self.registry.remove(ids);
    }

    /// Apply scene-wide culling bounds and quality scaling to a new system
    pub fn prepare_system(&self, system: ParticleSystem) -> ParticleSystem {
        let system = system.scale_emission(self.emit_scale);
        if system.bounds.is_some() {
            system
        } else {
            system.with_bounds(self.bounds())
        }
    }

    pub fn ms_to_ticks(&self, ms: f32) -> u64 {
        ms_to_ticks(ms, self.logic_tick_ms)
    }

    /// Logic ticks covering `frames` render frames
    pub fn frames_to_ticks(&self, frames: f32) -> u32 {
        if self.dt <= 0.0 {
            return frames.max(0.0).ceil() as u32;
        }
        (frames / self.dt).ceil().max(0.0) as u32
    }
}

/// The scene: context, clock and level progression
pub struct Scene {
    ctx: SimContext,
    clock: DualClock,
    level: Option<(usize, SpriteRef)>,
    complete: bool,
}

impl Scene {
    pub fn new(settings: &Settings) -> Self {
        log::info!(
            "Scene {}x{} logic {} ms, render {} ms (dt {:.3})",
            settings.width,
            settings.height,
            settings.logic_tick_ms,
            settings.render_tick_ms,
            settings.dt()
        );
        Self {
            ctx: SimContext::new(settings),
            clock: DualClock::new(
                settings.logic_tick_ms,
                settings.render_tick_ms,
                settings.max_substeps,
            ),
            level: None,
            complete: false,
        }
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn registry(&self) -> &Registry {
        &self.ctx.registry
    }

    /// Register a sprite from outside the tick loop
    pub fn add_entity(
        &mut self,
        sprite: Sprite,
        wants_draw: bool,
        wants_logic: bool,
    ) -> EntityIds {
        self.ctx.add_entity(sprite, wants_draw, wants_logic)
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.ctx.pointer = pointer;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.width = width;
        self.ctx.height = height;
    }

    /// (drawables, logic participants)
    pub fn entity_counts(&self) -> (usize, usize) {
        (
            self.ctx.registry.drawable_count(),
            self.ctx.registry.logic_count(),
        )
    }

    pub fn current_level(&self) -> Option<LevelKind> {
        self.level
            .as_ref()
            .and_then(|(_, l)| l.borrow().as_level().map(|level| level.kind))
    }

    /// True once the last level has been won
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Show level `index` of `LevelKind::all()`, replacing any current level
    pub fn start_level(&mut self, index: usize) -> bool {
        let Some(&kind) = LevelKind::all().get(index) else {
            log::warn!("No level {}", index);
            return false;
        };
        if let Some((_, old)) = self.level.take() {
            old.borrow_mut().kill(&mut self.ctx);
        }
        let ids = Level::new(kind).show(&mut self.ctx);
        let handle = ids.logic.and_then(|id| self.ctx.registry.logic(id));
        self.level = handle.map(|h| (index, h));
        self.complete = false;
        true
    }

    /// One logic pass over a snapshot of logic participants
    pub fn logic_tick(&mut self) {
        self.ctx.logic_frame += 1;
        let snapshot = self.ctx.registry.logic_ids();
        self.logic_pass(&snapshot);
        self.advance_level();
    }

    fn logic_pass(&mut self, ids: &[SlotId]) {
        for &id in ids {
            // Removed earlier in this pass
            let Some(sprite) = self.ctx.registry.logic(id) else {
                continue;
            };
            let (dead, drawable) = {
                let s = sprite.borrow();
                (s.is_dead(), s.ids().draw.is_some())
            };
            if dead {
                // Drawables are reaped by the render pass
                if !drawable {
                    sprite.borrow_mut().kill(&mut self.ctx);
                }
                continue;
            }
            sprite.borrow_mut().step(&mut self.ctx);
        }
    }

    /// One render pass: reap dead drawables, paint live ones
    pub fn render_tick(&mut self, surface: &mut dyn Surface) {
        self.ctx.render_frame += 1;

        let paint = surface.is_drawable();
        if paint {
            let (w, h) = surface.size();
            if w != self.ctx.width || h != self.ctx.height {
                self.resize(w, h);
            }
            surface.clear(BACKGROUND);
        } else {
            log::debug!("Render target has no area; skipping paint");
        }

        for id in self.ctx.registry.drawable_ids() {
            let Some(sprite) = self.ctx.registry.drawable(id) else {
                continue;
            };
            if sprite.borrow().is_dead() {
                sprite.borrow_mut().kill(&mut self.ctx);
                continue;
            }
            if paint {
                sprite.borrow().render(surface);
            }
        }
    }

    /// Feed wall time: run every due logic tick, then at most one render
    pub fn advance(&mut self, elapsed_ms: f32, surface: &mut dyn Surface) -> ClockTicks {
        let ticks = self.clock.advance(elapsed_ms);
        for _ in 0..ticks.logic {
            self.logic_tick();
        }
        if ticks.render {
            self.render_tick(surface);
        }
        ticks
    }

    /// Move to the next level once the current one is over
    fn advance_level(&mut self) {
        let (index, dead) = match &self.level {
            Some((index, level)) => (*index, level.borrow().is_dead()),
            None => return,
        };
        if !dead {
            return;
        }
        let next = index + 1;
        if next < LevelKind::all().len() {
            self.start_level(next);
        } else {
            if let Some((_, level)) = self.level.take() {
                level.borrow_mut().kill(&mut self.ctx);
            }
            self.complete = true;
            log::info!("All levels cleared");
        }
    }
}
