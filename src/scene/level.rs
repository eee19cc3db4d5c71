//! Scripted levels
//!
//! A level is a logic-only sprite that fills the scene with noise bursts and,
//! now and then, plays a "tell": a line of evenly spaced, evenly timed bursts
//! whose next step is where the black hole appears.

use glam::Vec2;
use rand::Rng;

use super::collapse::CollapsingPoint;
use super::entity::Sprite;
use super::registry::EntityIds;
use super::scheduler::SimContext;
use super::timeline::{Timeline, ms_to_ticks};
use crate::consts::{
    BLACK_HOLE_RADIUS, BLACK_HOLE_WINDOW, BURST_BLUE, TELL_BURSTS, TELL_SPACING,
    TELL_TIMING_FAST_MS, TELL_TIMING_MS,
};
use crate::sim::ParticleSystem;
use crate::{bounded_rand, polar_to_cartesian};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Random bursts plus the occasional real tell
    One,
    /// Fake tells with skewed timing/spacing mixed with real ones
    Two,
}

impl LevelKind {
    /// Levels in play order
    pub fn all() -> &'static [LevelKind] {
        &[LevelKind::One, LevelKind::Two]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LevelKind::One => "Level One",
            LevelKind::Two => "Level Two",
        }
    }

    /// Per-tick chance of a random noise burst
    fn noise_chance(&self) -> f32 {
        match self {
            LevelKind::One => 0.05,
            LevelKind::Two => 0.0,
        }
    }

    /// Per-tick chance of a decoy tell
    fn fake_tell_chance(&self) -> f32 {
        match self {
            LevelKind::One => 0.0,
            LevelKind::Two => 0.009,
        }
    }

    /// Per-tick chance of the real tell
    fn tell_chance(&self) -> f32 {
        match self {
            LevelKind::One => 0.001,
            LevelKind::Two => 0.005,
        }
    }

    fn tell_timing_ms(&self) -> f32 {
        match self {
            LevelKind::One => TELL_TIMING_MS,
            LevelKind::Two => TELL_TIMING_FAST_MS,
        }
    }
}

/// Something a level scheduled for later
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TellAction {
    Burst(Vec2),
    Decoy(Vec2),
    BlackHole(Vec2),
    /// The tell is over; another may start
    Finish,
}

#[derive(Debug)]
pub struct Level {
    pub kind: LevelKind,
    won: bool,
    start_frame: u64,
    /// `targets_found` when the level was shown
    found_baseline: u32,
    showing_blackhole: bool,
    timeline: Timeline<TellAction>,
}

impl Level {
    pub fn new(kind: LevelKind) -> Self {
        Self {
            kind,
            won: false,
            start_frame: 0,
            found_baseline: 0,
            showing_blackhole: false,
            timeline: Timeline::new(),
        }
    }

    /// Start the level by registering it as a logic participant
    pub fn show(mut self, ctx: &mut SimContext) -> EntityIds {
        self.start_frame = ctx.logic_frame;
        self.found_baseline = ctx.targets_found;
        log::info!("{} started at tick {}", self.kind.name(), self.start_frame);
        ctx.add_entity(Sprite::level(self), false, true)
    }

    pub fn is_dead(&self) -> bool {
        self.won
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_showing_blackhole(&self) -> bool {
        self.showing_blackhole
    }

    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    /// Void every scheduled action
    pub fn cancel_pending(&mut self) {
        self.timeline.clear();
        self.showing_blackhole = false;
    }

    pub fn step(&mut self, ctx: &mut SimContext) {
        if ctx.targets_found > self.found_baseline {
            self.won = true;
            self.cancel_pending();
            log::info!(
                "{} won after {} ticks",
                self.kind.name(),
                ctx.logic_frame - self.start_frame
            );
            return;
        }

        for action in self.timeline.due(ctx.logic_frame) {
            self.perform(action, ctx);
        }

        let kind = self.kind;
        if ctx.rng.random::<f32>() < kind.noise_chance() {
            let pos = Vec2::new(
                ctx.width * ctx.rng.random::<f32>(),
                ctx.height * ctx.rng.random::<f32>(),
            );
            let burst = ctx.prepare_system(ParticleSystem::burst(pos, BURST_BLUE));
            ctx.add_entity(Sprite::particles(burst), true, true);
        }

        if ctx.rng.random::<f32>() < kind.fake_tell_chance() {
            self.show_fake_tell(ctx);
        }

        if !self.showing_blackhole && ctx.rng.random::<f32>() < kind.tell_chance() {
            self.show_blackhole(ctx);
        }
    }

    /// Schedule the real tell: a line of bursts, then the black hole
    pub fn show_blackhole(&mut self, ctx: &mut SimContext) {
        self.showing_blackhole = true;
        let timing = self.kind.tell_timing_ms();
        let (origin, dir) = tell_line(ctx);
        let now = ctx.logic_frame;

        for i in 0..TELL_BURSTS {
            let pos = origin + dir * (i as f32 * TELL_SPACING);
            let due = now + ms_to_ticks(timing * i as f32, ctx.logic_tick_ms);
            self.timeline.schedule(due, TellAction::Burst(pos));
        }

        let hole = origin + dir * (TELL_BURSTS as f32 * TELL_SPACING);
        let hole_due = now + ms_to_ticks(timing * TELL_BURSTS as f32, ctx.logic_tick_ms);
        self.timeline.schedule(hole_due, TellAction::BlackHole(hole));

        let finish_due = now + ms_to_ticks(timing * (TELL_BURSTS as f32 + 0.1), ctx.logic_tick_ms);
        self.timeline.schedule(finish_due.max(hole_due + 1), TellAction::Finish);

        log::info!("Tell scheduled toward ({:.0}, {:.0})", hole.x, hole.y);
    }

    /// Schedule a decoy tell with skewed timing and spacing and no payoff
    pub fn show_fake_tell(&mut self, ctx: &mut SimContext) {
        let mut timing = TELL_TIMING_FAST_MS;
        if ctx.rng.random_bool(0.5) {
            timing += bounded_rand(&mut ctx.rng, 200.0, 300.0);
        } else {
            timing -= bounded_rand(&mut ctx.rng, 200.0, 300.0);
        }
        // Never negative: a decoy fired all at once is still a decoy
        let timing = timing.max(0.0);

        let mut spacing = TELL_SPACING;
        if ctx.rng.random_bool(0.5) {
            spacing += bounded_rand(&mut ctx.rng, 20.0, 40.0);
        } else {
            spacing -= bounded_rand(&mut ctx.rng, 10.0, 20.0);
        }

        let (origin, dir) = tell_line(ctx);
        let now = ctx.logic_frame;
        for i in 0..TELL_BURSTS {
            let pos = origin + dir * (i as f32 * spacing);
            let due = now + ms_to_ticks(timing * i as f32, ctx.logic_tick_ms);
            self.timeline.schedule(due, TellAction::Decoy(pos));
        }
        log::debug!("Decoy tell: timing {:.0} ms, spacing {:.0} px", timing, spacing);
    }

    fn perform(&mut self, action: TellAction, ctx: &mut SimContext) {
        match action {
            // Decoys must look exactly like the real thing
            TellAction::Burst(pos) | TellAction::Decoy(pos) => {
                let burst = ctx.prepare_system(ParticleSystem::burst(pos, BURST_BLUE));
                ctx.add_entity(Sprite::particles(burst), true, true);
            }
            TellAction::BlackHole(pos) => {
                let window = ctx.frames_to_ticks(BLACK_HOLE_WINDOW);
                CollapsingPoint::new(pos, BLACK_HOLE_RADIUS, window).show(ctx);
            }
            TellAction::Finish => self.showing_blackhole = false,
        }
    }
}

/// Random start point in the middle half of the surface plus a unit direction
fn tell_line(ctx: &mut SimContext) -> (Vec2, Vec2) {
    let qw = ctx.width / 4.0;
    let qh = ctx.height / 4.0;
    let origin = Vec2::new(
        bounded_rand(&mut ctx.rng, qw, 3.0 * qw),
        bounded_rand(&mut ctx.rng, qh, 3.0 * qh),
    );
    let angle = bounded_rand(&mut ctx.rng, 0.0, std::f32::consts::TAU);
    (origin, polar_to_cartesian(1.0, angle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn ctx() -> SimContext {
        SimContext::new(&Settings {
            seed: Some(77),
            ..Default::default()
        })
    }

    #[test]
    fn test_real_tell_schedule() {
        let mut ctx = ctx();
        let mut level = Level::new(LevelKind::One);
        level.show_blackhole(&mut ctx);
        assert!(level.is_showing_blackhole());
        // Bursts, the hole, and the finish marker
        assert_eq!(level.pending(), TELL_BURSTS as usize + 2);

        let mut actions = Vec::new();
        for frame in 0..=500 {
            actions.extend(level.timeline.due(frame));
        }
        let bursts: Vec<Vec2> = actions
            .iter()
            .filter_map(|a| match a {
                TellAction::Burst(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(bursts.len(), TELL_BURSTS as usize);
        for pair in bursts.windows(2) {
            assert!((pair[0].distance(pair[1]) - TELL_SPACING).abs() < 1e-3);
        }
        assert!(matches!(actions[TELL_BURSTS as usize], TellAction::BlackHole(_)));
        assert_eq!(actions.last(), Some(&TellAction::Finish));
    }

    #[test]
    fn test_tell_origin_in_middle_half() {
        let mut ctx = ctx();
        for _ in 0..100 {
            let (origin, dir) = tell_line(&mut ctx);
            assert!(origin.x >= 200.0 && origin.x < 600.0);
            assert!(origin.y >= 150.0 && origin.y < 450.0);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fake_tell_has_no_payoff() {
        let mut ctx = ctx();
        let mut level = Level::new(LevelKind::Two);
        level.show_fake_tell(&mut ctx);
        assert_eq!(level.pending(), TELL_BURSTS as usize);
        assert!(!level.is_showing_blackhole());
        let actions = level.timeline.due(u64::MAX);
        assert!(actions.iter().all(|a| matches!(a, TellAction::Decoy(_))));
    }

    #[test]
    fn test_cancel_voids_pending() {
        let mut ctx = ctx();
        let mut level = Level::new(LevelKind::One);
        level.show_blackhole(&mut ctx);
        level.show_blackhole(&mut ctx);
        level.cancel_pending();
        assert_eq!(level.pending(), 0);
        assert!(!level.is_showing_blackhole());
    }

    #[test]
    fn test_tell_actions_spawn_sprites() {
        let mut ctx = ctx();
        let mut level = Level::new(LevelKind::One);
        level.perform(TellAction::Burst(Vec2::new(10.0, 10.0)), &mut ctx);
        level.perform(TellAction::Decoy(Vec2::new(20.0, 10.0)), &mut ctx);
        level.perform(TellAction::BlackHole(Vec2::new(30.0, 10.0)), &mut ctx);
        assert_eq!(ctx.registry.drawable_count(), 3);
        assert_eq!(ctx.registry.logic_count(), 3);
    }

    #[test]
    fn test_decoy_looks_like_real_burst() {
        let mut ctx = ctx();
        let mut level = Level::new(LevelKind::Two);
        let pos = Vec2::new(40.0, 40.0);
        level.perform(TellAction::Burst(pos), &mut ctx);
        level.perform(TellAction::Decoy(pos), &mut ctx);

        let systems: Vec<ParticleSystem> = ctx
            .registry
            .drawables()
            .filter_map(|(_, s)| s.borrow().as_particles().cloned())
            .collect();
        assert_eq!(systems.len(), 2);
        let (real, decoy) = (&systems[0], &systems[1]);
        assert_eq!(real.rule, decoy.rule);
        assert_eq!(real.emission, decoy.emission);
        assert_eq!(real.integrator, decoy.integrator);
        assert_eq!(real.color, decoy.color);
        assert_eq!(real.max_age, decoy.max_age);
        assert_eq!(real.emitting_age, decoy.emitting_age);
    }

    #[test]
    fn test_won_when_target_found() {
        let mut ctx = ctx();
        let ids = Level::new(LevelKind::Two).show(&mut ctx);
        assert_eq!(ids.draw, None);
        let handle = ctx.registry.logic(ids.logic.unwrap()).unwrap();

        handle.borrow_mut().step(&mut ctx);
        assert!(!handle.borrow().is_dead());

        ctx.targets_found += 1;
        handle.borrow_mut().step(&mut ctx);
        assert!(handle.borrow().is_dead());
        assert!(handle.borrow().as_level().unwrap().is_won());
    }
}
