//! Blackhole Hunt entry point
//!
//! Runs the scene headless against a recording surface. Usage:
//! `blackhole-hunt [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use blackhole_hunt::renderer::RecordingSurface;
    use blackhole_hunt::{Scene, Settings};

    env_logger::init();
    log::info!("Blackhole Hunt (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(30.0);

    let mut scene = Scene::new(&settings);
    let mut surface = RecordingSurface::new(settings.width, settings.height);
    if !scene.start_level(settings.start_level) {
        log::warn!("No level {} (starting from the first)", settings.start_level);
        scene.start_level(0);
    }

    // Feed the clock in render-sized slices, as a display loop would
    let frame_ms = settings.render_tick_ms.max(1.0);
    let mut elapsed = 0.0;
    let mut logic_ticks = 0u64;
    let mut render_ticks = 0u64;
    let mut peak_drawables = 0;
    while elapsed < seconds * 1000.0 && !scene.is_complete() {
        let ticks = scene.advance(frame_ms, &mut surface);
        logic_ticks += u64::from(ticks.logic);
        if ticks.render {
            render_ticks += 1;
        }
        peak_drawables = peak_drawables.max(scene.entity_counts().0);
        elapsed += frame_ms;
    }

    let (drawables, logic) = scene.entity_counts();
    log::info!(
        "Ran {:.1}s: {} logic ticks, {} frames, {} targets found",
        elapsed / 1000.0,
        logic_ticks,
        render_ticks,
        scene.context().targets_found
    );
    log::info!(
        "Level {:?}, {} drawables ({} peak), {} logic, last frame {} lines",
        scene.current_level().map(|l| l.name()),
        drawables,
        peak_drawables,
        logic,
        surface.line_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host
}
