//! # AURORA Headless Preview
//!
//! Mounts every section on a headless renderer and drives them with
//! scripted input at a fixed 60 Hz step, then prints per-section stats.
//!
//! Run with: cargo run --release --bin aurora_preview -- [config.toml] [frames]

#![allow(clippy::cast_precision_loss)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use aurora::core::{AnimationConfig, FrameClock, FrameTime, SignalBus};
use aurora::effects::{
    trail_feed, HeadlessRenderer, InputRouter, MouseTrailEmitter, RenderLoop, SceneComposer,
    SceneId, Section,
};
use aurora::ScriptedInput;

/// Fixed simulation step.
const STEP: f32 = 1.0 / 60.0;

/// Frames when none are given.
const DEFAULT_FRAMES: u32 = 600;

/// Preview viewport.
const VIEWPORT: (f32, f32) = (1280.0, 720.0);

/// Parses `[config.toml] [frames]`. A lone numeric argument is the frame count.
fn parse_args() -> (Option<String>, u32) {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => (None, DEFAULT_FRAMES),
        [only] => match only.parse() {
            Ok(frames) => (None, frames),
            Err(_) => (Some(only.clone()), DEFAULT_FRAMES),
        },
        [path, frames, ..] => (Some(path.clone()), frames.parse().unwrap_or(DEFAULT_FRAMES)),
    }
}

fn load_config(path: Option<&str>) -> AnimationConfig {
    let Some(path) = path else {
        return AnimationConfig {
            seed: Some(42),
            ..AnimationConfig::default()
        };
    };
    match AnimationConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    }
}

/// Ticks one section alone for `frames` frames and returns the mean tick time.
fn time_section(section: Section, config: &AnimationConfig, frames: u32) -> Option<Duration> {
    let bus = SignalBus::new();
    let mut renderer = HeadlessRenderer::new();
    let mut composer = SceneComposer::new(SceneId(0), section, config, &bus).ok()?;
    composer.mount(&mut renderer);

    let mut input = bus.snapshot();
    let start = Instant::now();
    for frame in 1..=frames {
        let t = frame as f32 * STEP;
        input.scroll = ScriptedInput::scroll_at(t);
        composer.tick(FrameTime::at(t, STEP, u64::from(frame)), &input);
    }
    let elapsed = start.elapsed();
    composer.unmount(&mut renderer);

    Some(elapsed / frames.max(1))
}

fn main() {
    let (config_path, frames) = parse_args();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    AURORA PREVIEW v0.1.0");
    println!("                         HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Config:   {}", config_path.as_deref().unwrap_or("built-in defaults"));
    println!("  Frames:   {frames} @ 60 Hz");
    println!("  Viewport: {}x{}", VIEWPORT.0, VIEWPORT.1);
    println!();

    let config = load_config(config_path.as_deref());

    // === WIRING ===
    let bus = SignalBus::new();
    let (feed_tx, feed_rx) = trail_feed(config.input.trail_feed_capacity);
    let mut router = match InputRouter::new(&bus) {
        Ok(router) => router.with_trail_feed(feed_tx),
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    };
    let trail = MouseTrailEmitter::new(&config.trail, config.resolve_seed()).with_feed(feed_rx);

    let mut render_loop = match RenderLoop::new(&config, Arc::clone(&bus), HeadlessRenderer::new())
    {
        Ok(render_loop) => render_loop
            .with_clock(FrameClock::manual(&config.clock))
            .with_trail(trail),
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    };

    println!("🏗️  Mounting sections...");
    for section in Section::ALL {
        match render_loop.mount_section(section) {
            Ok(id) => println!("   ✓ {:<8} scene {}", section.label(), id.0),
            Err(e) => {
                eprintln!("   ✗ {:<8} {e}", section.label());
                std::process::exit(1);
            }
        }
    }

    let hover_targets = render_loop
        .scenes()
        .iter()
        .flat_map(|scene| scene.hover_ids().iter().copied())
        .collect();
    let mut script = ScriptedInput::new(VIEWPORT.0, VIEWPORT.1).with_hover_targets(hover_targets);

    // === RUN ===
    println!();
    println!("▶️  Running {frames} frames...");
    let run_start = Instant::now();
    let mut peak_trail = 0;
    let mut instances = 0;
    for frame in 1..=frames {
        render_loop.clock_mut().advance(STEP);
        script.drive(frame as f32 * STEP, &mut router);
        let Some(result) = render_loop.frame() else {
            break;
        };
        peak_trail = peak_trail.max(result.trail_particles);
        instances = result.instances_updated;
    }
    let run_time = run_start.elapsed();
    tracing::info!("Preview ran {} frames in {:?}", frames, run_time);

    // === REPORT ===
    println!();
    println!("┌─ SECTIONS ─────────────────────────────────────────────────────────┐");
    println!(
        "│ {:<8} {:>8} {:>8} {:>10} {:>12}",
        "section", "systems", "surfaces", "instances", "tick (µs)"
    );
    for scene in render_loop.scenes() {
        let tick_us = time_section(scene.section(), &config, frames)
            .map_or_else(|| "-".to_owned(), |d| format!("{:.1}", d.as_secs_f64() * 1e6));
        println!(
            "│ {:<8} {:>8} {:>8} {:>10} {:>12}",
            scene.section().label(),
            scene.updater_count(),
            scene.surface_count(),
            scene.instance_count(),
            tick_us
        );
    }
    println!("└────────────────────────────────────────────────────────────────────┘");

    let loop_stats = render_loop.stats();
    let render_stats = render_loop.renderer().stats();
    println!();
    println!("┌─ FRAME LOOP ───────────────────────────────────────────────────────┐");
    println!("│ Wall Time:          {:.2}s", run_time.as_secs_f64());
    println!("│ Frames:             {}", loop_stats.total_frames);
    println!("│ Avg Frame:          {} µs", loop_stats.avg_frame_time_us);
    println!("│ Worst Frame:        {} µs", loop_stats.worst_frame_time_us);
    println!("│ Over Budget:        {}", loop_stats.frames_over_budget);
    println!("│ Instances / Frame:  {instances}");
    println!("└────────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ RENDERER ─────────────────────────────────────────────────────────┐");
    println!("│ Live Surfaces:      {}", render_stats.surfaces);
    println!("│ Point Lights:       {}", render_stats.lights);
    println!("│ Total Uploads:      {}", render_loop.renderer().total_uploads());
    println!(
        "│ Total Bytes:        {:.2} MiB",
        render_loop.renderer().total_bytes() as f64 / (1024.0 * 1024.0)
    );
    println!("└────────────────────────────────────────────────────────────────────┘");

    println!();
    println!("┌─ INPUT & TRAIL ────────────────────────────────────────────────────┐");
    println!("│ Events Applied:     {}", router.applied());
    println!("│ Samples Dropped:    {}", router.dropped_samples());
    if let Some(trail) = render_loop.trail() {
        let stats = trail.stats();
        println!("│ Trail Spawned:      {}", stats.spawned);
        println!("│ Trail Expired:      {}", stats.expired);
        println!("│ Trail Dropped:      {}", stats.dropped);
        println!("│ Trail Peak:         {peak_trail} / {}", trail.capacity());
    }
    println!("└────────────────────────────────────────────────────────────────────┘");

    render_loop.stop();
    println!();
    println!("✓ Preview complete");
}
