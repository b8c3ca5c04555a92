//! Benchmark for per-frame updater cost at shipped populations.
//!
//! TARGET: every section under 2ms per frame, trail under 0.1ms
//!
//! Run with: cargo bench --package aurora_effects --bench updater_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use aurora_core::{AnimationConfig, FrameTime, InputSnapshot, PointerState, ScrollState, SignalBus};
use aurora_effects::{
    DrawList, HeadlessRenderer, MouseTrailEmitter, Renderer, SceneComposer, SceneId, Section,
};

fn mounted(section: Section) -> (SceneComposer, HeadlessRenderer) {
    let config = AnimationConfig {
        seed: Some(42),
        ..AnimationConfig::default()
    };
    let bus = SignalBus::new();
    let mut renderer = HeadlessRenderer::new();
    let mut composer = SceneComposer::new(SceneId(0), section, &config, &bus)
        .expect("default config builds every section");
    composer.mount(&mut renderer);
    (composer, renderer)
}

fn busy_input() -> InputSnapshot {
    InputSnapshot {
        pointer: PointerState::new(0.3, -0.2),
        scroll: ScrollState {
            progress: 0.4,
            velocity: 1.5,
            ..ScrollState::default()
        },
        ..InputSnapshot::default()
    }
}

fn benchmark_sections(c: &mut Criterion) {
    let input = busy_input();
    let mut group = c.benchmark_group("section_tick");

    for section in Section::ALL {
        let (mut composer, _renderer) = mounted(section);
        group.throughput(Throughput::Elements(composer.instance_count() as u64));
        group.bench_function(section.label(), |b| {
            let mut frame = 0u64;
            b.iter(|| {
                frame += 1;
                let time = FrameTime::at(frame as f32 / 60.0, 1.0 / 60.0, frame);
                black_box(composer.tick(time, black_box(&input)))
            });
        });
    }

    group.finish();
}

fn benchmark_contact_with_present(c: &mut Criterion) {
    let input = busy_input();
    let overlay = DrawList::with_capacity(2, 1920.0, 1080.0);
    let (mut composer, mut renderer) = mounted(Section::Contact);

    c.bench_function("contact_tick_and_present", |b| {
        let mut frame = 0u64;
        b.iter(|| {
            frame += 1;
            let time = FrameTime::at(frame as f32 / 60.0, 1.0 / 60.0, frame);
            composer.tick(time, &input);
            renderer.present(&time, &overlay);
            black_box(renderer.stats().bytes_uploaded)
        });
    });
}

fn benchmark_trail(c: &mut Criterion) {
    let config = AnimationConfig::default();
    let mut trail = MouseTrailEmitter::new(&config.trail, 42);
    let mut overlay = DrawList::with_capacity(config.trail.capacity + 2, 1920.0, 1080.0);

    c.bench_function("trail_move_and_tick", |b| {
        let mut step = 0u32;
        b.iter(|| {
            step = step.wrapping_add(1);
            let angle = step as f32 * 0.05;
            trail.on_pointer_move(960.0 + angle.cos() * 400.0, 540.0 + angle.sin() * 300.0);
            trail.tick(&mut overlay);
            black_box(overlay.len())
        });
    });
}

criterion_group!(
    benches,
    benchmark_sections,
    benchmark_contact_with_present,
    benchmark_trail
);
criterion_main!(benches);
