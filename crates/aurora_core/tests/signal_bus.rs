//! Cross-thread behavior of the signal bus.

use std::thread;

use aurora_core::{PointerState, ScrollDirection, ScrollState, SignalBus, Viewport};

#[test]
fn test_writer_thread_reader_thread() {
    let bus = SignalBus::new();
    let mut pointer = bus.pointer_writer().unwrap();
    let mut scroll = bus.scroll_writer().unwrap();

    let writer = thread::spawn(move || {
        pointer.resize(Viewport::new(1000.0, 500.0));
        for i in 0..=1000 {
            pointer.move_client(i as f32, 250.0);
            scroll.publish(ScrollState {
                progress: i as f32 / 1000.0,
                velocity: 1.0,
                direction: ScrollDirection::Forward,
                offset: i as f32,
                limit: 1000.0,
            });
        }
    });

    let reader_bus = bus.clone();
    let reader = thread::spawn(move || {
        for _ in 0..1000 {
            let snap = reader_bus.snapshot();
            // Never a torn or out-of-range value
            assert!((-1.0..=1.0).contains(&snap.pointer.x));
            assert!((0.0..=1.0).contains(&snap.scroll.progress));
        }
    });

    writer.join().unwrap();
    reader.join().unwrap();

    let snap = bus.snapshot();
    assert_eq!(snap.pointer, PointerState { x: 1.0, y: 0.0 });
    assert_eq!(snap.scroll.progress, 1.0);
}

#[test]
fn test_writer_released_when_thread_ends() {
    let bus = SignalBus::new();
    let pointer = bus.pointer_writer().unwrap();
    assert!(bus.pointer_writer().is_none());

    thread::spawn(move || drop(pointer)).join().unwrap();
    assert!(bus.pointer_writer().is_some());
}

#[test]
fn test_snapshot_before_any_event_is_neutral() {
    let bus = SignalBus::new();
    let snap = bus.snapshot();
    assert_eq!(snap.pointer, PointerState::CENTER);
    assert_eq!(snap.scroll.velocity, 0.0);
    assert_eq!(snap.scroll.direction, ScrollDirection::Idle);
}
