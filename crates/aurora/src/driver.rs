//! # Scripted Input
//!
//! Stands in for a browser during offline runs. The pointer circles the
//! viewport center, scroll oscillates over the page, and registered hover
//! targets take turns being hovered with idle gaps in between.

use aurora_core::{HoverId, ScrollDirection, ScrollState, TAU};
use aurora_effects::{InputEvent, InputRouter};

/// Seconds per pointer revolution.
pub const POINTER_PERIOD: f32 = 6.0;

/// Seconds per full scroll down-and-back.
pub const SCROLL_PERIOD: f32 = 10.0;

/// Scrollable page length (pixels).
const PAGE_LENGTH: f32 = 4_000.0;

/// Scroll velocity at mid-page.
const PEAK_VELOCITY: f32 = 2.0;

/// Seconds per hover slot. Odd slots hover nothing.
const HOVER_SLOT: f32 = 1.5;

/// Pointer orbit radius as a share of the shorter viewport side.
const ORBIT_SHARE: f32 = 0.35;

/// Deterministic input script.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    width: f32,
    height: f32,
    hover_targets: Vec<HoverId>,
    hovered: Option<HoverId>,
    resized: bool,
}

impl ScriptedInput {
    /// Creates a script for a `width × height` viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            hover_targets: Vec::new(),
            hovered: None,
            resized: false,
        }
    }

    /// Cycles hover through `targets` in order.
    #[must_use]
    pub fn with_hover_targets(mut self, targets: Vec<HoverId>) -> Self {
        self.hover_targets = targets;
        self
    }

    /// Pointer position in client pixels at `t`.
    #[must_use]
    pub fn pointer_at(&self, t: f32) -> (f32, f32) {
        let radius = self.width.min(self.height) * ORBIT_SHARE;
        let angle = t / POINTER_PERIOD * TAU;
        (
            self.width * 0.5 + angle.cos() * radius,
            self.height * 0.5 + angle.sin() * radius,
        )
    }

    /// Scroll sample at `t`: progress eases 0 → 1 → 0 over [`SCROLL_PERIOD`].
    #[must_use]
    pub fn scroll_at(t: f32) -> ScrollState {
        let phase = t / SCROLL_PERIOD * TAU;
        let progress = 0.5 - phase.cos() * 0.5;
        let velocity = phase.sin() * PEAK_VELOCITY;
        let direction = if velocity > 1e-3 {
            ScrollDirection::Forward
        } else if velocity < -1e-3 {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Idle
        };

        ScrollState {
            progress,
            velocity,
            direction,
            offset: progress * PAGE_LENGTH,
            limit: PAGE_LENGTH,
        }
        .sanitized()
    }

    /// Target hovered at `t`, if any.
    #[must_use]
    pub fn hover_at(&self, t: f32) -> Option<HoverId> {
        if self.hover_targets.is_empty() || t.is_nan() || t < 0.0 {
            return None;
        }
        // Float to int casts saturate
        let slot = (t / HOVER_SLOT) as usize;
        if slot % 2 == 1 {
            return None;
        }
        Some(self.hover_targets[(slot / 2) % self.hover_targets.len()])
    }

    /// Routes this frame's events: a resize on the first call, then pointer,
    /// scroll and any hover change.
    pub fn drive(&mut self, t: f32, router: &mut InputRouter) {
        if !self.resized {
            router.apply(InputEvent::Resized {
                width: self.width,
                height: self.height,
            });
            self.resized = true;
        }

        let (x, y) = self.pointer_at(t);
        router.apply(InputEvent::PointerMoved { x, y });
        router.apply(InputEvent::Scrolled(Self::scroll_at(t)));

        let next = self.hover_at(t);
        if next != self.hovered {
            if let Some(previous) = self.hovered {
                router.apply(InputEvent::HoverChanged {
                    target: previous,
                    hovered: false,
                });
            }
            if let Some(target) = next {
                router.apply(InputEvent::HoverChanged {
                    target,
                    hovered: true,
                });
            }
            self.hovered = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::SignalBus;

    #[test]
    fn test_pointer_stays_in_viewport() {
        let script = ScriptedInput::new(800.0, 600.0);
        for step in 0..600 {
            let (x, y) = script.pointer_at(step as f32 / 60.0);
            assert!((0.0..=800.0).contains(&x));
            assert!((0.0..=600.0).contains(&y));
        }
    }

    #[test]
    fn test_scroll_oscillates() {
        let start = ScriptedInput::scroll_at(0.0);
        assert_eq!(start.direction, ScrollDirection::Idle);
        assert!(start.progress.abs() < 1e-6);

        let rising = ScriptedInput::scroll_at(SCROLL_PERIOD * 0.25);
        assert_eq!(rising.direction, ScrollDirection::Forward);
        assert!((rising.velocity - PEAK_VELOCITY).abs() < 1e-4);

        let falling = ScriptedInput::scroll_at(SCROLL_PERIOD * 0.75);
        assert_eq!(falling.direction, ScrollDirection::Backward);
        assert!(falling.velocity < 0.0);

        let bottom = ScriptedInput::scroll_at(SCROLL_PERIOD * 0.5);
        assert!((bottom.progress - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hover_takes_turns() {
        let bus = SignalBus::new();
        let a = bus.register_hover_target().unwrap();
        let b = bus.register_hover_target().unwrap();
        let script = ScriptedInput::new(800.0, 600.0).with_hover_targets(vec![a, b]);

        assert_eq!(script.hover_at(0.5), Some(a));
        assert_eq!(script.hover_at(2.0), None);
        assert_eq!(script.hover_at(3.5), Some(b));
        assert_eq!(script.hover_at(6.5), Some(a));
        assert_eq!(script.hover_at(f32::NAN), None);
    }

    #[test]
    fn test_drive_writes_bus() {
        let bus = SignalBus::new();
        let a = bus.register_hover_target().unwrap();
        let b = bus.register_hover_target().unwrap();
        let mut router = InputRouter::new(&bus).unwrap();
        let mut script = ScriptedInput::new(800.0, 600.0).with_hover_targets(vec![a, b]);

        script.drive(0.1, &mut router);
        let snapshot = bus.snapshot();
        assert_eq!(snapshot.viewport.width, 800.0);
        assert!(snapshot.pointer.x > 0.0);
        assert!(snapshot.is_hovered(a));

        script.drive(3.1, &mut router);
        let snapshot = bus.snapshot();
        assert!(!snapshot.is_hovered(a));
        assert!(snapshot.is_hovered(b));
        assert!(snapshot.scroll.progress > 0.0);
    }
}
