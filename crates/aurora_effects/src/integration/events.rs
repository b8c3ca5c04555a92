//! Host input events routed into the signal bus.
//!
//! ```text
//! host ──InputEvent──► InputRouter ──► SignalBus (pointer, scroll, hover)
//!                           │
//!                           └──PointerSample──► trail feed ──► MouseTrailEmitter
//! ```
//!
//! The router holds every writer handle, so it is the single writer of
//! each signal field.

use std::sync::Arc;

use aurora_core::{
    HoverId, HoverWriter, PointerWriter, ScrollState, ScrollWriter, SignalBus, Viewport,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::error::{EffectsError, EffectsResult};
use crate::trail::PointerSample;

/// Events the host forwards from its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in client pixels.
    PointerMoved {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
    },
    /// Viewport resized, in pixels.
    Resized {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// Smooth-scroll sample.
    Scrolled(ScrollState),
    /// Pointer entered or left a hover target.
    HoverChanged {
        /// Target whose state changed.
        target: HoverId,
        /// New state.
        hovered: bool,
    },
}

/// Creates the bounded pointer feed between router and trail emitter.
#[must_use]
pub fn trail_feed(capacity: usize) -> (Sender<PointerSample>, Receiver<PointerSample>) {
    bounded(capacity.max(1))
}

/// Applies [`InputEvent`]s to the bus.
#[derive(Debug)]
pub struct InputRouter {
    pointer: PointerWriter,
    scroll: ScrollWriter,
    hover: HoverWriter,
    trail: Option<Sender<PointerSample>>,
    applied: u64,
    dropped_samples: u64,
}

impl InputRouter {
    /// Claims every writer on `bus`.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::WriterClaimed`] if another handle already
    /// owns one of the fields.
    pub fn new(bus: &Arc<SignalBus>) -> EffectsResult<Self> {
        Ok(Self {
            pointer: bus
                .pointer_writer()
                .ok_or(EffectsError::WriterClaimed("pointer"))?,
            scroll: bus
                .scroll_writer()
                .ok_or(EffectsError::WriterClaimed("scroll"))?,
            hover: bus
                .hover_writer()
                .ok_or(EffectsError::WriterClaimed("hover"))?,
            trail: None,
            applied: 0,
            dropped_samples: 0,
        })
    }

    /// Also forwards raw pointer samples to a trail emitter.
    #[must_use]
    pub fn with_trail_feed(mut self, feed: Sender<PointerSample>) -> Self {
        self.trail = Some(feed);
        self
    }

    /// Events applied so far.
    #[must_use]
    pub const fn applied(&self) -> u64 {
        self.applied
    }

    /// Pointer samples dropped because the trail feed was full.
    #[must_use]
    pub const fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    /// Publishes one event. Never blocks.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer.move_client(x, y);
                self.forward(PointerSample::new(x, y));
            }
            InputEvent::Resized { width, height } => {
                self.pointer.resize(Viewport::new(width, height));
            }
            InputEvent::Scrolled(state) => self.scroll.publish(state),
            InputEvent::HoverChanged { target, hovered } => self.hover.set(target, hovered),
        }
        self.applied += 1;
    }

    fn forward(&mut self, sample: PointerSample) {
        let Some(feed) = &self.trail else {
            return;
        };
        match feed.try_send(sample) {
            Ok(()) => {}
            // Keep the frame rate; the trail just misses a sample
            Err(TrySendError::Full(_)) => self.dropped_samples += 1,
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("Trail feed disconnected, no longer forwarding pointer samples");
                self.trail = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_publishes() {
        let bus = SignalBus::new();
        let target = bus.register_hover_target().unwrap();
        let mut router = InputRouter::new(&bus).unwrap();

        router.apply(InputEvent::Resized { width: 200.0, height: 100.0 });
        router.apply(InputEvent::PointerMoved { x: 200.0, y: 0.0 });
        router.apply(InputEvent::HoverChanged { target, hovered: true });

        let snapshot = bus.snapshot();
        assert_eq!(snapshot.pointer.x, 1.0);
        assert_eq!(snapshot.pointer.y, 1.0);
        assert!(snapshot.is_hovered(target));
        assert_eq!(router.applied(), 3);
    }

    #[test]
    fn test_second_router_rejected() {
        let bus = SignalBus::new();
        let _first = InputRouter::new(&bus).unwrap();
        assert!(matches!(
            InputRouter::new(&bus),
            Err(EffectsError::WriterClaimed("pointer"))
        ));
    }

    #[test]
    fn test_full_feed_drops_samples() {
        let bus = SignalBus::new();
        let (tx, rx) = trail_feed(2);
        let mut router = InputRouter::new(&bus).unwrap().with_trail_feed(tx);

        for i in 0..5 {
            router.apply(InputEvent::PointerMoved { x: i as f32, y: 0.0 });
        }
        assert_eq!(rx.len(), 2);
        assert_eq!(router.dropped_samples(), 3);
    }
}
