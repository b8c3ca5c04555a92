//! # Signal Bus
//!
//! Process-wide input state with one writer handle per field.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::hover::{HoverId, HoverMask, MAX_HOVER_TARGETS};
use super::pointer::{PointerState, Viewport};
use super::scroll::ScrollState;

/// Copy of every signal, taken once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Normalized pointer.
    pub pointer: PointerState,
    /// Latest scroll sample.
    pub scroll: ScrollState,
    /// Hovered targets.
    pub hover: HoverMask,
    /// Current viewport.
    pub viewport: Viewport,
}

impl InputSnapshot {
    /// True if `id` is hovered in this snapshot.
    #[inline]
    #[must_use]
    pub const fn is_hovered(&self, id: HoverId) -> bool {
        self.hover.contains(id)
    }
}

/// Shared input state.
///
/// ## Usage
///
/// ```rust,ignore
/// let bus = SignalBus::new();
/// let mut pointer = bus.pointer_writer().expect("first claim");
///
/// pointer.move_client(320.0, 200.0);
/// let snapshot = bus.snapshot();
/// ```
#[derive(Debug)]
pub struct SignalBus {
    pointer: RwLock<PointerState>,
    viewport: RwLock<Viewport>,
    scroll: RwLock<ScrollState>,
    hover: AtomicU64,
    /// One bit per allocated hover id.
    hover_ids: AtomicU64,

    pointer_claimed: AtomicBool,
    scroll_claimed: AtomicBool,
    hover_claimed: AtomicBool,

    /// Cleared at teardown; later writes are dropped.
    attached: AtomicBool,
}

impl SignalBus {
    /// Creates a bus with neutral signals.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pointer: RwLock::new(PointerState::CENTER),
            viewport: RwLock::new(Viewport::default()),
            scroll: RwLock::new(ScrollState::default()),
            hover: AtomicU64::new(0),
            hover_ids: AtomicU64::new(0),
            pointer_claimed: AtomicBool::new(false),
            scroll_claimed: AtomicBool::new(false),
            hover_claimed: AtomicBool::new(false),
            attached: AtomicBool::new(true),
        })
    }

    /// Claims the pointer writer. `None` while another handle is alive.
    #[must_use]
    pub fn pointer_writer(self: &Arc<Self>) -> Option<PointerWriter> {
        claim(&self.pointer_claimed).then(|| PointerWriter {
            bus: Arc::clone(self),
        })
    }

    /// Claims the scroll writer. `None` while another handle is alive.
    #[must_use]
    pub fn scroll_writer(self: &Arc<Self>) -> Option<ScrollWriter> {
        claim(&self.scroll_claimed).then(|| ScrollWriter {
            bus: Arc::clone(self),
        })
    }

    /// Claims the hover writer. `None` while another handle is alive.
    #[must_use]
    pub fn hover_writer(self: &Arc<Self>) -> Option<HoverWriter> {
        claim(&self.hover_claimed).then(|| HoverWriter {
            bus: Arc::clone(self),
        })
    }

    /// Allocates the lowest free hover target id. `None` once all ids are taken.
    pub fn register_hover_target(&self) -> Option<HoverId> {
        self.hover_ids
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken != u64::MAX).then(|| taken | HoverId(lowest_free(taken)).bit())
            })
            .ok()
            .map(|taken| HoverId(lowest_free(taken)))
    }

    /// Returns `id` to the pool and clears its hover flag.
    ///
    /// Releasing an id that is not allocated is a no-op.
    pub fn release_hover_target(&self, id: HoverId) {
        if id.index() >= MAX_HOVER_TARGETS {
            return;
        }
        self.hover.fetch_and(!id.bit(), Ordering::AcqRel);
        self.hover_ids.fetch_and(!id.bit(), Ordering::AcqRel);
    }

    /// Number of hover ids currently allocated.
    #[must_use]
    pub fn hover_targets_in_use(&self) -> u32 {
        self.hover_ids.load(Ordering::Acquire).count_ones()
    }

    /// Copies the latest value of every field.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: *self.pointer.read(),
            scroll: *self.scroll.read(),
            hover: HoverMask(self.hover.load(Ordering::Acquire)),
            viewport: *self.viewport.read(),
        }
    }

    /// Stops accepting writes. Idempotent.
    pub fn detach(&self) {
        if self.attached.swap(false, Ordering::AcqRel) {
            tracing::debug!("Signal bus detached");
        }
    }

    /// False after [`SignalBus::detach`].
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

fn lowest_free(taken: u64) -> u32 {
    (!taken).trailing_zeros()
}

fn claim(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::AcqRel)
}

/// Exclusive writer for pointer position and viewport size.
#[derive(Debug)]
pub struct PointerWriter {
    bus: Arc<SignalBus>,
}

impl PointerWriter {
    /// Records a pointer move in client pixels and returns the normalized value.
    pub fn move_client(&mut self, client_x: f32, client_y: f32) -> PointerState {
        let viewport = *self.bus.viewport.read();
        let state = PointerState::from_client(client_x, client_y, viewport);
        self.set(state);
        state
    }

    /// Records an already-normalized pointer.
    pub fn set(&mut self, state: PointerState) {
        if self.bus.is_attached() {
            *self.bus.pointer.write() = state.sanitized();
        }
    }

    /// Records a viewport resize.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.bus.is_attached() {
            *self.bus.viewport.write() = viewport;
        }
    }
}

impl Drop for PointerWriter {
    fn drop(&mut self) {
        self.bus.pointer_claimed.store(false, Ordering::Release);
    }
}

/// Exclusive writer for scroll telemetry.
#[derive(Debug)]
pub struct ScrollWriter {
    bus: Arc<SignalBus>,
}

impl ScrollWriter {
    /// Replaces the scroll sample.
    pub fn publish(&mut self, state: ScrollState) {
        if self.bus.is_attached() {
            *self.bus.scroll.write() = state.sanitized();
        }
    }
}

impl Drop for ScrollWriter {
    fn drop(&mut self) {
        self.bus.scroll_claimed.store(false, Ordering::Release);
    }
}

/// Exclusive writer for hover flags.
#[derive(Debug)]
pub struct HoverWriter {
    bus: Arc<SignalBus>,
}

impl HoverWriter {
    /// Sets or clears the hover flag of one target.
    pub fn set(&mut self, id: HoverId, hovered: bool) {
        if !self.bus.is_attached() {
            return;
        }
        let _ = self
            .bus
            .hover
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |mask| {
                Some(HoverMask(mask).with(id, hovered).0)
            });
    }
}

impl Drop for HoverWriter {
    fn drop(&mut self) {
        self.bus.hover_claimed.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::ScrollDirection;

    #[test]
    fn test_writer_claim_is_exclusive() {
        let bus = SignalBus::new();
        let first = bus.pointer_writer();
        assert!(first.is_some());
        assert!(bus.pointer_writer().is_none());

        drop(first);
        assert!(bus.pointer_writer().is_some());
    }

    #[test]
    fn test_fields_are_independent() {
        let bus = SignalBus::new();
        let _pointer = bus.pointer_writer().unwrap();
        assert!(bus.scroll_writer().is_some());
        assert!(bus.hover_writer().is_some());
    }

    #[test]
    fn test_snapshot_sees_latest_write() {
        let bus = SignalBus::new();
        let mut pointer = bus.pointer_writer().unwrap();
        let mut scroll = bus.scroll_writer().unwrap();

        pointer.resize(Viewport::new(100.0, 100.0));
        pointer.move_client(75.0, 25.0);
        scroll.publish(ScrollState {
            progress: 0.4,
            velocity: -3.0,
            direction: ScrollDirection::Backward,
            offset: 400.0,
            limit: 1000.0,
        });

        let snap = bus.snapshot();
        assert_eq!(snap.pointer, PointerState { x: 0.5, y: 0.5 });
        assert_eq!(snap.scroll.progress, 0.4);
        assert_eq!(snap.scroll.velocity, -3.0);
        assert_eq!(snap.viewport, Viewport::new(100.0, 100.0));
    }

    #[test]
    fn test_hover_targets() {
        let bus = SignalBus::new();
        let a = bus.register_hover_target().unwrap();
        let b = bus.register_hover_target().unwrap();
        assert_ne!(a, b);

        let mut hover = bus.hover_writer().unwrap();
        hover.set(b, true);
        let snap = bus.snapshot();
        assert!(!snap.is_hovered(a));
        assert!(snap.is_hovered(b));
    }

    #[test]
    fn test_hover_ids_exhaust() {
        let bus = SignalBus::new();
        for _ in 0..MAX_HOVER_TARGETS {
            assert!(bus.register_hover_target().is_some());
        }
        assert!(bus.register_hover_target().is_none());
    }

    #[test]
    fn test_released_hover_id_is_reused() {
        let bus = SignalBus::new();
        let ids: Vec<_> = (0..MAX_HOVER_TARGETS)
            .map(|_| bus.register_hover_target().unwrap())
            .collect();
        assert_eq!(bus.hover_targets_in_use(), MAX_HOVER_TARGETS);

        bus.release_hover_target(ids[5]);
        bus.release_hover_target(ids[5]);
        assert_eq!(bus.hover_targets_in_use(), MAX_HOVER_TARGETS - 1);
        assert_eq!(bus.register_hover_target(), Some(ids[5]));
        assert!(bus.register_hover_target().is_none());
    }

    #[test]
    fn test_release_clears_hover_flag() {
        let bus = SignalBus::new();
        let id = bus.register_hover_target().unwrap();
        let mut hover = bus.hover_writer().unwrap();
        hover.set(id, true);
        assert!(bus.snapshot().is_hovered(id));

        bus.release_hover_target(id);
        assert!(!bus.snapshot().is_hovered(id));
        assert_eq!(bus.hover_targets_in_use(), 0);
    }

    #[test]
    fn test_detach_drops_writes() {
        let bus = SignalBus::new();
        let mut pointer = bus.pointer_writer().unwrap();
        pointer.set(PointerState::new(0.5, 0.5));

        bus.detach();
        bus.detach();
        assert!(!bus.is_attached());

        pointer.set(PointerState::new(-1.0, -1.0));
        assert_eq!(bus.snapshot().pointer, PointerState { x: 0.5, y: 0.5 });
    }
}
