//! # Instance Updater Contract
//!
//! Every visual system implements [`InstanceUpdater`]. Data flows one way
//! per frame:
//!
//! ```text
//! FrameClock ─┐
//!             ├─► FrameContext ─► update() ─► own surfaces ─► Renderer
//! SignalBus  ─┘
//! ```
//!
//! An updater never reads another updater's state; the only shared input is
//! the snapshot inside [`FrameContext`].

use aurora_core::{FrameTime, InputSnapshot, PointerState, Vec2};

use crate::descriptor::DrawDescriptor;
use crate::instancing::{InstanceBuffer, LineBuffer, TargetLink};

/// Half extents of the visible plane at z = 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewExtent {
    /// Half the visible width in world units.
    pub half_width: f32,
    /// Half the visible height in world units.
    pub half_height: f32,
}

impl Default for ViewExtent {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            half_height: 1.0,
        }
    }
}

impl ViewExtent {
    /// Maps a normalized pointer onto the z = 0 plane.
    #[inline]
    #[must_use]
    pub fn project(&self, pointer: PointerState) -> Vec2 {
        let p = pointer.sanitized();
        Vec2::new(p.x * self.half_width, p.y * self.half_height)
    }
}

/// Everything an updater may read during one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameContext {
    /// Frame timing.
    pub time: FrameTime,
    /// Input snapshot taken at the start of the frame.
    pub input: InputSnapshot,
    /// Visible extent for the section's camera.
    pub view: ViewExtent,
}

impl FrameContext {
    /// Elapsed seconds.
    #[inline]
    #[must_use]
    pub const fn t(&self) -> f32 {
        self.time.elapsed
    }

    /// Clamped frame delta.
    #[inline]
    #[must_use]
    pub const fn dt(&self) -> f32 {
        self.time.delta
    }
}

/// Creates surfaces during mount.
///
/// The implementor hands the strong target to the renderer and returns a
/// weak link.
pub trait SurfaceMounter {
    /// Creates an instanced surface with `len` slots.
    fn instances(
        &mut self,
        label: &str,
        descriptor: DrawDescriptor,
        len: usize,
    ) -> TargetLink<InstanceBuffer>;

    /// Creates a line surface with `lines` polylines of `points` points.
    fn lines(
        &mut self,
        label: &str,
        descriptor: DrawDescriptor,
        lines: usize,
        points: usize,
    ) -> TargetLink<LineBuffer>;
}

/// Per-frame transform function for one visual system.
pub trait InstanceUpdater: Send {
    /// Stable system name for logs.
    fn name(&self) -> &'static str;

    /// Creates the system's surfaces. Called once per mount.
    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter);

    /// Writes this frame's transforms. Never fails; a dead link is a no-op.
    fn update(&mut self, frame: &FrameContext);

    /// Instances written per frame.
    fn instance_count(&self) -> usize;
}
