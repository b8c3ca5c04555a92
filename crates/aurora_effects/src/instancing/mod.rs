//! Instance surfaces shared between updaters and the renderer.
//!
//! ## Key Concepts
//!
//! - **InstanceBuffer**: one transform slot per instance, fixed length
//! - **LineBuffer**: fixed number of polylines with fixed point counts
//! - **RenderTarget / TargetLink**: the renderer owns the surface, the
//!   updater only holds a weak link and skips writes once it is gone

mod buffer;
mod instance_data;
mod target;

pub use buffer::{InstanceBuffer, LineBuffer};
pub use instance_data::{GroupTransform, InstanceTransform};
pub use target::{RenderTarget, TargetLink};

/// A mounted surface as handed to the renderer.
#[derive(Debug, Clone)]
pub enum Surface {
    /// Instanced mesh.
    Instances(RenderTarget<InstanceBuffer>),
    /// Polylines.
    Lines(RenderTarget<LineBuffer>),
}

impl Surface {
    /// The instance target, if this is an instanced surface.
    #[must_use]
    pub fn as_instances(&self) -> Option<&RenderTarget<InstanceBuffer>> {
        match self {
            Self::Instances(target) => Some(target),
            Self::Lines(_) => None,
        }
    }

    /// The line target, if this is a line surface.
    #[must_use]
    pub fn as_lines(&self) -> Option<&RenderTarget<LineBuffer>> {
        match self {
            Self::Lines(target) => Some(target),
            Self::Instances(_) => None,
        }
    }

    /// Number of drawable elements (instances or line points).
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Self::Instances(target) => target.lock().len(),
            Self::Lines(target) => {
                let lines = target.lock();
                lines.line_count() * lines.points_per_line()
            }
        }
    }

    /// Consumes the dirty flag and returns the bytes to upload, if any.
    ///
    /// The callback runs under the surface lock.
    pub fn upload_if_dirty<R>(&self, upload: impl FnOnce(&[u8]) -> R) -> Option<R> {
        match self {
            Self::Instances(target) => {
                let mut buffer = target.lock();
                buffer.take_dirty().then(|| upload(buffer.as_bytes()))
            }
            Self::Lines(target) => {
                let mut lines = target.lock();
                lines.take_dirty().then(|| upload(lines.as_bytes()))
            }
        }
    }
}
