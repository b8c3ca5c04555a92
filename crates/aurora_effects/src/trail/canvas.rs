//! 2D overlay output for the trail.

use aurora_core::{Rgba, Vec2};

/// Target the trail draws onto each frame.
pub trait TrailCanvas {
    /// Clears the whole overlay.
    fn clear(&mut self);

    /// Fills a disc with a radial gradient from `inner` at the center to
    /// `outer` at `radius`.
    fn radial_blob(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba);
}

/// One recorded canvas call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Clear the overlay.
    Clear,
    /// Radial gradient disc.
    Blob {
        /// Center in client pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Center color.
        inner: Rgba,
        /// Edge color.
        outer: Rgba,
    },
}

/// Canvas that records commands for a renderer to replay.
///
/// Storage is reserved up front and reused across frames.
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    width: f32,
    height: f32,
}

impl DrawList {
    /// Creates a list sized for `capacity` commands on a `width × height` overlay.
    #[must_use]
    pub fn with_capacity(capacity: usize, width: f32, height: f32) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            width,
            height,
        }
    }

    /// Matches the overlay to a new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Overlay size.
    #[must_use]
    pub const fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Blob commands only.
    pub fn blobs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Blob { .. }))
    }
}

impl TrailCanvas for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn radial_blob(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba) {
        // Degenerate blobs draw nothing on a real canvas
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        self.commands.push(DrawCommand::Blob {
            center,
            radius,
            inner,
            outer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_list() {
        let mut list = DrawList::with_capacity(8, 100.0, 100.0);
        let c = Rgba::new(1.0, 1.0, 1.0, 1.0);
        list.radial_blob(Vec2::new(1.0, 1.0), 2.0, c, c);
        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_degenerate_blob_skipped() {
        let mut list = DrawList::with_capacity(8, 100.0, 100.0);
        let c = Rgba::default();
        list.radial_blob(Vec2::ZERO, 0.0, c, c);
        list.radial_blob(Vec2::new(f32::NAN, 0.0), 3.0, c, c);
        assert!(list.is_empty());
    }
}
