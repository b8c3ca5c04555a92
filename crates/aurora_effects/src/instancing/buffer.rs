//! Fixed-length surface buffers.
//!
//! Allocated once at mount. Slot `i` always belongs to parameter set `i`;
//! writes overwrite in place and never change the length.

use aurora_core::{Rgb, Vec3};

use super::instance_data::{GroupTransform, InstanceTransform};

/// One transform per instance plus a surface-wide root transform.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    /// Instance slots, fixed at creation.
    instances: Box<[InstanceTransform]>,
    /// Root transform applied to every instance.
    root: GroupTransform,
    /// Set by writes, cleared by the renderer on upload.
    dirty: bool,
}

impl InstanceBuffer {
    /// Allocates `len` identity slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            instances: vec![InstanceTransform::IDENTITY; len].into_boxed_slice(),
            root: GroupTransform::IDENTITY,
            dirty: true,
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True for a zero-length buffer.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Overwrites slot `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn write(&mut self, index: usize, transform: InstanceTransform) {
        if let Some(slot) = self.instances.get_mut(index) {
            *slot = transform.sanitized();
            self.dirty = true;
        }
    }

    /// Sets the root transform.
    pub fn set_root(&mut self, root: GroupTransform) {
        self.root = root.sanitized();
        self.dirty = true;
    }

    /// Root transform.
    #[must_use]
    pub const fn root(&self) -> GroupTransform {
        self.root
    }

    /// Reads one slot.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&InstanceTransform> {
        self.instances.get(index)
    }

    /// All slots.
    #[must_use]
    pub fn instances(&self) -> &[InstanceTransform] {
        &self.instances
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Slot data as raw bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Fixed set of polylines, each with the same number of points.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// Points per line.
    points_per_line: usize,
    /// `line_count * points_per_line` positions, line-major.
    positions: Box<[Vec3]>,
    /// One color per line.
    colors: Box<[Rgb]>,
    /// Root transform applied to every line.
    root: GroupTransform,
    /// Set by writes, cleared by the renderer on upload.
    dirty: bool,
}

impl LineBuffer {
    /// Allocates `lines` polylines of `points_per_line` points, all at the origin.
    #[must_use]
    pub fn new(lines: usize, points_per_line: usize) -> Self {
        Self {
            points_per_line,
            positions: vec![Vec3::ZERO; lines * points_per_line].into_boxed_slice(),
            colors: vec![Rgb::new(1.0, 1.0, 1.0); lines].into_boxed_slice(),
            root: GroupTransform::IDENTITY,
            dirty: true,
        }
    }

    /// Number of polylines.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.colors.len()
    }

    /// Points in each polyline.
    #[inline]
    #[must_use]
    pub const fn points_per_line(&self) -> usize {
        self.points_per_line
    }

    /// Overwrites the points of `line`. Extra or missing points are ignored.
    pub fn set_line(&mut self, line: usize, points: &[Vec3]) {
        if line >= self.line_count() {
            return;
        }
        let start = line * self.points_per_line;
        let slots = &mut self.positions[start..start + self.points_per_line];
        for (slot, point) in slots.iter_mut().zip(points) {
            *slot = point.finite_or(Vec3::ZERO);
        }
        self.dirty = true;
    }

    /// Sets the color of `line`.
    pub fn set_color(&mut self, line: usize, color: Rgb) {
        if let Some(slot) = self.colors.get_mut(line) {
            *slot = color;
            self.dirty = true;
        }
    }

    /// Sets the root transform.
    pub fn set_root(&mut self, root: GroupTransform) {
        self.root = root.sanitized();
        self.dirty = true;
    }

    /// Root transform.
    #[must_use]
    pub const fn root(&self) -> GroupTransform {
        self.root
    }

    /// Points of one polyline.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&[Vec3]> {
        let start = line.checked_mul(self.points_per_line)?;
        self.positions.get(start..start + self.points_per_line)
    }

    /// Color of one polyline.
    #[must_use]
    pub fn color(&self, line: usize) -> Option<Rgb> {
        self.colors.get(line).copied()
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Point data as raw bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_buffer_fixed_length() {
        let mut buffer = InstanceBuffer::new(4);
        assert_eq!(buffer.len(), 4);

        buffer.write(2, InstanceTransform::at(Vec3::new(1.0, 2.0, 3.0)));
        buffer.write(10, InstanceTransform::hidden());

        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.get(2).unwrap().position, [1.0, 2.0, 3.0]);
        assert_eq!(buffer.as_bytes().len(), 4 * InstanceTransform::SIZE);
    }

    #[test]
    fn test_dirty_flag() {
        let mut buffer = InstanceBuffer::new(1);
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());

        buffer.write(0, InstanceTransform::IDENTITY);
        assert!(buffer.take_dirty());
    }

    #[test]
    fn test_line_buffer() {
        let mut lines = LineBuffer::new(2, 3);
        let points = [Vec3::ZERO, Vec3::ONE, Vec3::new(f32::NAN, 1.0, 1.0)];
        lines.set_line(1, &points);
        lines.set_line(5, &points);

        assert_eq!(lines.line(1).unwrap()[1], Vec3::ONE);
        assert_eq!(lines.line(1).unwrap()[2], Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(lines.line(0).unwrap()[1], Vec3::ZERO);
        assert!(lines.line(2).is_none());
        assert_eq!(lines.as_bytes().len(), 6 * 12);
    }
}
