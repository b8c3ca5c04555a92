//! Perspective camera parameters.

use crate::updater::ViewExtent;

/// Camera looking down -z from `(0, 0, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Distance from the origin.
    pub z: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

impl Camera {
    /// Creates a camera.
    #[must_use]
    pub const fn new(z: f32, fov_deg: f32) -> Self {
        Self { z, fov_deg }
    }

    /// True if the camera can produce a finite, non-empty view.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.z.is_finite() && self.z > 0.0 && self.fov_deg > 0.0 && self.fov_deg < 180.0
    }

    /// Half extents of the visible plane at z = 0 for `aspect` (width / height).
    ///
    /// `h = z * tan(fov / 2)`, `w = h * aspect`.
    #[must_use]
    pub fn view_extent(&self, aspect: f32) -> ViewExtent {
        let half_height = self.z * (self.fov_deg.to_radians() / 2.0).tan();
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        ViewExtent {
            half_width: half_height * aspect,
            half_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_extent() {
        let camera = Camera::new(5.0, 90.0);
        let view = camera.view_extent(2.0);
        assert!((view.half_height - 5.0).abs() < 1e-5);
        assert!((view.half_width - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_bad_aspect_is_square() {
        let view = Camera::new(5.0, 60.0).view_extent(f32::NAN);
        assert_eq!(view.half_width, view.half_height);
    }

    #[test]
    fn test_validity() {
        assert!(Camera::new(15.0, 60.0).is_valid());
        assert!(!Camera::new(0.0, 60.0).is_valid());
        assert!(!Camera::new(5.0, 180.0).is_valid());
    }
}
