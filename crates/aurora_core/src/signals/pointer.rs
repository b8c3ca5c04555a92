//! Pointer position in normalized device coordinates.

use serde::{Deserialize, Serialize};

use crate::math::{finite_or, Vec2};

/// Viewport size in client pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width over height, or `1.0` for an unusable viewport.
    #[must_use]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Pointer position, both axes in `[-1, 1]`, +y up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Horizontal position, -1 left to 1 right.
    pub x: f32,
    /// Vertical position, -1 bottom to 1 top.
    pub y: f32,
}

impl PointerState {
    /// Pointer at the origin.
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a pointer state, sanitized.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }.sanitized()
    }

    /// Normalizes a client-pixel position against `viewport`.
    ///
    /// An unusable viewport yields the origin.
    #[must_use]
    pub fn from_client(client_x: f32, client_y: f32, viewport: Viewport) -> Self {
        if !viewport.is_valid() {
            return Self::CENTER;
        }
        Self::new(
            client_x / viewport.width * 2.0 - 1.0,
            -(client_y / viewport.height * 2.0 - 1.0),
        )
    }

    /// Replaces NaN with 0 and clamps to `[-1, 1]`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            x: finite_or(self.x, 0.0).clamp(-1.0, 1.0),
            y: finite_or(self.y, 0.0).clamp(-1.0, 1.0),
        }
    }

    /// As a vector.
    #[inline]
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_corners() {
        let vp = Viewport::new(800.0, 600.0);

        let top_left = PointerState::from_client(0.0, 0.0, vp);
        assert_eq!(top_left, PointerState { x: -1.0, y: 1.0 });

        let center = PointerState::from_client(400.0, 300.0, vp);
        assert_eq!(center, PointerState::CENTER);

        let bottom_right = PointerState::from_client(800.0, 600.0, vp);
        assert_eq!(bottom_right, PointerState { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_out_of_window_clamped() {
        let p = PointerState::from_client(-500.0, 5000.0, Viewport::new(100.0, 100.0));
        assert_eq!(p, PointerState { x: -1.0, y: -1.0 });
    }

    #[test]
    fn test_nan_degrades_to_origin() {
        assert_eq!(PointerState::new(f32::NAN, f32::NAN), PointerState::CENTER);
        let zero = Viewport::new(0.0, 0.0);
        assert_eq!(PointerState::from_client(10.0, 10.0, zero), PointerState::CENTER);
    }

    #[test]
    fn test_aspect_fallback() {
        assert_eq!(Viewport::new(200.0, 100.0).aspect(), 2.0);
        assert_eq!(Viewport::new(0.0, 100.0).aspect(), 1.0);
        assert_eq!(Viewport::new(f32::NAN, 100.0).aspect(), 1.0);
    }
}
