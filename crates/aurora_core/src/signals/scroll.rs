//! Scroll telemetry as emitted by the host's smooth-scroll normalizer.

use serde::{Deserialize, Serialize};

use crate::math::finite_or;

/// Scroll direction of the latest sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    /// Scrolling back up.
    Backward,
    /// Not moving.
    #[default]
    Idle,
    /// Scrolling down the page.
    Forward,
}

impl ScrollDirection {
    /// Maps a raw `-1 / 0 / 1` direction. Anything else is `Idle`.
    #[must_use]
    pub fn from_raw(raw: f32) -> Self {
        if raw >= 0.5 {
            Self::Forward
        } else if raw <= -0.5 {
            Self::Backward
        } else {
            Self::Idle
        }
    }
}

/// Latest scroll sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Page progress in `[0, 1]`.
    pub progress: f32,
    /// Signed scroll velocity.
    pub velocity: f32,
    /// Direction of travel.
    pub direction: ScrollDirection,
    /// Raw scroll offset in pixels.
    pub offset: f32,
    /// Scroll limit in pixels.
    pub limit: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            offset: 0.0,
            limit: 1.0,
        }
    }
}

impl ScrollState {
    /// Replaces non-finite values with neutral ones and clamps progress.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let limit = finite_or(self.limit, 1.0);
        Self {
            progress: finite_or(self.progress, 0.0).clamp(0.0, 1.0),
            velocity: finite_or(self.velocity, 0.0),
            direction: self.direction,
            offset: finite_or(self.offset, 0.0),
            limit: if limit > 0.0 { limit } else { 1.0 },
        }
    }

    /// Absolute scroll speed.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_scroll() {
        let s = ScrollState {
            progress: 1.7,
            velocity: f32::NAN,
            direction: ScrollDirection::Forward,
            offset: f32::INFINITY,
            limit: 0.0,
        }
        .sanitized();

        assert_eq!(s.progress, 1.0);
        assert_eq!(s.velocity, 0.0);
        assert_eq!(s.offset, 0.0);
        assert_eq!(s.limit, 1.0);
        assert_eq!(s.direction, ScrollDirection::Forward);
    }

    #[test]
    fn test_direction_from_raw() {
        assert_eq!(ScrollDirection::from_raw(1.0), ScrollDirection::Forward);
        assert_eq!(ScrollDirection::from_raw(-1.0), ScrollDirection::Backward);
        assert_eq!(ScrollDirection::from_raw(0.0), ScrollDirection::Idle);
        assert_eq!(ScrollDirection::from_raw(f32::NAN), ScrollDirection::Idle);
    }
}
