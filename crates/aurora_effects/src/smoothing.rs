//! Frame-to-frame smoothing for integrated motion.
//!
//! Closed-form systems never use these; only the hover-driven spins and
//! scales and the pointer-chasing spotlight do.

use aurora_core::{finite_or, Vec3, TAU};

/// A value chasing a target with exponential smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    value: f32,
}

impl Smoothed {
    /// Starts at `value`.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self { value }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Moves toward `target` by `rate * dt` of the remaining gap.
    ///
    /// The step never overshoots even for large `dt`.
    pub fn approach(&mut self, target: f32, rate: f32, dt: f32) -> f32 {
        self.step(target, rate * dt)
    }

    /// Moves toward `target` by a fixed fraction of the gap per call.
    pub fn step(&mut self, target: f32, fraction: f32) -> f32 {
        let alpha = finite_or(fraction, 0.0).clamp(0.0, 1.0);
        let next = self.value + (target - self.value) * alpha;
        self.value = finite_or(next, target);
        self.value
    }
}

/// Vector variant of [`Smoothed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedVec3 {
    value: Vec3,
}

impl SmoothedVec3 {
    /// Starts at `value`.
    #[must_use]
    pub const fn new(value: Vec3) -> Self {
        Self { value }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Vec3 {
        self.value
    }

    /// Moves toward `target` by a fixed fraction of the gap per call.
    pub fn step(&mut self, target: Vec3, fraction: f32) -> Vec3 {
        let alpha = finite_or(fraction, 0.0).clamp(0.0, 1.0);
        self.value = self.value.lerp(target, alpha).finite_or(target);
        self.value
    }
}

/// An angle advanced by `rate * dt` each frame, kept in `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    angle: f32,
}

impl Spin {
    /// Current angle.
    #[inline]
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Integrates one frame.
    pub fn advance(&mut self, rate: f32, dt: f32) -> f32 {
        let next = (self.angle + finite_or(rate * dt, 0.0)).rem_euclid(TAU);
        // rem_euclid can round to exactly TAU
        self.angle = if next >= TAU { 0.0 } else { next };
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_converges() {
        let mut s = Smoothed::new(1.0);
        for _ in 0..200 {
            s.approach(1.3, 5.0, 0.016);
        }
        assert!((s.value() - 1.3).abs() < 1e-3);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut s = Smoothed::new(0.0);
        s.approach(1.0, 5.0, 10.0);
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn test_nan_dt_is_ignored() {
        let mut s = Smoothed::new(0.5);
        s.approach(1.0, 5.0, f32::NAN);
        assert_eq!(s.value(), 0.5);
    }

    #[test]
    fn test_spin_wraps() {
        let mut spin = Spin::default();
        for _ in 0..10_000 {
            let a = spin.advance(1.5, 0.1);
            assert!((0.0..TAU).contains(&a));
        }
        let mut back = Spin::default();
        assert!((0.0..TAU).contains(&back.advance(-1.0, 0.1)));
    }

    #[test]
    fn test_vec_step() {
        let mut v = SmoothedVec3::new(Vec3::ZERO);
        v.step(Vec3::new(10.0, -10.0, 5.0), 0.05);
        assert_eq!(v.value(), Vec3::new(0.5, -0.5, 0.25));
    }
}
