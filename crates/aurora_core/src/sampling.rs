//! # Parameter Sampling
//!
//! Per-instance constants are sampled once at mount from a seeded ChaCha
//! stream. Each system gets its own stream, so adding stars never shifts
//! the nebula.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::math::{Vec3, TAU};

/// Seeded sampler for parameter sets.
#[derive(Clone, Debug)]
pub struct ParamSampler {
    rng: ChaCha8Rng,
}

impl ParamSampler {
    /// Creates a sampler for `stream` under `seed`.
    ///
    /// Streams are independent: `(seed, 1)` and `(seed, 2)` never overlap.
    #[must_use]
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[min, max)`.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.unit() * (max - min)
    }

    /// Uniform in `[-span/2, span/2)`.
    #[inline]
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.unit() - 0.5) * span
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.unit() * TAU
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Fair coin.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.unit() > 0.5
    }

    /// Point in a spherical shell with radius in `[r_min, r_max)`.
    ///
    /// Direction is uniform on the sphere (`phi = acos(2u - 1)`).
    pub fn shell(&mut self, r_min: f32, r_max: f32) -> Vec3 {
        let r = self.range(r_min, r_max);
        let theta = self.angle();
        let phi = (2.0 * self.unit() - 1.0).clamp(-1.0, 1.0).acos();
        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }

    /// Point on one of `arms` logarithmic-ish spiral arms in the XZ plane.
    ///
    /// `spread` pushes points outward and twists them by `twist` per unit;
    /// `scatter` jitters the result on X/Z and `thickness` on Y.
    pub fn spiral_arm(&mut self, arms: usize, shape: SpiralShape) -> Vec3 {
        let arm = self.index(arms.max(1));
        let arm_angle = arm as f32 / arms.max(1) as f32 * TAU;
        let spread = self.unit() * shape.spread;
        let angle = arm_angle + spread * shape.twist;
        let r = shape.inner_radius + spread;
        Vec3::new(
            angle.cos() * r + self.centered(shape.scatter),
            self.centered(shape.thickness),
            angle.sin() * r + self.centered(shape.scatter),
        )
    }
}

/// Shape of a spiral-arm distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralShape {
    /// Radius where arms start.
    pub inner_radius: f32,
    /// Radial extent of the arms.
    pub spread: f32,
    /// Radians of twist per unit of spread.
    pub twist: f32,
    /// Horizontal jitter span.
    pub scatter: f32,
    /// Vertical jitter span.
    pub thickness: f32,
}

/// Well-known stream ids, one per system.
pub mod streams {
    /// Starfield shell positions.
    pub const STARFIELD: u64 = 1;
    /// Nebula spiral arms.
    pub const NEBULA: u64 = 2;
    /// Shooting star trajectories.
    pub const SHOOTING_STARS: u64 = 3;
    /// Warp tunnel particles.
    pub const WARP_TUNNEL: u64 = 4;
    /// Data cubes.
    pub const DATA_CUBES: u64 = 5;
    /// Contact vortex.
    pub const VORTEX: u64 = 6;
    /// Accent particles.
    pub const ACCENT: u64 = 7;
    /// Hero floating nodes.
    pub const FLOATING_NODES: u64 = 8;
    /// Network nodes.
    pub const NETWORK_NODES: u64 = 9;
    /// Network connections.
    pub const CONNECTIONS: u64 = 10;
    /// Data pulses.
    pub const DATA_PULSES: u64 = 11;
    /// Data stream.
    pub const DATA_STREAM: u64 = 12;
    /// Hologram float offsets.
    pub const HOLOGRAMS: u64 = 13;
    /// Mouse trail spawns.
    pub const TRAIL: u64 = 14;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = ParamSampler::new(42, streams::STARFIELD);
        let mut b = ParamSampler::new(42, streams::STARFIELD);
        for _ in 0..100 {
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut a = ParamSampler::new(42, streams::STARFIELD);
        let mut b = ParamSampler::new(42, streams::NEBULA);
        let same = (0..32).filter(|_| a.unit() == b.unit()).count();
        assert!(same < 32);
    }

    #[test]
    fn test_ranges() {
        let mut s = ParamSampler::new(1, 0);
        for _ in 0..10_000 {
            let r = s.range(1.5, 4.0);
            assert!((1.5..4.0).contains(&r));
            let c = s.centered(8.0);
            assert!((-4.0..4.0).contains(&c));
            assert!(s.index(3) < 3);
        }
    }

    #[test]
    fn test_shell_radius() {
        let mut s = ParamSampler::new(9, streams::STARFIELD);
        for _ in 0..5_000 {
            let p = s.shell(8.0, 68.0);
            let r = p.length();
            assert!(r >= 8.0 - 1e-3 && r < 68.0 + 1e-3, "radius {r}");
        }
    }
}
