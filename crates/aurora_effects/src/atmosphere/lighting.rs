//! Static scene lights.

use aurora_core::{palette, Vec3};
use bytemuck::{Pod, Zeroable};

/// Maximum static point lights per section.
pub const MAX_POINT_LIGHTS: usize = 8;

/// A single point light.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    /// Position in world space.
    pub position: [f32; 3],
    /// Light intensity.
    pub intensity: f32,
    /// Light color.
    pub color: [f32; 3],
    /// Cutoff distance (0 = infinite).
    pub distance: f32,
    /// Falloff exponent.
    pub decay: f32,
    /// Padding for alignment.
    pub _pad: [f32; 3],
}

impl PointLight {
    /// Creates an unbounded point light.
    #[must_use]
    pub fn new(position: Vec3, hex: u32, intensity: f32) -> Self {
        Self {
            position: position.to_array(),
            intensity,
            color: palette::rgb(hex).to_array(),
            distance: 0.0,
            decay: 2.0,
            _pad: [0.0; 3],
        }
    }

    /// Limits the light's reach.
    #[must_use]
    pub const fn with_range(mut self, distance: f32, decay: f32) -> Self {
        self.distance = distance;
        self.decay = decay;
        self
    }

    /// Attenuation factor at `dist` from the light.
    #[must_use]
    pub fn attenuation(&self, dist: f32) -> f32 {
        if self.distance <= 0.0 {
            return 1.0;
        }
        let falloff = (1.0 - dist / self.distance).clamp(0.0, 1.0);
        falloff.powf(self.decay)
    }
}

/// Ambient term plus static point lights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lighting {
    /// Ambient intensity.
    pub ambient: f32,
    /// Static point lights, at most [`MAX_POINT_LIGHTS`].
    pub points: Vec<PointLight>,
}

impl Lighting {
    /// Ambient-only lighting.
    #[must_use]
    pub fn ambient(intensity: f32) -> Self {
        Self {
            ambient: intensity,
            points: Vec::new(),
        }
    }

    /// Adds a point light. Lights past the limit are dropped.
    #[must_use]
    pub fn with_point(mut self, light: PointLight) -> Self {
        if self.points.len() < MAX_POINT_LIGHTS {
            self.points.push(light);
        }
        self
    }

    /// Point lights as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_size() {
        assert_eq!(std::mem::size_of::<PointLight>(), 48);
    }

    #[test]
    fn test_attenuation() {
        let light = PointLight::new(Vec3::ZERO, palette::CYAN, 8.0).with_range(25.0, 2.0);
        assert_eq!(light.attenuation(0.0), 1.0);
        assert_eq!(light.attenuation(25.0), 0.0);
        assert_eq!(light.attenuation(100.0), 0.0);
        assert!((light.attenuation(12.5) - 0.25).abs() < 1e-6);

        let unbounded = PointLight::new(Vec3::ZERO, palette::WHITE, 1.0);
        assert_eq!(unbounded.attenuation(1000.0), 1.0);
    }

    #[test]
    fn test_light_limit() {
        let mut lighting = Lighting::ambient(0.1);
        for _ in 0..MAX_POINT_LIGHTS + 3 {
            lighting = lighting.with_point(PointLight::new(Vec3::ZERO, palette::WHITE, 1.0));
        }
        assert_eq!(lighting.points.len(), MAX_POINT_LIGHTS);
    }
}
