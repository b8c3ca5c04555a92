//! Linear distance fog and the per-section environment.

use aurora_core::{palette, Rgb, Vec3};

use super::lighting::Lighting;

/// Linear fog between `near` and `far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Fog color.
    pub color: Rgb,
    /// Distance where fog starts.
    pub near: f32,
    /// Distance where fog is opaque.
    pub far: f32,
}

impl Fog {
    /// Creates a linear fog.
    #[must_use]
    pub fn linear(hex: u32, near: f32, far: f32) -> Self {
        Self {
            color: palette::rgb(hex),
            near,
            far,
        }
    }

    /// Fog amount at `distance`, 0 (clear) to 1 (opaque).
    #[must_use]
    pub fn factor(&self, distance: f32) -> f32 {
        let span = self.far - self.near;
        if span <= 0.0 {
            return if distance >= self.far { 1.0 } else { 0.0 };
        }
        ((distance - self.near) / span).clamp(0.0, 1.0)
    }
}

/// Static look of a section: background, fog, lights and group rotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    /// Clear color; `None` leaves the canvas transparent.
    pub background: Option<Rgb>,
    /// Optional fog.
    pub fog: Option<Fog>,
    /// Lights.
    pub lighting: Lighting,
    /// Rotation applied to every surface in the section.
    pub group_rotation: Vec3,
}

impl Environment {
    /// Environment with only lighting.
    #[must_use]
    pub fn lit(lighting: Lighting) -> Self {
        Self {
            lighting,
            ..Self::default()
        }
    }

    /// Sets the background.
    #[must_use]
    pub fn with_background(mut self, hex: u32) -> Self {
        self.background = Some(palette::rgb(hex));
        self
    }

    /// Sets the fog.
    #[must_use]
    pub fn with_fog(mut self, fog: Fog) -> Self {
        self.fog = Some(fog);
        self
    }

    /// Sets the group rotation.
    #[must_use]
    pub fn with_group_rotation(mut self, rotation: Vec3) -> Self {
        self.group_rotation = rotation;
        self
    }
}
