//! Instance data structures for upload.

use aurora_core::{finite_or, Rgb, Vec3};
use bytemuck::{Pod, Zeroable};

/// Per-instance transform written by an updater every frame.
///
/// Layout is four 16-byte rows so it uploads straight into a vertex
/// stream.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    /// World position relative to the surface root.
    pub position: [f32; 3],
    /// Opacity multiplier, 0-1.
    pub opacity: f32,
    /// Euler rotation (XYZ order, radians).
    pub rotation: [f32; 3],
    /// 1 when drawn, 0 when hidden.
    pub visible: u32,
    /// Per-axis scale.
    pub scale: [f32; 3],
    /// Material-specific parameter (distortion amount).
    pub material_param: f32,
    /// Instance color, used when the material takes vertex colors.
    pub color: [f32; 4],
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl InstanceTransform {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Visible, at the origin, unit scale, white.
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        opacity: 1.0,
        rotation: [0.0; 3],
        visible: 1,
        scale: [1.0; 3],
        material_param: 0.0,
        color: [1.0; 4],
    };

    /// Identity moved to `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        let mut t = Self::IDENTITY;
        t.position = position.to_array();
        t
    }

    /// A hidden instance.
    #[must_use]
    pub const fn hidden() -> Self {
        let mut t = Self::IDENTITY;
        t.visible = 0;
        t
    }

    /// Uniform scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = [scale; 3];
        self
    }

    /// Per-axis scale.
    #[must_use]
    pub const fn with_scale3(mut self, scale: Vec3) -> Self {
        self.scale = scale.to_array();
        self
    }

    /// Euler rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation.to_array();
        self
    }

    /// Opacity multiplier.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Instance color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = [color.r, color.g, color.b, 1.0];
        self
    }

    /// Material parameter.
    #[must_use]
    pub const fn with_material_param(mut self, value: f32) -> Self {
        self.material_param = value;
        self
    }

    /// Position as a vector.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// True when drawn.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible != 0
    }

    /// Replaces non-finite fields with identity values and clamps opacity.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let id = Self::IDENTITY;
        for axis in 0..3 {
            self.position[axis] = finite_or(self.position[axis], id.position[axis]);
            self.rotation[axis] = finite_or(self.rotation[axis], id.rotation[axis]);
            self.scale[axis] = finite_or(self.scale[axis], id.scale[axis]);
        }
        for channel in 0..4 {
            self.color[channel] = finite_or(self.color[channel], id.color[channel]);
        }
        self.opacity = finite_or(self.opacity, id.opacity).clamp(0.0, 1.0);
        self.material_param = finite_or(self.material_param, id.material_param);
        self
    }
}

/// Transform applied to a whole surface (the scene-graph group).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GroupTransform {
    /// Group translation.
    pub position: Vec3,
    /// Group Euler rotation.
    pub rotation: Vec3,
    /// Group scale.
    pub scale: Vec3,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GroupTransform {
    /// No-op transform.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Rotation only.
    #[must_use]
    pub const fn rotated(rotation: Vec3) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Translation and rotation.
    #[must_use]
    pub const fn placed(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Replaces non-finite components with identity values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            position: self.position.finite_or(Vec3::ZERO),
            rotation: self.rotation.finite_or(Vec3::ZERO),
            scale: self.scale.finite_or(Vec3::ONE),
        }
    }
}
