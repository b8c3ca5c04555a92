//! Geometry and material descriptors handed to the renderer once per surface.

use aurora_core::{palette, Rgb};

/// Mesh primitive backing a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// UV sphere.
    Sphere {
        /// Radius.
        radius: f32,
        /// Width and height segments.
        segments: u16,
    },
    /// Axis-aligned box.
    Box {
        /// X size.
        width: f32,
        /// Y size.
        height: f32,
        /// Z size.
        depth: f32,
    },
    /// Subdivided icosahedron.
    Icosahedron {
        /// Radius.
        radius: f32,
        /// Subdivision level.
        detail: u8,
    },
    /// Octahedron.
    Octahedron {
        /// Radius.
        radius: f32,
    },
    /// Dodecahedron.
    Dodecahedron {
        /// Radius.
        radius: f32,
    },
    /// Tetrahedron.
    Tetrahedron {
        /// Radius.
        radius: f32,
    },
    /// Torus.
    Torus {
        /// Ring radius.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments around the tube.
        radial_segments: u16,
        /// Segments around the ring.
        tubular_segments: u16,
    },
    /// (2,3) torus knot.
    TorusKnot {
        /// Knot radius.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments along the knot.
        tubular_segments: u16,
        /// Segments around the tube.
        radial_segments: u16,
    },
    /// Flat annulus in the XY plane.
    Ring {
        /// Inner radius.
        inner: f32,
        /// Outer radius.
        outer: f32,
        /// Angular segments.
        segments: u16,
    },
    /// Point sprites, one per instance.
    Points {
        /// Sprite size.
        size: f32,
        /// Shrink with distance.
        size_attenuation: bool,
    },
    /// Polylines from a line buffer.
    Line,
    /// Point light; the instance position is the light position.
    PointLight {
        /// Light intensity.
        intensity: f32,
        /// Cutoff distance.
        distance: f32,
        /// Falloff exponent.
        decay: f32,
    },
}

/// Color blending mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blending {
    /// Alpha blending.
    #[default]
    Normal,
    /// Additive glow.
    Additive,
}

/// Emissive term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emissive {
    /// Emitted color.
    pub color: Rgb,
    /// Emission strength.
    pub intensity: f32,
}

/// Surface material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color.
    pub color: Rgb,
    /// Base opacity; instances multiply their own opacity on top.
    pub opacity: f32,
    /// Blending mode.
    pub blending: Blending,
    /// Render edges only.
    pub wireframe: bool,
    /// Render back faces.
    pub double_sided: bool,
    /// Use the per-instance color instead of `color`.
    pub vertex_colors: bool,
    /// Write to the depth buffer.
    pub depth_write: bool,
    /// Optional emission.
    pub emissive: Option<Emissive>,
    /// Vertex distortion amount; instances may override through their material parameter.
    pub distort: f32,
}

impl Material {
    /// Transparent unlit material.
    #[must_use]
    pub fn basic(hex: u32, opacity: f32) -> Self {
        Self {
            color: palette::rgb(hex),
            opacity,
            blending: Blending::Normal,
            wireframe: false,
            double_sided: false,
            vertex_colors: false,
            depth_write: true,
            emissive: None,
            distort: 0.0,
        }
    }

    /// Switches to additive blending.
    #[must_use]
    pub const fn additive(mut self) -> Self {
        self.blending = Blending::Additive;
        self
    }

    /// Renders edges only.
    #[must_use]
    pub const fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    /// Renders both faces.
    #[must_use]
    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Takes color from instances.
    #[must_use]
    pub const fn vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }

    /// Disables depth writes.
    #[must_use]
    pub const fn no_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    /// Adds emission.
    #[must_use]
    pub fn emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Some(Emissive {
            color: palette::rgb(hex),
            intensity,
        });
        self
    }

    /// Sets the base distortion.
    #[must_use]
    pub const fn distort(mut self, amount: f32) -> Self {
        self.distort = amount;
        self
    }
}

/// Everything the renderer needs to create a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawDescriptor {
    /// Mesh primitive.
    pub geometry: Geometry,
    /// Material.
    pub material: Material,
}

impl DrawDescriptor {
    /// Pairs a geometry with a material.
    #[must_use]
    pub const fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builders() {
        let m = Material::basic(palette::CYAN, 0.3)
            .additive()
            .double_sided()
            .no_depth_write();

        assert_eq!(m.blending, Blending::Additive);
        assert!(m.double_sided);
        assert!(!m.depth_write);
        assert!(!m.wireframe);
        assert_eq!(m.opacity, 0.3);
        assert_eq!(m.color, Rgb::from_hex(0x00d4ff));
    }
}
