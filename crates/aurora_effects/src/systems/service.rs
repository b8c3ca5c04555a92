//! Service section: falling data stream bars and six hoverable hologram
//! shapes.

use aurora_core::{palette, HoverId, ParamSampler, Vec3, TAU};

use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{GroupTransform, InstanceBuffer, InstanceTransform, TargetLink};
use crate::smoothing::{Smoothed, Spin};
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

// =============================================================================
// DATA STREAM
// =============================================================================

/// Vertical span the bars fall through.
const STREAM_SPAN: f32 = 8.0;

/// One stream bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamBar {
    /// Fixed x.
    pub x: f32,
    /// Fixed z.
    pub z: f32,
    /// Travel speed.
    pub speed: f32,
    /// Phase along the span.
    pub offset: f32,
    /// Bar scale.
    pub size: f32,
}

/// Matrix-style bars cycling through an 8-unit column.
#[derive(Debug)]
pub struct DataStream {
    bars: Vec<StreamBar>,
    surface: TargetLink<InstanceBuffer>,
}

impl DataStream {
    /// Samples `count` bars over a 12×6 footprint.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let bars = (0..count)
            .map(|_| StreamBar {
                x: sampler.centered(12.0),
                z: sampler.centered(6.0),
                speed: sampler.range(0.5, 2.0),
                offset: sampler.range(0.0, 10.0),
                size: sampler.range(0.01, 0.03),
            })
            .collect();
        Self {
            bars,
            surface: TargetLink::detached(),
        }
    }

    /// Bar `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(bar) = self.bars.get(i) else {
            return InstanceTransform::hidden();
        };
        let y = (bar.offset + t * bar.speed).rem_euclid(STREAM_SPAN) - STREAM_SPAN / 2.0;
        InstanceTransform::at(Vec3::new(bar.x, y, bar.z)).with_scale(bar.size)
    }
}

impl InstanceUpdater for DataStream {
    fn name(&self) -> &'static str {
        "data_stream"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "data_stream",
            DrawDescriptor::new(
                Geometry::Box { width: 1.0, height: 3.0, depth: 0.3 },
                Material::basic(palette::CYAN, 0.15).additive(),
            ),
            self.bars.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.bars.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.bars.len()
    }
}

// =============================================================================
// HOLOGRAM SHAPES
// =============================================================================

/// Static description of one hologram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HologramSpec {
    /// Label suffix.
    pub label: &'static str,
    /// Solid and wire geometry.
    pub geometry: Geometry,
    /// Float anchor.
    pub position: Vec3,
    /// Base color.
    pub color: u32,
}

/// The six service holograms.
pub const HOLOGRAMS: [HologramSpec; 6] = [
    HologramSpec {
        label: "icosahedron",
        geometry: Geometry::Icosahedron { radius: 0.8, detail: 1 },
        position: Vec3::new(-3.0, 1.5, 0.0),
        color: 0x60_a5_fa,
    },
    HologramSpec {
        label: "octahedron",
        geometry: Geometry::Octahedron { radius: 0.8 },
        position: Vec3::new(3.0, 1.0, 0.0),
        color: 0xc0_84_fc,
    },
    HologramSpec {
        label: "torus_knot",
        geometry: Geometry::TorusKnot {
            radius: 0.5,
            tube: 0.15,
            tubular_segments: 100,
            radial_segments: 16,
        },
        position: Vec3::new(-1.5, -1.5, 1.0),
        color: 0x34_d3_99,
    },
    HologramSpec {
        label: "dodecahedron",
        geometry: Geometry::Dodecahedron { radius: 0.7 },
        position: Vec3::new(1.5, -1.0, -1.0),
        color: 0xf4_72_b6,
    },
    HologramSpec {
        label: "torus",
        geometry: Geometry::Torus {
            radius: 0.6,
            tube: 0.2,
            radial_segments: 16,
            tubular_segments: 32,
        },
        position: Vec3::new(-2.5, -0.5, -1.0),
        color: 0xfb_bf_24,
    },
    HologramSpec {
        label: "tetrahedron",
        geometry: Geometry::Tetrahedron { radius: 0.8 },
        position: Vec3::new(2.5, 2.0, 1.0),
        color: 0xa7_8b_fa,
    },
];

const SPIN_X: f32 = 0.3;
const SPIN_Y_IDLE: f32 = 0.4;
const SPIN_Y_HOVER: f32 = 1.5;
const HOVER_SCALE: f32 = 1.3;
const SCALE_RATE: f32 = 5.0;

/// Float speed; the bob runs at `speed / 4` rad per second.
const FLOAT_SPEED: f32 = 2.0;
const FLOAT_ROTATION: f32 = 0.5;
const FLOAT_LIFT: f32 = 0.8;

/// Hoverable solid plus wireframe overlay, floating around an anchor.
///
/// The spin integrates per frame so the hover rate change keeps the
/// current orientation; the float is closed-form in `t`.
#[derive(Debug)]
pub struct HologramShape {
    spec: HologramSpec,
    hover: Option<HoverId>,
    float_offset: f32,
    spin_x: Spin,
    spin_y: Spin,
    scale: Smoothed,
    solid: TargetLink<InstanceBuffer>,
    wire: TargetLink<InstanceBuffer>,
}

impl HologramShape {
    /// Creates a shape with a sampled float phase.
    #[must_use]
    pub fn new(spec: HologramSpec, hover: Option<HoverId>, sampler: &mut ParamSampler) -> Self {
        Self {
            spec,
            hover,
            float_offset: sampler.range(0.0, 2.0 * TAU),
            spin_x: Spin::default(),
            spin_y: Spin::default(),
            scale: Smoothed::new(1.0),
            solid: TargetLink::detached(),
            wire: TargetLink::detached(),
        }
    }

    /// Float root at `t`: gentle rock and lift around the anchor.
    #[must_use]
    pub fn float_at(&self, t: f32) -> GroupTransform {
        let phase = (t + self.float_offset) * FLOAT_SPEED / 4.0;
        let rotation = Vec3::new(
            phase.cos() / 8.0 * FLOAT_ROTATION,
            phase.sin() / 8.0 * FLOAT_ROTATION,
            phase.sin() / 20.0 * FLOAT_ROTATION,
        );
        let anchor = self.spec.position;
        let lift = phase.sin() / 10.0 * FLOAT_LIFT;
        GroupTransform::placed(Vec3::new(anchor.x, anchor.y + lift, anchor.z), rotation)
    }

    /// Integrates spin and hover scale; returns `(solid, wire)` transforms.
    pub fn step(&mut self, frame: &FrameContext) -> (InstanceTransform, InstanceTransform) {
        let hovered = self.hover.is_some_and(|id| frame.input.is_hovered(id));
        let dt = frame.dt();

        let x = self.spin_x.advance(SPIN_X, dt);
        let y = self
            .spin_y
            .advance(if hovered { SPIN_Y_HOVER } else { SPIN_Y_IDLE }, dt);
        let scale = self
            .scale
            .approach(if hovered { HOVER_SCALE } else { 1.0 }, SCALE_RATE, dt);

        let base = InstanceTransform::IDENTITY
            .with_rotation(Vec3::new(x, y, 0.0))
            .with_scale(scale);
        let solid = base.with_material_param(if hovered { 0.3 } else { 0.15 });
        let wire = base.with_opacity(if hovered { 0.5 } else { 0.2 });
        (solid, wire)
    }
}

impl InstanceUpdater for HologramShape {
    fn name(&self) -> &'static str {
        "hologram_shape"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        let label = self.spec.label;
        self.solid = surfaces.instances(
            &format!("hologram.{label}.solid"),
            DrawDescriptor::new(
                self.spec.geometry,
                Material::basic(self.spec.color, 0.6).distort(0.15),
            ),
            1,
        );
        self.wire = surfaces.instances(
            &format!("hologram.{label}.wire"),
            DrawDescriptor::new(
                self.spec.geometry,
                Material::basic(self.spec.color, 1.0).wireframe().additive(),
            ),
            1,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let root = self.float_at(frame.t());
        let (solid, wire) = self.step(frame);
        self.solid.with(|buffer| {
            buffer.set_root(root);
            buffer.write(0, solid);
        });
        self.wire.with(|buffer| {
            buffer.set_root(root);
            buffer.write(0, wire);
        });
    }

    fn instance_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::{streams, FrameTime, HoverMask, InputSnapshot, SignalBus};

    #[test]
    fn test_stream_wraps_column() {
        let mut sampler = ParamSampler::new(4, streams::DATA_STREAM);
        let stream = DataStream::new(300, &mut sampler);
        for step in 0..200 {
            let t = step as f32 * 0.9;
            for i in 0..300 {
                let y = stream.transform_at(i, t).position().y;
                assert!((-4.0..4.0).contains(&y), "y = {y}");
            }
        }
    }

    #[test]
    fn test_hover_changes_wire_and_distort() {
        let bus = SignalBus::new();
        let id = bus.register_hover_target().unwrap();
        let mut sampler = ParamSampler::new(1, streams::HOLOGRAMS);
        let mut shape = HologramShape::new(HOLOGRAMS[0], Some(id), &mut sampler);

        let mut frame = FrameContext {
            time: FrameTime::at(0.1, 0.016, 1),
            ..FrameContext::default()
        };
        let (solid, wire) = shape.step(&frame);
        assert_eq!(solid.material_param, 0.15);
        assert_eq!(wire.opacity, 0.2);

        frame.input = InputSnapshot {
            hover: HoverMask::NONE.with(id, true),
            ..InputSnapshot::default()
        };
        let (solid, wire) = shape.step(&frame);
        assert_eq!(solid.material_param, 0.3);
        assert_eq!(wire.opacity, 0.5);
        assert!(solid.scale[0] > 1.0);
        assert_eq!(solid.rotation, wire.rotation);
    }

    #[test]
    fn test_float_stays_near_anchor() {
        let mut sampler = ParamSampler::new(1, streams::HOLOGRAMS);
        let shape = HologramShape::new(HOLOGRAMS[2], None, &mut sampler);
        for step in 0..100 {
            let root = shape.float_at(step as f32 * 0.3);
            let lift = root.position.y - HOLOGRAMS[2].position.y;
            assert!(lift.abs() <= 0.08 + 1e-6);
            assert_eq!(root.position.x, HOLOGRAMS[2].position.x);
        }
    }
}
