//! Hero section: the AI core, its orbit rings, electrical arcs and
//! floating data nodes.

use std::f32::consts::FRAC_PI_2;

use aurora_core::{palette, HoverId, ParamSampler, PointerState, Vec3, TAU};

use super::orbit_xz;
use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{GroupTransform, InstanceBuffer, InstanceTransform, LineBuffer, TargetLink};
use crate::smoothing::{Smoothed, Spin};
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

// =============================================================================
// AI CORE
// =============================================================================

/// Core spin rates `(x, y)` in rad/s while idle.
const CORE_IDLE_SPIN: (f32, f32) = (0.15, 0.2);
/// Core spin rates `(x, y)` in rad/s while hovered.
const CORE_HOVER_SPIN: (f32, f32) = (0.3, 0.8);
/// Core scale target while hovered.
const CORE_HOVER_SCALE: f32 = 1.15;
/// Smoothing rate for the hover scale.
const CORE_SCALE_RATE: f32 = 5.0;
/// How far the pointer tilts the core and wireframe.
const POINTER_TILT: f32 = 0.3;

/// Central icosahedron with a wireframe shell, glow and pulse ring.
///
/// The solid core integrates its spin so a hover-driven rate change does
/// not jump the orientation. The shell, glow and ring are closed-form.
#[derive(Debug)]
pub struct AiCore {
    hover: Option<HoverId>,
    spin_x: Spin,
    spin_y: Spin,
    scale: Smoothed,
    core: TargetLink<InstanceBuffer>,
    wire: TargetLink<InstanceBuffer>,
    glow: TargetLink<InstanceBuffer>,
    pulse: TargetLink<InstanceBuffer>,
}

impl AiCore {
    /// Creates the core; `hover` is the id the host toggles on pointer-over.
    #[must_use]
    pub fn new(hover: Option<HoverId>) -> Self {
        Self {
            hover,
            spin_x: Spin::default(),
            spin_y: Spin::default(),
            scale: Smoothed::new(1.0),
            core: TargetLink::detached(),
            wire: TargetLink::detached(),
            glow: TargetLink::detached(),
            pulse: TargetLink::detached(),
        }
    }

    /// Advances the integrated core state by one frame.
    pub fn step_core(&mut self, frame: &FrameContext) -> InstanceTransform {
        let hovered = self.hover.is_some_and(|id| frame.input.is_hovered(id));
        let (rate_x, rate_y) = if hovered { CORE_HOVER_SPIN } else { CORE_IDLE_SPIN };
        let target_scale = if hovered { CORE_HOVER_SCALE } else { 1.0 };

        let dt = frame.dt();
        let spin_x = self.spin_x.advance(rate_x, dt);
        let spin_y = self.spin_y.advance(rate_y, dt);
        let scale = self.scale.approach(target_scale, CORE_SCALE_RATE, dt);

        let t = frame.t();
        let pointer = frame.input.pointer.sanitized();
        let breathing = 1.0 + (t * 2.0).sin() * 0.05;

        InstanceTransform::IDENTITY
            .with_rotation(Vec3::new(
                spin_x + pointer.y * POINTER_TILT,
                spin_y + pointer.x * POINTER_TILT,
                0.0,
            ))
            .with_scale(scale * breathing)
    }

    /// Wireframe shell at `t`.
    #[must_use]
    pub fn wire_at(t: f32, pointer: PointerState) -> InstanceTransform {
        let p = pointer.sanitized();
        InstanceTransform::IDENTITY.with_rotation(Vec3::new(
            -t * 0.1 + p.y * POINTER_TILT,
            -t * 0.15 + p.x * POINTER_TILT,
            0.0,
        ))
    }

    /// Outer glow at `t`.
    #[must_use]
    pub fn glow_at(t: f32) -> InstanceTransform {
        InstanceTransform::IDENTITY.with_scale(1.3 + (t * 1.5).sin() * 0.15)
    }

    /// Expanding pulse ring at `t`; restarts every 6 seconds.
    #[must_use]
    pub fn pulse_at(t: f32) -> InstanceTransform {
        let pulse = (t * 0.5).rem_euclid(3.0);
        InstanceTransform::IDENTITY
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
            .with_scale(1.0 + pulse * 0.8)
            .with_opacity((0.3 - pulse * 0.1).max(0.0))
    }
}

impl InstanceUpdater for AiCore {
    fn name(&self) -> &'static str {
        "ai_core"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.core = surfaces.instances(
            "ai_core.core",
            DrawDescriptor::new(
                Geometry::Icosahedron { radius: 0.45, detail: 1 },
                Material::basic(palette::CYAN, 0.85).emissive(palette::CYAN, 0.8),
            ),
            1,
        );
        self.wire = surfaces.instances(
            "ai_core.wire",
            DrawDescriptor::new(
                Geometry::Icosahedron { radius: 0.55, detail: 2 },
                Material::basic(palette::PURPLE, 0.4).wireframe(),
            ),
            1,
        );
        self.glow = surfaces.instances(
            "ai_core.glow",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 0.7, segments: 32 },
                Material::basic(palette::CYAN, 0.08).additive(),
            ),
            1,
        );
        self.pulse = surfaces.instances(
            "ai_core.pulse",
            DrawDescriptor::new(
                Geometry::Ring { inner: 0.5, outer: 0.55, segments: 64 },
                Material::basic(palette::CYAN, 1.0).double_sided().additive(),
            ),
            1,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let core = self.step_core(frame);
        self.core.with(|buffer| buffer.write(0, core));
        self.wire
            .with(|buffer| buffer.write(0, Self::wire_at(t, frame.input.pointer)));
        self.glow.with(|buffer| buffer.write(0, Self::glow_at(t)));
        self.pulse.with(|buffer| buffer.write(0, Self::pulse_at(t)));
    }

    fn instance_count(&self) -> usize {
        4
    }
}

// =============================================================================
// ORBIT RINGS
// =============================================================================

/// Shape of one orbit ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRingSpec {
    /// Ring radius.
    pub radius: f32,
    /// Angular speed; negative spins the other way.
    pub speed: f32,
    /// Base group tilt.
    pub tilt: Vec3,
    /// Ring and particle color.
    pub color: u32,
}

/// The three rings around the hero core.
pub const HERO_RINGS: [OrbitRingSpec; 3] = [
    OrbitRingSpec {
        radius: 1.0,
        speed: 0.3,
        tilt: Vec3::new(0.5, 0.0, 0.2),
        color: palette::CYAN,
    },
    OrbitRingSpec {
        radius: 1.4,
        speed: -0.2,
        tilt: Vec3::new(0.8, 0.0, -0.3),
        color: palette::PURPLE,
    },
    OrbitRingSpec {
        radius: 1.8,
        speed: 0.15,
        tilt: Vec3::new(0.3, 0.0, 0.5),
        color: palette::PINK,
    },
];

/// Thin torus with particles riding it, tilted by the pointer.
#[derive(Debug)]
pub struct OrbitRing {
    index: usize,
    spec: OrbitRingSpec,
    particles: usize,
    ring: TargetLink<InstanceBuffer>,
    riders: TargetLink<InstanceBuffer>,
}

impl OrbitRing {
    /// Creates ring `index` with `particles` riders.
    #[must_use]
    pub fn new(index: usize, spec: OrbitRingSpec, particles: usize) -> Self {
        Self {
            index,
            spec,
            particles,
            ring: TargetLink::detached(),
            riders: TargetLink::detached(),
        }
    }

    /// Group tilt for the current pointer.
    #[must_use]
    pub fn group_at(&self, pointer: PointerState) -> GroupTransform {
        let p = pointer.sanitized();
        GroupTransform::rotated(Vec3::new(
            self.spec.tilt.x + p.y * 0.1,
            self.spec.tilt.y,
            self.spec.tilt.z + p.x * 0.1,
        ))
    }

    /// The torus lies flat and spins about its own axis.
    #[must_use]
    pub fn ring_at(&self, t: f32) -> InstanceTransform {
        InstanceTransform::IDENTITY.with_rotation(Vec3::new(FRAC_PI_2, 0.0, t * self.spec.speed))
    }

    /// Rider `i` at `t`.
    #[must_use]
    pub fn particle_at(&self, i: usize, t: f32) -> InstanceTransform {
        let fi = i as f32;
        let angle = fi / self.particles.max(1) as f32 * TAU + t * self.spec.speed * 2.0;
        let (px, pz) = orbit_xz(angle, self.spec.radius);
        let wobble = (t * 3.0 + fi * 0.5).sin() * 0.03;
        let scale = 0.02 + (t * 2.0 + fi).sin() * 0.01;

        InstanceTransform::at(Vec3::new(px + wobble, wobble, pz + wobble))
            .with_scale(scale.max(0.005))
    }
}

impl InstanceUpdater for OrbitRing {
    fn name(&self) -> &'static str {
        "orbit_ring"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.ring = surfaces.instances(
            &format!("orbit_ring{}.ring", self.index),
            DrawDescriptor::new(
                Geometry::Torus {
                    radius: self.spec.radius,
                    tube: 0.008,
                    radial_segments: 8,
                    tubular_segments: 128,
                },
                Material::basic(self.spec.color, 0.3).additive(),
            ),
            1,
        );
        self.riders = surfaces.instances(
            &format!("orbit_ring{}.particles", self.index),
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 6 },
                Material::basic(self.spec.color, 0.8).additive(),
            ),
            self.particles,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let group = self.group_at(frame.input.pointer);
        let ring = self.ring_at(t);

        self.ring.with(|buffer| {
            buffer.set_root(group);
            buffer.write(0, ring);
        });
        self.riders.with(|buffer| {
            buffer.set_root(group);
            for i in 0..self.particles {
                buffer.write(i, self.particle_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.particles + 1
    }
}

// =============================================================================
// ELECTRICAL ARCS
// =============================================================================

const ARC_POINTS: usize = 3;

/// Jittering three-point arcs from the core outward.
#[derive(Debug)]
pub struct ElectricalArcs {
    arcs: usize,
    lines: TargetLink<LineBuffer>,
}

impl ElectricalArcs {
    /// Creates `arcs` arcs.
    #[must_use]
    pub fn new(arcs: usize) -> Self {
        Self {
            arcs,
            lines: TargetLink::detached(),
        }
    }

    /// Polyline of arc `i` at `t`: origin, jittered midpoint, orbiting endpoint.
    #[must_use]
    pub fn arc_at(&self, i: usize, t: f32) -> [Vec3; ARC_POINTS] {
        let fi = i as f32;
        let angle = fi / self.arcs.max(1) as f32 * TAU + t * 0.3;
        let reach = 1.5 + (t * 2.0 + fi).sin() * 0.3;
        let jitter = (t * 10.0 + fi * 7.0).sin() * 0.15;

        [
            Vec3::ZERO,
            Vec3::new(
                angle.cos() * reach * 0.5 + jitter,
                (angle + t).sin() * 0.3 + jitter,
                angle.sin() * reach * 0.5 + jitter,
            ),
            Vec3::new(angle.cos() * reach, (t * 0.5 + fi).sin() * 0.5, angle.sin() * reach),
        ]
    }
}

impl InstanceUpdater for ElectricalArcs {
    fn name(&self) -> &'static str {
        "electrical_arcs"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.lines = surfaces.lines(
            "electrical_arcs",
            DrawDescriptor::new(
                Geometry::Line,
                Material::basic(palette::CYAN, 0.5).additive().vertex_colors(),
            ),
            self.arcs,
            ARC_POINTS,
        );
        let arcs = self.arcs;
        self.lines.with(|lines| {
            for i in 0..arcs {
                let hex = if i % 2 == 0 { palette::CYAN } else { palette::PURPLE };
                lines.set_color(i, palette::rgb(hex));
            }
        });
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.lines.with(|lines| {
            lines.set_root(GroupTransform::rotated(Vec3::new(0.0, t * 0.05, 0.0)));
            for i in 0..self.arcs {
                lines.set_line(i, &self.arc_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.arcs * ARC_POINTS
    }
}

// =============================================================================
// FLOATING NODES
// =============================================================================

/// One floating node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingNodeParams {
    /// Orbit radius.
    pub radius: f32,
    /// Angular speed.
    pub speed: f32,
    /// Phase offset.
    pub offset: f32,
    /// Resting height.
    pub y_offset: f32,
    /// Cube size.
    pub size: f32,
}

/// Small cubes orbiting the core at different heights.
#[derive(Debug)]
pub struct FloatingNodes {
    nodes: Vec<FloatingNodeParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl FloatingNodes {
    /// Samples `count` nodes.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let nodes = (0..count)
            .map(|_| FloatingNodeParams {
                radius: sampler.range(1.8, 3.0),
                speed: sampler.range(0.2, 0.7),
                offset: sampler.angle(),
                y_offset: sampler.centered(1.5),
                size: sampler.range(0.03, 0.07),
            })
            .collect();
        Self {
            nodes,
            surface: TargetLink::detached(),
        }
    }

    /// Node `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(node) = self.nodes.get(i) else {
            return InstanceTransform::hidden();
        };
        let (x, z) = orbit_xz(t * node.speed + node.offset, node.radius);
        let y = node.y_offset + (t * 0.5 + node.offset).sin() * 0.3;
        let pulse = 1.0 + (t * 3.0 + i as f32).sin() * 0.3;
        InstanceTransform::at(Vec3::new(x, y, z)).with_scale(node.size * pulse)
    }
}

impl InstanceUpdater for FloatingNodes {
    fn name(&self) -> &'static str {
        "floating_nodes"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "floating_nodes",
            DrawDescriptor::new(
                Geometry::Box { width: 1.0, height: 1.0, depth: 1.0 },
                Material::basic(palette::CYAN, 0.7).additive(),
            ),
            self.nodes.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.nodes.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::{FrameTime, HoverMask, InputSnapshot, SignalBus};

    fn frame(t: f32, dt: f32, hover: HoverMask) -> FrameContext {
        FrameContext {
            time: FrameTime::at(t, dt, 1),
            input: InputSnapshot {
                hover,
                ..InputSnapshot::default()
            },
            ..FrameContext::default()
        }
    }

    #[test]
    fn test_pulse_ring_cycle() {
        let start = AiCore::pulse_at(0.0);
        assert_eq!(start.scale, [1.0; 3]);
        assert!((start.opacity - 0.3).abs() < 1e-6);

        // Fully faded once pulse reaches 3
        let late = AiCore::pulse_at(5.9);
        assert_eq!(late.opacity, 0.0);

        // Restarts every 6 seconds
        let again = AiCore::pulse_at(6.0);
        assert_eq!(again.scale, [1.0; 3]);
    }

    #[test]
    fn test_core_spin_follows_hover() {
        let bus = SignalBus::new();
        let id = bus.register_hover_target().unwrap();

        let mut idle = AiCore::new(Some(id));
        let mut hovered = AiCore::new(Some(id));
        let on = HoverMask::NONE.with(id, true);

        for step in 1..=10 {
            let t = step as f32 * 0.1;
            idle.step_core(&frame(t, 0.1, HoverMask::NONE));
            hovered.step_core(&frame(t, 0.1, on));
        }

        assert!((idle.spin_y.angle() - 0.2).abs() < 1e-4);
        assert!((hovered.spin_y.angle() - 0.8).abs() < 1e-4);
        assert!(hovered.scale.value() > idle.scale.value());
    }

    #[test]
    fn test_core_rotation_continuous_on_hover_change() {
        let bus = SignalBus::new();
        let id = bus.register_hover_target().unwrap();
        let mut core = AiCore::new(Some(id));

        for step in 1..=30 {
            core.step_core(&frame(step as f32 * 0.016, 0.016, HoverMask::NONE));
        }
        let before = core.spin_y.angle();
        core.step_core(&frame(31.0 * 0.016, 0.016, HoverMask::NONE.with(id, true)));
        let jump = core.spin_y.angle() - before;

        // Only the new rate for one frame, no restart from zero
        assert!((jump - 0.8 * 0.016).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_particle_scale_floor() {
        let ring = OrbitRing::new(0, HERO_RINGS[0], 80);
        for step in 0..500 {
            let t = step as f32 * 0.037;
            for i in 0..80 {
                assert!(ring.particle_at(i, t).scale[0] >= 0.005);
            }
        }
    }

    #[test]
    fn test_arc_starts_at_core() {
        let arcs = ElectricalArcs::new(6);
        for i in 0..6 {
            let points = arcs.arc_at(i, 1.234);
            assert_eq!(points[0], Vec3::ZERO);
            let end = points[2];
            let reach = (end.x * end.x + end.z * end.z).sqrt();
            assert!((1.2 - 1e-4..=1.8 + 1e-4).contains(&reach));
        }
    }
}
