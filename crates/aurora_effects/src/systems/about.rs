//! About section: a neural network of nodes, faint connections and data
//! pulses circling through it.

use aurora_core::{palette, ParamSampler, Vec3, TAU};

use super::orbit_xz;
use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{GroupTransform, InstanceBuffer, InstanceTransform, LineBuffer, TargetLink};
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

/// Nodes per ring of the network.
const NODES_PER_LAYER: usize = 8;

// =============================================================================
// NETWORK NODES
// =============================================================================

/// Network of layered node rings, each node drifting around its base.
#[derive(Debug)]
pub struct NetworkNodes {
    bases: Vec<Vec3>,
    surface: TargetLink<InstanceBuffer>,
}

impl NetworkNodes {
    /// Lays out `count` nodes in rings of eight, widening per layer.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let bases = (0..count)
            .map(|i| {
                let layer = (i / NODES_PER_LAYER) as f32;
                let slot = (i % NODES_PER_LAYER) as f32;
                let angle = slot / NODES_PER_LAYER as f32 * TAU + layer * 0.3;
                let radius = 1.0 + layer * 0.8;
                Vec3::new(
                    angle.cos() * radius + sampler.centered(0.5),
                    sampler.centered(2.0),
                    angle.sin() * radius + sampler.centered(0.5),
                )
            })
            .collect();
        Self {
            bases,
            surface: TargetLink::detached(),
        }
    }

    /// Resting node positions.
    #[must_use]
    pub fn bases(&self) -> &[Vec3] {
        &self.bases
    }

    /// Node `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(&base) = self.bases.get(i) else {
            return InstanceTransform::hidden();
        };
        let fi = i as f32;
        let drift = Vec3::new(
            (t * 0.5 + fi).sin() * 0.05,
            (t * 0.3 + fi * 0.7).cos() * 0.05,
            (t * 0.4 + fi * 1.3).sin() * 0.05,
        );
        InstanceTransform::at(Vec3::new(base.x + drift.x, base.y + drift.y, base.z + drift.z))
            .with_scale(0.04 + (t * 2.0 + fi * 0.5).sin() * 0.015)
    }
}

impl InstanceUpdater for NetworkNodes {
    fn name(&self) -> &'static str {
        "network_nodes"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "network_nodes",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 12 },
                Material::basic(palette::CYAN, 0.9).additive(),
            ),
            self.bases.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.bases.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.bases.len()
    }
}

// =============================================================================
// CONNECTIONS
// =============================================================================

/// A static segment between two network nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Segment endpoints.
    pub points: [Vec3; 2],
    /// True for cyan, false for purple.
    pub cyan: bool,
}

/// Faint lines between random node pairs; only the group rotates.
#[derive(Debug)]
pub struct Connections {
    connections: Vec<Connection>,
    lines: TargetLink<LineBuffer>,
}

impl Connections {
    /// Makes `attempts` random pairings over `nodes`, skipping self-pairs.
    ///
    /// Each endpoint keeps its node's ring position but takes a fresh height.
    #[must_use]
    pub fn new(attempts: usize, nodes: &[Vec3], sampler: &mut ParamSampler) -> Self {
        let mut connections = Vec::with_capacity(attempts);
        if nodes.len() >= 2 {
            for _ in 0..attempts {
                let a = sampler.index(nodes.len());
                let b = sampler.index(nodes.len());
                if a == b {
                    continue;
                }
                let from = Vec3::new(nodes[a].x, sampler.centered(2.0), nodes[a].z);
                let to = Vec3::new(nodes[b].x, sampler.centered(2.0), nodes[b].z);
                connections.push(Connection {
                    points: [from, to],
                    cyan: sampler.coin(),
                });
            }
        }
        Self {
            connections,
            lines: TargetLink::detached(),
        }
    }

    /// Connections that survived pairing.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Group rotation at `t`.
    #[must_use]
    pub fn root_at(t: f32) -> GroupTransform {
        GroupTransform::rotated(Vec3::new(0.0, t * 0.03, 0.0))
    }
}

impl InstanceUpdater for Connections {
    fn name(&self) -> &'static str {
        "connections"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.lines = surfaces.lines(
            "connections",
            DrawDescriptor::new(
                Geometry::Line,
                Material::basic(palette::CYAN, 0.15).additive().vertex_colors(),
            ),
            self.connections.len(),
            2,
        );
        let connections = &self.connections;
        self.lines.with(|lines| {
            for (i, connection) in connections.iter().enumerate() {
                let hex = if connection.cyan { palette::CYAN } else { palette::PURPLE };
                lines.set_line(i, &connection.points);
                lines.set_color(i, palette::rgb(hex));
            }
        });
    }

    fn update(&mut self, frame: &FrameContext) {
        let root = Self::root_at(frame.t());
        self.lines.with(|lines| lines.set_root(root));
    }

    fn instance_count(&self) -> usize {
        self.connections.len()
    }
}

// =============================================================================
// DATA PULSES
// =============================================================================

/// One pulse orbiting through the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseParams {
    /// Starting angle.
    pub start_angle: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Angular speed.
    pub speed: f32,
    /// Resting height.
    pub y: f32,
    /// Bob phase.
    pub phase: f32,
}

/// Bright pulses racing around the network.
#[derive(Debug)]
pub struct DataPulses {
    pulses: Vec<PulseParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl DataPulses {
    /// Samples `count` pulses.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let pulses = (0..count)
            .map(|_| PulseParams {
                start_angle: sampler.angle(),
                radius: sampler.range(1.0, 4.0),
                speed: sampler.range(0.5, 2.0),
                y: sampler.centered(2.0),
                phase: sampler.angle(),
            })
            .collect();
        Self {
            pulses,
            surface: TargetLink::detached(),
        }
    }

    /// Pulse `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(pulse) = self.pulses.get(i) else {
            return InstanceTransform::hidden();
        };
        let (x, z) = orbit_xz(pulse.start_angle + t * pulse.speed, pulse.radius);
        let y = pulse.y + (t * 2.0 + pulse.phase).sin() * 0.3;
        InstanceTransform::at(Vec3::new(x, y, z))
            .with_scale(0.03 + (t * 5.0 + i as f32).sin() * 0.01)
    }
}

impl InstanceUpdater for DataPulses {
    fn name(&self) -> &'static str {
        "data_pulses"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "data_pulses",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 8 },
                Material::basic(palette::WHITE, 0.9).additive(),
            ),
            self.pulses.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.pulses.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.pulses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::streams;

    #[test]
    fn test_node_layers_widen() {
        let mut sampler = ParamSampler::new(3, streams::NETWORK_NODES);
        let nodes = NetworkNodes::new(40, &mut sampler);

        for (i, base) in nodes.bases().iter().enumerate() {
            let layer = (i / NODES_PER_LAYER) as f32;
            let ring = (base.x * base.x + base.z * base.z).sqrt();
            let nominal = 1.0 + layer * 0.8;
            // Jitter is at most 0.25 on each axis
            assert!((ring - nominal).abs() <= 0.36, "node {i} at {ring}");
            assert!(base.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_connections_skip_self_pairs() {
        let nodes: Vec<Vec3> = (0..2).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mut sampler = ParamSampler::new(11, streams::CONNECTIONS);
        let web = Connections::new(30, &nodes, &mut sampler);

        assert!(web.connections().len() <= 30);
        for connection in web.connections() {
            assert_ne!(connection.points[0].x, connection.points[1].x);
        }
    }

    #[test]
    fn test_connections_need_two_nodes() {
        let mut sampler = ParamSampler::new(11, streams::CONNECTIONS);
        let web = Connections::new(30, &[Vec3::ZERO], &mut sampler);
        assert!(web.connections().is_empty());
    }

    #[test]
    fn test_pulse_stays_on_orbit() {
        let mut sampler = ParamSampler::new(5, streams::DATA_PULSES);
        let pulses = DataPulses::new(15, &mut sampler);
        for i in 0..15 {
            let p = pulses.transform_at(i, 12.5).position();
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((1.0 - 1e-4..4.0 + 1e-4).contains(&r));
        }
    }
}
