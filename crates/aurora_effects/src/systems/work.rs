//! Work section: a warp tunnel whose speed follows scroll velocity,
//! fading tunnel rings and orbiting data cubes.

use aurora_core::{palette, wrap_centered, ParamSampler, Vec3};

use super::orbit_xy;
use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{InstanceBuffer, InstanceTransform, TargetLink};
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

/// Half the tunnel depth; z lives in `[-TUNNEL_HALF_DEPTH, TUNNEL_HALF_DEPTH)`.
pub const TUNNEL_HALF_DEPTH: f32 = 15.0;

/// Base forward rate with no scroll.
const WARP_BASE: f32 = 0.3;
/// Scroll velocity to warp coupling.
const WARP_SCROLL_GAIN: f32 = 0.5 * 2.0;

/// Wraps a tunnel depth into the tunnel.
#[inline]
#[must_use]
pub fn wrap_depth(z: f32) -> f32 {
    wrap_centered(z, TUNNEL_HALF_DEPTH)
}

/// Forward rate multiplier for a scroll speed.
#[inline]
#[must_use]
pub fn warp_speed(scroll_speed: f32) -> f32 {
    WARP_BASE + scroll_speed.abs() * WARP_SCROLL_GAIN
}

// =============================================================================
// WARP TUNNEL
// =============================================================================

/// One tunnel particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpParticle {
    /// Angle around the tunnel axis at `t = 0`.
    pub angle: f32,
    /// Distance from the tunnel axis.
    pub radius: f32,
    /// Depth at `t = 0`.
    pub z: f32,
    /// Forward speed multiplier.
    pub speed: f32,
    /// Base sphere scale.
    pub size: f32,
}

/// Particles streaming toward the camera along the tunnel.
#[derive(Debug)]
pub struct WarpTunnel {
    particles: Vec<WarpParticle>,
    surface: TargetLink<InstanceBuffer>,
}

impl WarpTunnel {
    /// Samples `count` particles through the full tunnel depth.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let particles = (0..count)
            .map(|_| WarpParticle {
                angle: sampler.angle(),
                radius: sampler.range(1.5, 4.0),
                z: sampler.range(-TUNNEL_HALF_DEPTH, TUNNEL_HALF_DEPTH),
                speed: sampler.range(0.5, 2.5),
                size: sampler.range(0.02, 0.05),
            })
            .collect();
        Self::from_params(particles)
    }

    /// Uses explicit parameter sets.
    #[must_use]
    pub fn from_params(particles: Vec<WarpParticle>) -> Self {
        Self {
            particles,
            surface: TargetLink::detached(),
        }
    }

    /// Particle `i` at `t` for a given scroll velocity.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32, scroll_velocity: f32) -> InstanceTransform {
        let Some(p) = self.particles.get(i) else {
            return InstanceTransform::hidden();
        };
        let z = wrap_depth(p.z + t * warp_speed(scroll_velocity) * p.speed);
        let angle = p.angle + t * 0.1;
        let wobble = (t * 2.0 + i as f32 * 0.1).sin() * 0.05;
        let r = p.radius + wobble;

        // Closer to the tunnel mouth reads bigger
        let nearness = 1.0 - z.abs() / TUNNEL_HALF_DEPTH;
        InstanceTransform::at(Vec3::new(angle.cos() * r, angle.sin() * r, z))
            .with_scale(p.size * (0.5 + nearness * 0.5))
    }
}

impl InstanceUpdater for WarpTunnel {
    fn name(&self) -> &'static str {
        "warp_tunnel"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "warp_tunnel",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 6 },
                Material::basic(palette::CYAN, 0.6).additive(),
            ),
            self.particles.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let velocity = frame.input.scroll.sanitized().velocity;
        self.surface.with(|buffer| {
            for i in 0..self.particles.len() {
                buffer.write(i, self.transform_at(i, t, velocity));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.particles.len()
    }
}

// =============================================================================
// TUNNEL RINGS
// =============================================================================

/// Spacing between consecutive rings.
const RING_SPACING: f32 = 2.5;

/// Rings sliding down the tunnel, fading with depth.
#[derive(Debug)]
pub struct TunnelRings {
    count: usize,
    surface: TargetLink<InstanceBuffer>,
}

impl TunnelRings {
    /// Creates `count` rings.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            surface: TargetLink::detached(),
        }
    }

    /// Ring `i` at `t` for a given scroll velocity.
    #[must_use]
    pub fn transform_at(i: usize, t: f32, scroll_velocity: f32) -> InstanceTransform {
        let fi = i as f32;
        let rate = 0.5 + scroll_velocity.abs() * 0.3 * 2.0;
        let z = wrap_depth(fi * RING_SPACING - TUNNEL_HALF_DEPTH + t * rate);
        let depth = z.abs() / TUNNEL_HALF_DEPTH;
        let hex = if i % 2 == 0 { palette::CYAN } else { palette::PURPLE };

        InstanceTransform::at(Vec3::new(0.0, 0.0, z))
            .with_rotation(Vec3::new(0.0, 0.0, t * 0.1 + fi * 0.2))
            .with_opacity((0.15 - depth * 0.1).max(0.0))
            .with_color(palette::rgb(hex))
    }
}

impl InstanceUpdater for TunnelRings {
    fn name(&self) -> &'static str {
        "tunnel_rings"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "tunnel_rings",
            DrawDescriptor::new(
                Geometry::Ring { inner: 2.5, outer: 2.6, segments: 64 },
                Material::basic(palette::CYAN, 1.0)
                    .double_sided()
                    .additive()
                    .vertex_colors(),
            ),
            self.count,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let velocity = frame.input.scroll.sanitized().velocity;
        let count = self.count;
        self.surface.with(|buffer| {
            for i in 0..count {
                buffer.write(i, Self::transform_at(i, t, velocity));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.count
    }
}

// =============================================================================
// DATA CUBES
// =============================================================================

/// One data cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
    /// Starting orbit angle.
    pub angle: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Resting depth.
    pub z: f32,
    /// Orbit speed.
    pub speed: f32,
    /// Tumble speed.
    pub rot_speed: f32,
    /// Cube scale.
    pub size: f32,
}

/// Tumbling cubes orbiting the tunnel wall.
#[derive(Debug)]
pub struct DataCubes {
    cubes: Vec<CubeParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl DataCubes {
    /// Samples `count` cubes.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let cubes = (0..count)
            .map(|_| CubeParams {
                angle: sampler.angle(),
                radius: sampler.range(3.0, 4.5),
                z: sampler.centered(20.0),
                speed: sampler.range(0.2, 0.7),
                rot_speed: sampler.range(0.5, 2.5),
                size: sampler.range(0.04, 0.1),
            })
            .collect();
        Self {
            cubes,
            surface: TargetLink::detached(),
        }
    }

    /// Cube `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(cube) = self.cubes.get(i) else {
            return InstanceTransform::hidden();
        };
        let z = cube.z + (t * 0.5 + i as f32).sin();
        let spin = t * cube.rot_speed;
        InstanceTransform::at(orbit_xy(cube.angle + t * cube.speed, cube.radius, z))
            .with_rotation(Vec3::new(spin, spin * 0.7, 0.0))
            .with_scale(cube.size)
    }
}

impl InstanceUpdater for DataCubes {
    fn name(&self) -> &'static str {
        "data_cubes"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "data_cubes",
            DrawDescriptor::new(
                Geometry::Box { width: 1.0, height: 1.0, depth: 1.0 },
                Material::basic(palette::PINK, 0.5).additive(),
            ),
            self.cubes.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.cubes.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.cubes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::streams;

    #[test]
    fn test_warp_origin_particle() {
        let tunnel = WarpTunnel::from_params(vec![WarpParticle {
            angle: 0.0,
            radius: 2.0,
            z: 0.0,
            speed: 1.0,
            size: 0.02,
        }]);
        let transform = tunnel.transform_at(0, 0.0, 0.0);
        assert_eq!(transform.position(), Vec3::new(2.0, 0.0, 0.0));
        assert!((transform.scale[0] - 0.02).abs() < 1e-7);
    }

    #[test]
    fn test_depth_stays_in_tunnel() {
        let mut sampler = ParamSampler::new(21, streams::WARP_TUNNEL);
        let tunnel = WarpTunnel::new(200, &mut sampler);
        for step in 0..300 {
            let t = step as f32 * 0.731;
            let velocity = (step as f32 * 0.1).sin() * 40.0;
            for i in 0..200 {
                let z = tunnel.transform_at(i, t, velocity).position().z;
                assert!((-TUNNEL_HALF_DEPTH..TUNNEL_HALF_DEPTH).contains(&z), "z = {z}");
            }
            for i in 0..12 {
                let z = TunnelRings::transform_at(i, t, velocity).position().z;
                assert!((-TUNNEL_HALF_DEPTH..TUNNEL_HALF_DEPTH).contains(&z));
            }
        }
    }

    #[test]
    fn test_depth_advances_between_wraps() {
        let tunnel = WarpTunnel::from_params(vec![WarpParticle {
            angle: 0.0,
            radius: 2.0,
            z: -10.0,
            speed: 1.0,
            size: 0.02,
        }]);
        let a = tunnel.transform_at(0, 1.0, 0.0).position().z;
        let b = tunnel.transform_at(0, 2.0, 0.0).position().z;
        assert!(b > a);
    }

    #[test]
    fn test_scroll_speeds_up_warp() {
        assert_eq!(warp_speed(0.0), 0.3);
        assert_eq!(warp_speed(-2.0), warp_speed(2.0));
        assert!(warp_speed(2.0) > warp_speed(0.0));
    }

    #[test]
    fn test_calm_rate_scales_with_particle_speed() {
        let slow = WarpTunnel::from_params(vec![WarpParticle {
            angle: 0.0,
            radius: 2.0,
            z: 0.0,
            speed: 0.5,
            size: 0.02,
        }]);
        // Floor is 0.3 * speed, below the flat 0.3 base
        let z = slow.transform_at(0, 2.0, 0.0).position().z;
        assert!((z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_ring_fades_with_depth() {
        // Ring 6 starts at z = 0, fully bright
        let near = TunnelRings::transform_at(6, 0.0, 0.0);
        assert!((near.opacity - 0.15).abs() < 1e-6);
        // Ring 0 starts at the far end
        let far = TunnelRings::transform_at(0, 0.0, 0.0);
        assert!((far.opacity - 0.05).abs() < 1e-6);
    }
}
