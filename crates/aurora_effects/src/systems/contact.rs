//! Contact section: a spiral particle vortex pulled toward the pointer,
//! counter-rotating accents and a breathing core.

use aurora_core::{palette, ParamSampler, Vec2, Vec3, TAU};

use super::orbit_xz;
use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{InstanceBuffer, InstanceTransform, TargetLink};
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

/// Pointer distance beyond which particles feel no pull.
pub const ATTRACTION_RADIUS: f32 = 4.0;
/// Pull at zero distance.
pub const ATTRACTION_PEAK: f32 = 0.3;

/// Fraction of the gap to the pointer a particle closes at `distance`.
///
/// Falls linearly from [`ATTRACTION_PEAK`] at 0 to 0 at
/// [`ATTRACTION_RADIUS`], and stays 0 beyond it.
#[inline]
#[must_use]
pub fn attraction_strength(distance: f32) -> f32 {
    if !distance.is_finite() {
        return 0.0;
    }
    (1.0 - distance / ATTRACTION_RADIUS).max(0.0) * ATTRACTION_PEAK
}

// =============================================================================
// PARTICLE VORTEX
// =============================================================================

/// Spiral turns laid out across the population.
const SPIRAL_TURNS: f32 = 6.0;

/// One vortex particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexParticle {
    /// Angle on the spiral at `t = 0`.
    pub angle: f32,
    /// Distance from the vortex axis.
    pub radius: f32,
    /// Angular speed.
    pub speed: f32,
    /// Resting height.
    pub y_offset: f32,
    /// Base sphere scale.
    pub size: f32,
}

/// Six-turn spiral of particles bending toward the pointer.
#[derive(Debug)]
pub struct ParticleVortex {
    particles: Vec<VortexParticle>,
    surface: TargetLink<InstanceBuffer>,
}

impl ParticleVortex {
    /// Lays `count` particles along the spiral; speed, height and size are sampled.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let n = count.max(1) as f32;
        let particles = (0..count)
            .map(|i| {
                let f = i as f32 / n;
                VortexParticle {
                    angle: f * TAU * SPIRAL_TURNS,
                    radius: 0.2 + f * 3.0,
                    speed: sampler.range(0.3, 1.0),
                    y_offset: sampler.centered(2.0),
                    size: sampler.range(0.008, 0.023),
                }
            })
            .collect();
        Self {
            particles,
            surface: TargetLink::detached(),
        }
    }

    /// Particle `i` at `t`, pulled toward `pointer` (world units on z = 0).
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32, pointer: Vec2) -> InstanceTransform {
        let Some(p) = self.particles.get(i) else {
            return InstanceTransform::hidden();
        };
        let fi = i as f32;
        let (mut x, z) = orbit_xz(p.angle + t * p.speed, p.radius);
        let mut y = p.y_offset + (t * 0.5 + fi * 0.01).sin() * 0.3;

        let dx = pointer.x - x;
        let dy = pointer.y - y;
        let pull = attraction_strength(dx.hypot(dy));
        x += dx * pull;
        y += dy * pull;

        InstanceTransform::at(Vec3::new(x, y, z))
            .with_scale(p.size * (1.0 + (t * 3.0 + fi * 0.1).sin() * 0.3))
    }
}

impl InstanceUpdater for ParticleVortex {
    fn name(&self) -> &'static str {
        "particle_vortex"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "particle_vortex",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 6 },
                Material::basic(palette::CYAN, 0.6).additive(),
            ),
            self.particles.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let pointer = frame.view.project(frame.input.pointer);
        self.surface.with(|buffer| {
            for i in 0..self.particles.len() {
                buffer.write(i, self.transform_at(i, t, pointer));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.particles.len()
    }
}

// =============================================================================
// ACCENT PARTICLES
// =============================================================================

/// One accent particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentParams {
    /// Starting angle.
    pub angle: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Angular speed, always negative.
    pub speed: f32,
    /// Resting height.
    pub y: f32,
    /// Sphere scale.
    pub size: f32,
}

/// Purple particles circling against the vortex.
#[derive(Debug)]
pub struct AccentParticles {
    particles: Vec<AccentParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl AccentParticles {
    /// Samples `count` accents.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let particles = (0..count)
            .map(|_| AccentParams {
                angle: sampler.angle(),
                radius: sampler.range(2.5, 4.5),
                speed: -sampler.range(0.2, 0.7),
                y: sampler.centered(3.0),
                size: sampler.range(0.01, 0.03),
            })
            .collect();
        Self {
            particles,
            surface: TargetLink::detached(),
        }
    }

    /// Accent `i` at `t`.
    #[must_use]
    pub fn transform_at(&self, i: usize, t: f32) -> InstanceTransform {
        let Some(p) = self.particles.get(i) else {
            return InstanceTransform::hidden();
        };
        let (x, z) = orbit_xz(p.angle + t * p.speed, p.radius);
        let y = p.y + (t * 0.3 + i as f32 * 0.05).sin() * 0.2;
        InstanceTransform::at(Vec3::new(x, y, z)).with_scale(p.size)
    }
}

impl InstanceUpdater for AccentParticles {
    fn name(&self) -> &'static str {
        "accent_particles"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "accent_particles",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 6 },
                Material::basic(palette::PURPLE, 0.5).additive(),
            ),
            self.particles.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.surface.with(|buffer| {
            for i in 0..self.particles.len() {
                buffer.write(i, self.transform_at(i, t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.particles.len()
    }
}

// =============================================================================
// VORTEX CORE
// =============================================================================

/// Two breathing glow spheres at the vortex center.
#[derive(Debug, Default)]
pub struct VortexCore {
    inner: TargetLink<InstanceBuffer>,
    outer: TargetLink<InstanceBuffer>,
}

impl VortexCore {
    /// Creates the core.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner sphere at `t`.
    #[must_use]
    pub fn inner_at(t: f32) -> InstanceTransform {
        InstanceTransform::IDENTITY.with_scale(0.3 + (t * 1.5).sin() * 0.05)
    }

    /// Outer sphere at `t`.
    #[must_use]
    pub fn outer_at(t: f32) -> InstanceTransform {
        InstanceTransform::IDENTITY
            .with_rotation(Vec3::new(0.0, 0.0, t * 0.2))
            .with_scale(0.6 + t.sin() * 0.1)
    }
}

impl InstanceUpdater for VortexCore {
    fn name(&self) -> &'static str {
        "vortex_core"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.inner = surfaces.instances(
            "vortex_core.inner",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 32 },
                Material::basic(palette::PURPLE, 0.15).additive(),
            ),
            1,
        );
        self.outer = surfaces.instances(
            "vortex_core.outer",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 32 },
                Material::basic(palette::CYAN, 0.05).additive(),
            ),
            1,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        self.inner.with(|buffer| buffer.write(0, Self::inner_at(t)));
        self.outer.with(|buffer| buffer.write(0, Self::outer_at(t)));
    }

    fn instance_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::streams;

    #[test]
    fn test_attraction_boundaries() {
        assert_eq!(attraction_strength(ATTRACTION_RADIUS), 0.0);
        assert_eq!(attraction_strength(10.0), 0.0);
        assert!((attraction_strength(0.0) - ATTRACTION_PEAK).abs() < 1e-7);
        assert_eq!(attraction_strength(f32::NAN), 0.0);

        // Continuous across the cutoff
        let inside = attraction_strength(ATTRACTION_RADIUS - 1e-4);
        assert!(inside > 0.0 && inside < 1e-4);
    }

    #[test]
    fn test_far_pointer_leaves_vortex_alone() {
        let mut sampler = ParamSampler::new(8, streams::VORTEX);
        let vortex = ParticleVortex::new(100, &mut sampler);
        let far = Vec2::new(100.0, 100.0);

        for i in 0..100 {
            let free = vortex.transform_at(i, 2.0, far);
            let p = vortex.particles[i];
            let (x, z) = orbit_xz(p.angle + 2.0 * p.speed, p.radius);
            assert!((free.position().x - x).abs() < 1e-5);
            assert!((free.position().z - z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_near_pointer_pulls() {
        let vortex = ParticleVortex {
            particles: vec![VortexParticle {
                angle: 0.0,
                radius: 1.0,
                speed: 0.0,
                y_offset: 0.0,
                size: 0.01,
            }],
            surface: TargetLink::detached(),
        };
        // Particle sits at (1, 0); pointer 2 units to the right
        let pulled = vortex.transform_at(0, 0.0, Vec2::new(3.0, 0.0));
        // strength = (1 - 2/4) * 0.3 = 0.15
        assert!((pulled.position().x - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_accents_counter_rotate() {
        let mut sampler = ParamSampler::new(2, streams::ACCENT);
        let accents = AccentParticles::new(50, &mut sampler);
        assert!(accents.particles.iter().all(|p| p.speed < 0.0));
    }
}
