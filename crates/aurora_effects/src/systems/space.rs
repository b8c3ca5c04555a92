//! Space background: starfield, nebula, shooting stars and the pointer
//! spotlight.

use aurora_core::{palette, ParamSampler, Rgb, SpiralShape, Vec3};

use crate::descriptor::{DrawDescriptor, Geometry, Material};
use crate::instancing::{GroupTransform, InstanceBuffer, InstanceTransform, TargetLink};
use crate::smoothing::SmoothedVec3;
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter};

// =============================================================================
// STARFIELD
// =============================================================================

/// One background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    /// Fixed position on the shell.
    pub position: Vec3,
    /// Sphere scale.
    pub size: f32,
}

/// Static star shell rotated slowly as a whole, with scroll parallax.
#[derive(Debug)]
pub struct Starfield {
    stars: Vec<StarParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl Starfield {
    /// Samples `count` stars in a shell from radius 8 to 68.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let stars = (0..count)
            .map(|_| StarParams {
                position: sampler.shell(8.0, 68.0),
                size: sampler.range(0.02, 0.08),
            })
            .collect();
        Self::from_params(stars)
    }

    /// Uses explicit parameter sets.
    #[must_use]
    pub fn from_params(stars: Vec<StarParams>) -> Self {
        Self {
            stars,
            surface: TargetLink::detached(),
        }
    }

    /// Whole-field rotation at `t` for scroll progress `progress`.
    #[must_use]
    pub fn root_at(t: f32, progress: f32) -> GroupTransform {
        GroupTransform::rotated(Vec3::new(
            (t * 0.003).sin() * 0.1 + progress * 0.2,
            t * 0.008 + progress * std::f32::consts::PI * 0.3,
            0.0,
        ))
    }
}

impl InstanceUpdater for Starfield {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "starfield",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 1.0, segments: 6 },
                Material::basic(palette::WHITE, 0.9),
            ),
            self.stars.len(),
        );
        // Positions never change; only the root moves per frame
        let stars = &self.stars;
        self.surface.with(|buffer| {
            for (i, star) in stars.iter().enumerate() {
                buffer.write(i, InstanceTransform::at(star.position).with_scale(star.size));
            }
        });
    }

    fn update(&mut self, frame: &FrameContext) {
        let root = Self::root_at(frame.t(), frame.input.scroll.progress);
        self.surface.with(|buffer| buffer.set_root(root));
    }

    fn instance_count(&self) -> usize {
        self.stars.len()
    }
}

// =============================================================================
// NEBULA
// =============================================================================

/// One nebula point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NebulaPoint {
    /// Fixed position on a spiral arm.
    pub position: Vec3,
    /// Vertex color.
    pub color: Rgb,
}

const NEBULA_ARMS: usize = 3;

const NEBULA_SHAPE: SpiralShape = SpiralShape {
    inner_radius: 3.0,
    spread: 15.0,
    twist: 0.15,
    scatter: 3.0,
    thickness: 4.0,
};

/// Three-armed additive point cloud, rotated as a whole.
#[derive(Debug)]
pub struct NebulaClouds {
    points: Vec<NebulaPoint>,
    surface: TargetLink<InstanceBuffer>,
}

impl NebulaClouds {
    /// Samples `count` points on three spiral arms, colored cyan to purple to pink.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let cyan = palette::rgb(palette::CYAN);
        let purple = palette::rgb(palette::PURPLE);
        let pink = palette::rgb(palette::PINK);

        let points = (0..count)
            .map(|_| {
                let position = sampler.spiral_arm(NEBULA_ARMS, NEBULA_SHAPE);
                let mix = sampler.unit();
                let color = if mix < 0.4 {
                    cyan.lerp(purple, mix / 0.4)
                } else {
                    purple.lerp(pink, (mix - 0.4) / 0.6)
                };
                NebulaPoint { position, color }
            })
            .collect();

        Self {
            points,
            surface: TargetLink::detached(),
        }
    }

    /// Whole-cloud rotation at `t`.
    #[must_use]
    pub fn root_at(t: f32) -> GroupTransform {
        GroupTransform::rotated(Vec3::new(0.0, t * 0.01, (t * 0.005).sin() * 0.05))
    }
}

impl InstanceUpdater for NebulaClouds {
    fn name(&self) -> &'static str {
        "nebula_clouds"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "nebula_clouds",
            DrawDescriptor::new(
                Geometry::Points { size: 0.12, size_attenuation: true },
                Material::basic(palette::WHITE, 0.35)
                    .additive()
                    .vertex_colors()
                    .no_depth_write(),
            ),
            self.points.len(),
        );
        let points = &self.points;
        self.surface.with(|buffer| {
            for (i, point) in points.iter().enumerate() {
                buffer.write(i, InstanceTransform::at(point.position).with_color(point.color));
            }
        });
    }

    fn update(&mut self, frame: &FrameContext) {
        let root = Self::root_at(frame.t());
        self.surface.with(|buffer| buffer.set_root(root));
    }

    fn instance_count(&self) -> usize {
        self.points.len()
    }
}

// =============================================================================
// SHOOTING STARS
// =============================================================================

/// Idle seconds between two passes of the same star.
const SHOOTING_STAR_GAP: f32 = 8.0;

/// Distance multiplier applied to `velocity * cycle_time`.
const SHOOTING_STAR_TRAVEL: f32 = 15.0;

/// One shooting star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStarParams {
    /// Where each pass starts.
    pub start: Vec3,
    /// Direction and speed of travel.
    pub velocity: Vec3,
    /// Seconds before the first pass.
    pub delay: f32,
    /// Seconds a pass stays visible.
    pub duration: f32,
}

impl ShootingStarParams {
    /// Seconds into the current cycle, or `None` before the first pass.
    #[must_use]
    pub fn cycle_time(&self, t: f32) -> Option<f32> {
        if t.is_nan() || t < self.delay {
            return None;
        }
        Some((t - self.delay).rem_euclid(self.duration + SHOOTING_STAR_GAP))
    }

    /// Transform at `t`: visible only while `cycle_time < duration`.
    #[must_use]
    pub fn transform_at(&self, t: f32) -> InstanceTransform {
        match self.cycle_time(t) {
            Some(cycle) if cycle < self.duration => {
                let progress = cycle / self.duration;
                InstanceTransform::at(self.start + self.velocity * (cycle * SHOOTING_STAR_TRAVEL))
                    .with_scale(1.0 - progress)
                    .with_opacity((1.0 - progress) * 0.8)
            }
            _ => InstanceTransform::hidden(),
        }
    }
}

/// A handful of stars streaking across the sky on independent cycles.
#[derive(Debug)]
pub struct ShootingStars {
    stars: Vec<ShootingStarParams>,
    surface: TargetLink<InstanceBuffer>,
}

impl ShootingStars {
    /// Samples `count` stars.
    #[must_use]
    pub fn new(count: usize, sampler: &mut ParamSampler) -> Self {
        let stars = (0..count)
            .map(|_| ShootingStarParams {
                start: Vec3::new(
                    sampler.centered(40.0),
                    sampler.range(10.0, 30.0),
                    sampler.range(-40.0, -10.0),
                ),
                velocity: Vec3::new(
                    sampler.centered(0.8),
                    sampler.range(-1.0, -0.5),
                    sampler.centered(0.3),
                ),
                delay: sampler.range(0.0, 20.0),
                duration: sampler.range(1.5, 3.5),
            })
            .collect();
        Self::from_params(stars)
    }

    /// Uses explicit parameter sets.
    #[must_use]
    pub fn from_params(stars: Vec<ShootingStarParams>) -> Self {
        Self {
            stars,
            surface: TargetLink::detached(),
        }
    }

    /// Transform of star `index` at `t`. Unknown indices are hidden.
    #[must_use]
    pub fn transform_at(&self, index: usize, t: f32) -> InstanceTransform {
        self.stars
            .get(index)
            .map_or_else(InstanceTransform::hidden, |star| star.transform_at(t))
    }
}

impl InstanceUpdater for ShootingStars {
    fn name(&self) -> &'static str {
        "shooting_stars"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "shooting_stars",
            DrawDescriptor::new(
                Geometry::Sphere { radius: 0.05, segments: 4 },
                Material::basic(palette::WHITE, 1.0),
            ),
            self.stars.len(),
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let t = frame.t();
        let stars = &self.stars;
        self.surface.with(|buffer| {
            for (i, star) in stars.iter().enumerate() {
                buffer.write(i, star.transform_at(t));
            }
        });
    }

    fn instance_count(&self) -> usize {
        self.stars.len()
    }
}

// =============================================================================
// MOUSE SPOTLIGHT
// =============================================================================

/// Fraction of the remaining gap closed each frame.
const SPOTLIGHT_FOLLOW: f32 = 0.05;

/// Cyan point light easing toward the pointer at a fixed depth.
#[derive(Debug)]
pub struct MouseSpotlight {
    position: SmoothedVec3,
    surface: TargetLink<InstanceBuffer>,
}

impl Default for MouseSpotlight {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseSpotlight {
    /// Light depth.
    pub const Z: f32 = 5.0;

    /// Starts centered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: SmoothedVec3::new(Vec3::new(0.0, 0.0, Self::Z)),
            surface: TargetLink::detached(),
        }
    }

    /// Current light position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position.value()
    }

    /// Advances one frame toward the pointer.
    pub fn follow(&mut self, frame: &FrameContext) -> Vec3 {
        let target = frame.view.project(frame.input.pointer);
        self.position
            .step(Vec3::new(target.x, target.y, Self::Z), SPOTLIGHT_FOLLOW)
    }
}

impl InstanceUpdater for MouseSpotlight {
    fn name(&self) -> &'static str {
        "mouse_spotlight"
    }

    fn mount(&mut self, surfaces: &mut dyn SurfaceMounter) {
        self.surface = surfaces.instances(
            "mouse_spotlight",
            DrawDescriptor::new(
                Geometry::PointLight {
                    intensity: 8.0,
                    distance: 25.0,
                    decay: 2.0,
                },
                Material::basic(palette::CYAN, 1.0),
            ),
            1,
        );
    }

    fn update(&mut self, frame: &FrameContext) {
        let position = self.follow(frame);
        self.surface
            .with(|buffer| buffer.write(0, InstanceTransform::at(position)));
    }

    fn instance_count(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updater::ViewExtent;
    use aurora_core::{streams, FrameTime, InputSnapshot, PointerState};

    #[test]
    fn test_shooting_star_window() {
        let star = ShootingStarParams {
            start: Vec3::new(0.0, 20.0, -20.0),
            velocity: Vec3::new(0.1, -0.5, 0.0),
            delay: 2.0,
            duration: 2.0,
        };

        assert!(!star.transform_at(0.0).is_visible());
        assert!(!star.transform_at(1.99).is_visible());

        let mid = star.transform_at(3.0);
        assert!(mid.is_visible());
        assert_eq!(mid.scale, [0.5; 3]);
        assert!((mid.opacity - 0.4).abs() < 1e-6);

        // Hidden for the 8 second gap, visible again on the next cycle
        assert!(!star.transform_at(4.5).is_visible());
        assert!(!star.transform_at(11.9).is_visible());
        assert!(star.transform_at(12.5).is_visible());
    }

    #[test]
    fn test_shooting_star_visibility_matches_cycle() {
        let mut sampler = ParamSampler::new(3, streams::SHOOTING_STARS);
        let stars = ShootingStars::new(5, &mut sampler);
        for step in 0..2_000 {
            let t = step as f32 * 0.05;
            for (i, star) in stars.stars.iter().enumerate() {
                let visible = stars.transform_at(i, t).is_visible();
                let expected = star.cycle_time(t).is_some_and(|c| c < star.duration);
                assert_eq!(visible, expected);
            }
        }
    }

    #[test]
    fn test_starfield_root() {
        let root = Starfield::root_at(0.0, 0.0);
        assert_eq!(root.rotation, Vec3::ZERO);

        let scrolled = Starfield::root_at(0.0, 1.0);
        assert!((scrolled.rotation.x - 0.2).abs() < 1e-6);
        assert!((scrolled.rotation.y - std::f32::consts::PI * 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_nebula_sampling_ranges() {
        let mut sampler = ParamSampler::new(11, streams::NEBULA);
        let nebula = NebulaClouds::new(2_000, &mut sampler);
        for point in &nebula.points {
            assert!(point.position.y.abs() <= 2.0);
            let r = (point.position.x.powi(2) + point.position.z.powi(2)).sqrt();
            assert!(r <= 3.0 + 15.0 + 2.2, "radius {r}");
        }
    }

    #[test]
    fn test_spotlight_eases_toward_pointer() {
        let mut light = MouseSpotlight::new();
        let frame = FrameContext {
            time: FrameTime::at(0.0, 0.016, 1),
            input: InputSnapshot {
                pointer: PointerState::new(1.0, -1.0),
                ..InputSnapshot::default()
            },
            view: ViewExtent {
                half_width: 10.0,
                half_height: 5.0,
            },
        };

        let first = light.follow(&frame);
        assert!((first.x - 0.5).abs() < 1e-6);
        assert!((first.y + 0.25).abs() < 1e-6);
        assert_eq!(first.z, MouseSpotlight::Z);

        for _ in 0..500 {
            light.follow(&frame);
        }
        assert!((light.position().x - 10.0).abs() < 1e-3);
        assert!((light.position().y + 5.0).abs() < 1e-3);
    }
}
