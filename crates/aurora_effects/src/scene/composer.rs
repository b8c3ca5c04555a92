//! Scene lifecycle: build, mount, tick, unmount.

use std::sync::Arc;

use aurora_core::{AnimationConfig, FrameTime, HoverId, InputSnapshot, PopulationConfig, SignalBus};

use super::{Camera, SceneId, Section, SurfaceId};
use crate::atmosphere::Environment;
use crate::descriptor::DrawDescriptor;
use crate::error::{EffectsError, EffectsResult};
use crate::instancing::{InstanceBuffer, LineBuffer, RenderTarget, Surface, TargetLink};
use crate::integration::Renderer;
use crate::updater::{FrameContext, InstanceUpdater, SurfaceMounter, ViewExtent};

/// Owns one section's environment and updaters.
///
/// Updaters are built fresh on every mount, so a remount starts from the
/// same parameter sets and a clean integrated state. The composer keeps no
/// strong reference to any surface: once the renderer closes the scene,
/// every write from a lingering updater is dropped.
///
/// Hover ids are held for the composer's lifetime and returned to the bus
/// on drop.
pub struct SceneComposer {
    id: SceneId,
    section: Section,
    camera: Camera,
    environment: Environment,
    populations: PopulationConfig,
    seed: u64,
    hovers: Vec<HoverId>,
    bus: Arc<SignalBus>,
    updaters: Vec<Box<dyn InstanceUpdater>>,
    surfaces: u32,
    mounted: bool,
}

impl SceneComposer {
    /// Prepares `section` and registers its hover targets on `bus`.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::Config`] if `config` fails validation,
    /// [`EffectsError::InvalidCamera`] for an unusable camera and
    /// [`EffectsError::HoverTargetsExhausted`] if the bus has no ids left.
    pub fn new(
        id: SceneId,
        section: Section,
        config: &AnimationConfig,
        bus: &Arc<SignalBus>,
    ) -> EffectsResult<Self> {
        config.validate()?;

        let camera = section.camera();
        if !camera.is_valid() {
            return Err(EffectsError::InvalidCamera {
                section,
                z: camera.z,
                fov_deg: camera.fov_deg,
            });
        }

        let mut hovers = Vec::with_capacity(section.hover_targets());
        for _ in 0..section.hover_targets() {
            match bus.register_hover_target() {
                Some(id) => hovers.push(id),
                None => {
                    for id in hovers {
                        bus.release_hover_target(id);
                    }
                    return Err(EffectsError::HoverTargetsExhausted(section));
                }
            }
        }

        Ok(Self {
            id,
            section,
            camera,
            environment: section.environment(),
            populations: config.populations.clone(),
            seed: config.resolve_seed(),
            hovers,
            bus: Arc::clone(bus),
            updaters: Vec::new(),
            surfaces: 0,
            mounted: false,
        })
    }

    /// Scene id.
    #[must_use]
    pub const fn id(&self) -> SceneId {
        self.id
    }

    /// Section this scene renders.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Hover ids registered for this scene, in system order.
    #[must_use]
    pub fn hover_ids(&self) -> &[HoverId] {
        &self.hovers
    }

    /// True between mount and unmount.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Updaters currently mounted.
    #[must_use]
    pub fn updater_count(&self) -> usize {
        self.updaters.len()
    }

    /// Surfaces created by the last mount.
    #[must_use]
    pub const fn surface_count(&self) -> u32 {
        self.surfaces
    }

    /// Instances written per tick.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.updaters.iter().map(|u| u.instance_count()).sum()
    }

    /// Visible extent for a viewport aspect.
    #[must_use]
    pub fn view(&self, aspect: f32) -> ViewExtent {
        self.camera.view_extent(aspect)
    }

    /// Opens the scene on `renderer` and mounts every updater.
    ///
    /// Mounting an already mounted scene remounts it.
    pub fn mount(&mut self, renderer: &mut dyn Renderer) {
        if self.mounted {
            self.unmount(renderer);
        }

        renderer.open_scene(self.id, &self.camera, &self.environment);

        let mut updaters = self.section.build(&self.populations, self.seed, &self.hovers);
        let mut mounter = MountContext {
            renderer,
            scene: self.id,
            next: 0,
        };
        for updater in &mut updaters {
            updater.mount(&mut mounter);
        }

        self.surfaces = mounter.next;
        self.updaters = updaters;
        self.mounted = true;

        tracing::debug!(
            "Mounted {} scene: {} systems, {} surfaces, {} instances",
            self.section.label(),
            self.updaters.len(),
            self.surfaces,
            self.instance_count()
        );
    }

    /// Closes the scene and drops every updater. No-op if not mounted.
    pub fn unmount(&mut self, renderer: &mut dyn Renderer) {
        if !self.mounted {
            return;
        }
        renderer.close_scene(self.id);
        self.updaters.clear();
        self.surfaces = 0;
        self.mounted = false;

        tracing::debug!("Unmounted {} scene", self.section.label());
    }

    /// Runs every updater once. Returns instances written.
    ///
    /// Order is mount order, but no updater may depend on it.
    pub fn tick(&mut self, time: FrameTime, input: &InputSnapshot) -> usize {
        let frame = FrameContext {
            time,
            input: *input,
            view: self.view(input.viewport.aspect()),
        };

        let mut instances = 0;
        for updater in &mut self.updaters {
            updater.update(&frame);
            instances += updater.instance_count();
        }
        instances
    }
}

impl Drop for SceneComposer {
    fn drop(&mut self) {
        for id in self.hovers.drain(..) {
            self.bus.release_hover_target(id);
        }
    }
}

impl std::fmt::Debug for SceneComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneComposer")
            .field("id", &self.id)
            .field("section", &self.section)
            .field("updaters", &self.updaters.len())
            .field("surfaces", &self.surfaces)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

/// Hands fresh surfaces to the renderer during mount.
struct MountContext<'a> {
    renderer: &'a mut dyn Renderer,
    scene: SceneId,
    next: u32,
}

impl MountContext<'_> {
    fn next_id(&mut self) -> SurfaceId {
        let id = SurfaceId {
            scene: self.scene,
            index: self.next,
        };
        self.next += 1;
        id
    }
}

impl SurfaceMounter for MountContext<'_> {
    fn instances(
        &mut self,
        label: &str,
        descriptor: DrawDescriptor,
        len: usize,
    ) -> TargetLink<InstanceBuffer> {
        let target = RenderTarget::new(InstanceBuffer::new(len));
        let link = target.link();
        let id = self.next_id();
        self.renderer
            .attach(id, label, &descriptor, Surface::Instances(target));
        link
    }

    fn lines(
        &mut self,
        label: &str,
        descriptor: DrawDescriptor,
        lines: usize,
        points: usize,
    ) -> TargetLink<LineBuffer> {
        let target = RenderTarget::new(LineBuffer::new(lines, points));
        let link = target.link();
        let id = self.next_id();
        self.renderer
            .attach(id, label, &descriptor, Surface::Lines(target));
        link
    }
}
