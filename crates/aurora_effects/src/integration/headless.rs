//! Renderer that draws nothing and counts everything.

use std::collections::BTreeMap;

use aurora_core::FrameTime;

use super::Renderer;
use crate::atmosphere::Environment;
use crate::descriptor::DrawDescriptor;
use crate::instancing::Surface;
use crate::pipeline::RenderStats;
use crate::scene::{Camera, SceneId, SurfaceId};
use crate::trail::DrawList;

/// A surface as attached by a scene.
#[derive(Debug)]
pub struct AttachedSurface {
    /// Surface id.
    pub id: SurfaceId,
    /// Mount label.
    pub label: String,
    /// Geometry and material.
    pub descriptor: DrawDescriptor,
    /// Strong target.
    pub surface: Surface,
}

#[derive(Debug)]
struct OpenScene {
    camera: Camera,
    environment: Environment,
    surfaces: Vec<AttachedSurface>,
}

/// Renderer for previews, tests and benchmarks.
///
/// Holds surfaces like a real backend so weak links behave the same, and
/// "uploads" by consuming dirty flags.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    scenes: BTreeMap<SceneId, OpenScene>,
    stats: RenderStats,
    total_uploads: u64,
    total_bytes: u64,
}

impl HeadlessRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats from the last present.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Uploads since creation.
    #[must_use]
    pub const fn total_uploads(&self) -> u64 {
        self.total_uploads
    }

    /// Bytes uploaded since creation.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Open scene count.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// True if `scene` is open.
    #[must_use]
    pub fn is_open(&self, scene: SceneId) -> bool {
        self.scenes.contains_key(&scene)
    }

    /// Camera of an open scene.
    #[must_use]
    pub fn camera(&self, scene: SceneId) -> Option<&Camera> {
        self.scenes.get(&scene).map(|s| &s.camera)
    }

    /// Surfaces across all open scenes.
    pub fn surfaces(&self) -> impl Iterator<Item = &AttachedSurface> {
        self.scenes.values().flat_map(|s| s.surfaces.iter())
    }

    /// First surface with `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&Surface> {
        self.surfaces()
            .find(|s| s.label == label)
            .map(|s| &s.surface)
    }
}

impl Renderer for HeadlessRenderer {
    fn open_scene(&mut self, scene: SceneId, camera: &Camera, environment: &Environment) {
        self.scenes.insert(
            scene,
            OpenScene {
                camera: *camera,
                environment: environment.clone(),
                surfaces: Vec::new(),
            },
        );
    }

    fn attach(
        &mut self,
        id: SurfaceId,
        label: &str,
        descriptor: &DrawDescriptor,
        surface: Surface,
    ) {
        // A surface for a scene that was never opened has nowhere to draw
        let Some(scene) = self.scenes.get_mut(&id.scene) else {
            return;
        };
        scene.surfaces.push(AttachedSurface {
            id,
            label: label.to_owned(),
            descriptor: *descriptor,
            surface,
        });
    }

    fn close_scene(&mut self, scene: SceneId) {
        self.scenes.remove(&scene);
    }

    fn present(&mut self, time: &FrameTime, overlay: &DrawList) {
        let mut stats = RenderStats {
            frames: self.stats.frames + 1,
            overlay_commands: overlay.len() as u32,
            frame_time_ms: time.delta * 1000.0,
            ..RenderStats::default()
        };

        for scene in self.scenes.values() {
            stats.lights += scene.environment.lighting.points.len() as u32;
            for attached in &scene.surfaces {
                stats.surfaces += 1;
                stats.instances += attached.surface.element_count() as u32;
                if let Some(bytes) = attached.surface.upload_if_dirty(<[u8]>::len) {
                    stats.uploads += 1;
                    stats.bytes_uploaded += bytes as u64;
                }
            }
        }

        self.total_uploads += u64::from(stats.uploads);
        self.total_bytes += stats.bytes_uploaded;
        self.stats = stats;
    }
}
