//! Renderer backend contract.

use aurora_core::FrameTime;

use crate::atmosphere::Environment;
use crate::descriptor::DrawDescriptor;
use crate::instancing::Surface;
use crate::scene::{Camera, SceneId, SurfaceId};
use crate::trail::DrawList;

/// Backend that owns surfaces and draws them.
///
/// The renderer holds the only strong reference to every surface it is
/// given. Dropping a surface (on `close_scene`) cuts its updater off.
pub trait Renderer {
    /// Starts a scene with its camera and environment.
    fn open_scene(&mut self, scene: SceneId, camera: &Camera, environment: &Environment);

    /// Takes ownership of a newly mounted surface.
    fn attach(&mut self, id: SurfaceId, label: &str, descriptor: &DrawDescriptor, surface: Surface);

    /// Drops a scene and every surface attached to it.
    fn close_scene(&mut self, scene: SceneId);

    /// Uploads dirty surfaces and draws the frame with `overlay` on top.
    fn present(&mut self, time: &FrameTime, overlay: &DrawList);
}
