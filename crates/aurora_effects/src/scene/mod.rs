//! # Scenes
//!
//! A scene is one page section: a camera, an environment and the
//! updaters mounted into it. The [`SceneComposer`] owns that lifecycle.

mod camera;
mod composer;
mod section;

pub use camera::Camera;
pub use composer::SceneComposer;
pub use section::Section;

/// Identifies a mounted scene within one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u32);

/// Identifies one surface within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId {
    /// Owning scene.
    pub scene: SceneId,
    /// Mount order within the scene.
    pub index: u32,
}
