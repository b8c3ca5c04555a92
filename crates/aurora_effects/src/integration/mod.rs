//! # Integration
//!
//! Seams between the animation core and its host:
//! - [`Renderer`]: the backend that draws surfaces
//! - [`InputRouter`]: host events into the signal bus and trail feed
//! - [`RenderLoop`]: one call per display refresh
//! - [`HeadlessRenderer`]: a renderer that only counts

mod events;
mod headless;
mod render_loop;
mod renderer;

pub use events::{trail_feed, InputEvent, InputRouter};
pub use headless::{AttachedSurface, HeadlessRenderer};
pub use render_loop::{FrameResult, RenderLoop, RenderLoopStats};
pub use renderer::Renderer;
