//! Renderer-side accounting.

mod stats;

pub use stats::RenderStats;
