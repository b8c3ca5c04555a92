//! # AURORA
//!
//! Procedural animation core behind the site's section backgrounds.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                            AURORA                                 │
//! ├───────────────────────────────────────────────────────────────────┤
//! │                                                                   │
//! │  ┌─────────────────┐   InputSnapshot   ┌───────────────────────┐  │
//! │  │  aurora_core    │──────────────────>│  aurora_effects       │  │
//! │  │                 │                   │                       │  │
//! │  │  • FrameClock   │     FrameTime     │  • 19 updaters        │  │
//! │  │  • SignalBus    │──────────────────>│  • MouseTrailEmitter  │  │
//! │  │  • Config       │                   │  • SceneComposer      │  │
//! │  │  • Sampling     │                   │  • RenderLoop         │  │
//! │  └─────────────────┘                   └───────────┬───────────┘  │
//! │                                                    │              │
//! │                                                    v              │
//! │                                           Renderer (host side)    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `driver`: Scripted pointer/scroll/hover input for offline runs

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod driver;

// Re-export the units
pub use aurora_core as core;
pub use aurora_effects as effects;

// Re-export commonly used types
pub use aurora_core::{AnimationConfig, FrameClock, FrameTime, SignalBus};
pub use aurora_effects::{
    HeadlessRenderer, InputEvent, InputRouter, MouseTrailEmitter, RenderLoop, Renderer,
    SceneComposer, Section,
};
pub use driver::ScriptedInput;
