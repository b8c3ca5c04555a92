//! # AURORA Core
//!
//! Shared foundations for the procedural animation systems:
//! - Frame clock with clamped deltas
//! - Input signals published by the host and read as snapshots
//! - Seeded parameter sampling
//! - Fixed-capacity slot pool for transient particles
//!
//! ## Architecture Rules
//!
//! 1. **Total per-frame path** - nothing reached from a frame tick returns an error or panics
//! 2. **Snapshot reads** - updaters see a copied [`InputSnapshot`], never live state
//! 3. **Allocate at mount** - pools and parameter sets are sized once

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod memory;
pub mod sampling;
pub mod signals;

pub use clock::{FrameClock, FrameTime};
pub use color::{palette, Rgb, Rgba};
pub use config::{
    AnimationConfig, ClockConfig, InputConfig, LoopConfig, PopulationConfig, TrailConfig,
    MAX_POPULATION,
};
pub use error::{CoreError, CoreResult};
pub use math::{finite_or, wrap_centered, Vec2, Vec3, TAU};
pub use memory::{SlotHandle, SlotPool};
pub use sampling::{streams, ParamSampler, SpiralShape};
pub use signals::{
    HoverId, HoverMask, HoverWriter, InputSnapshot, PointerState, PointerWriter, ScrollDirection,
    ScrollState, ScrollWriter, SignalBus, Viewport,
};
