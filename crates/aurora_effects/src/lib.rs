//! # AURORA Effects
//!
//! Instanced procedural animation for every page section.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌────────────────┐   ┌──────────┐
//! │ FrameClock │──►│              │   │ InstanceUpdater│──►│ Instance │
//! └────────────┘   │ FrameContext │──►│   (per system) │   │  Buffer  │──► Renderer
//! ┌────────────┐   │              │   └────────────────┘   └──────────┘
//! │ SignalBus  │──►│              │
//! └────────────┘   └──────────────┘
//! ```
//!
//! - [`systems`]: the visual systems, one module per section
//! - [`scene`]: sections, cameras and the [`SceneComposer`]
//! - [`trail`]: the pointer trail overlay
//! - [`integration`]: the [`Renderer`] seam, input routing and the [`RenderLoop`]
//!
//! ## Architecture Rules
//!
//! 1. **One writer per surface** - an updater writes only the surfaces it mounted
//! 2. **No cross-system reads** - coupling goes through the input snapshot only
//! 3. **Weak links** - the renderer owns surfaces; updaters skip writes once they are gone

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod atmosphere;
pub mod descriptor;
pub mod error;
pub mod instancing;
pub mod integration;
pub mod pipeline;
pub mod scene;
pub mod smoothing;
pub mod systems;
pub mod trail;
pub mod updater;

pub use atmosphere::{Environment, Fog, Lighting, PointLight};
pub use descriptor::{Blending, DrawDescriptor, Emissive, Geometry, Material};
pub use error::{EffectsError, EffectsResult};
pub use instancing::{
    GroupTransform, InstanceBuffer, InstanceTransform, LineBuffer, RenderTarget, Surface,
    TargetLink,
};
pub use integration::{
    trail_feed, FrameResult, HeadlessRenderer, InputEvent, InputRouter, RenderLoop,
    RenderLoopStats, Renderer,
};
pub use pipeline::RenderStats;
pub use scene::{Camera, SceneComposer, SceneId, Section, SurfaceId};
pub use trail::{DrawCommand, DrawList, MouseTrailEmitter, PointerSample, TrailCanvas};
pub use updater::{FrameContext, InstanceUpdater, SurfaceMounter, ViewExtent};
