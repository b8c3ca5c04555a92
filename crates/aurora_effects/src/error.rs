//! # Effects Error Types
//!
//! Construction-time failures only. Frame ticks never produce these.

use aurora_core::CoreError;
use thiserror::Error;

use crate::scene::Section;

/// Errors raised while assembling scenes and the render loop.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// Camera parameters cannot produce a view extent.
    #[error("invalid camera for {section:?}: z={z}, fov={fov_deg}")]
    InvalidCamera {
        /// Section the camera belongs to.
        section: Section,
        /// Camera distance.
        z: f32,
        /// Vertical field of view in degrees.
        fov_deg: f32,
    },

    /// The signal bus ran out of hover target ids.
    #[error("no hover target ids left for {0:?}")]
    HoverTargetsExhausted(Section),

    /// Another handle already owns this signal field.
    #[error("{0} writer is already claimed")]
    WriterClaimed(&'static str),

    /// A section is already mounted in this loop.
    #[error("{0:?} is already mounted")]
    DuplicateSection(Section),
}

/// Result type for effects construction.
pub type EffectsResult<T> = Result<T, EffectsError>;
