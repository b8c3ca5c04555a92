//! # Core Error Types
//!
//! Only configuration and construction can fail. The per-frame path is total.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Config text is not valid TOML for the schema.
    #[error("malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but a value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A population size is outside `1..=MAX_POPULATION`.
    #[error("population for {system} must be in 1..={max}, got {count}")]
    InvalidPopulation {
        /// System the population belongs to.
        system: &'static str,
        /// Requested count.
        count: usize,
        /// Upper bound.
        max: usize,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
