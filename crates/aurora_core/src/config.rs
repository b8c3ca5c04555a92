//! # Animation Configuration
//!
//! Loaded once at startup from TOML. Every section is optional; missing
//! values fall back to the counts and constants the site ships with.
//!
//! ```toml
//! seed = 42
//!
//! [populations]
//! starfield = 6000
//!
//! [trail]
//! capacity = 256
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Largest instance population any single system may request.
pub const MAX_POPULATION: usize = 65_536;

/// Root configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seed for parameter sampling. `None` derives one from the wall clock.
    pub seed: Option<u64>,
    /// Frame clock settings.
    pub clock: ClockConfig,
    /// Render loop settings.
    #[serde(rename = "loop")]
    pub render_loop: LoopConfig,
    /// Instance counts per system.
    pub populations: PopulationConfig,
    /// Mouse trail emitter settings.
    pub trail: TrailConfig,
    /// Input routing settings.
    pub input: InputConfig,
}

/// Frame clock settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Upper bound on the per-frame delta handed to integrated motion (seconds).
    pub max_delta: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { max_delta: 0.1 }
    }
}

/// Render loop settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Frame time above which a frame is reported over budget (microseconds).
    pub frame_budget_us: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frame_budget_us: 16_666, // ~16ms for 60fps
        }
    }
}

/// Instance counts for every fixed-population system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Background stars.
    pub starfield: usize,
    /// Nebula cloud points.
    pub nebula: usize,
    /// Shooting stars.
    pub shooting_stars: usize,
    /// Warp tunnel particles.
    pub warp_particles: usize,
    /// Tunnel rings.
    pub tunnel_rings: usize,
    /// Floating data cubes.
    pub data_cubes: usize,
    /// Contact vortex particles.
    pub vortex: usize,
    /// Counter-rotating accent particles.
    pub accent: usize,
    /// Particles per orbit ring.
    pub orbit_particles: usize,
    /// Electrical arcs around the hero core.
    pub arcs: usize,
    /// Floating hero nodes.
    pub floating_nodes: usize,
    /// Neural network nodes.
    pub network_nodes: usize,
    /// Random connection attempts between network nodes.
    pub connection_attempts: usize,
    /// Pulses travelling around the network.
    pub data_pulses: usize,
    /// Falling data stream bars.
    pub data_stream: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            starfield: 12_000,
            nebula: 4_000,
            shooting_stars: 5,
            warp_particles: 800,
            tunnel_rings: 12,
            data_cubes: 20,
            vortex: 4_000,
            accent: 500,
            orbit_particles: 80,
            arcs: 6,
            floating_nodes: 20,
            network_nodes: 40,
            connection_attempts: 30,
            data_pulses: 15,
            data_stream: 300,
        }
    }
}

impl PopulationConfig {
    /// Iterates `(system, count)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, usize)> {
        [
            ("starfield", self.starfield),
            ("nebula", self.nebula),
            ("shooting_stars", self.shooting_stars),
            ("warp_particles", self.warp_particles),
            ("tunnel_rings", self.tunnel_rings),
            ("data_cubes", self.data_cubes),
            ("vortex", self.vortex),
            ("accent", self.accent),
            ("orbit_particles", self.orbit_particles),
            ("arcs", self.arcs),
            ("floating_nodes", self.floating_nodes),
            ("network_nodes", self.network_nodes),
            ("connection_attempts", self.connection_attempts),
            ("data_pulses", self.data_pulses),
            ("data_stream", self.data_stream),
        ]
        .into_iter()
    }
}

/// Mouse trail emitter settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Maximum live trail particles (arena size).
    pub capacity: usize,
    /// Particles spawned per pixel of pointer movement.
    pub spawn_per_speed: f32,
    /// Hard cap on particles spawned by one pointer event.
    pub max_spawn_per_event: u32,
    /// Velocity multiplier applied every frame.
    pub damping: f32,
    /// Fixed delta used for life decay (seconds).
    pub nominal_frame_delta: f32,
    /// Radius of the stationary cursor glow (pixels).
    pub glow_radius: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 512,
            spawn_per_speed: 0.3,
            max_spawn_per_event: 5,
            damping: 0.98,
            nominal_frame_delta: 0.016,
            glow_radius: 30.0,
        }
    }
}

/// Input routing settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pending pointer samples buffered for the trail emitter.
    pub trail_feed_capacity: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            trail_feed_capacity: 256,
        }
    }
}

impl AnimationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] for malformed TOML and the
    /// validation errors of [`AnimationConfig::validate`].
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigIo`] if the file cannot be read, otherwise
    /// the errors of [`AnimationConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded animation config from {}", path.display());
        Ok(config)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPopulation`] or [`CoreError::InvalidConfig`].
    pub fn validate(&self) -> CoreResult<()> {
        for (system, count) in self.populations.entries() {
            if count == 0 || count > MAX_POPULATION {
                return Err(CoreError::InvalidPopulation {
                    system,
                    count,
                    max: MAX_POPULATION,
                });
            }
        }

        let trail = &self.trail;
        if trail.capacity == 0 || trail.capacity > MAX_POPULATION {
            return Err(CoreError::InvalidConfig(format!(
                "trail.capacity must be in 1..={MAX_POPULATION}, got {}",
                trail.capacity
            )));
        }
        if !(trail.damping > 0.0 && trail.damping <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "trail.damping must be in (0, 1], got {}",
                trail.damping
            )));
        }
        if !(trail.nominal_frame_delta > 0.0 && trail.nominal_frame_delta.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "trail.nominal_frame_delta must be positive, got {}",
                trail.nominal_frame_delta
            )));
        }
        if !(trail.spawn_per_speed >= 0.0 && trail.spawn_per_speed.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "trail.spawn_per_speed must be non-negative, got {}",
                trail.spawn_per_speed
            )));
        }
        if !(self.clock.max_delta > 0.0 && self.clock.max_delta.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "clock.max_delta must be positive, got {}",
                self.clock.max_delta
            )));
        }
        if self.input.trail_feed_capacity == 0 {
            return Err(CoreError::InvalidConfig(
                "input.trail_feed_capacity must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolves the sampling seed, deriving one from the wall clock if unset.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0x5eed, |d| d.as_nanos() as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnimationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.populations.starfield, 12_000);
        assert_eq!(config.populations.shooting_stars, 5);
    }

    #[test]
    fn test_partial_toml() {
        let config = AnimationConfig::from_toml_str(
            r#"
            seed = 7

            [populations]
            starfield = 100

            [trail]
            damping = 0.9

            [loop]
            frame_budget_us = 8000
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.populations.starfield, 100);
        assert_eq!(config.populations.nebula, 4_000);
        assert_eq!(config.trail.damping, 0.9);
        assert_eq!(config.trail.capacity, 512);
        assert_eq!(config.render_loop.frame_budget_us, 8000);
    }

    #[test]
    fn test_zero_population_rejected() {
        let err = AnimationConfig::from_toml_str("[populations]\nvortex = 0\n").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidPopulation { system: "vortex", count: 0, .. }
        ));
    }

    #[test]
    fn test_bad_damping_rejected() {
        let err = AnimationConfig::from_toml_str("[trail]\ndamping = 1.5\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AnimationConfig::from_toml_str("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn test_seed_resolution() {
        let config = AnimationConfig {
            seed: Some(99),
            ..AnimationConfig::default()
        };
        assert_eq!(config.resolve_seed(), 99);
    }
}
