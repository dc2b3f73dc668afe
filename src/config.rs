//! Engine configuration.
//!
//! All knobs are fixed at startup: particle budget, pool capacity, sampled
//! value ranges, palette, physics constants, and the constrained-device
//! profile. Configuration is plain data with serde derives so it can be
//! loaded once from a TOML file.
//!
//! # Example
//!
//! ```ignore
//! let config = EngineConfig {
//!     max_particles: 200,
//!     palette: Palette::Ember,
//!     ..EngineConfig::default()
//! };
//! let engine = ParticleEngine::new(config);
//! ```

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive value range, sampled uniformly at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Named color palettes for spawned particles.
///
/// A palette is a small set of stops; each spawn without an explicit color
/// override picks one stop uniformly at random.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub enum Palette {
    /// Warm golds, pinks and whites.
    #[default]
    Celebration,

    /// Cool blues and teals.
    Ocean,

    /// Reds and oranges.
    Ember,

    /// White only.
    Mono,

    /// Explicit RGB stops (each channel 0.0-1.0).
    Custom(Vec<[f32; 3]>),
}

impl Palette {
    /// The RGB stops for this palette.
    pub fn colors(&self) -> &[[f32; 3]] {
        match self {
            Palette::Celebration => &[
                [1.0, 0.84, 0.31],
                [1.0, 0.62, 0.26],
                [0.96, 0.45, 0.62],
                [0.72, 0.53, 0.96],
                [1.0, 1.0, 1.0],
            ],
            Palette::Ocean => &[
                [0.25, 0.65, 0.95],
                [0.18, 0.45, 0.85],
                [0.45, 0.85, 0.90],
                [0.80, 0.95, 1.0],
            ],
            Palette::Ember => &[
                [1.0, 0.35, 0.12],
                [1.0, 0.55, 0.18],
                [0.85, 0.20, 0.10],
                [1.0, 0.80, 0.40],
            ],
            Palette::Mono => &[[1.0, 1.0, 1.0]],
            Palette::Custom(stops) => stops,
        }
    }
}

/// Coarse device class, selected once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceProfile {
    /// Full effects.
    #[default]
    Standard,
    /// Reduced effects for low-powered devices.
    Constrained,
}

/// Overrides applied when running on [`DeviceProfile::Constrained`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstrainedProfile {
    /// Lower particle budget.
    pub max_particles: usize,
    /// Multiplier applied to the lifetime range.
    pub lifetime_scale: f32,
    /// Fraction of each requested spawn count actually spawned (rounded up).
    pub spawn_rate: f32,
}

impl Default for ConstrainedProfile {
    fn default() -> Self {
        Self {
            max_particles: 60,
            lifetime_scale: 0.6,
            spawn_rate: 0.5,
        }
    }
}

/// Static engine configuration.
///
/// Positions and sizes are logical pixels; velocities are units per frame;
/// lifetimes are seconds on the engine clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Global budget on concurrently live particles.
    pub max_particles: usize,
    /// Number of particle slots the pool recycles.
    pub pool_capacity: usize,
    /// Particle edge length in pixels.
    pub size: ValueRange,
    /// Launch speed in units per frame.
    pub speed: ValueRange,
    /// Particle lifetime in seconds.
    pub lifetime: ValueRange,
    /// Spin in radians per frame.
    pub rotation_speed: ValueRange,
    /// Full width of the fountain's angular spread, in radians.
    pub fountain_spread: f32,
    /// Downward acceleration in units per frame squared.
    pub gravity: f32,
    /// Per-frame velocity multiplier, below 1.
    pub friction: f32,
    /// Whether opacity tracks remaining life.
    pub fade_out: bool,
    /// Colors sampled for spawns without an explicit color.
    pub palette: Palette,
    /// Device class; `Constrained` applies [`ConstrainedProfile`].
    pub profile: DeviceProfile,
    /// Overrides for the constrained profile.
    pub constrained: ConstrainedProfile,
    /// RNG seed for reproducible spawning; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_particles: 150,
            pool_capacity: 100,
            size: ValueRange::new(4.0, 9.0),
            speed: ValueRange::new(1.5, 4.0),
            lifetime: ValueRange::new(0.9, 1.8),
            rotation_speed: ValueRange::new(-0.15, 0.15),
            fountain_spread: PI / 5.0,
            gravity: 0.12,
            friction: 0.98,
            fade_out: true,
            palette: Palette::default(),
            profile: DeviceProfile::default(),
            constrained: ConstrainedProfile::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The fraction of each requested spawn count actually spawned.
    pub fn spawn_rate(&self) -> f32 {
        match self.profile {
            DeviceProfile::Standard => 1.0,
            DeviceProfile::Constrained => self.constrained.spawn_rate,
        }
    }

    /// Collapse the device profile into concrete limits.
    pub(crate) fn resolved(&self) -> EngineConfig {
        match self.profile {
            DeviceProfile::Standard => self.clone(),
            DeviceProfile::Constrained => {
                let scale = self.constrained.lifetime_scale;
                EngineConfig {
                    max_particles: self.max_particles.min(self.constrained.max_particles),
                    lifetime: ValueRange::new(self.lifetime.min * scale, self.lifetime.max * scale),
                    ..self.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert!(config.friction < 1.0);
        assert!(config.max_particles >= config.pool_capacity);
        assert!(!config.palette.colors().is_empty());
        assert_eq!(config.spawn_rate(), 1.0);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = EngineConfig::default();
        config.max_particles = 99;
        config.palette = Palette::Custom(vec![[0.1, 0.2, 0.3]]);
        config.profile = DeviceProfile::Constrained;
        config.seed = Some(7);

        let text = toml::to_string(&config).unwrap();
        let parsed = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed = EngineConfig::from_toml_str("max_particles = 42\n").unwrap();
        assert_eq!(parsed.max_particles, 42);
        assert_eq!(parsed.friction, EngineConfig::default().friction);
    }

    #[test]
    fn constrained_profile_tightens_limits() {
        let mut config = EngineConfig::default();
        config.profile = DeviceProfile::Constrained;

        let resolved = config.resolved();
        assert_eq!(resolved.max_particles, config.constrained.max_particles);
        assert!(resolved.lifetime.max < config.lifetime.max);
        assert_eq!(config.spawn_rate(), config.constrained.spawn_rate);
    }

    #[test]
    fn standard_profile_is_untouched() {
        let config = EngineConfig::default();
        assert_eq!(config.resolved(), config);
    }
}
