//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation run. It provides:
//! 1. **Defaults:** Baseline geometry constants.
//! 2. **Structures:** Cache geometry parameters and the root session config.
//! 3. **Validation:** Conversion from raw parameters to a checked [`Geometry`].
//!
//! Configuration is supplied by command-line flags or as JSON; use
//! `SimConfig::default()` for a small direct-mapped cache.

use serde::Deserialize;

use crate::common::{ConfigError, Geometry};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use csim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert!(!config.verbose);
/// assert_eq!(config.cache.lines_per_set, 1);
/// ```
///
/// Deserializing from JSON, using either descriptive or cache-lab field names:
///
/// ```
/// use csim_core::config::SimConfig;
///
/// let json = r#"{
///     "cache": { "s": 4, "E": 2, "block_bits": 4 },
///     "verbose": true
/// }"#;
///
/// let config = SimConfig::from_json(json).unwrap();
/// assert!(config.verbose);
/// assert_eq!(config.cache.set_bits, 4);
/// assert_eq!(config.cache.lines_per_set, 2);
/// assert_eq!(config.cache.validate().unwrap().num_sets(), 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimConfig {
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Report the outcome of every trace event as it is replayed.
    #[serde(default)]
    pub verbose: bool,
}

impl SimConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults. The geometry is not validated here;
    /// call [`CacheConfig::validate`] or construct a [`crate::Simulator`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Raw cache geometry parameters, as supplied by the user.
///
/// Field aliases match the cache-lab flag names (`s`, `E`, `b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of set-index bits; the cache has `2^s` sets.
    #[serde(alias = "s", default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Number of lines per set (associativity).
    #[serde(alias = "E", default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: usize,

    /// Number of block-offset bits; blocks are `2^b` bytes.
    #[serde(alias = "b", default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,
}

impl CacheConfig {
    const fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    const fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    const fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Checks the parameters and produces a [`Geometry`].
    ///
    /// # Errors
    ///
    /// See [`Geometry::new`].
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.set_bits, self.lines_per_set, self.block_bits)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            lines_per_set: defaults::LINES_PER_SET,
            block_bits: defaults::BLOCK_BITS,
        }
    }
}
