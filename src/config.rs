//! Engine configuration.
//!
//! Loaded from TOML; every field is optional and falls back to the unit's
//! standing policy.
//!
//! ```toml
//! prioritize_continuity = true
//! balance_tolerance = 2.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Tunables for the scheduling engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Keep rooms with last shift's nurse when that nurse is on the roster.
    pub prioritize_continuity: bool,
    /// Largest allowed gap between a nurse's difficulty score and the mean
    /// before the run is flagged as unbalanced.
    pub balance_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prioritize_continuity: true,
            balance_tolerance: 2.0,
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "balance_tolerance",
                reason: format!("must be a non-negative number, got {}", self.balance_tolerance),
            });
        }
        Ok(())
    }
}
