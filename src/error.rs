//! Error types.
//!
//! Policy violations are never errors: they surface as warning strings on
//! [`SchedulingResult`](crate::models::SchedulingResult). The types here cover
//! caller contract violations and unreadable inputs.

use thiserror::Error;

/// Caller contract violations detected before scheduling starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The roster must hold 5, 6, or 7 nurses.
    #[error("roster must have 5, 6, or 7 nurses, got {size}")]
    InvalidRosterSize { size: usize },
}

/// Errors while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors while reading an externally generated proposal.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// The reply contains no `{ ... }` span at all.
    #[error("no JSON object found in reply")]
    NoJsonObject,

    /// The `{ ... }` span is not a valid proposal document.
    #[error("malformed proposal: {0}")]
    Malformed(#[from] serde_json::Error),
}
