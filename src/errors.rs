//! Shared error types used across submodules.

use thiserror::Error;

use crate::simulation::SimulationError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum ChargeFieldError {
    /// Raised when a charge, structure, system or view is built from malformed input.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Raised when a plot identifier is unknown to the registry.
    #[error("plot not found: {0}")]
    PlotNotFound(String),
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps I/O failures while reading scenarios or writing exports.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Raised when a TOML scenario cannot be parsed.
    #[cfg(feature = "serde")]
    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Raised when a JSON scenario or plot request cannot be parsed.
    #[cfg(feature = "serde")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChargeFieldError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Convenience alias for results carrying [`ChargeFieldError`].
pub type Result<T, E = ChargeFieldError> = std::result::Result<T, E>;
