//! Error types for the Galaxy3D camera rig
//!
//! This module defines the error types used throughout the rig,
//! covering hierarchy authoring, configuration and collision probes.

use std::fmt;

/// Result type for camera rig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Camera rig errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed rig hierarchy or invalid tunables.
    ///
    /// Detected at authoring time; blocks activation.
    ConfigurationError(String),

    /// A rig node the core depends on was never assigned (or was removed).
    ///
    /// Not recoverable at runtime; the rig refuses to tick.
    MissingReference(String),

    /// Zero-distance or zero-direction shape cast.
    ///
    /// Recovered locally by the clipping resolver as "no hit".
    DegenerateProbe(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Error::MissingReference(msg) => write!(f, "Missing reference: {}", msg),
            Error::DegenerateProbe(msg) => write!(f, "Degenerate probe: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
