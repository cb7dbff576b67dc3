//! Error types for the asteroids engine
//!
//! The simulation core (sequence, bounding boxes, quadtree, collision pass)
//! has no error surface. Errors only come from the edges: configuration
//! validation, stale entity keys, and the engine session registry.

use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Asteroids engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Engine or session lifecycle misuse (not initialized, duplicate name, ...)
    InitializationFailed(String),

    /// Rejected configuration (play field, quadtree thresholds, ...)
    InvalidConfig(String),

    /// Entity key that is stale or does not refer to the expected kind
    InvalidEntity(String),

    /// Generic engine failure (poisoned lock, unknown session, ...)
    EngineError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::InvalidEntity(msg) => write!(f, "Invalid entity: {}", msg),
            Error::EngineError(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
