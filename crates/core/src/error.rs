//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
