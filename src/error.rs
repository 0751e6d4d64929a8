use thiserror::Error;

/// Unified error type for both index engines.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value outside its valid range. Raised at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A structural check found the index in an impossible state.
    #[error("invariant violated: {0}")]
    Invariant(String),
    /// A benchmark report could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
