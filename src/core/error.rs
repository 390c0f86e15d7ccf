//! Error types for RDF accumulation and reporting

use std::path::PathBuf;
use thiserror::Error;

/// Result type for RDF operations
pub type RdfResult<T> = Result<T, RdfError>;

/// RDF error types
#[derive(Debug, Error)]
pub enum RdfError {
    /// Lattice parameters that cannot produce a radius window.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A snapshot or partial accumulator built for a different lattice width.
    #[error("Width mismatch: accumulator expects W={expected}, got W={found}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("Insufficient data: cannot finalize RDF with zero simulations")]
    InsufficientData,

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RdfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RdfError::Io {
            path: path.into(),
            source,
        }
    }
}
