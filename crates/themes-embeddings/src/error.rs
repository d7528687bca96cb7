//! Embedding error types.

use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Provider could not be reached or refused the request
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider returned an error for the request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Request did not finish in time
    #[error("Embedding request timed out after {0} ms")]
    Timeout(u64),

    /// Response did not match the request
    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
