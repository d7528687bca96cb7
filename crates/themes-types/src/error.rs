//! Error types for the journal themes engine.

use thiserror::Error;

/// Unified error type for theme operations.
///
/// Extraction itself never fails; these errors surface only when loading
/// configuration or parsing entries.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
