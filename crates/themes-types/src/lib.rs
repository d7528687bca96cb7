//! # themes-types
//!
//! Shared domain types for the journal themes engine.
//!
//! This crate defines the data structures used throughout the system:
//! - Entries: Immutable dated journal texts handed in by the caller
//! - Theme scores: The ranked, optionally annotated output of an extraction run
//! - Options: Tunables for a single extraction run
//! - Settings: Layered configuration for the `themes` binary
//!
//! ## Usage
//!
//! ```rust
//! use themes_types::{Entry, ExtractOptions};
//!
//! let entry = Entry::new("Slept badly again", "2024-03-02");
//! let options = ExtractOptions::default();
//! assert_eq!(options.theme_limit, 30);
//! assert_eq!(entry.date, "2024-03-02");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod options;
pub mod theme;

pub use config::Settings;
pub use entry::Entry;
pub use error::ThemeError;
pub use options::{CollapseConfig, ExtractOptions, ScoringWeights};
pub use theme::{DistortionType, Sentiment, ThemeCategory, ThemeOutput, ThemeScore};
