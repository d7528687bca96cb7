//! # themes-embeddings
//!
//! Embedding provider interface for the journal themes engine.
//!
//! The embedding model itself lives outside this workspace. Callers build
//! one provider at startup, wrap it in an `Arc`, and hand it to every
//! extraction run; the engine never holds a global handle.
//!
//! ## Features
//! - Async, batched `EmbeddingProvider` trait
//! - Unit-length `Embedding` vectors with cosine similarity
//! - Deterministic `MockEmbedder` for tests and offline runs

pub mod error;
pub mod mock;
pub mod model;

pub use error::EmbeddingError;
pub use mock::MockEmbedder;
pub use model::{Embedding, EmbeddingProvider};
