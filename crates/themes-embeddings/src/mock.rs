//! Mock embedder for testing.

use async_trait::async_trait;
use tracing::debug;

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingProvider};

/// Default vector dimension for the mock embedder.
pub const DEFAULT_MOCK_DIMENSION: usize = 64;

/// Mock embedder that generates deterministic embeddings.
///
/// Each lowercase word is hashed (FNV-1a) into one of `dimension` buckets,
/// so texts sharing words point in similar directions and identical texts
/// embed identically. Useful for testing without a model or network.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    /// Create a new mock embedder.
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_MOCK_DIMENSION,
        }
    }

    /// Create with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut values = vec![0.0f32; self.dimension];
        for word in text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
        {
            let bucket = (fnv1a(&word.to_lowercase()) % self.dimension as u64) as usize;
            values[bucket] += 1.0;
        }
        Embedding::new(values)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        debug!(count = texts.len(), dimension = self.dimension, "Mock embedding batch");
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in s.bytes() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
