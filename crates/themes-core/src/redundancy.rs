//! Redundancy between candidate themes.
//!
//! The similarity used by the selector is fixed once per run: either cosine
//! over embedded theme vectors, or Jaccard over supporting-entry sets.
//! Any embedding problem makes the whole run use Jaccard.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use serde::Serialize;
use themes_embeddings::{EmbeddingError, EmbeddingProvider};
use themes_types::Entry;
use tracing::debug;

use crate::scoring::ScoredTheme;
use crate::similarity::{calculate_centroid, cosine_similarity, jaccard};
use crate::text::{contains_phrase, normalize_phrase, split_sentences};

/// Which similarity a run used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    /// Cosine similarity of mean-pooled sentence embeddings
    Embedding,
    /// Jaccard similarity of supporting-entry sets
    #[default]
    Jaccard,
}

impl std::fmt::Display for SimilarityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityMode::Embedding => write!(f, "embedding"),
            SimilarityMode::Jaccard => write!(f, "jaccard"),
        }
    }
}

/// Pairwise similarity over a candidate pool, indexed by pool position.
pub enum Redundancy<'a> {
    Embedding(Vec<Vec<f32>>),
    Jaccard(Vec<&'a BTreeSet<usize>>),
}

impl<'a> Redundancy<'a> {
    /// Jaccard redundancy over the pool's supporting-entry sets.
    pub fn jaccard(pool: &'a [ScoredTheme]) -> Self {
        Redundancy::Jaccard(pool.iter().map(|t| &t.stats.entries).collect())
    }

    pub fn mode(&self) -> SimilarityMode {
        match self {
            Redundancy::Embedding(_) => SimilarityMode::Embedding,
            Redundancy::Jaccard(_) => SimilarityMode::Jaccard,
        }
    }

    /// Similarity between pool items `i` and `j`.
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        match self {
            Redundancy::Embedding(vectors) => match (vectors.get(i), vectors.get(j)) {
                (Some(a), Some(b)) => f64::from(cosine_similarity(a, b)),
                _ => 0.0,
            },
            Redundancy::Jaccard(sets) => match (sets.get(i), sets.get(j)) {
                (Some(a), Some(b)) => jaccard(a, b),
                _ => 0.0,
            },
        }
    }
}

/// Texts to embed and, per pool item, which of them belong to it.
#[derive(Debug, Default, PartialEq)]
pub struct EmbedPlan {
    pub texts: Vec<String>,
    pub members: Vec<Vec<usize>>,
}

/// Gather supporting sentences for every pool item.
///
/// Each theme takes up to `max_sentences` sentences containing it, in
/// entry order. Sentences shared between themes are embedded once. A theme
/// with no supporting sentence embeds its own text.
pub fn plan_embedding(pool: &[ScoredTheme], entries: &[&Entry], max_sentences: usize) -> EmbedPlan {
    let sentences: Vec<(&str, String)> = entries
        .iter()
        .flat_map(|e| split_sentences(&e.text))
        .map(|s| (s, normalize_phrase(s)))
        .collect();

    let mut plan = EmbedPlan::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for theme in pool {
        let mut members = Vec::new();

        for (sentence, normalized) in &sentences {
            if members.len() >= max_sentences {
                break;
            }
            if !contains_phrase(normalized, theme.theme()) {
                continue;
            }
            let idx = *index.entry(*sentence).or_insert_with(|| {
                plan.texts.push((*sentence).to_string());
                plan.texts.len() - 1
            });
            if !members.contains(&idx) {
                members.push(idx);
            }
        }

        if members.is_empty() {
            members.push(plan.texts.len());
            plan.texts.push(theme.theme().to_string());
        }
        plan.members.push(members);
    }

    plan
}

/// Embed the pool in one batched call and build a unit vector per theme.
///
/// Fails on provider error, timeout, a short or long response, or vectors
/// of inconsistent dimension.
pub async fn embed_pool(
    pool: &[ScoredTheme],
    entries: &[&Entry],
    provider: &dyn EmbeddingProvider,
    max_sentences: usize,
    timeout: Duration,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let plan = plan_embedding(pool, entries, max_sentences);
    debug!(
        provider = provider.name(),
        texts = plan.texts.len(),
        themes = plan.members.len(),
        "Embedding candidate pool"
    );

    let embeddings = tokio::time::timeout(timeout, provider.embed(&plan.texts))
        .await
        .map_err(|_| EmbeddingError::Timeout(timeout.as_millis() as u64))??;

    if embeddings.len() != plan.texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: plan.texts.len(),
            actual: embeddings.len(),
        });
    }

    let dim = embeddings.first().map(|e| e.dimension()).unwrap_or(0);
    if let Some(bad) = embeddings.iter().find(|e| e.dimension() != dim || dim == 0) {
        return Err(EmbeddingError::DimensionMismatch {
            expected: dim,
            actual: bad.dimension(),
        });
    }

    Ok(plan
        .members
        .iter()
        .map(|members| {
            let vectors: Vec<&[f32]> = members
                .iter()
                .map(|&i| embeddings[i].values.as_slice())
                .collect();
            calculate_centroid(&vectors)
        })
        .collect())
}
