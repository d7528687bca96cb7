//! # themes-core
//!
//! Theme significance scoring and diversified selection for journal entries.
//!
//! Given a user's recent entries, this crate extracts candidate phrases,
//! scores each by frequency, cross-entry coverage and recency, then picks a
//! bounded, non-redundant subset with Maximal Marginal Relevance.
//!
//! ## Features
//! - Cognitive-pattern, entity, noun-phrase and n-gram candidate generation
//! - Recency-decayed, coverage-weighted scoring with a length bonus
//! - MMR selection over embedding cosine or entry-set Jaccard similarity
//! - Fail-open embedding: errors and timeouts fall back to Jaccard
//! - Optional category, distortion, sentiment and negation tags

pub mod annotate;
pub mod candidates;
pub mod entities;
pub mod extractor;
pub mod ngram;
pub mod patterns;
pub mod postfilter;
pub mod redundancy;
pub mod scoring;
pub mod selection;
pub mod similarity;
pub mod stats;
pub mod text;
pub mod window;

pub use annotate::{classify, ThemeMetadata};
pub use candidates::{generate_candidates, Candidate};
pub use extractor::{extract_themes, ExtractionReport, ThemeExtractor};
pub use redundancy::SimilarityMode;
pub use scoring::{score_themes, ScoredTheme};
pub use selection::select_mmr;
pub use similarity::{calculate_centroid, cosine_similarity, jaccard};
pub use stats::{aggregate, ThemeStats};
pub use window::filter_recent;
