//! Candidate generation.
//!
//! Four strategies feed one additive weight map keyed by normalized phrase:
//! cognitive patterns, entities and possessives, noun-phrase runs, and
//! n-grams over the content-token stream of each entry.

use std::collections::HashMap;

use themes_types::DistortionType;
use tracing::debug;

use crate::entities::{extract_entities, extract_noun_phrases};
use crate::ngram::NGrams;
use crate::patterns::match_patterns;
use crate::text::{content_tokens, normalize_phrase};

/// Weight of a single content word.
pub const UNIGRAM_WEIGHT: f64 = 0.5;

/// Longest n-gram generated.
pub const MAX_NGRAM: usize = 4;

/// A normalized phrase with its accumulated weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub phrase: String,
    pub weight: f64,
    /// First distortion tag a cognitive pattern attached to this phrase
    pub distortion: DistortionType,
}

/// Weight for an n-gram of `n` tokens: 0.5, 1, 2, 3.
pub fn ngram_weight(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1 => UNIGRAM_WEIGHT,
        n => (n - 1) as f64,
    }
}

/// Additive candidate weight map.
#[derive(Debug, Default)]
pub struct CandidateMap {
    entries: HashMap<String, Candidate>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add weight to a phrase, normalizing it first. Empty phrases are
    /// ignored.
    pub fn add(&mut self, phrase: &str, weight: f64) {
        self.add_tagged(phrase, weight, DistortionType::None);
    }

    /// Add weight and remember the distortion tag if the phrase has none yet.
    pub fn add_tagged(&mut self, phrase: &str, weight: f64, distortion: DistortionType) {
        let phrase = normalize_phrase(phrase);
        if phrase.is_empty() {
            return;
        }
        let candidate = self
            .entries
            .entry(phrase.clone())
            .or_insert_with(|| Candidate {
                phrase,
                weight: 0.0,
                distortion: DistortionType::None,
            });
        candidate.weight += weight;
        if candidate.distortion == DistortionType::None {
            candidate.distortion = distortion;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates by weight descending, ties alphabetical, at most `cap`.
    pub fn into_ranked(self, cap: usize) -> Vec<Candidate> {
        let mut ranked: Vec<Candidate> = self.entries.into_values().collect();
        ranked.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.phrase.cmp(&b.phrase))
        });
        ranked.truncate(cap);
        ranked
    }
}

/// Feed one entry's text through every strategy.
pub fn collect_from_text(text: &str, map: &mut CandidateMap) {
    for m in match_patterns(text) {
        map.add_tagged(&m.phrase, m.weight, m.distortion);
    }

    for w in extract_entities(text) {
        map.add(&w.phrase, w.weight);
    }

    for w in extract_noun_phrases(text) {
        map.add(&w.phrase, w.weight);
    }

    let stream = content_tokens(text);
    for gram in NGrams::new(&stream, 1, MAX_NGRAM) {
        map.add(&gram.join(" "), ngram_weight(gram.len()));
    }
}

/// Generate ranked candidates from entry texts, keeping at most
/// `max_candidates`.
///
/// N-grams never span two entries.
pub fn generate_candidates<S: AsRef<str>>(texts: &[S], max_candidates: usize) -> Vec<Candidate> {
    let mut map = CandidateMap::new();
    for text in texts {
        collect_from_text(text.as_ref(), &mut map);
    }

    let generated = map.len();
    let ranked = map.into_ranked(max_candidates);
    debug!(generated, kept = ranked.len(), "Generated candidates");
    ranked
}
