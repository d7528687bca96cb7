//! Composite significance scoring.
//!
//! Frequency, coverage and recency are each divided by their maximum over
//! all surviving themes, weighted, summed, and multiplied by a length bonus
//! that favours multi-word phrases.

use themes_types::ScoringWeights;

use crate::stats::ThemeStats;
use crate::text::word_count;

/// A theme with its statistics and composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTheme {
    pub stats: ThemeStats,
    pub score: f64,
}

impl ScoredTheme {
    /// The normalized theme phrase.
    pub fn theme(&self) -> &str {
        &self.stats.theme
    }
}

/// Length bonus: `ln(words + 1) + 1`.
pub fn length_bonus(theme: &str) -> f64 {
    (word_count(theme) as f64 + 1.0).ln() + 1.0
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Score every theme and order by score descending, ties by theme text.
///
/// # Example
/// ```
/// use std::collections::BTreeSet;
/// use themes_core::scoring::score_themes;
/// use themes_core::stats::ThemeStats;
/// use themes_types::{DistortionType, ScoringWeights};
///
/// let stats = vec![ThemeStats {
///     theme: "morning run".to_string(),
///     weight: 3.0,
///     distortion: DistortionType::None,
///     freq: 2,
///     recency_weighted: 1.4,
///     entries: BTreeSet::from([0, 1]),
/// }];
/// let scored = score_themes(stats, &ScoringWeights::default());
/// // every factor is at its maximum, so the score is the full length bonus
/// assert!((scored[0].score - (3f64.ln() + 1.0)).abs() < 1e-9);
/// ```
pub fn score_themes(stats: Vec<ThemeStats>, weights: &ScoringWeights) -> Vec<ScoredTheme> {
    let max_freq = stats.iter().map(|s| s.freq).max().unwrap_or(0) as f64;
    let max_cov = stats.iter().map(|s| s.coverage()).max().unwrap_or(0) as f64;
    let max_rec = stats
        .iter()
        .map(|s| s.recency_weighted)
        .fold(0.0f64, f64::max);

    let mut scored: Vec<ScoredTheme> = stats
        .into_iter()
        .map(|s| {
            let freq_norm = ratio(s.freq as f64, max_freq);
            let cov_norm = ratio(s.coverage() as f64, max_cov);
            let rec_norm = ratio(s.recency_weighted, max_rec);
            let base = weights.frequency * freq_norm
                + weights.coverage * cov_norm
                + weights.recency * rec_norm;
            let score = base * length_bonus(&s.theme);
            ScoredTheme { stats: s, score }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.theme().cmp(b.theme()))
    });
    scored
}
