//! Cleanup passes over themes.
//!
//! 1. Noise: pure stopwords, two characters or fewer, purely numeric.
//! 2. Generic single words ("thing", "stuff").
//! 3. Substring collapse: a shorter theme is dropped when a longer theme
//!    containing it as a substring is nearly as frequent and nearly as
//!    strong.

use themes_types::CollapseConfig;
use tracing::debug;

use crate::scoring::ScoredTheme;
use crate::text::{contains_phrase, is_generic_term, is_numeric, is_stopword, tokenize};

/// Pass 1: pure stopwords, `<= 2` characters, or only digits.
pub fn is_noise(theme: &str) -> bool {
    let tokens = tokenize(theme);
    tokens.is_empty()
        || theme.chars().count() <= 2
        || tokens.iter().all(|t| is_stopword(t))
        || tokens.iter().all(|t| is_numeric(t))
}

/// Pass 2: single-word generic term. Multi-word phrases always pass.
pub fn is_generic(theme: &str) -> bool {
    let tokens = tokenize(theme);
    tokens.len() == 1 && is_generic_term(&tokens[0])
}

/// Passes 1 and 2 combined.
pub fn keep_theme(theme: &str) -> bool {
    !is_noise(theme) && !is_generic(theme)
}

/// Pass 3: drop each theme dominated by a longer theme that contains it.
///
/// `longer` dominates `shorter` when it has more characters, contains it
/// as a substring, and reaches `freq_ratio` of its frequency and
/// `score_ratio` of its score. Dominance is judged against the whole input
/// so applying the pass twice changes nothing. Order is preserved.
pub fn collapse_substrings(themes: Vec<ScoredTheme>, config: &CollapseConfig) -> Vec<ScoredTheme> {
    let lengths: Vec<usize> = themes.iter().map(|t| t.theme().chars().count()).collect();

    let dominated: Vec<bool> = themes
        .iter()
        .enumerate()
        .map(|(i, shorter)| {
            themes.iter().enumerate().any(|(j, longer)| {
                i != j
                    && lengths[j] > lengths[i]
                    && contains_phrase(longer.theme(), shorter.theme())
                    && f64::from(longer.stats.freq)
                        >= config.freq_ratio * f64::from(shorter.stats.freq)
                    && longer.score >= config.score_ratio * shorter.score
            })
        })
        .collect();

    let before = themes.len();
    let kept: Vec<ScoredTheme> = themes
        .into_iter()
        .zip(dominated)
        .filter_map(|(t, d)| (!d).then_some(t))
        .collect();
    debug!(before, after = kept.len(), "Collapsed substring themes");
    kept
}
