//! Extraction options.
//!
//! Every field has a serde default so partial config files and env
//! overrides deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Tunables for a single extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Lookback window in days (inclusive cutoff)
    #[serde(default = "default_days_ago")]
    pub days_ago: u32,

    /// Maximum number of themes to select
    #[serde(default = "default_theme_limit")]
    pub theme_limit: usize,

    /// Use the embedding provider for redundancy, if one is attached
    #[serde(default = "default_true")]
    pub use_embeddings: bool,

    /// MMR trade-off: 1.0 = score only, 0.0 = diversity only
    #[serde(default = "default_mmr_lambda")]
    pub mmr_lambda: f64,

    /// Recency decay time constant in days
    #[serde(default = "default_decay_tau_days")]
    pub decay_tau_days: f64,

    /// Sentence budget for the batched embedding request
    #[serde(default = "default_max_sentences_for_embed")]
    pub max_sentences_for_embed: usize,

    /// Return full theme records instead of bare phrases
    #[serde(default)]
    pub detailed: bool,

    /// Annotate selected themes with category, distortion and sentiment
    #[serde(default)]
    pub include_cbt_metadata: bool,

    /// Whitespace token cap applied before candidate generation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Maximum number of candidates carried into stats aggregation
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Number of top-scored candidates considered by the MMR selector
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,

    /// Timeout for the batched embedding request (ms)
    #[serde(default = "default_embed_timeout_ms")]
    pub embed_timeout_ms: u64,

    /// Substring-collapse thresholds
    #[serde(default)]
    pub collapse: CollapseConfig,

    /// Composite score weights
    #[serde(default)]
    pub scoring: ScoringWeights,
}

fn default_days_ago() -> u32 {
    7
}
fn default_theme_limit() -> usize {
    30
}
fn default_true() -> bool {
    true
}
fn default_mmr_lambda() -> f64 {
    0.7
}
fn default_decay_tau_days() -> f64 {
    3.0
}
fn default_max_sentences_for_embed() -> usize {
    800
}
fn default_max_tokens() -> usize {
    10_000
}
fn default_max_candidates() -> usize {
    2_000
}
fn default_candidate_pool() -> usize {
    200
}
fn default_embed_timeout_ms() -> u64 {
    5_000
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            days_ago: default_days_ago(),
            theme_limit: default_theme_limit(),
            use_embeddings: default_true(),
            mmr_lambda: default_mmr_lambda(),
            decay_tau_days: default_decay_tau_days(),
            max_sentences_for_embed: default_max_sentences_for_embed(),
            detailed: false,
            include_cbt_metadata: false,
            max_tokens: default_max_tokens(),
            max_candidates: default_max_candidates(),
            candidate_pool: default_candidate_pool(),
            embed_timeout_ms: default_embed_timeout_ms(),
            collapse: CollapseConfig::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl ExtractOptions {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if !(0.0..=1.0).contains(&self.mmr_lambda) {
            return Err(ThemeError::Config(format!(
                "mmr_lambda must be 0.0-1.0, got {}",
                self.mmr_lambda
            )));
        }
        if !(self.decay_tau_days.is_finite() && self.decay_tau_days > 0.0) {
            return Err(ThemeError::Config(format!(
                "decay_tau_days must be > 0, got {}",
                self.decay_tau_days
            )));
        }
        if self.theme_limit == 0 {
            return Err(ThemeError::Config("theme_limit must be > 0".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(ThemeError::Config("max_tokens must be > 0".to_string()));
        }
        if self.embed_timeout_ms == 0 {
            return Err(ThemeError::Config(
                "embed_timeout_ms must be > 0".to_string(),
            ));
        }
        self.collapse.validate()?;
        self.scoring.validate()
    }
}

/// Thresholds for folding a shorter theme into a longer one containing it.
///
/// The longer theme must reach these fractions of the shorter theme's
/// frequency and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapseConfig {
    #[serde(default = "default_collapse_ratio")]
    pub freq_ratio: f64,

    #[serde(default = "default_collapse_ratio")]
    pub score_ratio: f64,
}

fn default_collapse_ratio() -> f64 {
    0.7
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            freq_ratio: default_collapse_ratio(),
            score_ratio: default_collapse_ratio(),
        }
    }
}

impl CollapseConfig {
    fn validate(&self) -> Result<(), ThemeError> {
        for (name, v) in [("freq_ratio", self.freq_ratio), ("score_ratio", self.score_ratio)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ThemeError::Config(format!(
                    "collapse.{name} must be 0.0-1.0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Weights of the normalized statistics in the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_frequency_weight")]
    pub frequency: f64,

    #[serde(default = "default_coverage_weight")]
    pub coverage: f64,

    #[serde(default = "default_recency_weight")]
    pub recency: f64,
}

fn default_frequency_weight() -> f64 {
    0.3
}
fn default_coverage_weight() -> f64 {
    0.4
}
fn default_recency_weight() -> f64 {
    0.3
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            frequency: default_frequency_weight(),
            coverage: default_coverage_weight(),
            recency: default_recency_weight(),
        }
    }
}

impl ScoringWeights {
    fn validate(&self) -> Result<(), ThemeError> {
        let all = [self.frequency, self.coverage, self.recency];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ThemeError::Config(format!(
                "scoring weights must be finite and >= 0, got {:?}",
                all
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.days_ago, 7);
        assert_eq!(options.theme_limit, 30);
        assert!(options.use_embeddings);
        assert!((options.mmr_lambda - 0.7).abs() < f64::EPSILON);
        assert!((options.decay_tau_days - 3.0).abs() < f64::EPSILON);
        assert_eq!(options.max_sentences_for_embed, 800);
        assert!(!options.detailed);
        assert!(!options.include_cbt_metadata);
        assert_eq!(options.max_tokens, 10_000);
        assert!((options.collapse.freq_ratio - 0.7).abs() < f64::EPSILON);
        assert!((options.scoring.coverage - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_defaults_ok() {
        assert!(ExtractOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut options = ExtractOptions {
            mmr_lambda: 1.5,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        options.mmr_lambda = 0.5;
        options.decay_tau_days = 0.0;
        assert!(options.validate().is_err());

        options.decay_tau_days = 3.0;
        options.collapse.score_ratio = -0.1;
        assert!(options.validate().is_err());

        options.collapse.score_ratio = 0.7;
        options.scoring.recency = f64::NAN;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ExtractOptions =
            serde_json::from_str(r#"{"theme_limit": 5, "collapse": {"freq_ratio": 0.5}}"#)
                .unwrap();
        assert_eq!(options.theme_limit, 5);
        assert_eq!(options.days_ago, 7);
        assert!((options.collapse.freq_ratio - 0.5).abs() < f64::EPSILON);
        assert!((options.collapse.score_ratio - 0.7).abs() < f64::EPSILON);
    }
}
