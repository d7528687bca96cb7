//! Theme output types.
//!
//! A `ThemeScore` is the terminal, externally visible record of an
//! extraction run. It is built once and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Broad category of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ThemeCategory {
    /// People and relationships ("my sister", "boss")
    Person,
    /// Locations ("home", "the office")
    Place,
    /// Feelings and moods ("anxious", "lonely")
    Emotion,
    /// Things the user does ("running", "cooking")
    Activity,
    /// Thoughts, beliefs and thinking patterns ("should", "my fault")
    Cognition,
    /// Anything else
    #[default]
    General,
}

impl std::fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeCategory::Person => write!(f, "person"),
            ThemeCategory::Place => write!(f, "place"),
            ThemeCategory::Emotion => write!(f, "emotion"),
            ThemeCategory::Activity => write!(f, "activity"),
            ThemeCategory::Cognition => write!(f, "cognition"),
            ThemeCategory::General => write!(f, "general"),
        }
    }
}

/// Cognitive distortion detected in a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DistortionType {
    /// "always", "never", "nothing", "completely"
    AllOrNothing,
    /// "should", "must", "have to"
    ShouldStatements,
    /// "terrible", "disaster", "worst"
    Catastrophizing,
    /// "I'm stupid", "loser"
    Labeling,
    /// "my fault", "because of me"
    Personalizing,
    /// "will never", "going to fail"
    FortuneTelling,
    /// No distortion pattern matched
    #[default]
    None,
}

impl std::fmt::Display for DistortionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistortionType::AllOrNothing => write!(f, "allOrNothing"),
            DistortionType::ShouldStatements => write!(f, "shouldStatements"),
            DistortionType::Catastrophizing => write!(f, "catastrophizing"),
            DistortionType::Labeling => write!(f, "labeling"),
            DistortionType::Personalizing => write!(f, "personalizing"),
            DistortionType::FortuneTelling => write!(f, "fortuneTelling"),
            DistortionType::None => write!(f, "none"),
        }
    }
}

/// Coarse polarity of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// A selected theme with its significance score.
///
/// Metadata fields are only present when the run asked for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeScore {
    /// Normalized theme phrase
    pub theme: String,

    /// Significance score, roughly in `[0, ln(words + 1) + 1]`
    pub score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ThemeCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distortion_type: Option<DistortionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_negation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,

    /// Total occurrences across the filtered entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,

    /// Accumulated recency-decayed weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recency: Option<f64>,
}

impl ThemeScore {
    /// Create a bare theme score without metadata.
    pub fn new(theme: impl Into<String>, score: f64) -> Self {
        Self {
            theme: theme.into(),
            score,
            category: None,
            distortion_type: None,
            has_negation: None,
            sentiment: None,
            frequency: None,
            recency: None,
        }
    }

    /// Attach frequency and recency statistics.
    pub fn with_stats(mut self, frequency: u32, recency: f64) -> Self {
        self.frequency = Some(frequency);
        self.recency = Some(recency);
        self
    }
}

/// Result of an extraction run, shaped by the `detailed` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeOutput {
    /// Theme phrases only, best first
    Labels(Vec<String>),
    /// Full theme records, best first
    Detailed(Vec<ThemeScore>),
}

impl ThemeOutput {
    /// Number of themes in the output.
    pub fn len(&self) -> usize {
        match self {
            ThemeOutput::Labels(v) => v.len(),
            ThemeOutput::Detailed(v) => v.len(),
        }
    }

    /// Whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Project to plain theme phrases.
    pub fn into_labels(self) -> Vec<String> {
        match self {
            ThemeOutput::Labels(v) => v,
            ThemeOutput::Detailed(v) => v.into_iter().map(|t| t.theme).collect(),
        }
    }
}
