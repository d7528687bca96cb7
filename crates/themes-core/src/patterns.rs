//! Cognitive-pattern detection for candidate generation.
//!
//! A fixed, ordered table of `(regex, distortion, weight)` rows run over
//! normalized entry text. Matches become high-weight candidates.

use once_cell::sync::Lazy;
use regex::Regex;
use themes_types::DistortionType;

use crate::text::{is_stopword, normalize_phrase};

/// One row of the cognitive-pattern table.
pub struct CognitivePattern {
    /// Short label used in logs
    pub name: &'static str,
    /// Pattern over normalized text
    pub regex: Regex,
    /// Distortion this pattern signals, `None` for plain negation
    pub distortion: DistortionType,
    /// Candidate weight for each match
    pub weight: f64,
    /// Capture group holding the predicate word, if any
    pub predicate_group: Option<usize>,
}

impl CognitivePattern {
    fn new(
        name: &'static str,
        pattern: &str,
        distortion: DistortionType,
        weight: f64,
        predicate_group: Option<usize>,
    ) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("cognitive pattern table holds valid regexes"),
            distortion,
            weight,
            predicate_group,
        }
    }
}

/// Patterns in evaluation order.
pub static COGNITIVE_PATTERNS: Lazy<Vec<CognitivePattern>> = Lazy::new(|| {
    vec![
        CognitivePattern::new(
            "negation",
            r"\b(?:not|no|never)\s+([a-z']+)",
            DistortionType::None,
            5.0,
            Some(1),
        ),
        CognitivePattern::new(
            "contraction",
            r"\b([a-z]+n't|cannot)\s+([a-z']+)",
            DistortionType::None,
            5.0,
            Some(2),
        ),
        CognitivePattern::new(
            "always_never",
            r"\b(?:always|never)\s+([a-z']+)",
            DistortionType::AllOrNothing,
            6.0,
            Some(1),
        ),
        CognitivePattern::new(
            "obligation",
            r"\b(?:should|shouldn't|must|have to|has to|need to|needs to|ought to)\s+([a-z']+)",
            DistortionType::ShouldStatements,
            6.0,
            Some(1),
        ),
        CognitivePattern::new(
            "catastrophizing",
            r"\b(?:terrible|horrible|awful|disaster|disastrous|worst|unbearable|catastrophic|hopeless|ruined)\b",
            DistortionType::Catastrophizing,
            5.0,
            None,
        ),
        CognitivePattern::new(
            "self_label",
            r"\b(?:i'm|i am|im)\s+(?:(?:so|such|a|an|really|just|totally|completely|a\s+total)\s+)*(stupid|idiot|loser|failure|useless|worthless|pathetic|weak|lazy|broken|burden|disappointment)\b",
            DistortionType::Labeling,
            6.0,
            Some(1),
        ),
        CognitivePattern::new(
            "personalizing",
            r"\b(?:my fault|because of me|blame myself|i ruined|i caused|all on me)\b",
            DistortionType::Personalizing,
            6.0,
            None,
        ),
        CognitivePattern::new(
            "fortune_telling",
            r"\b(?:will never|won't ever|never going to|going to fail|bound to fail|will always)\b",
            DistortionType::FortuneTelling,
            5.0,
            None,
        ),
    ]
});

/// A phrase found by a cognitive pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    /// Normalized matched phrase
    pub phrase: String,
    pub distortion: DistortionType,
    pub weight: f64,
}

/// Run every pattern over `text` in table order.
///
/// Matches whose predicate word is a stopword ("not the", "never was")
/// are dropped.
pub fn match_patterns(text: &str) -> Vec<PatternMatch> {
    let normalized = normalize_phrase(text);
    let mut matches = Vec::new();

    for pattern in COGNITIVE_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(&normalized) {
            if let Some(group) = pattern.predicate_group {
                match caps.get(group) {
                    Some(pred) if !is_stopword(pred.as_str()) => {}
                    _ => continue,
                }
            }
            let Some(whole) = caps.get(0) else { continue };
            matches.push(PatternMatch {
                phrase: whole.as_str().to_string(),
                distortion: pattern.distortion,
                weight: pattern.weight,
            });
        }
    }

    matches
}
