//! Rule-table metadata for selected themes.
//!
//! Each table is evaluated in order over the lowercased theme and the first
//! matching row wins. Annotation never feeds back into scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use themes_types::{DistortionType, Sentiment, ThemeCategory};

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("annotation rule tables hold valid regexes")
}

static CATEGORY_RULES: Lazy<Vec<(Regex, ThemeCategory)>> = Lazy::new(|| {
    vec![
        (
            rule(r"\b(mom|mother|mum|dad|father|parents?|sister|brother|sibling|wife|husband|partner|boyfriend|girlfriend|fiance|fiancee|friends?|son|daughter|kids?|children|baby|boss|manager|coworkers?|colleagues?|teacher|therapist|doctor|grandma|grandmother|grandpa|grandfather|aunt|uncle|cousin|family|roommate|neighbou?r)\b"),
            ThemeCategory::Person,
        ),
        (
            rule(r"\b(anxious|anxiety|sad|sadness|happy|happiness|angry|anger|lonely|loneliness|stressed|stress|worried|worry|afraid|scared|fear|depressed|depression|excited|grateful|gratitude|calm|frustrated|frustration|overwhelmed|guilty|guilt|ashamed|shame|hopeful|hopeless|upset|nervous|joy|proud|tired|exhausted|content|relieved|panic|hurt)\b"),
            ThemeCategory::Emotion,
        ),
        (
            rule(r"\b(should|shouldn't|must|have to|need to|think|thinking|thought|thoughts|believe|belief|always|never|fault|blame|stupid|failure|worthless|mind|overthinking|wonder|decide|decision|doubt|ruminat\w*)\b"),
            ThemeCategory::Cognition,
        ),
        (
            rule(r"\b(home|house|office|school|college|university|gym|park|hospital|church|city|beach|apartment|room|bedroom|kitchen|store|restaurant|cafe|garden|car|bus|train)\b"),
            ThemeCategory::Place,
        ),
        (
            rule(r"\b(running|run|walk|walking|exercise|workout|yoga|meditation|meditate|reading|cooking|sleep|sleeping|cleaning|studying|study|writing|journaling|painting|hiking|swimming|gaming|shopping|work|job|project|meeting|wedding|party|trip|travel|dinner|lunch|breakfast)\b"),
            ThemeCategory::Activity,
        ),
    ]
});

static DISTORTION_RULES: Lazy<Vec<(Regex, DistortionType)>> = Lazy::new(|| {
    vec![
        (
            rule(r"\b(my fault|because of me|blame myself|i ruined|i caused|all on me)\b"),
            DistortionType::Personalizing,
        ),
        (
            rule(r"\b(i'm|i am|im)\s+(\w+\s+)?(stupid|idiot|loser|failure|useless|worthless|pathetic|lazy)\b|\b(loser|idiot|failure|worthless)\b"),
            DistortionType::Labeling,
        ),
        (
            rule(r"\b(will never|won't ever|never going to|going to fail|bound to fail|will always)\b"),
            DistortionType::FortuneTelling,
        ),
        (
            rule(r"\b(should|shouldn't|must|mustn't|have to|has to|need to|needs to|ought to)\b"),
            DistortionType::ShouldStatements,
        ),
        (
            rule(r"\b(terrible|horrible|awful|disaster|disastrous|worst|unbearable|catastroph\w*|ruined|hopeless|end of the world)\b"),
            DistortionType::Catastrophizing,
        ),
        (
            rule(r"\b(always|never|nothing|everything|everyone|nobody|no one|completely|totally|every time)\b"),
            DistortionType::AllOrNothing,
        ),
    ]
});

static POSITIVE_WORDS: Lazy<Regex> = Lazy::new(|| {
    rule(r"\b(happy|happiness|joy|joyful|love|loved|grateful|gratitude|calm|peaceful|proud|excited|hopeful|relieved|relaxed|good|great|better|best|fun|enjoy\w*|smil\w*|laugh\w*|content|confident|kind|beautiful|wonderful)\b")
});

static NEGATIVE_WORDS: Lazy<Regex> = Lazy::new(|| {
    rule(r"\b(sad|sadness|angry|anger|anxious|anxiety|lonely|stress|stressed|worried|worry|afraid|scared|fear|depressed|frustrated|overwhelmed|guilty|ashamed|hopeless|upset|nervous|tired|exhausted|hurt|bad|worse|worst|terrible|awful|horrible|hate|cry\w*|panic|pain|fail\w*|stupid|fault)\b")
});

static NEGATION: Lazy<Regex> = Lazy::new(|| {
    rule(r"(n't\b|\b(not|no|never|cannot|nothing|nobody|nowhere|neither|nor)\b)")
});

/// Advisory tags for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetadata {
    pub category: ThemeCategory,
    pub distortion_type: DistortionType,
    pub sentiment: Sentiment,
    pub has_negation: bool,
}

/// First matching category, `General` if none.
pub fn categorize(theme: &str) -> ThemeCategory {
    CATEGORY_RULES
        .iter()
        .find(|(re, _)| re.is_match(theme))
        .map(|(_, c)| *c)
        .unwrap_or_default()
}

/// First matching distortion, `None` if none.
pub fn detect_distortion(theme: &str) -> DistortionType {
    DISTORTION_RULES
        .iter()
        .find(|(re, _)| re.is_match(theme))
        .map(|(_, d)| *d)
        .unwrap_or_default()
}

/// Positive only if positive words appear and negative words do not, and
/// vice versa; everything else is neutral.
pub fn sentiment(theme: &str) -> Sentiment {
    match (POSITIVE_WORDS.is_match(theme), NEGATIVE_WORDS.is_match(theme)) {
        (true, false) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

pub fn has_negation(theme: &str) -> bool {
    NEGATION.is_match(theme)
}

/// Classify a theme.
///
/// `hint` is the distortion tag candidate generation attached to the
/// phrase; it is used when no distortion rule matches.
pub fn classify(theme: &str, hint: DistortionType) -> ThemeMetadata {
    let theme = theme.to_lowercase();
    let distortion_type = match detect_distortion(&theme) {
        DistortionType::None => hint,
        found => found,
    };
    ThemeMetadata {
        category: categorize(&theme),
        distortion_type,
        sentiment: sentiment(&theme),
        has_negation: has_negation(&theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        assert_eq!(categorize("my sister"), ThemeCategory::Person);
        // person wins over emotion
        assert_eq!(categorize("anxious about my sister"), ThemeCategory::Person);
        assert_eq!(categorize("feel anxious"), ThemeCategory::Emotion);
        assert_eq!(categorize("should exercise"), ThemeCategory::Cognition);
        assert_eq!(categorize("quiet home"), ThemeCategory::Place);
        assert_eq!(categorize("morning yoga"), ThemeCategory::Activity);
        assert_eq!(categorize("blue umbrella"), ThemeCategory::General);
    }

    #[test]
    fn test_distortion_order() {
        // personalizing is checked before all-or-nothing
        assert_eq!(detect_distortion("always my fault"), DistortionType::Personalizing);
        assert_eq!(detect_distortion("i'm so stupid"), DistortionType::Labeling);
        assert_eq!(detect_distortion("will never change"), DistortionType::FortuneTelling);
        assert_eq!(detect_distortion("should call"), DistortionType::ShouldStatements);
        assert_eq!(detect_distortion("terrible week"), DistortionType::Catastrophizing);
        assert_eq!(detect_distortion("always late"), DistortionType::AllOrNothing);
        assert_eq!(detect_distortion("garden work"), DistortionType::None);
    }

    #[test]
    fn test_sentiment_exclusive_words() {
        assert_eq!(sentiment("grateful walk"), Sentiment::Positive);
        assert_eq!(sentiment("feel anxious"), Sentiment::Negative);
        assert_eq!(sentiment("happy but tired"), Sentiment::Neutral);
        assert_eq!(sentiment("garden"), Sentiment::Neutral);
    }

    #[test]
    fn test_negation() {
        assert!(has_negation("not okay"));
        assert!(has_negation("can't sleep"));
        assert!(has_negation("nobody cares"));
        assert!(!has_negation("notebook"));
        assert!(!has_negation("knots"));
    }

    #[test]
    fn test_classify_uses_hint_when_rules_silent() {
        let meta = classify("forgets keys", DistortionType::AllOrNothing);
        assert_eq!(meta.distortion_type, DistortionType::AllOrNothing);

        let meta = classify("my fault", DistortionType::AllOrNothing);
        assert_eq!(meta.distortion_type, DistortionType::Personalizing);
    }

    #[test]
    fn test_classify_lowercases() {
        let meta = classify("My Sister", DistortionType::None);
        assert_eq!(meta.category, ThemeCategory::Person);
        assert_eq!(meta.sentiment, Sentiment::Neutral);
        assert!(!meta.has_negation);
    }
}
