//! Named entities, possessive relations and noun-phrase runs.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{is_numeric, is_stopword, normalize_phrase, split_sentences, tokenize};

/// Weight of a bare capitalized run ("Anna", "New York").
pub const ENTITY_WEIGHT: f64 = 3.0;

/// Weight of a possessive relation ("my sister").
pub const RELATION_WEIGHT: f64 = 4.0;

/// Weight of a possessive relation followed by a name ("my sister anna").
pub const NAMED_RELATION_WEIGHT: f64 = 5.0;

/// Base weight of a noun-phrase run; each word past two adds one.
pub const NOUN_PHRASE_BASE_WEIGHT: f64 = 3.0;

/// Longest noun-phrase run emitted as one candidate.
pub const MAX_NOUN_PHRASE_WORDS: usize = 4;

static POSSESSIVE_RELATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?i:my|his|her|our|their)\s+(?i:mom|mother|mum|dad|father|parents|sister|brother|sibling|wife|husband|partner|boyfriend|girlfriend|fiance|fiancee|friend|son|daughter|kid|kids|children|baby|boss|manager|coworker|colleague|teacher|therapist|doctor|grandma|grandmother|grandpa|grandfather|aunt|uncle|cousin|family|roommate|neighbor|dog|cat))\b(?:\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?))?",
    )
    .expect("possessive relation regex is valid")
});

/// A phrase with its candidate weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPhrase {
    pub phrase: String,
    pub weight: f64,
}

impl WeightedPhrase {
    fn new(phrase: String, weight: f64) -> Self {
        Self { phrase, weight }
    }
}

/// Possessive relations and capitalized runs in one entry.
///
/// A name that follows a possessive relation ("my sister Anna") is folded
/// into that phrase and not emitted again as a bare entity.
pub fn extract_entities(text: &str) -> Vec<WeightedPhrase> {
    let mut found = Vec::new();
    let mut consumed_names: HashSet<String> = HashSet::new();

    for caps in POSSESSIVE_RELATION.captures_iter(text) {
        let Some(relation) = caps.get(1) else { continue };
        match caps.get(2) {
            Some(name) => {
                let name = normalize_phrase(name.as_str());
                found.push(WeightedPhrase::new(
                    normalize_phrase(&format!("{} {}", relation.as_str(), name)),
                    NAMED_RELATION_WEIGHT,
                ));
                consumed_names.insert(name);
            }
            None => found.push(WeightedPhrase::new(
                normalize_phrase(relation.as_str()),
                RELATION_WEIGHT,
            )),
        }
    }

    for sentence in split_sentences(text) {
        for run in capitalized_runs(sentence) {
            if !consumed_names.contains(&run) {
                found.push(WeightedPhrase::new(run, ENTITY_WEIGHT));
            }
        }
    }

    found
}

/// Runs of capitalized words that do not open the sentence.
fn capitalized_runs(sentence: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for (idx, raw) in sentence.split_whitespace().enumerate() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("\u{2019}s"))
            .unwrap_or(word);
        let ends_clause = raw.ends_with([',', ';', ':', ')', '"']);

        let is_entity_word = idx > 0
            && word.chars().count() > 1
            && word.chars().next().is_some_and(char::is_uppercase)
            && !is_stopword(&normalize_phrase(word));

        if is_entity_word {
            current.push(word.to_string());
        }
        if !is_entity_word || ends_clause {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);

    runs
}

fn flush_run(current: &mut Vec<String>, runs: &mut Vec<String>) {
    if !current.is_empty() {
        let phrase = normalize_phrase(&current.join(" "));
        if !phrase.is_empty() {
            runs.push(phrase);
        }
        current.clear();
    }
}

/// Runs of adjacent content words within each sentence.
///
/// Runs of 2-4 words are emitted whole; longer runs are split into
/// consecutive chunks of at most four words.
pub fn extract_noun_phrases(text: &str) -> Vec<WeightedPhrase> {
    let mut found = Vec::new();

    for sentence in split_sentences(text) {
        let mut run: Vec<String> = Vec::new();
        for token in tokenize(sentence) {
            let breaks = token.chars().count() < 2 || is_stopword(&token) || is_numeric(&token);
            if breaks {
                emit_noun_run(&run, &mut found);
                run.clear();
            } else {
                run.push(token);
            }
        }
        emit_noun_run(&run, &mut found);
    }

    found
}

fn emit_noun_run(run: &[String], found: &mut Vec<WeightedPhrase>) {
    for chunk in run.chunks(MAX_NOUN_PHRASE_WORDS) {
        if chunk.len() >= 2 {
            let weight = NOUN_PHRASE_BASE_WEIGHT + (chunk.len() - 2) as f64;
            found.push(WeightedPhrase::new(chunk.join(" "), weight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(found: &'a [WeightedPhrase], phrase: &str) -> Option<&'a WeightedPhrase> {
        found.iter().find(|w| w.phrase == phrase)
    }

    #[test]
    fn test_possessive_relation() {
        let found = extract_entities("I feel anxious about my sister's wedding");
        let rel = find(&found, "my sister").unwrap();
        assert!((rel.weight - RELATION_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_possessive_relation_sentence_start() {
        let found = extract_entities("My sister called again, still anxious");
        assert!(find(&found, "my sister").is_some());
        // "My" opens the sentence, so it is not an entity
        assert!(find(&found, "my").is_none());
    }

    #[test]
    fn test_named_relation_consumes_name() {
        let found = extract_entities("Had lunch with my sister Anna. Later Anna texted.");
        let named = find(&found, "my sister anna").unwrap();
        assert!((named.weight - NAMED_RELATION_WEIGHT).abs() < f64::EPSILON);
        assert!(find(&found, "anna").is_none());
        assert!(find(&found, "my sister").is_none());
    }

    #[test]
    fn test_capitalized_runs() {
        let found = extract_entities("We drove to New York with Sam, then back");
        assert!(find(&found, "new york").is_some());
        assert!(find(&found, "sam").is_some());
        assert!(found.iter().all(|w| (w.weight - ENTITY_WEIGHT).abs() < f64::EPSILON));
    }

    #[test]
    fn test_pronoun_i_is_not_entity() {
        let found = extract_entities("Today I'm tired and I slept badly");
        assert!(found.is_empty());
    }

    #[test]
    fn test_possessive_stripped_from_entity() {
        let found = extract_entities("We went to Maria's place");
        assert!(find(&found, "maria").is_some());
    }

    #[test]
    fn test_noun_phrase_runs() {
        let found = extract_noun_phrases("I feel anxious about my sister's wedding");
        let a = find(&found, "feel anxious").unwrap();
        assert!((a.weight - 3.0).abs() < f64::EPSILON);
        assert!(find(&found, "sister's wedding").is_some());
    }

    #[test]
    fn test_noun_phrase_long_run_chunked() {
        let found = extract_noun_phrases("deadline pressure keeps building tension everywhere");
        let first = find(&found, "deadline pressure keeps building").unwrap();
        assert!((first.weight - 5.0).abs() < f64::EPSILON);
        assert!(find(&found, "tension everywhere").is_some());
    }

    #[test]
    fn test_noun_phrase_respects_sentence_boundary() {
        let found = extract_noun_phrases("Long meeting. Quiet evening");
        assert!(find(&found, "long meeting").is_some());
        assert!(find(&found, "meeting quiet").is_none());
    }

    #[test]
    fn test_single_words_are_not_noun_phrases() {
        assert!(extract_noun_phrases("the dog and the cat").is_empty());
    }
}
