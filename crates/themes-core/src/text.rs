//! Text normalization, stopwords and substring phrase matching.
//!
//! Every stage of the pipeline compares phrases in the same normalized
//! form: lowercase, alphanumerics and apostrophes only, single spaces.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Words with no thematic content on their own.
///
/// Articles, prepositions, conjunctions, pronouns (with their contractions)
/// and auxiliaries. Negations, modals and intensifiers are
/// absent: "not", "never", "should", "so", "really" stay in the stream.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // articles and determiners
        "a", "an", "the", "some", "any", "each", "another", "such",
        // prepositions
        "about", "above", "across", "after", "against", "along", "among", "around", "at",
        "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "down",
        "during", "for", "from", "in", "inside", "into", "near", "of", "off", "on", "onto",
        "out", "outside", "over", "past", "since", "through", "throughout", "to", "toward",
        "towards", "under", "until", "up", "upon", "with", "within", "without", "via",
        // conjunctions and relatives
        "and", "or", "but", "if", "then", "than", "because", "as", "while", "that", "which",
        "who", "whom", "whose", "what", "when", "where", "why", "how", "also", "again",
        // pronouns
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him",
        "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
        "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "this",
        "these", "those", "there", "here", "im", "ive",
        // pronoun contractions
        "i'm", "i've", "i'll", "i'd", "you're", "you've", "you'll", "you'd", "he's", "he'll",
        "he'd", "she's", "she'll", "she'd", "it's", "it'll", "we're", "we've", "we'll",
        "we'd", "they're", "they've", "they'll", "they'd", "that's", "there's", "here's",
        "what's", "let's",
        // auxiliaries
        "am", "is", "are", "was", "were", "be", "been", "being", "has", "have", "had",
        "having", "do", "does", "did", "doing",
    ]
    .into_iter()
    .collect()
});

/// Single words too vague to stand as a theme.
static GENERIC_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "thing", "things", "stuff", "way", "ways", "lot", "lots", "kind", "sort", "bit",
        "time", "times", "day", "days", "today", "yesterday", "tomorrow", "week", "tonight",
        "morning", "night", "like", "just", "even", "much", "many", "well", "still", "one",
        "ones", "back", "yeah", "yes", "ok", "okay", "maybe", "actually", "pretty", "got",
        "get", "gets", "getting", "went", "go", "going", "make", "made", "said", "say",
        "feel", "felt", "know", "think", "want", "now", "something", "anything", "everything",
    ]
    .into_iter()
    .collect()
});

/// Check if a normalized word is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Check if a normalized single word is a generic filler term.
pub fn is_generic_term(word: &str) -> bool {
    GENERIC_TERMS.contains(word)
}

/// Check if a token consists only of digits.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_numeric())
}

/// Normalize a phrase: lowercase, strip everything except alphanumerics
/// and inner apostrophes, collapse whitespace.
///
/// Curly apostrophes are folded to `'` so "sister’s" and "sister's" agree.
pub fn normalize_phrase(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            c if c.is_alphanumeric() || c == '\'' => c,
            _ => ' ',
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize text into normalized words.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_phrase(text)
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Tokens that carry content: no stopwords, single characters or numbers.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > 1)
        .filter(|t| !is_stopword(t))
        .filter(|t| !is_numeric(t))
        .collect()
}

/// Number of words in a normalized phrase.
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}

/// Split text into trimmed, non-empty sentences on `.`, `!` and `?`.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Count non-overlapping substring occurrences of `needle` in `haystack`.
///
/// Both sides are expected to be normalized. "sister" occurs in
/// "my sisters" and "work" in "morning workout".
pub fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u32
}

/// Substring containment of one normalized phrase in another.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  My Sister's   WEDDING! "), "my sister's wedding");
        assert_eq!(normalize_phrase("don’t care"), "don't care");
        assert_eq!(normalize_phrase("'quoted' words"), "quoted words");
        assert_eq!(normalize_phrase("work/life-balance"), "work life balance");
        assert_eq!(normalize_phrase("..."), "");
    }

    #[test]
    fn test_stopwords_keep_signal_words() {
        assert!(is_stopword("the"));
        assert!(is_stopword("i'm"));
        assert!(is_stopword("was"));
        assert!(!is_stopword("not"));
        assert!(!is_stopword("never"));
        assert!(!is_stopword("should"));
        assert!(!is_stopword("really"));
        assert!(!is_stopword("can't"));
    }

    #[test]
    fn test_content_tokens_filters_noise() {
        let tokens = content_tokens("I went to the gym at 7 a.m. and ran 5k");
        assert_eq!(tokens, vec!["went", "gym", "ran", "5k"]);
    }

    #[test]
    fn test_content_tokens_all_stopwords() {
        assert!(content_tokens("the a an").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        let sentences: Vec<&str> = split_sentences("Hard day. Why me?! Fine ").collect();
        assert_eq!(sentences, vec!["Hard day", "Why me", "Fine"]);
    }

    #[test]
    fn test_count_occurrences_substring() {
        let hay = normalize_phrase("My sister called. My sister's wedding, my sisters");
        assert_eq!(count_occurrences(&hay, "sister"), 3);
        assert_eq!(count_occurrences(&hay, "my sister"), 3);
        assert_eq!(count_occurrences(&hay, "sister's wedding"), 1);
        assert_eq!(count_occurrences(&hay, "brother"), 0);
        assert_eq!(count_occurrences(&hay, ""), 0);
    }

    #[test]
    fn test_count_occurrences_plurals_and_compounds() {
        let hay = normalize_phrase("Morning workout then work");
        assert_eq!(count_occurrences(&hay, "work"), 2);
        assert_eq!(count_occurrences(&normalize_phrase("My sisters visited"), "sister"), 1);
    }

    #[test]
    fn test_contains_phrase() {
        assert!(contains_phrase("my sister", "sister"));
        assert!(contains_phrase("sisterhood", "sister"));
        assert!(!contains_phrase("sister", "my sister"));
        assert!(!contains_phrase("sister", ""));
    }

    #[test]
    fn test_numeric_and_word_count() {
        assert!(is_numeric("2024"));
        assert!(!is_numeric("5k"));
        assert!(!is_numeric(""));
        assert_eq!(word_count("work life balance"), 3);
    }
}
