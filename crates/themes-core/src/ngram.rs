//! Lazy n-gram iteration over a token stream.

/// Iterator over every contiguous window of `min..=max` tokens.
///
/// Windows are yielded as borrowed slices, start position outer and size
/// inner, so nothing is materialized beyond the current window.
///
/// # Example
/// ```
/// use themes_core::ngram::NGrams;
///
/// let tokens: Vec<String> = ["work", "stress", "sleep"].iter().map(|s| s.to_string()).collect();
/// let grams: Vec<String> = NGrams::new(&tokens, 2, 3).map(|w| w.join(" ")).collect();
/// assert_eq!(grams, vec!["work stress", "work stress sleep", "stress sleep"]);
/// ```
pub struct NGrams<'a> {
    tokens: &'a [String],
    min: usize,
    max: usize,
    start: usize,
    size: usize,
}

impl<'a> NGrams<'a> {
    /// Create an iterator over windows of `min..=max` tokens.
    ///
    /// A `min` of zero is treated as one.
    pub fn new(tokens: &'a [String], min: usize, max: usize) -> Self {
        let min = min.max(1);
        Self {
            tokens,
            min,
            max,
            start: 0,
            size: min,
        }
    }
}

impl<'a> Iterator for NGrams<'a> {
    type Item = &'a [String];

    fn next(&mut self) -> Option<Self::Item> {
        while self.start < self.tokens.len() && self.min <= self.max {
            let end = self.start + self.size;
            if self.size <= self.max && end <= self.tokens.len() {
                self.size += 1;
                return Some(&self.tokens[self.start..end]);
            }
            self.start += 1;
            self.size = self.min;
        }
        None
    }
}
