//! Per-candidate statistics over the filtered entries.
//!
//! One pass with entries as the outer loop: each entry is normalized once
//! and every candidate is matched against it as a substring.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use themes_types::{DistortionType, Entry};
use tracing::debug;

use crate::candidates::Candidate;
use crate::text::{count_occurrences, normalize_phrase};

/// Seconds per day, the unit of the decay time constant.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Shortest theme (in characters) kept after aggregation.
pub const MIN_THEME_CHARS: usize = 3;

/// Aggregated statistics for one candidate theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStats {
    /// Normalized theme phrase
    pub theme: String,
    /// Candidate weight from generation
    pub weight: f64,
    /// Distortion tag attached during generation
    pub distortion: DistortionType,
    /// Total substring occurrences across entries
    pub freq: u32,
    /// Sum of recency decay over entries containing the theme
    pub recency_weighted: f64,
    /// Indices (into the filtered entry list) of supporting entries
    pub entries: BTreeSet<usize>,
}

impl ThemeStats {
    fn from_candidate(candidate: Candidate) -> Self {
        Self {
            theme: candidate.phrase,
            weight: candidate.weight,
            distortion: candidate.distortion,
            freq: 0,
            recency_weighted: 0.0,
            entries: BTreeSet::new(),
        }
    }

    /// Number of distinct supporting entries.
    pub fn coverage(&self) -> usize {
        self.entries.len()
    }
}

/// Recency decay for an entry stamped at `entry_time` (midnight UTC of its date).
///
/// `exp(-max(0, now - date) / (tau_days * 86400))`; future dates weigh 1.
pub fn recency_weight(now: DateTime<Utc>, entry_time: DateTime<Utc>, tau_days: f64) -> f64 {
    let age_secs = (now - entry_time).num_milliseconds().max(0) as f64 / 1000.0;
    (-age_secs / (tau_days * SECONDS_PER_DAY)).exp()
}

/// Aggregate frequency, coverage and recency for every candidate.
///
/// Candidates that never occur, or are shorter than three characters, are
/// pruned. Output keeps candidate order.
pub fn aggregate(
    candidates: Vec<Candidate>,
    entries: &[&Entry],
    now: DateTime<Utc>,
    tau_days: f64,
) -> Vec<ThemeStats> {
    let mut stats: Vec<ThemeStats> = candidates
        .into_iter()
        .map(ThemeStats::from_candidate)
        .collect();

    for (idx, entry) in entries.iter().enumerate() {
        let Some(date) = entry.parsed_date() else {
            continue;
        };
        let entry_time = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let decay = recency_weight(now, entry_time, tau_days);
        let haystack = normalize_phrase(&entry.text);

        for stat in stats.iter_mut() {
            let count = count_occurrences(&haystack, &stat.theme);
            if count > 0 {
                stat.freq += count;
                stat.entries.insert(idx);
                stat.recency_weighted += decay;
            }
        }
    }

    let before = stats.len();
    stats.retain(|s| s.freq >= 1 && s.theme.chars().count() >= MIN_THEME_CHARS);
    debug!(before, surviving = stats.len(), "Aggregated theme stats");
    stats
}
