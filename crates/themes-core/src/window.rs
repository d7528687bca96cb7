//! Lookback window and token budget.

use std::borrow::Cow;

use chrono::{Days, NaiveDate};
use themes_types::Entry;
use tracing::debug;

/// Keep entries dated on or after `today - days_ago`.
///
/// Entries whose date does not parse are dropped. Future-dated entries are
/// kept. A window reaching past the earliest representable date keeps
/// everything.
pub fn filter_recent(entries: &[Entry], days_ago: u32, today: NaiveDate) -> Vec<&Entry> {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days_ago)))
        .unwrap_or(NaiveDate::MIN);

    entries
        .iter()
        .filter(|entry| match entry.parsed_date() {
            Some(date) => date >= cutoff,
            None => {
                debug!(date = %entry.date, "Skipping entry with malformed date");
                false
            }
        })
        .collect()
}

/// Cap the combined whitespace-token count of `texts` at `max_tokens`.
///
/// When over budget every text keeps `max(1, floor(len * max / total))`
/// of its leading tokens, so old and new entries shrink alike.
pub fn truncate_proportionally<'a>(texts: &[&'a str], max_tokens: usize) -> Vec<Cow<'a, str>> {
    let lengths: Vec<usize> = texts.iter().map(|t| t.split_whitespace().count()).collect();
    let total: usize = lengths.iter().sum();

    if total <= max_tokens {
        return texts.iter().map(|t| Cow::Borrowed(*t)).collect();
    }

    debug!(total, max_tokens, "Truncating entries to token budget");

    texts
        .iter()
        .zip(&lengths)
        .map(|(text, &len)| {
            if len == 0 {
                return Cow::Borrowed(*text);
            }
            let keep = ((len as u128 * max_tokens as u128) / total as u128).max(1) as usize;
            Cow::Owned(text.split_whitespace().take(keep).collect::<Vec<_>>().join(" "))
        })
        .collect()
}
