//! End-to-end test infrastructure for journal-themes.
//!
//! Provides a fixed clock, journal fixtures and embedding providers that
//! misbehave in controlled ways, for tests covering the whole
//! entries-to-themes pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use themes_embeddings::{Embedding, EmbeddingError, EmbeddingProvider, MockEmbedder};
use themes_types::{Entry, ExtractOptions};

/// Reference "now" for every scenario: 2024-06-15 18:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Calendar date `days` before [`fixed_now`].
pub fn days_ago(days: i64) -> NaiveDate {
    fixed_now().date_naive() - chrono::Duration::days(days)
}

/// Entry dated `days` before [`fixed_now`].
pub fn entry(text: &str, days: i64) -> Entry {
    Entry::on(text, days_ago(days))
}

/// A week of entries with a few recurring threads: a sister's wedding,
/// a work deadline, morning runs.
pub fn week_of_entries() -> Vec<Entry> {
    vec![
        entry(
            "I feel anxious about my sister's wedding. The speech is not written yet.",
            0,
        ),
        entry(
            "Work deadline moved up again. My manager Sarah wants the report by Friday.",
            1,
        ),
        entry(
            "Morning run by the river felt great. Slept better after the run.",
            2,
        ),
        entry(
            "My sister called about the wedding seating plan. Still anxious about the speech.",
            3,
        ),
        entry(
            "I should have finished the report. It's my fault the deadline slipped.",
            4,
        ),
        entry("Another morning run, then coffee with Tom at the cafe.", 5),
        entry(
            "Wedding dress fitting with my sister. Work deadline is always looming.",
            6,
        ),
    ]
}

/// Entries outside the default seven-day window.
pub fn stale_entries() -> Vec<Entry> {
    vec![
        entry("Camping trip in the mountains with old friends.", 20),
        entry("Mountains again. Camping is the best reset.", 40),
    ]
}

/// Default options with embeddings turned off.
pub fn jaccard_options() -> ExtractOptions {
    ExtractOptions {
        use_embeddings: false,
        ..Default::default()
    }
}

/// Provider that always errors.
#[derive(Debug, Default)]
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        Err(EmbeddingError::Unavailable("model not loaded".to_string()))
    }
}

/// Provider that sleeps before answering.
#[derive(Debug)]
pub struct SlowEmbedder {
    pub delay: Duration,
    inner: MockEmbedder,
}

impl SlowEmbedder {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: MockEmbedder::new(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for SlowEmbedder {
    fn name(&self) -> &str {
        "slow"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed(texts).await
    }
}

/// Mock provider that records how often, and with how many texts, it was
/// called.
#[derive(Debug, Default)]
pub struct CountingEmbedder {
    inner: MockEmbedder,
    calls: AtomicUsize,
    texts: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total texts received across all calls.
    pub fn texts(&self) -> usize {
        self.texts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for CountingEmbedder {
    fn name(&self) -> &str {
        "counting"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed(texts).await
    }
}

/// Provider returning one vector fewer than asked for.
#[derive(Debug, Default)]
pub struct ShortEmbedder;

#[async_trait]
impl EmbeddingProvider for ShortEmbedder {
    fn name(&self) -> &str {
        "short"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        let mut out = MockEmbedder::new().embed(texts).await?;
        out.pop();
        Ok(out)
    }
}

/// Provider whose vectors alternate between two dimensions.
#[derive(Debug, Default)]
pub struct RaggedEmbedder;

#[async_trait]
impl EmbeddingProvider for RaggedEmbedder {
    fn name(&self) -> &str {
        "ragged"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok((0..texts.len())
            .map(|i| Embedding::new(vec![1.0; if i % 2 == 0 { 8 } else { 4 }]))
            .collect())
    }
}
