//! Theme extraction pipeline.
//!
//! filter -> truncate -> candidates -> stats -> noise filter -> score ->
//! MMR selection -> substring collapse -> optional annotation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use themes_embeddings::EmbeddingProvider;
use themes_types::{Entry, ExtractOptions, ThemeOutput, ThemeScore};
use tracing::{debug, info, warn};

use crate::annotate::classify;
use crate::candidates::generate_candidates;
use crate::postfilter::{collapse_substrings, keep_theme};
use crate::redundancy::{embed_pool, Redundancy, SimilarityMode};
use crate::scoring::{score_themes, ScoredTheme};
use crate::selection::select_mmr;
use crate::stats::aggregate;
use crate::window::{filter_recent, truncate_proportionally};

/// Counts from one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionReport {
    /// Entries inside the lookback window
    pub filtered_entries: usize,
    /// Candidates after the candidate cap
    pub candidates: usize,
    /// Themes surviving aggregation and noise filtering
    pub surviving: usize,
    /// Themes chosen by the selector
    pub selected: usize,
    /// Themes returned after substring collapse
    pub returned: usize,
    /// Similarity used for redundancy
    pub similarity: SimilarityMode,
}

/// Extracts dominant themes from journal entries.
///
/// Holds options and an optional shared embedding provider; holds no
/// per-run state, so one extractor can serve concurrent runs.
///
/// # Example
/// ```
/// use themes_core::ThemeExtractor;
/// use themes_types::{Entry, ExtractOptions};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
/// # rt.block_on(async {
/// let today = chrono::Utc::now().date_naive();
/// let entries = vec![Entry::on("Long walk with my dog. Felt calm.", today)];
/// let extractor = ThemeExtractor::new(ExtractOptions::default());
/// let themes = extractor.extract_labels(&entries).await;
/// assert!(themes.iter().any(|t| t.contains("dog")));
/// # });
/// ```
#[derive(Clone)]
pub struct ThemeExtractor {
    options: ExtractOptions,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl std::fmt::Debug for ThemeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeExtractor")
            .field("options", &self.options)
            .field("embedder", &self.embedder.as_ref().map(|e| e.name()))
            .finish()
    }
}

impl ThemeExtractor {
    /// Create an extractor without an embedding provider.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            embedder: None,
        }
    }

    /// Attach a shared embedding provider.
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract scored themes as of now.
    pub async fn extract(&self, entries: &[Entry]) -> Vec<ThemeScore> {
        self.extract_at(entries, Utc::now()).await
    }

    /// Extract scored themes as of `now`.
    pub async fn extract_at(&self, entries: &[Entry], now: DateTime<Utc>) -> Vec<ThemeScore> {
        self.extract_with_report(entries, now).await.0
    }

    /// Extract theme phrases only, best first.
    pub async fn extract_labels(&self, entries: &[Entry]) -> Vec<String> {
        self.extract(entries)
            .await
            .into_iter()
            .map(|t| t.theme)
            .collect()
    }

    /// Extract themes shaped by the `detailed` option.
    pub async fn run(&self, entries: &[Entry]) -> ThemeOutput {
        self.run_at(entries, Utc::now()).await
    }

    /// [`run`](Self::run) as of `now`.
    pub async fn run_at(&self, entries: &[Entry], now: DateTime<Utc>) -> ThemeOutput {
        let themes = self.extract_at(entries, now).await;
        if self.options.detailed {
            ThemeOutput::Detailed(themes)
        } else {
            ThemeOutput::Labels(themes.into_iter().map(|t| t.theme).collect())
        }
    }

    /// Full pipeline, returning themes in selection order plus run counts.
    ///
    /// Never fails: degenerate input yields an empty list, and embedding
    /// problems switch the run to Jaccard redundancy.
    pub async fn extract_with_report(
        &self,
        entries: &[Entry],
        now: DateTime<Utc>,
    ) -> (Vec<ThemeScore>, ExtractionReport) {
        let opts = &self.options;
        let mut report = ExtractionReport::default();

        let filtered = filter_recent(entries, opts.days_ago, now.date_naive());
        report.filtered_entries = filtered.len();
        if filtered.is_empty() {
            debug!(total = entries.len(), days_ago = opts.days_ago, "No entries in window");
            return (Vec::new(), report);
        }

        let texts: Vec<&str> = filtered.iter().map(|e| e.text.as_str()).collect();
        let truncated = truncate_proportionally(&texts, opts.max_tokens);
        let candidates = generate_candidates(&truncated, opts.max_candidates);
        report.candidates = candidates.len();

        let mut stats = aggregate(candidates, &filtered, now, opts.decay_tau_days);
        stats.retain(|s| keep_theme(&s.theme));
        report.surviving = stats.len();
        if stats.is_empty() {
            debug!(filtered = filtered.len(), "No surviving candidates");
            return (Vec::new(), report);
        }

        let mut pool = score_themes(stats, &opts.scoring);
        pool.truncate(opts.candidate_pool.max(opts.theme_limit));
        let k = opts.theme_limit.min(pool.len());

        let redundancy = self.redundancy(&pool, &filtered).await;
        report.similarity = redundancy.mode();

        let scores: Vec<f64> = pool.iter().map(|t| t.score).collect();
        let order = select_mmr(&scores, k, opts.mmr_lambda, |i, j| {
            redundancy.similarity(i, j)
        });
        report.selected = order.len();

        let selected: Vec<ScoredTheme> = order.into_iter().map(|i| pool[i].clone()).collect();
        let kept = collapse_substrings(
            selected.into_iter().filter(|t| keep_theme(t.theme())).collect(),
            &opts.collapse,
        );
        report.returned = kept.len();

        let themes: Vec<ThemeScore> = kept.into_iter().map(|t| self.to_theme_score(t)).collect();

        info!(
            filtered = report.filtered_entries,
            candidates = report.candidates,
            surviving = report.surviving,
            selected = report.selected,
            returned = report.returned,
            similarity = %report.similarity,
            "Extracted themes"
        );

        (themes, report)
    }

    /// Decide the similarity for this run. Falls back to Jaccard when no
    /// provider is attached, embeddings are disabled, or embedding fails.
    async fn redundancy<'a>(&self, pool: &'a [ScoredTheme], filtered: &[&Entry]) -> Redundancy<'a> {
        let opts = &self.options;
        let provider = match (&self.embedder, opts.use_embeddings) {
            (Some(provider), true) => provider,
            _ => return Redundancy::jaccard(pool),
        };

        match embed_pool(
            pool,
            filtered,
            provider.as_ref(),
            opts.max_sentences_for_embed,
            Duration::from_millis(opts.embed_timeout_ms),
        )
        .await
        {
            Ok(vectors) => Redundancy::Embedding(vectors),
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "Embedding failed, using Jaccard similarity"
                );
                Redundancy::jaccard(pool)
            }
        }
    }

    fn to_theme_score(&self, theme: ScoredTheme) -> ThemeScore {
        let mut out = ThemeScore::new(theme.stats.theme.clone(), theme.score)
            .with_stats(theme.stats.freq, theme.stats.recency_weighted);
        if self.options.include_cbt_metadata {
            let meta = classify(&theme.stats.theme, theme.stats.distortion);
            out.category = Some(meta.category);
            out.distortion_type = Some(meta.distortion_type);
            out.has_negation = Some(meta.has_negation);
            out.sentiment = Some(meta.sentiment);
        }
        out
    }
}

/// One-shot extraction with explicit window and limit.
///
/// `days_ago` and `theme_limit` override the values in `options`.
pub async fn extract_themes(
    entries: &[Entry],
    days_ago: u32,
    theme_limit: usize,
    options: ExtractOptions,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
) -> ThemeOutput {
    let options = ExtractOptions {
        days_ago,
        theme_limit,
        ..options
    };
    let mut extractor = ThemeExtractor::new(options);
    if let Some(embedder) = embedder {
        extractor = extractor.with_embedder(embedder);
    }
    extractor.run(entries).await
}
