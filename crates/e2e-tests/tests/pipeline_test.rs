//! End-to-end pipeline tests for journal-themes.
//!
//! Entries in, themes out: window filtering, candidate generation, scoring,
//! selection, collapse and annotation run together on realistic input.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use e2e_tests::{entry, fixed_now, jaccard_options, stale_entries, week_of_entries};
use themes_core::{extract_themes, SimilarityMode, ThemeExtractor};
use themes_embeddings::MockEmbedder;
use themes_types::{Entry, ExtractOptions, ThemeCategory, ThemeOutput};

fn labels(themes: &[themes_types::ThemeScore]) -> Vec<&str> {
    themes.iter().map(|t| t.theme.as_str()).collect()
}

#[tokio::test]
async fn test_full_pipeline_surfaces_recurring_threads() {
    let extractor = ThemeExtractor::new(jaccard_options());
    let (themes, report) = extractor
        .extract_with_report(&week_of_entries(), fixed_now())
        .await;

    assert_eq!(report.filtered_entries, 7);
    assert_eq!(report.similarity, SimilarityMode::Jaccard);
    assert_eq!(report.returned, themes.len());
    assert!(themes.len() <= 30);

    let found = labels(&themes);
    for thread in ["sister", "wedding", "deadline"] {
        assert!(
            found.iter().any(|t| t.contains(thread)),
            "expected a theme mentioning {thread}, got {found:?}"
        );
    }
}

#[tokio::test]
async fn test_sister_scenario_prefers_relation_phrase() {
    let entries = vec![
        entry("I feel anxious about my sister's wedding", 0),
        entry("My sister called again, still anxious", 1),
    ];
    let themes = ThemeExtractor::new(jaccard_options())
        .extract_at(&entries, fixed_now())
        .await;
    let found = labels(&themes);

    assert!(found.contains(&"my sister"), "got {found:?}");
    assert!(!found.contains(&"sister"), "got {found:?}");
    assert!(found.iter().any(|t| t.contains("anxious")), "got {found:?}");
}

#[tokio::test]
async fn test_stale_entries_only_count_inside_window() {
    let mut entries = week_of_entries();
    entries.extend(stale_entries());

    let week = ThemeExtractor::new(jaccard_options())
        .extract_at(&entries, fixed_now())
        .await;
    assert!(labels(&week)
        .iter()
        .all(|t| !t.contains("camping") && !t.contains("mountains")));

    let wide = ThemeExtractor::new(ExtractOptions {
        days_ago: 60,
        ..jaccard_options()
    })
    .extract_at(&entries, fixed_now())
    .await;
    assert!(labels(&wide)
        .iter()
        .any(|t| t.contains("camping") || t.contains("mountains")));
}

#[tokio::test]
async fn test_all_time_window_keeps_everything() {
    let mut entries = week_of_entries();
    entries.extend(stale_entries());

    let (themes, report) = ThemeExtractor::new(ExtractOptions {
        days_ago: u32::MAX,
        ..jaccard_options()
    })
    .extract_with_report(&entries, fixed_now())
    .await;

    assert_eq!(report.filtered_entries, entries.len());
    assert!(!themes.is_empty());
}

#[tokio::test]
async fn test_detailed_output_with_metadata() {
    let extractor = ThemeExtractor::new(ExtractOptions {
        detailed: true,
        include_cbt_metadata: true,
        ..jaccard_options()
    });
    let output = extractor.run_at(&week_of_entries(), fixed_now()).await;

    let ThemeOutput::Detailed(themes) = output else {
        panic!("expected detailed output");
    };
    assert!(!themes.is_empty());
    for theme in &themes {
        assert!(theme.score.is_finite() && theme.score > 0.0);
        assert!(theme.frequency.unwrap_or(0) >= 1);
        assert!(theme.category.is_some());
        assert!(theme.distortion_type.is_some());
        assert!(theme.sentiment.is_some());
        assert!(theme.has_negation.is_some());
    }

    let sister = themes
        .iter()
        .find(|t| t.theme.contains("sister"))
        .expect("a sister theme");
    assert_eq!(sister.category, Some(ThemeCategory::Person));
}

#[tokio::test]
async fn test_labels_output_by_default() {
    let output = ThemeExtractor::new(jaccard_options())
        .run_at(&week_of_entries(), fixed_now())
        .await;
    assert!(matches!(output, ThemeOutput::Labels(ref l) if !l.is_empty()));
}

#[tokio::test]
async fn test_mock_embeddings_drive_selection() {
    let extractor = ThemeExtractor::new(ExtractOptions::default())
        .with_embedder(Arc::new(MockEmbedder::new()));
    let (themes, report) = extractor
        .extract_with_report(&week_of_entries(), fixed_now())
        .await;

    assert_eq!(report.similarity, SimilarityMode::Embedding);
    assert!(!themes.is_empty());
    assert!(labels(&themes).iter().any(|t| t.contains("sister")));
}

#[tokio::test]
async fn test_extract_themes_one_shot() {
    let today = chrono::Utc::now().date_naive();
    let entries = vec![
        Entry::on("Garden planting with my father", today - chrono::Duration::days(2)),
        Entry::on("Garden planting again, tomatoes this time", today),
        Entry::on("Quiet evening reading in the garden", today),
    ];

    let output = extract_themes(&entries, 7, 3, jaccard_options(), None).await;
    assert!(output.len() <= 3);
    assert!(output.into_labels().iter().any(|t| t.contains("garden")));

    let output = extract_themes(
        &entries,
        7,
        3,
        ExtractOptions::default(),
        Some(Arc::new(MockEmbedder::new())),
    )
    .await;
    assert!(!output.is_empty());
}
