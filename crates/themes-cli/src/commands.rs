//! Command implementations for the themes CLI.
//!
//! Handles:
//! - extract: Load config, read entries, run the pipeline, print JSON
//! - config: Print the effective settings

use std::fs;
use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use themes_core::ThemeExtractor;
use themes_embeddings::MockEmbedder;
use themes_types::{Entry, ExtractOptions, Settings, ThemeOutput};

use crate::cli::ExtractArgs;

/// Load settings and apply the global `--log-level` override.
pub fn load_settings(config_path: Option<&str>, log_level: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber, writing to stderr so stdout
/// stays clean JSON.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Apply extract flags on top of configured options and re-validate.
pub fn apply_overrides(options: &mut ExtractOptions, args: &ExtractArgs) -> Result<()> {
    if let Some(days) = args.days {
        options.days_ago = days;
    }
    if let Some(limit) = args.limit {
        options.theme_limit = limit;
    }
    if let Some(lambda) = args.lambda {
        options.mmr_lambda = lambda;
    }
    if args.detailed {
        options.detailed = true;
    }
    if args.cbt {
        options.include_cbt_metadata = true;
    }
    if args.no_embeddings {
        options.use_embeddings = false;
    }
    options.validate().context("Invalid extraction options")?;
    Ok(())
}

/// Parse a JSON array of entries.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>> {
    Entry::parse_json_array(json).context("Input must be a JSON array of {text, date} objects")
}

/// Read entries from a file, or stdin when `input` is absent or `-`.
pub fn read_entries(input: Option<&str>) -> Result<Vec<Entry>> {
    let raw = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read entries from stdin")?;
            buf
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read entries file {path}"))?,
    };
    parse_entries(&raw)
}

/// Build the extractor for a run.
pub fn build_extractor(options: ExtractOptions, mock_embeddings: bool) -> ThemeExtractor {
    let extractor = ThemeExtractor::new(options);
    if mock_embeddings {
        extractor.with_embedder(Arc::new(MockEmbedder::new()))
    } else {
        extractor
    }
}

/// Run `themes extract`.
pub async fn run_extract(
    config_path: Option<&str>,
    log_level: Option<&str>,
    args: &ExtractArgs,
) -> Result<()> {
    let settings = load_settings(config_path, log_level)?;
    init_logging(&settings.log_level)?;

    let mut options = settings.extraction;
    apply_overrides(&mut options, args)?;

    let entries = read_entries(args.input.as_deref())?;
    info!(entries = entries.len(), days_ago = options.days_ago, "Read entries");

    let extractor = build_extractor(options, args.mock_embeddings);
    let (themes, report) = extractor.extract_with_report(&entries, Utc::now()).await;

    if args.report {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    }

    let output = if extractor.options().detailed {
        ThemeOutput::Detailed(themes)
    } else {
        ThemeOutput::Labels(themes.into_iter().map(|t| t.theme).collect())
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize themes")?
    );
    Ok(())
}

/// Run `themes config`.
pub fn show_config(config_path: Option<&str>, log_level: Option<&str>) -> Result<()> {
    let settings = load_settings(config_path, log_level)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let entries =
            parse_entries(r#"[{"text":"Quiet walk","date":"2024-05-01"},{"text":"Busy","date":"2024-05-02"}]"#)
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date, "2024-05-02");
    }

    #[test]
    fn test_parse_entries_rejects_object() {
        let err = parse_entries(r#"{"text":"x","date":"2024-05-01"}"#).unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<themes_types::ThemeError>().is_some()));
    }

    #[test]
    fn test_read_entries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, r#"[{"text":"Tea with my aunt","date":"2024-05-01"}]"#).unwrap();
        let entries = read_entries(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(entries[0].text, "Tea with my aunt");
    }

    #[test]
    fn test_read_entries_missing_file() {
        let err = read_entries(Some("/no/such/entries.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read entries file"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut options = ExtractOptions::default();
        let args = ExtractArgs {
            days: Some(14),
            limit: Some(5),
            lambda: Some(0.4),
            detailed: true,
            cbt: true,
            no_embeddings: true,
            ..Default::default()
        };
        apply_overrides(&mut options, &args).unwrap();
        assert_eq!(options.days_ago, 14);
        assert_eq!(options.theme_limit, 5);
        assert!((options.mmr_lambda - 0.4).abs() < f64::EPSILON);
        assert!(options.detailed);
        assert!(options.include_cbt_metadata);
        assert!(!options.use_embeddings);
    }

    #[test]
    fn test_apply_overrides_rejects_bad_lambda() {
        let mut options = ExtractOptions::default();
        let args = ExtractArgs {
            lambda: Some(1.5),
            ..Default::default()
        };
        assert!(apply_overrides(&mut options, &args).is_err());
    }

    #[test]
    fn test_build_extractor_with_mock() {
        let extractor = build_extractor(ExtractOptions::default(), true);
        assert!(format!("{extractor:?}").contains("mock"));
        let plain = build_extractor(ExtractOptions::default(), false);
        assert!(format!("{plain:?}").contains("None"));
    }
}
