//! CLI argument parsing for the themes binary.
//!
//! CLI flags override all other config sources.

use clap::{Args, Parser, Subcommand};

/// Journal Themes
///
/// Scores and selects the dominant themes of recent journal entries.
#[derive(Parser, Debug)]
#[command(name = "themes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/journal-themes/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract themes from a JSON array of entries
    Extract(ExtractArgs),

    /// Print the effective settings as JSON
    Config,
}

/// Options for `themes extract`
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Entries file (JSON array of {text, date}); `-` or absent reads stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Lookback window in days
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Maximum number of themes
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output full theme records instead of phrases
    #[arg(long)]
    pub detailed: bool,

    /// Annotate themes with category, distortion and sentiment
    #[arg(long)]
    pub cbt: bool,

    /// Use Jaccard redundancy even when an embedder is available
    #[arg(long)]
    pub no_embeddings: bool,

    /// Use the deterministic offline embedder for redundancy
    #[arg(long)]
    pub mock_embeddings: bool,

    /// MMR trade-off between score (1.0) and diversity (0.0)
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Also print the run report to stderr
    #[arg(long)]
    pub report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::parse_from([
            "themes", "--log-level", "debug", "extract", "--input", "e.json", "--days", "14",
            "-n", "5", "--detailed", "--cbt", "--lambda", "0.5",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.input.as_deref(), Some("e.json"));
                assert_eq!(args.days, Some(14));
                assert_eq!(args.limit, Some(5));
                assert!(args.detailed);
                assert!(args.cbt);
                assert!(!args.no_embeddings);
                assert_eq!(args.lambda, Some(0.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["themes", "config", "--config", "/tmp/t.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/t.toml"));
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_extract_defaults() {
        let cli = Cli::parse_from(["themes", "extract"]);
        match cli.command {
            Commands::Extract(args) => {
                assert!(args.input.is_none());
                assert!(args.days.is_none());
                assert!(!args.report);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
