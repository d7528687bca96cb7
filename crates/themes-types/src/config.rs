//! Configuration loading for journal-themes.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/journal-themes/config.toml
//! (platform equivalent via `directories`).

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ThemeError;
use crate::options::ExtractOptions;

/// Application name used for platform config directories.
pub const APP_NAME: &str = "journal-themes";

/// Prefix for environment overrides, e.g. `THEMES_LOG_LEVEL`,
/// `THEMES_EXTRACTION__THEME_LIMIT`.
pub const ENV_PREFIX: &str = "THEMES";

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extraction defaults applied to every run
    #[serde(default)]
    pub extraction: ExtractOptions,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            extraction: ExtractOptions::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/journal-themes/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (THEMES_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, ThemeError> {
        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| ThemeError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path().to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ThemeError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ThemeError::Config(e.to_string()))?;

        settings.extraction.validate()?;
        Ok(settings)
    }
}

/// Default config file location, without extension.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|p| p.config_dir().join("config"))
        .unwrap_or_else(|| PathBuf::from("./config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.extraction.theme_limit, 30);
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.extraction.days_ago, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("themes.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[extraction]\ntheme_limit = 12\nmmr_lambda = 0.5\n\n[extraction.collapse]\nfreq_ratio = 0.8"
        )
        .unwrap();

        let settings = Settings::load(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.extraction.theme_limit, 12);
        assert!((settings.extraction.mmr_lambda - 0.5).abs() < f64::EPSILON);
        assert!((settings.extraction.collapse.freq_ratio - 0.8).abs() < f64::EPSILON);
        assert!((settings.extraction.collapse.score_ratio - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[extraction]\nmmr_lambda = 2.0\n").unwrap();

        let err = Settings::load(Some(&path.to_string_lossy())).unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = Settings::load(Some("/definitely/not/here/themes.toml"));
        assert!(result.is_err());
    }
}
