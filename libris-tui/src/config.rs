//! Configuration loading for the Libris TUI.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use libris_core::{Language, SearchCriteria, SortKey, SortOrder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub tick_rate_ms: u64,
    pub persistence_path: PathBuf,
    pub log_path: PathBuf,
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_filter: String,
    pub theme: ThemeConfig,
    pub defaults: SearchDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

/// Initial language and ordering of a fresh search form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchDefaults {
    pub language: Language,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl SearchDefaults {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new()
            .with_language(self.language)
            .with_sort(self.sort_key, self.sort_order)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or LIBRIS_TUI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub const SUPPORTED_THEMES: &[&str] = &["dark", "light"];

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: TuiConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_filter",
                reason: "must not be empty".to_string(),
            });
        }
        if !SUPPORTED_THEMES.contains(&self.theme.name.trim().to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: format!("must be one of {}", SUPPORTED_THEMES.join(", ")),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("LIBRIS_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
api_base_url = "http://localhost:8000"
request_timeout_ms = 10000
tick_rate_ms = 120
persistence_path = "state/libris-tui.json"
log_path = "logs/libris-tui.log"
log_filter = "libris_tui=info"

[theme]
name = "dark"

[defaults]
language = "en"
sort_key = "download_count"
sort_order = "ascending"
"#;

    #[test]
    fn test_parses_sample_config() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.defaults.language, Language::En);
        assert_eq!(config.defaults.sort_key, SortKey::DownloadCount);
        assert_eq!(config.defaults.sort_order, SortOrder::Ascending);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let contents = format!("{}\nextra = true\n", SAMPLE.replace("[theme]", "unexpected = 1\n[theme]"));
        assert!(matches!(
            TuiConfig::from_toml(&contents),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let contents = SAMPLE.replace("tick_rate_ms = 120\n", "");
        assert!(TuiConfig::from_toml(&contents).is_err());
    }

    #[test]
    fn test_defaults_seed_criteria() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        let criteria = config.defaults.criteria();
        assert_eq!(criteria.language, Language::En);
        assert!(criteria.keyword.is_none());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libris.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = TuiConfig::from_path(&path).unwrap();
        assert_eq!(config.tick_rate_ms, 120);
    }
}
