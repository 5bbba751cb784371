//! Pad configuration management for `calcpad.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[editor]` | Editor defaults (fallback language)              |
//! | `[rates]`  | Currency rate source (url, refresh, timeout)     |
//!
//! Every section and field is optional; missing values fall back to
//! defaults, so an empty (or absent) file is a valid configuration.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{EditorConfig, RatesConfig};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure representing calcpad.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Editor defaults
    pub editor: EditorConfig,

    /// Currency rate source settings
    pub rates: RatesConfig,
}

impl PadConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&raw)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from raw TOML.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.rates.url.starts_with("http://") && !self.rates.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "rates.url must be an http(s) URL, got `{}`",
                self.rates.url
            )));
        }
        if self.rates.timeout == 0 {
            return Err(ConfigError::Validation(
                "rates.timeout must be at least 1 second".into(),
            ));
        }
        Ok(())
    }
}

/// Parse a config string for tests, panicking on invalid input.
#[cfg(test)]
pub(crate) fn test_parse_config(raw: &str) -> PadConfig {
    PadConfig::parse(raw).expect("config should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_valid() {
        let config = test_parse_config("");
        assert_eq!(config.editor.language, "en");
        assert!(config.rates.url.contains("floatrates"));
    }

    #[test]
    fn test_unknown_section_ignored() {
        // Unknown keys are tolerated rather than rejected
        let config = test_parse_config("[something_else]\nkey = 1");
        assert_eq!(config.editor.language, "en");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = PadConfig::parse("[rates]\nurl = \"ftp://rates.example\"");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = PadConfig::parse("[rates]\ntimeout = 0");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = PadConfig::parse("[rates\nurl = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PadConfig::load_or_default(&dir.path().join("calcpad.toml")).unwrap();
        assert_eq!(config.editor.language, "en");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("calcpad.toml");
        std::fs::write(&path, "[editor]\nlanguage = \"tr\"").unwrap();

        let config = PadConfig::load(&path).unwrap();
        assert_eq!(config.editor.language, "tr");
    }
}
