//! File-based configuration
//!
//! ```toml
//! [nlp]
//! default_locale = "en"
//! strict_mode = false
//!
//! [batch]
//! item_timeout_ms = 30000
//!
//! [logging]
//! profile = "development"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CadlexError, Result};
use crate::logging_facility::Profile;
use crate::model::Locale;

pub const DEFAULT_ITEM_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadlexConfig {
    pub nlp: NlpConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    pub default_locale: Locale,
    /// Require every required parameter to be stated explicitly
    pub strict_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// 0 disables the per-item deadline
    pub item_timeout_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            item_timeout_ms: DEFAULT_ITEM_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl CadlexConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `Config` naming `source_name` when the document is not valid TOML or
    /// holds a value of the wrong type.
    pub fn from_toml_str(source_name: &str, raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| CadlexError::Config {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// `Config` when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| CadlexError::Config {
            source_name: path.display().to_string(),
            reason: format!("cannot read file: {}", e),
        })?;
        Self::from_toml_str(&path.display().to_string(), &raw)
    }

    /// Per-item deadline, `None` when disabled
    pub fn item_timeout(&self) -> Option<Duration> {
        match self.batch.item_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CadlexConfig::default();
        assert_eq!(config.nlp.default_locale, Locale::En);
        assert!(!config.nlp.strict_mode);
        assert_eq!(config.item_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.logging.profile, Profile::Development);
    }

    #[test]
    fn test_partial_document_falls_back_to_defaults() {
        let config = CadlexConfig::from_toml_str("inline", "[nlp]\ndefault_locale = \"es\"\n").unwrap();
        assert_eq!(config.nlp.default_locale, Locale::Es);
        assert!(!config.nlp.strict_mode);
        assert_eq!(config.batch.item_timeout_ms, DEFAULT_ITEM_TIMEOUT_MS);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = CadlexConfig::from_toml_str("inline", "[batch]\nitem_timeout_ms = 0\n").unwrap();
        assert_eq!(config.item_timeout(), None);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for raw in [
            "[nlp]\ndefault_locale = \"fr\"\n",
            "[batch]\nitem_timeout_ms = -1\n",
            "[logging]\nprofile = \"loud\"\n",
            "not toml at all",
        ] {
            let err = CadlexConfig::from_toml_str("inline", raw).unwrap_err();
            assert!(
                matches!(err, CadlexError::Config { ref source_name, .. } if source_name == "inline"),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[nlp]\nstrict_mode = true\n\n[batch]\nitem_timeout_ms = 250\n\n[logging]\nprofile = \"production\""
        )
        .unwrap();
        let config = CadlexConfig::load(file.path()).unwrap();
        assert!(config.nlp.strict_mode);
        assert_eq!(config.item_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.logging.profile, Profile::Production);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CadlexConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CadlexError::Config { .. }));
    }
}
