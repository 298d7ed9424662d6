//! Insight configuration
//!
//! Loaded from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "layout_unit": 20,
//!   "cache_templates": false,
//!   "template_dir": null,
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, Event, Logger, Severity};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration of an element library's insight pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Grid distance used when inserting inverters (default 20)
    #[serde(default = "default_layout_unit")]
    pub layout_unit: i32,

    /// Keep parsed templates in memory (default false)
    #[serde(default)]
    pub cache_templates: bool,

    /// Read templates from this directory instead of the embedded set
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Largest accepted `layout_unit`
pub const MAX_LAYOUT_UNIT: i32 = 1000;

fn default_layout_unit() -> i32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            layout_unit: default_layout_unit(),
            cache_templates: false,
            template_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl InsightConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        log_event(
            Event::ConfigLoaded,
            Severity::Trace,
            &[("path", &path.display().to_string())],
        );
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: InsightConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_LAYOUT_UNIT).contains(&self.layout_unit) {
            return Err(ConfigError::Invalid(format!(
                "layout_unit must be in 1..={}, got {}",
                MAX_LAYOUT_UNIT, self.layout_unit
            )));
        }
        self.severity()?;
        if let Some(dir) = &self.template_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("template_dir must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Applies `log_level` to the process-wide logger.
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = InsightConfig::from_json("{}").unwrap();
        assert_eq!(config, InsightConfig::default());
        assert_eq!(config.layout_unit, 20);
        assert!(!config.cache_templates);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layout_unit": 10, "cache_templates": true, "log_level": "warn"}}"#
        )
        .unwrap();

        let config = InsightConfig::load(file.path()).unwrap();
        assert_eq!(config.layout_unit, 10);
        assert!(config.cache_templates);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_rejects_non_positive_layout_unit() {
        let err = InsightConfig::from_json(r#"{"layout_unit": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_layout_unit() {
        let err = InsightConfig::from_json(r#"{"layout_unit": 800000000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(InsightConfig::from_json(r#"{"layout_unit": 1000}"#).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = InsightConfig::from_json(r#"{"log_level": "chatty"}"#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_missing_file() {
        let err = InsightConfig::load(Path::new("/nonexistent/insight.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            InsightConfig::from_json("layout_unit = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
