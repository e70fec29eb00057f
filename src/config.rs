use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

const COLOR_SCHEMES: &[&str] = &["auto", "dark", "light", "none"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub poller: PollerConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Show the root node as a selectable row
    pub show_root: bool,
    /// Folders shallower than this start expanded
    pub expand_depth: usize,
    /// Text after the live selection count
    pub count_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Task API endpoint
    pub api_url: Option<String>,
    /// Delay between status requests in milliseconds
    pub interval_ms: u64,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the X-CSRFToken header (empty = not sent)
    pub csrf_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Color scheme: auto, dark, light, none
    pub color_scheme: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            show_root: false,
            expand_depth: 1,
            count_label: "documents selected".to_string(),
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            interval_ms: 1000,
            timeout_secs: 30,
            csrf_token: String::new(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            color_scheme: "auto".to_string(),
        }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Default config file location (`<config dir>/doc-browser/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("doc-browser").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Read config file");

        toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poller.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poller.interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.poller.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "poller.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !COLOR_SCHEMES.contains(&self.tui.color_scheme.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "tui.color_scheme must be one of {}, got '{}'",
                COLOR_SCHEMES.join(", "),
                self.tui.color_scheme
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poller.interval_ms, 1000);
        assert_eq!(config.browser.expand_depth, 1);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[poller]"));
    }

    #[test]
    fn default_count_label() {
        assert_eq!(BrowserConfig::default().count_label, "documents selected");
    }

    #[test]
    fn zero_interval_is_invalid() {
        let mut config = Config::default();
        config.poller.interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_color_scheme_is_invalid() {
        let mut config = Config::default();
        config.tui.color_scheme = "sepia".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn poller_durations() {
        let config = PollerConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/doc-browser.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
