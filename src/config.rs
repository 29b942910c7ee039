//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then the TOML config file (when the `config` feature
//! is enabled), then command-line overrides.

use crate::error::{DigitpadError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Endpoint used when neither the config file nor the command line names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// How long a toast stays on the status line.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Selectable color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeName {
    type Err = DigitpadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ThemeName::Default),
            "monochrome" | "mono" => Ok(ThemeName::Monochrome),
            "high-contrast" | "high_contrast" => Ok(ThemeName::HighContrast),
            other => Err(DigitpadError::invalid_argument(format!(
                "unknown theme '{}' (expected default, monochrome or high-contrast)",
                other
            ))),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    /// `None` leaves the request to the transport's own behavior.
    pub request_timeout: Option<Duration>,
    pub toast_duration: Duration,
    pub theme: ThemeName,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            toast_duration: DEFAULT_TOAST_DURATION,
            theme: ThemeName::Default,
            log_file: None,
        }
    }
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub toast_duration_ms: Option<u64>,
    pub theme: Option<ThemeName>,
    pub log_file: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<ThemeName>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve defaults, the config file and `overrides`, then validate.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut config = Config::default();

        #[cfg(feature = "config")]
        if let Some(file) = ConfigFile::discover(overrides.config_path.as_deref())? {
            config.apply_file(file);
        }

        #[cfg(not(feature = "config"))]
        if overrides.config_path.is_some() {
            return Err(DigitpadError::config(
                "built without config file support (enable the `config` feature)",
            ));
        }

        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ms) = file.toast_duration_ms {
            self.toast_duration = Duration::from_millis(ms);
        }
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if file.log_file.is_some() {
            self.log_file = file.log_file;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            DigitpadError::config(format!("invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DigitpadError::config(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(DigitpadError::config("request timeout must be positive"));
        }
        if self.toast_duration.is_zero() {
            return Err(DigitpadError::config("toast duration must be positive"));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DigitpadError::config(e.to_string()))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DigitpadError::file_error(format!("cannot read {}", path.display()), e)
        })?;
        Self::parse(&text)
    }

    /// `$XDG_CONFIG_HOME/digitpad/config.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("digitpad").join("config.toml"))
    }

    /// Load the explicitly given file, or the default one if it exists.
    ///
    /// A missing explicit path is an error; a missing default file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) if !path.exists() => Err(DigitpadError::ConfigNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::read(path).map(Some),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::read(&path).map(Some),
                _ => Ok(None),
            },
        }
    }
}
