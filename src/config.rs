use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AquaError, Result};
use crate::fetch::DEFAULT_BASE_URL;

/// Runtime settings.
///
/// Sources, lowest precedence first: built-in defaults, an optional JSON file,
/// `AQUA_*` environment variables, command-line flags (applied by the binary).
///
/// ```json
/// {
///   "data_dir": "data",
///   "api_base_url": "https://api.erg.ic.ac.uk/AirQuality",
///   "request_timeout_secs": 30,
///   "max_attempts": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the `Pollution-London <station>.csv` tables.
    pub data_dir: PathBuf,
    pub api_base_url: String,
    /// Unset means live requests never time out.
    pub request_timeout_secs: Option<u64>,
    /// Invalid answers tolerated per prompt before it gives up.
    pub max_attempts: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            max_attempts: 5,
        }
    }
}

impl AppConfig {
    /// Loads the config from a JSON file at `path`. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| AquaError::Config(format!("{}: {}", path.display(), e)))?;
        config.validated()
    }

    /// Overrides fields from `AQUA_*` environment variables.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("AQUA_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = var("AQUA_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = var("AQUA_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = Some(parse_number("AQUA_REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(attempts) = var("AQUA_MAX_ATTEMPTS") {
            self.max_attempts = parse_number("AQUA_MAX_ATTEMPTS", &attempts)?;
        }
        self.validated()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validated(self) -> Result<Self> {
        if self.max_attempts == 0 {
            return Err(AquaError::Config("max_attempts must be at least 1".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(AquaError::Config("api_base_url must not be empty".to_string()));
        }
        Ok(self)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AquaError::Config(format!("{name} is not a valid number: {value:?}")))
}
