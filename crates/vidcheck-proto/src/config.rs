use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the service under test; endpoints hang off `{base_url}/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Tunables for the checks themselves. The remote aggregator is fed by live
/// third-party sources, so several of these are deliberate fuzz factors
/// rather than exact bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// How many leading records get the full per-record schema check.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Pause between an ingestion call and the next request, in seconds.
    /// Gives the aggregator room to settle and respects upstream rate limits.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
    /// Re-triggering ingestion may grow a platform's count by at most this
    /// factor; trending content rotates, so exact equality is too strict.
    #[serde(default = "default_growth_tolerance")]
    pub growth_tolerance: f64,
    /// Response bodies echoed on failure are clipped to this many chars.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            pause_secs: default_pause_secs(),
            growth_tolerance: default_growth_tolerance(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_sample_size() -> usize {
    3
}

fn default_pause_secs() -> u64 {
    2
}

fn default_growth_tolerance() -> f64 {
    1.5
}

fn default_preview_chars() -> usize {
    200
}

impl Config {
    /// Load from the default config path, falling back to defaults when the
    /// file does not exist. Never writes anything.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vidcheck")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }

    pub fn ingest_pause(&self) -> Duration {
        Duration::from_secs(self.checks.pause_secs)
    }

    /// `{base_url}/api{path}` with no double slashes regardless of how the
    /// base was written.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api{}",
            self.api.base_url.trim_end_matches('/'),
            path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.checks.sample_size, 3);
        assert_eq!(config.checks.pause_secs, 2);
        assert!((config.checks.growth_tolerance - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.checks.preview_chars, 200);
        assert!(Config::config_path().ends_with("vidcheck/config.toml"));
    }

    #[test]
    fn test_endpoint_joining() {
        let mut config = Config::default();
        config.api.base_url = "https://videohub.example.com/".to_string();
        assert_eq!(
            config.endpoint("/youtube/trending"),
            "https://videohub.example.com/api/youtube/trending"
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://10.0.0.5:8000"

            [checks]
            pause_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.checks.pause_secs, 0);
        assert_eq!(config.checks.sample_size, 3);
    }
}
