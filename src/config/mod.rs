use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;

use defaults::*;

/// Source fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Plain-text file listing playlist URLs, one per line, `#` comments allowed
    #[serde(default = "default_sources_path")]
    pub list_path: PathBuf,
    /// Total timeout for fetching one playlist
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Stream probing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Global cap on probes in flight
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,
    /// Cap on simultaneous probes against a single host
    #[serde(default = "default_max_probes_per_host")]
    pub max_probes_per_host: usize,
    /// Timeout for the phase-1 existence check (HEAD)
    #[serde(default = "default_head_timeout_secs")]
    pub head_timeout_secs: u64,
    /// Timeout for the phase-2 ranged fetch
    #[serde(default = "default_range_timeout_secs")]
    pub range_timeout_secs: u64,
    /// Byte cap for the phase-2 range request
    #[serde(default = "default_range_bytes")]
    pub range_bytes: u64,
    /// Response times at or above this classify as slow
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON array of persisted channels
    #[serde(default = "default_channels_path")]
    pub channels_path: PathBuf,
    /// Directory receiving one probe report per UTC day
    #[serde(default = "default_status_dir")]
    pub status_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_sources_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCES_PATH)
}
fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_max_concurrent_probes() -> usize {
    DEFAULT_MAX_CONCURRENT_PROBES
}
fn default_max_probes_per_host() -> usize {
    DEFAULT_MAX_PROBES_PER_HOST
}
fn default_head_timeout_secs() -> u64 {
    DEFAULT_HEAD_TIMEOUT_SECS
}
fn default_range_timeout_secs() -> u64 {
    DEFAULT_RANGE_TIMEOUT_SECS
}
fn default_range_bytes() -> u64 {
    DEFAULT_RANGE_BYTES
}
fn default_slow_threshold_ms() -> u64 {
    DEFAULT_SLOW_THRESHOLD_MS
}
fn default_channels_path() -> PathBuf {
    PathBuf::from(DEFAULT_CHANNELS_PATH)
}
fn default_status_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATUS_DIR)
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            list_path: default_sources_path(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_concurrent_probes: default_max_concurrent_probes(),
            max_probes_per_host: default_max_probes_per_host(),
            head_timeout_secs: default_head_timeout_secs(),
            range_timeout_secs: default_range_timeout_secs(),
            range_bytes: default_range_bytes(),
            slow_threshold_ms: default_slow_threshold_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            channels_path: default_channels_path(),
            status_dir: default_status_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            probe: ProbeConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl ProbeConfig {
    pub fn head_timeout(&self) -> Duration {
        Duration::from_secs(self.head_timeout_secs)
    }

    pub fn range_timeout(&self) -> Duration {
        Duration::from_secs(self.range_timeout_secs)
    }
}

impl SourcesConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_probe_contract() {
        let config = Config::default();
        assert_eq!(config.probe.max_concurrent_probes, 20);
        assert_eq!(config.probe.max_probes_per_host, 5);
        assert_eq!(config.probe.head_timeout(), Duration::from_secs(6));
        assert_eq!(config.probe.range_timeout(), Duration::from_secs(8));
        assert_eq!(config.probe.range_bytes, 32 * 1024);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [probe]
            max_concurrent_probes = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.probe.max_concurrent_probes, 8);
        assert_eq!(config.probe.max_probes_per_host, 5);
        assert_eq!(config.storage.channels_path, PathBuf::from("./data/channels.json"));
    }
}
