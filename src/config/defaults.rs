/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.

// Source defaults
pub const DEFAULT_SOURCES_PATH: &str = "./data/sources.txt";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "iptv-sentinel/0.1 (+stream health monitor)";

// Probe defaults
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 20;
pub const DEFAULT_MAX_PROBES_PER_HOST: usize = 5;
pub const DEFAULT_HEAD_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_RANGE_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_RANGE_BYTES: u64 = 32 * 1024;
pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 3000;

// Storage defaults
pub const DEFAULT_CHANNELS_PATH: &str = "./data/channels.json";
pub const DEFAULT_STATUS_DIR: &str = "./data/status";
