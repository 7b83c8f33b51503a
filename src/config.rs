use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::AlertSettings;
use crate::domain::{DEFAULT_ALERT_BYTES, DEFAULT_ALERT_PERCENT};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub poll_interval: u64,
    pub data_directory: PathBuf,
    pub alert_percent: u32,
    pub alert_bytes: u64,
    pub despam_secs: u64,
    pub config_file: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("SPACEMON_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            poll_interval: env::var("SPACEMON_POLL_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            data_directory: env::var("SPACEMON_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/var/lib/spacemon")),
            alert_percent: env::var("SPACEMON_ALERT_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ALERT_PERCENT),
            alert_bytes: env::var("SPACEMON_ALERT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ALERT_BYTES),
            despam_secs: env::var("SPACEMON_DESPAM_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            config_file: env::var("SPACEMON_CONFIG_FILE").ok().map(PathBuf::from),
            log_level: env::var("SPACEMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Initial alert settings, before any config file is read
    pub fn alert_settings(&self) -> AlertSettings {
        AlertSettings {
            free_space_alert_threshold_percent: self.alert_percent,
            free_space_alert_threshold_bytes: self.alert_bytes,
            data_directory: self.data_directory.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    pub fn despam_interval(&self) -> Duration {
        Duration::from_secs(self.despam_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
