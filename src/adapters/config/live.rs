use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Thresholds, DEFAULT_ALERT_BYTES, DEFAULT_ALERT_PERCENT};
use crate::ports::ConfigSource;

/// Alert settings that may change while the monitor runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettings {
    pub free_space_alert_threshold_percent: u32,
    pub free_space_alert_threshold_bytes: u64,
    pub data_directory: PathBuf,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            free_space_alert_threshold_percent: DEFAULT_ALERT_PERCENT,
            free_space_alert_threshold_bytes: DEFAULT_ALERT_BYTES,
            data_directory: PathBuf::from("/var/lib/spacemon"),
        }
    }
}

/// On-disk shape of the settings file, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    free_space_alert_threshold_percent: Option<u32>,
    free_space_alert_threshold_bytes: Option<u64>,
    data_directory: Option<PathBuf>,
}

impl AlertSettings {
    fn merge(&mut self, file: SettingsFile) {
        if let Some(percent) = file.free_space_alert_threshold_percent {
            self.free_space_alert_threshold_percent = percent;
        }
        if let Some(bytes) = file.free_space_alert_threshold_bytes {
            self.free_space_alert_threshold_bytes = bytes;
        }
        if let Some(dir) = file.data_directory {
            self.data_directory = dir;
        }
    }
}

/// In-memory configuration source, optionally backed by a TOML file
#[derive(Debug)]
pub struct LiveConfig {
    settings: RwLock<AlertSettings>,
    file: Option<PathBuf>,
}

impl LiveConfig {
    pub fn new(settings: AlertSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            file: None,
        }
    }

    /// Re-read `path` on every reload, keeping `settings` for absent keys
    pub fn with_file(settings: AlertSettings, path: impl Into<PathBuf>) -> Self {
        Self {
            settings: RwLock::new(settings),
            file: Some(path.into()),
        }
    }

    pub fn settings(&self) -> AlertSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_threshold_percent(&self, percent: u32) {
        self.write().free_space_alert_threshold_percent = percent;
    }

    pub fn set_threshold_bytes(&self, bytes: u64) {
        self.write().free_space_alert_threshold_bytes = bytes;
    }

    pub fn set_data_directory(&self, dir: impl Into<PathBuf>) {
        self.write().data_directory = dir.into();
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AlertSettings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_file(path: &Path) -> Result<SettingsFile, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str(&content).map_err(|e| e.to_string())
    }
}

impl ConfigSource for LiveConfig {
    fn reload(&self) {
        let Some(path) = &self.file else {
            return;
        };

        match Self::load_file(path) {
            Ok(file) => {
                debug!("Reloaded alert settings from {}", path.display());
                self.write().merge(file);
            }
            Err(e) => warn!(
                "Failed to reload alert settings from {}: {}. Keeping current values.",
                path.display(),
                e
            ),
        }
    }

    fn free_space_alert_threshold_percent(&self) -> u32 {
        self.settings().free_space_alert_threshold_percent
    }

    fn free_space_alert_threshold_bytes(&self) -> u64 {
        self.settings().free_space_alert_threshold_bytes
    }

    fn data_directory(&self) -> PathBuf {
        self.settings().data_directory
    }

    fn thresholds(&self) -> Thresholds {
        let settings = self.settings();
        Thresholds::new(
            settings.free_space_alert_threshold_percent,
            settings.free_space_alert_threshold_bytes,
        )
    }
}
