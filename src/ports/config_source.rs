use std::path::PathBuf;

use crate::domain::Thresholds;

/// Port for reading alert configuration, polled once per update cycle
pub trait ConfigSource: Send + Sync {
    /// Pick up external changes before the getters are polled
    fn reload(&self) {}

    fn free_space_alert_threshold_percent(&self) -> u32;

    fn free_space_alert_threshold_bytes(&self) -> u64;

    fn data_directory(&self) -> PathBuf;

    /// Both thresholds read together.
    ///
    /// Sources that can change concurrently should override this so a cycle
    /// never mixes an old and a new value.
    fn thresholds(&self) -> Thresholds {
        Thresholds::new(
            self.free_space_alert_threshold_percent(),
            self.free_space_alert_threshold_bytes(),
        )
    }
}
