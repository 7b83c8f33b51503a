use tracing::info;

use crate::domain::Thresholds;
use crate::ports::ConfigSource;

/// A threshold transition observed on refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdChange {
    Percent { old: u32, new: u32 },
    Bytes { old: u64, new: u64 },
}

/// Keeps the last-seen alert thresholds and reports when they move
#[derive(Debug, Clone)]
pub struct ThresholdTracker {
    last: Thresholds,
}

impl ThresholdTracker {
    pub fn new(initial: Thresholds) -> Self {
        Self { last: initial }
    }

    pub fn current(&self) -> Thresholds {
        self.last
    }

    /// Poll the configuration and log any threshold that changed since the
    /// previous refresh.
    pub fn refresh(&mut self, config: &dyn ConfigSource) -> Vec<ThresholdChange> {
        let fresh = config.thresholds();
        let mut changes = Vec::new();

        if self.last.percent != fresh.percent {
            info!(
                "Updated free space percent alert threshold {} -> {}",
                self.last.percent, fresh.percent
            );
            changes.push(ThresholdChange::Percent {
                old: self.last.percent,
                new: fresh.percent,
            });
            self.last.percent = fresh.percent;
        }

        if self.last.bytes != fresh.bytes {
            info!(
                "Updated free space bytes alert threshold {} -> {}",
                self.last.bytes, fresh.bytes
            );
            changes.push(ThresholdChange::Bytes {
                old: self.last.bytes,
                new: fresh.bytes,
            });
            self.last.bytes = fresh.bytes;
        }

        changes
    }
}

impl Default for ThresholdTracker {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
