use std::time::Duration;

use humansize::{format_size, BINARY};
use tokio::time::Instant;
use tracing::{debug, error};

use crate::domain::{Disk, DiskSpaceAlert, Thresholds};

use super::despam::RateLimiter;

/// Prefix of every space alert line, for those who grep the logs
pub const STABLE_ALERT_STRING: &str = "storage space alert";

/// Outcome of evaluating one set of disks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub alert: DiskSpaceAlert,
    /// Disks at or below their free-space floor
    pub breached: usize,
    /// Alert lines actually written after rate limiting
    pub logged: usize,
}

/// Applies thresholds to disks and owns the alert debounce clock
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    despam: RateLimiter,
}

impl AlertEvaluator {
    pub fn new(despam_interval: Duration) -> Self {
        Self {
            despam: RateLimiter::new(despam_interval),
        }
    }

    pub fn evaluate(&mut self, disks: &[Disk], thresholds: Thresholds) -> Evaluation {
        self.evaluate_at(disks, thresholds, Instant::now())
    }

    /// Derive the node alert state from scratch.
    ///
    /// # Panics
    ///
    /// Panics if any disk reports zero total capacity.
    pub fn evaluate_at(&mut self, disks: &[Disk], thresholds: Thresholds, now: Instant) -> Evaluation {
        let mut evaluation = Evaluation {
            alert: DiskSpaceAlert::Ok,
            breached: 0,
            logged: 0,
        };

        for disk in disks {
            assert_ne!(disk.total, 0, "Total disk space cannot be zero.");

            let (min_by_bytes, min_by_percent) =
                thresholds.minimum_free_by_bytes_and_percent(disk.total);
            let min_space = min_by_bytes.min(min_by_percent);
            let low = disk.free <= min_space;
            debug!(
                "min by % {}, min bytes {}, disk.free {} -> alert {}",
                min_by_percent, min_by_bytes, disk.free, low
            );

            if low {
                evaluation.alert = DiskSpaceAlert::LowSpace;
                evaluation.breached += 1;
                if self.maybe_log_space_error(disk, min_space, now) {
                    evaluation.logged += 1;
                }
            }
        }

        evaluation
    }

    fn maybe_log_space_error(&mut self, disk: &Disk, min_space: u64, now: Instant) -> bool {
        let Some(dropped) = self.despam.check_at(&disk.path, now) else {
            return false;
        };

        let message = space_alert_message(disk, min_space);
        if dropped > 0 {
            error!("{} (rate limiting dropped {} similar messages)", message, dropped);
        } else {
            error!("{}", message);
        }
        true
    }
}

/// Human readable alert line for a disk below its floor
pub fn space_alert_message(disk: &Disk, min_space: u64) -> String {
    format!(
        "{}: free space at {:.3}% on {}: {} total, {} free, min. free {}. \
         Please adjust retention policies as needed to avoid running out of space.",
        STABLE_ALERT_STRING,
        disk.percent_free(),
        disk.path,
        format_size(disk.total, BINARY),
        format_size(disk.free, BINARY),
        format_size(min_space, BINARY),
    )
}
