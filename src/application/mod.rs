pub mod alerts;
pub mod despam;
pub mod monitor;
pub mod snapshot;
pub mod thresholds;

pub use alerts::{space_alert_message, AlertEvaluator, Evaluation, STABLE_ALERT_STRING};
pub use despam::{RateLimiter, DEFAULT_DESPAM_INTERVAL};
pub use monitor::LocalMonitor;
pub use snapshot::collect_disks;
pub use thresholds::{ThresholdChange, ThresholdTracker};
