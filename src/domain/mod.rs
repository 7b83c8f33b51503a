pub mod alert;
pub mod disk;
pub mod state;

pub use alert::{DiskSpaceAlert, Thresholds, DEFAULT_ALERT_BYTES, DEFAULT_ALERT_PERCENT};
pub use disk::Disk;
pub use state::LocalState;
