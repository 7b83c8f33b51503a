use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Disk, DiskSpaceAlert};

/// Published snapshot of the local node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    pub version: String,
    pub uptime: Duration,
    pub disks: Vec<Disk>,
    pub storage_space_alert: DiskSpaceAlert,
}

impl LocalState {
    pub fn new(version: String, uptime: Duration, disks: Vec<Disk>) -> Self {
        Self {
            version,
            uptime,
            disks,
            storage_space_alert: DiskSpaceAlert::Ok,
        }
    }

    pub fn with_alert(mut self, alert: DiskSpaceAlert) -> Self {
        self.storage_space_alert = alert;
        self
    }
}
