use serde::{Deserialize, Serialize};

/// Default free-space percent threshold
pub const DEFAULT_ALERT_PERCENT: u32 = 5;

/// Default free-space bytes threshold
pub const DEFAULT_ALERT_BYTES: u64 = 0;

/// Node-level storage space alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskSpaceAlert {
    #[default]
    Ok,
    LowSpace,
}

impl std::fmt::Display for DiskSpaceAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiskSpaceAlert::Ok => write!(f, "ok"),
            DiskSpaceAlert::LowSpace => write!(f, "low_space"),
        }
    }
}

/// Lower bounds on free space, both active at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub percent: u32,
    pub bytes: u64,
}

impl Thresholds {
    /// Percent values above 100 are clamped.
    pub fn new(percent: u32, bytes: u64) -> Self {
        Self {
            percent: percent.min(100),
            bytes,
        }
    }

    /// Minimum free bytes required by the absolute and the percentage threshold
    pub fn minimum_free_by_bytes_and_percent(&self, total: u64) -> (u64, u64) {
        let by_percent = (u128::from(total) * u128::from(self.percent) / 100) as u64;
        (self.bytes, by_percent)
    }

    /// Free-space floor applied to a disk of `total` bytes.
    ///
    /// The smaller (less strict) of the two bounds is the binding one.
    pub fn effective_floor(&self, total: u64) -> u64 {
        let (by_bytes, by_percent) = self.minimum_free_by_bytes_and_percent(total);
        by_bytes.min(by_percent)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_PERCENT, DEFAULT_ALERT_BYTES)
    }
}
