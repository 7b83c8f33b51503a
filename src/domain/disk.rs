use serde::{Deserialize, Serialize};

/// Capacity snapshot of one monitored filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub path: String,
    pub free: u64,
    pub total: u64,
}

impl Disk {
    pub fn new(path: impl Into<String>, free: u64, total: u64) -> Self {
        Self {
            path: path.into(),
            free,
            total,
        }
    }

    /// Free space as a percentage of total capacity.
    ///
    /// Callers guarantee `total > 0`; a zero-capacity disk yields NaN.
    pub fn percent_free(&self) -> f64 {
        (self.free as f64 / self.total as f64) * 100.0
    }
}
