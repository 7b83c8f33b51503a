use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("statvfs failed for {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Host info error: {0}")]
    Host(String),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
