use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::MonitorResult;
use crate::ports::HostSource;

/// Host source reporting this process's uptime and the crate version
#[derive(Debug, Clone)]
pub struct ProcessHostSource {
    started: Instant,
    version: String,
}

impl ProcessHostSource {
    pub fn new() -> Self {
        Self::with_version(env!("CARGO_PKG_VERSION"))
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            started: Instant::now(),
            version: version.into(),
        }
    }
}

impl Default for ProcessHostSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostSource for ProcessHostSource {
    async fn uptime(&self) -> MonitorResult<Duration> {
        let elapsed = self.started.elapsed();
        Ok(Duration::from_millis(elapsed.as_millis() as u64))
    }

    fn version(&self) -> String {
        self.version.clone()
    }
}
