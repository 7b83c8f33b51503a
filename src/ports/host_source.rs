use std::time::Duration;

use async_trait::async_trait;

use crate::error::MonitorResult;

/// Port for host-level facts copied into the snapshot
#[async_trait]
pub trait HostSource: Send + Sync {
    async fn uptime(&self) -> MonitorResult<Duration>;

    fn version(&self) -> String;
}
