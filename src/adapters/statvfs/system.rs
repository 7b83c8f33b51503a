use std::path::Path;

use async_trait::async_trait;

use crate::ports::{FsStats, StatSource};

/// Stat source backed by the `statvfs` syscall
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsSource;

impl StatvfsSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatSource for StatvfsSource {
    async fn stat(&self, path: &Path) -> std::io::Result<FsStats> {
        let path = path.to_path_buf();

        // statvfs can stall on a hung mount, keep it off the runtime threads
        let stat = tokio::task::spawn_blocking(move || nix::sys::statvfs::statvfs(&path))
            .await
            .map_err(std::io::Error::other)??;

        Ok(FsStats::new(
            stat.blocks_free() as u64,
            stat.blocks() as u64,
            stat.fragment_size() as u64,
        ))
    }
}
