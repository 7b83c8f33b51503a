use std::path::Path;

use async_trait::async_trait;

/// Raw filesystem figures as reported by `statvfs`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsStats {
    pub blocks_free: u64,
    pub blocks_total: u64,
    /// Fragment size (`f_frsize`), not the nominal block size
    pub fragment_size: u64,
}

impl FsStats {
    pub fn new(blocks_free: u64, blocks_total: u64, fragment_size: u64) -> Self {
        Self {
            blocks_free,
            blocks_total,
            fragment_size,
        }
    }

    pub fn free_bytes(&self) -> std::io::Result<u64> {
        Self::to_bytes(self.blocks_free, self.fragment_size)
    }

    pub fn total_bytes(&self) -> std::io::Result<u64> {
        Self::to_bytes(self.blocks_total, self.fragment_size)
    }

    fn to_bytes(blocks: u64, fragment_size: u64) -> std::io::Result<u64> {
        blocks.checked_mul(fragment_size).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} fragments of {} bytes overflow u64", blocks, fragment_size),
            )
        })
    }
}

/// Port for fetching filesystem capacity
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Stat the filesystem holding `path`
    async fn stat(&self, path: &Path) -> std::io::Result<FsStats>;
}
