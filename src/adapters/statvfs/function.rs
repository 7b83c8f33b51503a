use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::ports::{FsStats, StatSource};

/// Deterministic stat source wrapping a pure path -> stats function
pub struct FnStatSource<F> {
    func: F,
}

impl<F> FnStatSource<F>
where
    F: Fn(&Path) -> FsStats + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> fmt::Debug for FnStatSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStatSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> StatSource for FnStatSource<F>
where
    F: Fn(&Path) -> FsStats + Send + Sync,
{
    async fn stat(&self, path: &Path) -> std::io::Result<FsStats> {
        Ok((self.func)(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_function_receives_path() {
        let source = FnStatSource::new(|path: &Path| {
            if path == Path::new("/big") {
                FsStats::new(10, 100, 4096)
            } else {
                FsStats::new(1, 2, 512)
            }
        });

        assert_eq!(
            source.stat(Path::new("/big")).await.unwrap(),
            FsStats::new(10, 100, 4096)
        );
        assert_eq!(
            source.stat(Path::new("/small")).await.unwrap(),
            FsStats::new(1, 2, 512)
        );
    }
}
