use std::path::Path;

use crate::domain::Disk;
use crate::error::{MonitorError, MonitorResult};
use crate::ports::{ConfigSource, StatSource};

/// Stat the data directory (or `path_override` when set) and convert the raw
/// fragment counts to bytes.
///
/// Disks are always reported under the configured data directory, even when
/// the statted path is overridden.
pub async fn collect_disks(
    config: &dyn ConfigSource,
    source: &dyn StatSource,
    path_override: Option<&Path>,
) -> MonitorResult<Vec<Disk>> {
    let data_directory = config.data_directory();
    let path = path_override.unwrap_or(data_directory.as_path());

    let stat_error = |err| MonitorError::Stat {
        path: path.to_path_buf(),
        source: err,
    };
    let stats = source.stat(path).await.map_err(stat_error)?;
    let free = stats.free_bytes().map_err(stat_error)?;
    let total = stats.total_bytes().map_err(stat_error)?;

    Ok(vec![Disk::new(data_directory.display().to_string(), free, total)])
}
