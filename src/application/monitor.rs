use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::adapters::{FnStatSource, MemoryStateStore};
use crate::domain::{LocalState, Thresholds};
use crate::error::MonitorResult;
use crate::ports::{ConfigSource, FsStats, HostSource, StatSource, StateReader, StateStore};

use super::alerts::AlertEvaluator;
use super::snapshot::collect_disks;
use super::thresholds::ThresholdTracker;

/// Local node monitor.
///
/// Owns the threshold and debounce state. `update_state` takes `&mut self`,
/// so cycles on one monitor can never overlap; readers go through a
/// [`StateReader`] and always see a whole snapshot.
pub struct LocalMonitor {
    config: Arc<dyn ConfigSource>,
    stat_source: Arc<dyn StatSource>,
    host: Arc<dyn HostSource>,
    store: Arc<dyn StateStore>,
    thresholds: ThresholdTracker,
    alerts: AlertEvaluator,
    path_override: Option<PathBuf>,
    stat_override: Option<Arc<dyn StatSource>>,
}

impl LocalMonitor {
    pub fn new(
        config: Arc<dyn ConfigSource>,
        stat_source: Arc<dyn StatSource>,
        host: Arc<dyn HostSource>,
        despam_interval: Duration,
    ) -> Self {
        Self {
            config,
            stat_source,
            host,
            store: Arc::new(MemoryStateStore::new()),
            thresholds: ThresholdTracker::default(),
            alerts: AlertEvaluator::new(despam_interval),
            path_override: None,
            stat_override: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = store;
        self
    }

    /// Run one refresh / evaluate / publish cycle.
    ///
    /// On error nothing is published and the previous snapshot stays readable.
    pub async fn update_state(&mut self) -> MonitorResult<()> {
        self.config.reload();
        self.thresholds.refresh(self.config.as_ref());

        let source = self
            .stat_override
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.stat_source));
        let disks = collect_disks(
            self.config.as_ref(),
            source.as_ref(),
            self.path_override.as_deref(),
        )
        .await?;

        let uptime = self.host.uptime().await?;
        let state = LocalState::new(self.host.version(), uptime, disks);

        let evaluation = self.alerts.evaluate(&state.disks, self.thresholds.current());
        debug!(
            "Local state updated: {} disk(s), alert {}",
            state.disks.len(),
            evaluation.alert
        );

        self.store.publish(state.with_alert(evaluation.alert));
        Ok(())
    }

    /// Last published snapshot; never triggers a cycle
    pub fn get_state_cached(&self) -> Arc<LocalState> {
        self.store.latest()
    }

    /// Read handle that stays valid after the monitor moves into its task
    pub fn state_reader(&self) -> StateReader {
        Arc::clone(&self.store)
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds.current()
    }

    /// Stat `path` instead of the configured data directory
    pub fn set_path_override(&mut self, path: impl Into<PathBuf>) {
        self.path_override = Some(path.into());
    }

    /// Replace the stat source with a pure path -> stats function
    pub fn set_stat_override<F>(&mut self, func: F)
    where
        F: Fn(&Path) -> FsStats + Send + Sync + 'static,
    {
        self.stat_override = Some(Arc::new(FnStatSource::new(func)));
    }

    /// Start the background update loop.
    ///
    /// A cycle that panics (zero-capacity disk) aborts the process, even
    /// when the binary was built with unwinding panics.
    pub fn start_monitoring(self, every: Duration) -> JoinHandle<()> {
        let driver = UpdateLoop(self.spawn_update_loop(every));

        tokio::spawn(async move {
            let mut driver = driver;
            if let Some(reason) = fatal_exit((&mut driver.0).await) {
                error!("Local monitor stopped: {}", reason);
                std::process::abort();
            }
            warn!("Local monitor update loop cancelled");
        })
    }

    fn spawn_update_loop(mut self, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if let Err(e) = self.update_state().await {
                    warn!("Failed to update local state: {}", e);
                }
            }
        })
    }
}

/// Update loop that is cancelled when its supervisor goes away
struct UpdateLoop(JoinHandle<()>);

impl Drop for UpdateLoop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Panic message of a finished update loop, `None` if it was cancelled
fn fatal_exit(result: Result<(), JoinError>) -> Option<String> {
    let err = result.err()?;
    if !err.is_panic() {
        return None;
    }

    let payload = err.into_panic();
    let reason = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "update cycle panicked".to_string());
    Some(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AlertSettings, LiveConfig, ProcessHostSource};
    use crate::domain::{Disk, DiskSpaceAlert};
    use crate::error::MonitorError;
    use async_trait::async_trait;

    struct UnmountedSource;

    #[async_trait]
    impl StatSource for UnmountedSource {
        async fn stat(&self, _path: &Path) -> std::io::Result<FsStats> {
            Err(std::io::Error::from(std::io::ErrorKind::NotFound))
        }
    }

    fn live_config(percent: u32, bytes: u64) -> Arc<LiveConfig> {
        Arc::new(LiveConfig::new(AlertSettings {
            free_space_alert_threshold_percent: percent,
            free_space_alert_threshold_bytes: bytes,
            data_directory: PathBuf::from("/var/lib/data"),
        }))
    }

    fn monitor(config: Arc<LiveConfig>) -> LocalMonitor {
        LocalMonitor::new(
            config,
            Arc::new(UnmountedSource),
            Arc::new(ProcessHostSource::with_version("v-test")),
            Duration::from_secs(3600),
        )
    }

    fn fixed(free: u64, total: u64) -> impl Fn(&Path) -> FsStats + Send + Sync + 'static {
        move |_: &Path| FsStats::new(free, total, 1)
    }

    #[test]
    fn test_state_empty_before_first_cycle() {
        let monitor = monitor(live_config(10, 100));
        assert_eq!(*monitor.get_state_cached(), LocalState::default());
    }

    #[tokio::test]
    async fn test_plenty_of_space_is_ok() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(200, 1000));
        monitor.update_state().await.unwrap();

        let state = monitor.get_state_cached();
        assert_eq!(state.storage_space_alert, DiskSpaceAlert::Ok);
        assert_eq!(state.disks, vec![Disk::new("/var/lib/data", 200, 1000)]);
        assert_eq!(state.version, "v-test");
    }

    #[tokio::test]
    async fn test_low_space_alerts() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(50, 1000));
        monitor.update_state().await.unwrap();

        assert_eq!(
            monitor.get_state_cached().storage_space_alert,
            DiskSpaceAlert::LowSpace
        );
    }

    #[tokio::test]
    async fn test_alert_clears_when_space_recovers() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(50, 1000));
        monitor.update_state().await.unwrap();

        monitor.set_stat_override(fixed(500, 1000));
        monitor.update_state().await.unwrap();
        assert_eq!(monitor.get_state_cached().storage_space_alert, DiskSpaceAlert::Ok);
    }

    #[tokio::test]
    #[should_panic(expected = "Total disk space cannot be zero.")]
    async fn test_zero_capacity_disk_is_fatal() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(0, 0));
        let _ = monitor.update_state().await;
    }

    #[tokio::test]
    async fn test_threshold_change_picked_up_between_cycles() {
        let config = live_config(10, 100);
        let mut monitor = monitor(Arc::clone(&config));
        monitor.set_stat_override(fixed(150, 1000));

        monitor.update_state().await.unwrap();
        assert_eq!(monitor.thresholds(), Thresholds::new(10, 100));
        assert_eq!(monitor.get_state_cached().storage_space_alert, DiskSpaceAlert::Ok);

        // floor becomes min(200, 400) = 200, and 150 free is below it
        config.set_threshold_percent(40);
        config.set_threshold_bytes(200);
        monitor.update_state().await.unwrap();
        assert_eq!(monitor.thresholds(), Thresholds::new(40, 200));
        assert_eq!(
            monitor.get_state_cached().storage_space_alert,
            DiskSpaceAlert::LowSpace
        );
    }

    #[tokio::test]
    async fn test_stat_failure_keeps_previous_state() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(200, 1000));
        monitor.update_state().await.unwrap();
        let before = monitor.get_state_cached();

        monitor.stat_override = None;
        let err = monitor.update_state().await.unwrap_err();
        assert!(matches!(err, MonitorError::Stat { .. }));
        assert_eq!(monitor.get_state_cached(), before);
    }

    #[tokio::test]
    async fn test_path_override_is_statted() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_path_override("/scratch");
        monitor.set_stat_override(|path: &Path| {
            assert_eq!(path, Path::new("/scratch"));
            FsStats::new(10, 20, 4096)
        });
        monitor.update_state().await.unwrap();

        let state = monitor.get_state_cached();
        assert_eq!(state.disks[0].path, "/var/lib/data");
        assert_eq!(state.disks[0].free, 10 * 4096);
        assert_eq!(state.disks[0].total, 20 * 4096);
    }

    #[tokio::test]
    async fn test_reader_sees_published_state() {
        let mut monitor = monitor(live_config(10, 100));
        let reader = monitor.state_reader();
        monitor.set_stat_override(fixed(200, 1000));
        monitor.update_state().await.unwrap();

        assert_eq!(reader.latest(), monitor.get_state_cached());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_publishes() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(50, 1000));
        let reader = monitor.state_reader();

        let handle = monitor.start_monitoring(Duration::from_secs(10));
        // first tick fires immediately
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(reader.latest().storage_space_alert, DiskSpaceAlert::LowSpace);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_capacity_in_loop_is_fatal() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(|_: &Path| FsStats::new(0, 0, 4096));

        let result = monitor.spawn_update_loop(Duration::from_secs(1)).await;
        let reason = fatal_exit(result).expect("loop must not keep running");
        assert!(reason.contains("Total disk space cannot be zero."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_loop_is_not_fatal() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(500, 1000));

        let handle = monitor.spawn_update_loop(Duration::from_secs(1));
        handle.abort();
        assert_eq!(fatal_exit(handle.await), None);
    }

    struct StoppedHost;

    #[async_trait]
    impl HostSource for StoppedHost {
        async fn uptime(&self) -> MonitorResult<Duration> {
            Err(MonitorError::Host("engine not running".to_string()))
        }

        fn version(&self) -> String {
            "v-test".to_string()
        }
    }

    #[tokio::test]
    async fn test_host_failure_keeps_previous_state() {
        let mut monitor = monitor(live_config(10, 100));
        monitor.set_stat_override(fixed(200, 1000));
        monitor.update_state().await.unwrap();
        let before = monitor.get_state_cached();

        monitor.host = Arc::new(StoppedHost);
        monitor.set_stat_override(fixed(50, 1000));
        let err = monitor.update_state().await.unwrap_err();

        assert!(matches!(err, MonitorError::Host(_)));
        assert_eq!(monitor.get_state_cached(), before);
    }

    #[tokio::test]
    async fn test_publishes_into_injected_store() {
        let store = Arc::new(MemoryStateStore::new());
        let mut monitor = monitor(live_config(10, 100)).with_store(store.clone());
        monitor.set_stat_override(fixed(50, 1000));
        monitor.update_state().await.unwrap();

        assert_eq!(store.latest().storage_space_alert, DiskSpaceAlert::LowSpace);
        assert_eq!(store.latest(), monitor.get_state_cached());
    }
}
