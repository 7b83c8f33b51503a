use std::future::IntoFuture;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacemon::adapters::{LiveConfig, ProcessHostSource, StatvfsSource};
use spacemon::config::Config;
use spacemon::interface::http::create_router;
use spacemon::LocalMonitor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("spacemon={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spacemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    let live_config = match &config.config_file {
        Some(path) => {
            info!("Alert settings reloaded from {} every cycle", path.display());
            LiveConfig::with_file(config.alert_settings(), path)
        }
        None => LiveConfig::new(config.alert_settings()),
    };

    let monitor = LocalMonitor::new(
        Arc::new(live_config),
        Arc::new(StatvfsSource::new()),
        Arc::new(ProcessHostSource::new()),
        config.despam_interval(),
    );
    let reader = monitor.state_reader();
    let driver = monitor.start_monitoring(config.poll_interval());

    info!(
        "✓ Monitoring {} every {}s",
        config.data_directory.display(),
        config.poll_interval().as_secs()
    );

    // Create HTTP server
    let app = create_router(reader);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ spacemon listening on {}", addr);
    info!("  → State: http://localhost:{}/api/state", config.port);

    tokio::select! {
        served = axum::serve(listener, app).into_future() => served?,
        _ = driver => warn!("Monitor loop exited, shutting down"),
    }

    Ok(())
}
