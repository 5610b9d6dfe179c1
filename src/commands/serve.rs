//! `plantscan serve` - run the HTTP server.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use plantscan::config::Config;
use plantscan::http::{self, AppState};
use plantscan::store::RecordStore;
use plantscan::uploads::UploadStorage;

use crate::ServeArgs;

/// Resolve configuration, connect the store and serve until Ctrl+C.
///
/// A store that cannot be reached is logged and replaced by one that fails
/// each request, so the server still comes up.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    if let Some(port) = args.metrics_port {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!(%addr, "Metrics exporter listening");
    }

    let store = RecordStore::connect(&config.database_url);
    let state = AppState::new(store)
        .with_uploads(UploadStorage::from_dir(config.upload_dir.as_deref()));

    http::serve(&config, state).await
}

fn resolve_config(args: &ServeArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = &args.host {
        config.host.clone_from(host);
    }
    if let Some(url) = &args.database_url {
        config.database_url.clone_from(url);
    }
    if let Some(dir) = &args.public_dir {
        config.public_dir.clone_from(dir);
    }
    if let Some(dir) = &args.upload_dir {
        config.upload_dir = Some(dir.clone());
    }
    if let Some(limit) = args.max_upload_bytes {
        config.max_upload_bytes = limit;
    }

    Ok(config)
}
