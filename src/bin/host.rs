//! Rank-check service host.
//!
//! Usage: `seorank-host [CONFIG_PATH]`. Without a path the default config
//! location is used when it exists, otherwise built-in defaults.
//!
//! All tracing output goes to stderr. Set `RUST_LOG` to override the
//! default `info` filter.

use std::path::PathBuf;
use std::sync::Arc;

use seorank::{AppConfig, RankServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    config.validate()?;

    let registry = config.registry()?;
    tracing::info!(
        engines = registry.len(),
        cache_ttl_seconds = config.search.cache_ttl_seconds,
        "seorank-host starting"
    );

    let checker = seorank_search::rank_checker(&config.search, registry)?;
    let server = RankServer::start(Arc::new(checker), &config.server)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "seorank-host failed to start");
            anyhow::anyhow!("seorank-host failed: {e}")
        })?;

    tokio::signal::ctrl_c().await?;
    server.shutdown();

    tracing::info!("seorank-host shut down cleanly");
    Ok(())
}
