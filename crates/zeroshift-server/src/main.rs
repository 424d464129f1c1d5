//! Zero Shift site server entry point.
//!
//! Bootstraps the CMS content service and submission dispatcher, then starts
//! the Axum HTTP server with graceful shutdown. A background janitor sweeps
//! expired content cache entries and is cancelled on shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info};

use zeroshift_content::cache::ContentCache;
use zeroshift_content::client::{CmsClient, CmsConfig};
use zeroshift_content::service::ContentService;

use zeroshift_server::config::ServerConfig;
use zeroshift_server::mailer::LogMailer;
use zeroshift_server::routes;
use zeroshift_server::state::AppState;

/// Cache entries older than this are dropped by the janitor. Well past the
/// staleness window, so stale-but-servable entries survive sweeps.
const CACHE_RETENTION: Duration = Duration::from_secs(30 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(cms = %config.cms_base_url, "Zero Shift site server starting");

    let state = build_app_state(&config);

    // Shutdown signal channel.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn the cache eviction janitor.
    let janitor_handle = {
        let cache = Arc::clone(state.content.cache());
        let mut rx = shutdown_rx.clone();
        let interval_secs = config.cache_sweep_interval_secs;
        tokio::spawn(async move {
            cache_janitor(cache, &mut rx, interval_secs).await;
        })
    };

    let app = routes::router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Zero Shift site server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("server error")?;

    // Wait for the janitor to finish (with timeout).
    let _ = tokio::time::timeout(Duration::from_secs(5), janitor_handle).await;

    info!("Zero Shift site server stopped");
    Ok(())
}

/// Build the shared application state.
fn build_app_state(config: &ServerConfig) -> Arc<AppState> {
    let client = CmsClient::new(CmsConfig {
        base_url: config.cms_base_url.clone(),
        api_key: config.cms_api_key.clone(),
    });
    let content = ContentService::with_cache(client, ContentCache::default());

    Arc::new(AppState {
        content,
        mailer: Arc::new(LogMailer),
        static_dir: config.static_dir.clone(),
    })
}

/// Background worker that periodically drops expired content cache entries.
async fn cache_janitor(
    cache: Arc<ContentCache>,
    shutdown: &mut watch::Receiver<bool>,
    interval_secs: u64,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    info!(interval_secs, "content cache janitor started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let evicted = cache.evict_expired(CACHE_RETENTION).await;
                if evicted > 0 {
                    debug!(evicted, "expired content cache entries dropped");
                }
            }
            _ = shutdown.changed() => {
                info!("content cache janitor shutting down");
                return;
            }
        }
    }
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
