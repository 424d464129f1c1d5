//! Server configuration for the Zero Shift site.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The CMS credential is only ever supplied through the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default CMS content endpoint (the hosted Builder content API).
pub const DEFAULT_CMS_BASE_URL: &str = "https://api.builder.io/v2/content";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Base URL of the CMS content API.
    pub cms_base_url: String,
    /// CMS API credential. Empty when unset — upstream then rejects the
    /// calls and the static fallback carries the site.
    pub cms_api_key: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Directory holding the built SPA bundle.
    pub static_dir: PathBuf,
    /// Seconds between content cache eviction sweeps.
    pub cache_sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (hosting convention, binds to `0.0.0.0`)
    /// - `ZEROSHIFT_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `CMS_BASE_URL` — content API base URL (default: hosted Builder endpoint)
    /// - `CMS_API_KEY` — content API credential (default: empty)
    /// - `ZEROSHIFT_LOG_LEVEL` — log filter (default: `info`)
    /// - `ZEROSHIFT_STATIC_DIR` — SPA bundle directory (default: `./dist`)
    /// - `ZEROSHIFT_CACHE_SWEEP_INTERVAL` — seconds between cache sweeps (default: `300`)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: ZEROSHIFT_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Ok(addr) = std::env::var("ZEROSHIFT_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let cms_base_url = std::env::var("CMS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_CMS_BASE_URL.to_owned());

        let cms_api_key = std::env::var("CMS_API_KEY").unwrap_or_default();

        let log_level = std::env::var("ZEROSHIFT_LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_owned());

        let static_dir = std::env::var("ZEROSHIFT_STATIC_DIR")
            .map_or_else(|_| PathBuf::from("./dist"), PathBuf::from);

        let cache_sweep_interval_secs = std::env::var("ZEROSHIFT_CACHE_SWEEP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        Self {
            bind_addr,
            cms_base_url,
            cms_api_key,
            log_level,
            static_dir,
            cache_sweep_interval_secs,
        }
    }
}
