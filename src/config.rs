// src/config.rs

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the listing API; `properties` is resolved against it.
    pub base_url: String,
    /// Per-request timeout. A timed out fetch shows as the error state.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Live listing views kept in memory before the stalest is evicted.
    pub capacity: usize,
    /// How long a page render waits for a fresh fetch before falling back to
    /// the loading placeholder.
    pub render_wait: Duration,
    /// Delay between htmx polls while a view is pending.
    pub poll_interval_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            capacity: 512,
            render_wait: Duration::from_millis(750),
            poll_interval_ms: 500,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub api: ApiConfig,
    pub views: ViewConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let api_defaults = ApiConfig::default();

        Ok(Self {
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse()
                .context("BIND_ADDR must be a socket address like 127.0.0.1:3000")?,
            max_workers: 8,
            api: ApiConfig {
                base_url: env::var("API_BASE_URL").unwrap_or(api_defaults.base_url),
                timeout: match env::var("API_TIMEOUT_SECS") {
                    Ok(secs) => Duration::from_secs(
                        secs.parse()
                            .context("API_TIMEOUT_SECS must be a whole number of seconds")?,
                    ),
                    Err(_) => api_defaults.timeout,
                },
            },
            views: ViewConfig::default(),
        })
    }
}
