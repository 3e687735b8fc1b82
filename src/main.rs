use crate::api::HttpListingClient;
use crate::app::AppState;
use crate::config::AppConfig;
use crate::router::handle;
use anyhow::{Context, Result};
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod config;
mod errors;
mod fetcher;
mod filters;
mod responses;
mod router;
mod templates;
mod views;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_browser=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::from_env().context("Failed to load configuration")?;

    let client = HttpListingClient::new(&cfg.api).context("Failed to build listing API client")?;
    info!(endpoint = %client.endpoint(), "listing API configured");

    let state = AppState::new(Arc::new(client), cfg.views.clone());

    info!("Starting server at http://{}", cfg.bind_addr);
    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        return Err(e).context("server failed");
    }

    info!("Server shut down cleanly.");
    Ok(())
}
