// src/api/client.rs
use crate::api::{FetchError, ListingResult};
use crate::config::ApiConfig;
use crate::filters::{to_query_pairs, FilterState};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Instant;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("property_browser/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a listing query. The fetcher only talks to this.
pub trait ListingSource: Send + Sync {
    fn fetch_listings(&self, filter: &FilterState) -> Result<ListingResult, FetchError>;
}

/// The listing API over HTTP.
pub struct HttpListingClient {
    client: Client,
    endpoint: Url,
}

impl HttpListingClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, FetchError> {
        let mut base = Url::parse(&cfg.base_url)
            .map_err(|e| FetchError::Config(format!("bad API base URL {:?}: {e}", cfg.base_url)))?;

        // `join` replaces the last segment unless the path ends in a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base
            .join("properties")
            .map_err(|e| FetchError::Config(e.to_string()))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ListingSource for HttpListingClient {
    fn fetch_listings(&self, filter: &FilterState) -> Result<ListingResult, FetchError> {
        let start = Instant::now();

        let resp = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .query(&to_query_pairs(filter))
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), &text));
        }

        let result = ListingResult::from_body(&text)?;

        debug!(
            count = result.properties.len(),
            elapsed = ?start.elapsed(),
            "listing API answered"
        );

        Ok(result)
    }
}
