use thiserror::Error;

const BODY_SNIPPET_CHARS: usize = 200;

/// Why a listing fetch failed. The fetcher collapses all of these into the
/// single `error` state; the variants only matter for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Client configuration error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Listing API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(status: u16, body: &str) -> Self {
        FetchError::Status {
            status,
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}
