use astra::Response;
use thiserror::Error;

use crate::filters::FilterError;

/// Errors originating from the server logic
/// (routing, bad input, expired views, etc.).
///
/// Listing fetch failures are not here: they never leave the fetcher and are
/// rendered as the `error` state of a listing view.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl From<FilterError> for ServerError {
    fn from(err: FilterError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}
