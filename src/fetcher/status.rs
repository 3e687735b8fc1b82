use std::sync::Arc;

use crate::api::ListingResult;

/// What the rendering layer is allowed to see of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    /// No resolved result yet for the current key.
    Pending,
    Success(Arc<ListingResult>),
    /// The message is for logs and debugging, not for end users.
    Error(String),
}

impl FetchStatus {
    pub fn name(&self) -> &'static str {
        match self {
            FetchStatus::Pending => "pending",
            FetchStatus::Success(_) => "success",
            FetchStatus::Error(_) => "error",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchStatus::Pending)
    }

    pub fn result(&self) -> Option<&ListingResult> {
        match self {
            FetchStatus::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// Running totals, mostly for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub dispatched: u64,
    pub applied: u64,
    /// Outcomes that arrived for a superseded generation.
    pub discarded: u64,
    /// Requests skipped because they were superseded before starting.
    pub abandoned: u64,
}
