mod listing_fetcher;
mod status;

pub use listing_fetcher::{Dispatch, ListingFetcher};
pub use status::{FetchStats, FetchStatus};
