mod manager;
mod patch;
mod query;
mod state;

use thiserror::Error;

pub use manager::FilterManager;
pub use patch::FilterPatch;
pub use query::{from_query_str, listing_url, to_query_pairs};
pub use state::{FilterState, ListingStatus, PropertyType, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid value {value:?} for filter `{field}`")]
    InvalidValue { field: &'static str, value: String },
}
