mod listing_view;
mod registry;
mod token;

pub use listing_view::{ListingView, ViewSnapshot};
pub use registry::{lock_view, SharedView, ViewRegistry};
pub use token::ViewId;
