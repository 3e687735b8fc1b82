mod client;
mod fetch_error;
mod models;

pub use client::{HttpListingClient, ListingSource};
pub use fetch_error::FetchError;
pub use models::{Amenity, ListingResult, Pagination, Property};
