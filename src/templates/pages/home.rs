// templates/pages/home.rs

use crate::filters::{listing_url, FilterPatch, FilterState, ListingStatus, PropertyType};
use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    let for_sale = FilterState::default().apply(FilterPatch::new().status(ListingStatus::Sale));
    let for_rent = FilterState::default().apply(FilterPatch::new().status(ListingStatus::Rent));
    let houses = FilterState::default().apply(
        FilterPatch::new()
            .property_type(PropertyType::House)
            .status(ListingStatus::Sale),
    );
    let apartments = FilterState::default().apply(
        FilterPatch::new()
            .property_type(PropertyType::Apartment)
            .status(ListingStatus::Rent),
    );

    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Find your next home" }

                (card("Browse listings", html! {
                    p { "Search homes, apartments and land by price, size and amenities." }
                    ul {
                        li { a href=(listing_url(&for_sale)) { "Homes for sale" } }
                        li { a href=(listing_url(&for_rent)) { "Homes for rent" } }
                        li { a href=(listing_url(&houses)) { "Houses for sale" } }
                        li { a href=(listing_url(&apartments)) { "Apartments for rent" } }
                        li { a href="/properties" { "All properties" } }
                    }
                }))
            }
        },
    )
}
