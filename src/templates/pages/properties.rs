use crate::fetcher::FetchStatus;
use crate::templates::components::{
    amenity_fieldset, amenity_options, filter_form, results_panel,
};
use crate::templates::desktop_layout;
use crate::views::ViewSnapshot;
use maud::{html, Markup};

pub fn properties_page(snap: &ViewSnapshot, poll_interval_ms: u64) -> Markup {
    let amenities = amenity_options(snap);

    desktop_layout(
        "Properties",
        html! {
            main class="container" {
                h1 { "Browse properties" }
                div class="listing" {
                    aside {
                        (filter_form(snap, &amenities))
                    }
                    section {
                        (results_panel(snap, poll_interval_ms))
                    }
                }
            }
        },
    )
}

/// What htmx swaps in after a poll, filter edit or retry. Once results are
/// in, the amenity choices are re-rendered out of band so they follow them.
pub fn results_fragment(snap: &ViewSnapshot, poll_interval_ms: u64) -> Markup {
    html! {
        (results_panel(snap, poll_interval_ms))
        @if let FetchStatus::Success(_) = &snap.status {
            (amenity_fieldset(&snap.filter, &amenity_options(snap), true))
        }
    }
}
