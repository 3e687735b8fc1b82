use crate::views::ViewId;
use maud::{html, Markup};

pub mod error;
pub mod filter_form;
pub mod property_card;
pub mod results;

pub use error::html_error_response;
pub use filter_form::{amenity_fieldset, amenity_options, filter_form};
pub use property_card::property_card;
pub use results::{results_panel, EMPTY_MESSAGE, ERROR_MESSAGE, RESULTS_ID};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// `base?view=ID`, the address of a view-scoped endpoint.
pub fn view_path(base: &str, id: &ViewId) -> String {
    format!("{base}?view={id}")
}
