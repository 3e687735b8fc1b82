use crate::api::Amenity;
use crate::filters::{FilterState, ListingStatus, PropertyType, SortKey};
use crate::templates::components::{view_path, RESULTS_ID};
use crate::views::ViewSnapshot;
use maud::{html, Markup};
use std::collections::BTreeMap;

const ROOM_CHOICES: [u32; 5] = [1, 2, 3, 4, 5];

pub const AMENITIES_ID: &str = "amenity-options";

/// Amenities to offer as checkboxes: the ones on screen plus the selected ones.
pub fn amenity_options(snap: &ViewSnapshot) -> Vec<Amenity> {
    let mut by_id: BTreeMap<u64, Amenity> = BTreeMap::new();

    if let Some(result) = snap.status.result() {
        for amenity in result.properties.iter().flat_map(|p| &p.amenities) {
            by_id.entry(amenity.id).or_insert_with(|| amenity.clone());
        }
    }
    for id in &snap.filter.amenities {
        by_id.entry(*id).or_insert_with(|| Amenity {
            id: *id,
            name: format!("Amenity #{id}"),
            icon: None,
        });
    }

    let mut out: Vec<Amenity> = by_id.into_values().collect();
    out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    out
}

/// The filter sidebar. With htmx every change posts a patch for this view;
/// without it the form degrades to a plain GET of `/properties`.
pub fn filter_form(snap: &ViewSnapshot, amenities: &[Amenity]) -> Markup {
    let f = &snap.filter;

    html! {
        form
            id="filters"
            class="filters"
            method="get"
            action="/properties"
            hx-post=(view_path("/properties/filter", &snap.id))
            hx-target=(format!("#{RESULTS_ID}"))
            hx-swap="outerHTML"
            hx-trigger="change, input delay:400ms from:input[type=number]"
        {
            label for="type" { "Property type" }
            select id="type" name="type" class="capitalize" {
                option value="" selected[f.property_type.is_none()] { "Any" }
                @for t in PropertyType::ALL {
                    option value=(t.as_str()) selected[f.property_type == Some(*t)] { (t.as_str()) }
                }
            }

            label for="status" { "Status" }
            select id="status" name="status" class="capitalize" {
                option value="" selected[f.status.is_none()] { "Any" }
                @for s in ListingStatus::ALL {
                    option value=(s.as_str()) selected[f.status == Some(*s)] { "For " (s.as_str()) }
                }
            }

            label { "Price" }
            (number_input("min_price", "Min", f.price.min))
            (number_input("max_price", "Max", f.price.max))

            label for="bedrooms" { "Bedrooms" }
            (room_select("bedrooms", f.bedrooms))

            label for="bathrooms" { "Bathrooms" }
            (room_select("bathrooms", f.bathrooms))

            label { "Area (m²)" }
            (number_input("min_area", "Min", f.area.min))
            (number_input("max_area", "Max", f.area.max))

            label for="location_id" { "Location" }
            (number_input("location_id", "Location id", f.location))

            (amenity_fieldset(f, amenities, false))

            label for="sort" { "Sort by" }
            (sort_select(f))

            // lets a plain GET submit reuse this view
            input type="hidden" name="view" value=(snap.id.as_str());

            noscript {
                button type="submit" { "Search" }
            }
        }
    }
}

/// The amenity checkboxes. With `oob` set the fieldset replaces the one
/// already on the page when it rides along with a results fragment.
pub fn amenity_fieldset(f: &FilterState, amenities: &[Amenity], oob: bool) -> Markup {
    html! {
        fieldset id=(AMENITIES_ID) hx-swap-oob=[oob.then_some("true")] {
            @if !amenities.is_empty() {
                legend { "Amenities" }
                // keeps the key present so unchecking everything clears the set
                input type="hidden" name="amenities" value="";
                @for amenity in amenities {
                    label {
                        input
                            type="checkbox"
                            name="amenities"
                            value=(amenity.id)
                            checked[f.amenities.contains(&amenity.id)];
                        " " (amenity.name)
                    }
                }
            }
        }
    }
}

fn number_input<T: maud::Render>(name: &str, placeholder: &str, value: Option<T>) -> Markup {
    html! {
        input type="number" min="0" id=(name) name=(name) placeholder=(placeholder) value=[value];
    }
}

fn room_select(name: &str, current: Option<u32>) -> Markup {
    html! {
        select id=(name) name=(name) {
            option value="" selected[current.is_none()] { "Any" }
            @for n in ROOM_CHOICES {
                option value=(n) selected[current == Some(n)] { (n) }
            }
        }
    }
}

fn sort_select(f: &FilterState) -> Markup {
    html! {
        select id="sort" name="sort" {
            option value="" selected[f.sort.is_none()] { "Relevance" }
            @for key in SortKey::ALL {
                option value=(key.as_str()) selected[f.sort == Some(*key)] { (key.label()) }
            }
        }
    }
}
