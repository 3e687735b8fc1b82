// src/filters/query.rs

use std::collections::BTreeSet;

use crate::filters::patch::parse_value;
use crate::filters::state::{FilterState, Range};
use crate::filters::FilterError;

/// Translate a filter into listing API query parameters.
///
/// Unset fields are omitted. Each amenity id appears exactly once, as its own
/// `amenities` pair, in ascending id order.
pub fn to_query_pairs(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if let Some(t) = state.property_type {
        pairs.push(("type", t.as_str().to_string()));
    }
    if let Some(s) = state.status {
        pairs.push(("status", s.as_str().to_string()));
    }
    push_range(&mut pairs, "min_price", "max_price", &state.price);
    if let Some(n) = state.bedrooms {
        pairs.push(("bedrooms", n.to_string()));
    }
    if let Some(n) = state.bathrooms {
        pairs.push(("bathrooms", n.to_string()));
    }
    push_range(&mut pairs, "min_area", "max_area", &state.area);
    for id in &state.amenities {
        pairs.push(("amenities", id.to_string()));
    }
    if let Some(id) = state.location {
        pairs.push(("location_id", id.to_string()));
    }
    if let Some(sort) = state.sort {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    if let Some(page) = state.page {
        pairs.push(("page", page.to_string()));
    }

    pairs
}

fn push_range(
    pairs: &mut Vec<(&'static str, String)>,
    min: &'static str,
    max: &'static str,
    r: &Range,
) {
    if let Some(v) = r.min {
        pairs.push((min, v.to_string()));
    }
    if let Some(v) = r.max {
        pairs.push((max, v.to_string()));
    }
}

/// Urlencoded form of [`to_query_pairs`], without the leading `?`.
pub fn to_query_string(state: &FilterState) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query_pairs(state))
        .finish()
}

/// The browser-facing URL of a listing with this filter.
pub fn listing_url(state: &FilterState) -> String {
    let query = to_query_string(state);
    if query.is_empty() {
        "/properties".to_string()
    } else {
        format!("/properties?{query}")
    }
}

/// Rebuild a filter from URL query pairs (page mount).
///
/// Empty values are treated as unset, unknown keys are ignored, and
/// malformed values are an error.
pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<FilterState, FilterError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut state = FilterState::default();
    let mut amenities = BTreeSet::new();

    for (key, value) in pairs {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "type" => state.property_type = Some(value.parse()?),
            "status" => state.status = Some(value.parse()?),
            "min_price" => state.price.min = Some(parse_value(value, "min_price")?),
            "max_price" => state.price.max = Some(parse_value(value, "max_price")?),
            "bedrooms" => state.bedrooms = Some(parse_value(value, "bedrooms")?),
            "bathrooms" => state.bathrooms = Some(parse_value(value, "bathrooms")?),
            "min_area" => state.area.min = Some(parse_value(value, "min_area")?),
            "max_area" => state.area.max = Some(parse_value(value, "max_area")?),
            "location_id" => state.location = Some(parse_value(value, "location_id")?),
            "sort" => state.sort = Some(value.parse()?),
            "page" => state.page = Some(parse_value(value, "page")?),
            "amenities" | "amenities[]" => {
                for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                    amenities.insert(parse_value(part, "amenities")?);
                }
            }
            _ => {}
        }
    }

    state.amenities = amenities;
    Ok(state)
}

/// Parse a raw (still urlencoded) query string.
pub fn from_query_str(query: &str) -> Result<FilterState, FilterError> {
    from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
}
