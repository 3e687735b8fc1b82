use crate::api::Property;
use maud::{html, Markup};

/// "$1,250,000" style price. Cents are dropped.
pub fn format_price(price: f64) -> String {
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}

pub fn property_card(property: &Property) -> Markup {
    html! {
        article class="property-card" data-property-id=(property.id) {
            @if let Some(src) = &property.featured_image {
                img src=(src) alt=(property.title) loading="lazy";
            }
            div class="body" {
                h3 {
                    (property.title)
                    @if property.is_favorite {
                        " " span class="favorite" title="Saved" { "♥" }
                    }
                }
                @match property.price {
                    Some(price) => p class="price" { (format_price(price)) },
                    None => p class="price" { "Price on request" },
                }
                p class="meta" {
                    @if let Some(beds) = property.bedrooms { (beds) " bd · " }
                    @if let Some(baths) = property.bathrooms { (baths) " ba · " }
                    @if let Some(area) = property.area { (area.round() as u64) " m²" }
                }
                @if let Some(address) = &property.address {
                    p class="address" { (address) }
                }
                @if let Some(place) = property.place_label() {
                    p class="place" { (place) }
                }
                @if !property.amenities.is_empty() {
                    div class="chips" {
                        @for amenity in &property.amenities {
                            span { (amenity.name) }
                        }
                    }
                }
                @if let Some(name) = property.agent.as_ref().and_then(|a| a.name.as_deref()) {
                    p class="agent" { "Agent: " (name) }
                }
            }
        }
    }
}
