// src/filters/state.rs

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::filters::FilterError;

/// Generates the string mapping for a filter enum. The wire strings are the
/// ones the listing API expects and the ones the URL carries.
macro_rules! wire_enum {
    ($name:ident, $field:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(FilterError::InvalidValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Condo,
    Townhouse,
    Land,
    Commercial,
}

wire_enum!(PropertyType, "type", {
    Apartment => "apartment",
    House => "house",
    Villa => "villa",
    Condo => "condo",
    Townhouse => "townhouse",
    Land => "land",
    Commercial => "commercial",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListingStatus {
    Sale,
    Rent,
    Sold,
}

wire_enum!(ListingStatus, "status", {
    Sale => "sale",
    Rent => "rent",
    Sold => "sold",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SortKey {
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
}

wire_enum!(SortKey, "sort", {
    Newest => "newest",
    Oldest => "oldest",
    PriceAsc => "price_asc",
    PriceDesc => "price_desc",
    AreaAsc => "area_asc",
    AreaDesc => "area_desc",
});

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest first",
            SortKey::Oldest => "Oldest first",
            SortKey::PriceAsc => "Price: low to high",
            SortKey::PriceDesc => "Price: high to low",
            SortKey::AreaAsc => "Area: small to large",
            SortKey::AreaDesc => "Area: large to small",
        }
    }
}

/// Inclusive bounds as entered by the user. `min > max` is kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// The active search criteria of one listing view.
///
/// Values are never edited in place: an edit produces a new `FilterState`
/// (see [`FilterState::apply`]) and equality is structural, which is what
/// the fetcher keys its requests on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub price: Range,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Range,
    /// Amenity ids. A set, so order and duplicates never change the key.
    pub amenities: BTreeSet<u64>,
    pub location: Option<u64>,
    pub sort: Option<SortKey>,
    pub page: Option<u32>,
}

impl FilterState {
    /// Ranges where both bounds are set and min exceeds max.
    /// They are still sent to the backend untouched.
    pub fn inverted_ranges(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let (Some(min), Some(max)) = (self.price.min, self.price.max) {
            if min > max {
                out.push("price");
            }
        }
        if let (Some(min), Some(max)) = (self.area.min, self.area.max) {
            if min > max {
                out.push("area");
            }
        }
        out
    }
}
