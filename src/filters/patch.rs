// src/filters/patch.rs

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::filters::state::{FilterState, ListingStatus, PropertyType, SortKey};
use crate::filters::FilterError;

/// What a patch does to a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, FieldUpdate::Keep)
    }

    fn merge_into(self, slot: &mut Option<T>) {
        match self {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(v) => *slot = Some(v),
            FieldUpdate::Clear => *slot = None,
        }
    }
}

/// A typed partial update of a [`FilterState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub property_type: FieldUpdate<PropertyType>,
    pub status: FieldUpdate<ListingStatus>,
    pub min_price: FieldUpdate<u64>,
    pub max_price: FieldUpdate<u64>,
    pub bedrooms: FieldUpdate<u32>,
    pub bathrooms: FieldUpdate<u32>,
    pub min_area: FieldUpdate<u64>,
    pub max_area: FieldUpdate<u64>,
    /// Replaces the whole amenity set. `Clear` empties it.
    pub amenities: FieldUpdate<BTreeSet<u64>>,
    pub location: FieldUpdate<u64>,
    pub sort: FieldUpdate<SortKey>,
    pub page: FieldUpdate<u32>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_type(mut self, v: PropertyType) -> Self {
        self.property_type = FieldUpdate::Set(v);
        self
    }

    pub fn status(mut self, v: ListingStatus) -> Self {
        self.status = FieldUpdate::Set(v);
        self
    }

    pub fn min_price(mut self, v: u64) -> Self {
        self.min_price = FieldUpdate::Set(v);
        self
    }

    pub fn max_price(mut self, v: u64) -> Self {
        self.max_price = FieldUpdate::Set(v);
        self
    }

    pub fn bedrooms(mut self, v: u32) -> Self {
        self.bedrooms = FieldUpdate::Set(v);
        self
    }

    pub fn bathrooms(mut self, v: u32) -> Self {
        self.bathrooms = FieldUpdate::Set(v);
        self
    }

    pub fn amenities(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.amenities = FieldUpdate::Set(ids.into_iter().collect());
        self
    }

    pub fn sort(mut self, v: SortKey) -> Self {
        self.sort = FieldUpdate::Set(v);
        self
    }

    pub fn page(mut self, v: u32) -> Self {
        self.page = FieldUpdate::Set(v);
        self
    }

    /// True when the patch touches any criterion besides the page number.
    fn changes_criteria(&self) -> bool {
        !(self.property_type.is_keep()
            && self.status.is_keep()
            && self.min_price.is_keep()
            && self.max_price.is_keep()
            && self.bedrooms.is_keep()
            && self.bathrooms.is_keep()
            && self.min_area.is_keep()
            && self.max_area.is_keep()
            && self.amenities.is_keep()
            && self.location.is_keep()
            && self.sort.is_keep())
    }

    /// Parse a patch from urlencoded form pairs.
    ///
    /// A key that is absent keeps the field, a key with an empty value clears
    /// it, anything else sets it. `amenities` may repeat (and may carry a
    /// comma-joined list); whenever the key appears at all the set is replaced
    /// by the non-empty values, so an empty hidden input clears it.
    pub fn from_form<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut patch = FilterPatch::default();
        let mut amenities: Option<BTreeSet<u64>> = None;

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "type" => patch.property_type = field(value, "type")?,
                "status" => patch.status = field(value, "status")?,
                "min_price" => patch.min_price = field(value, "min_price")?,
                "max_price" => patch.max_price = field(value, "max_price")?,
                "bedrooms" => patch.bedrooms = field(value, "bedrooms")?,
                "bathrooms" => patch.bathrooms = field(value, "bathrooms")?,
                "min_area" => patch.min_area = field(value, "min_area")?,
                "max_area" => patch.max_area = field(value, "max_area")?,
                "location_id" => patch.location = field(value, "location_id")?,
                "sort" => patch.sort = field(value, "sort")?,
                "page" => patch.page = field(value, "page")?,
                "amenities" | "amenities[]" => {
                    let set = amenities.get_or_insert_with(BTreeSet::new);
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        set.insert(parse_value(part, "amenities")?);
                    }
                }
                // htmx and the page add their own keys (view id etc.)
                _ => {}
            }
        }

        if let Some(set) = amenities {
            patch.amenities = if set.is_empty() {
                FieldUpdate::Clear
            } else {
                FieldUpdate::Set(set)
            };
        }

        Ok(patch)
    }
}

fn field<T: FromStr>(value: &str, name: &'static str) -> Result<FieldUpdate<T>, FilterError> {
    if value.is_empty() {
        return Ok(FieldUpdate::Clear);
    }
    parse_value(value, name).map(FieldUpdate::Set)
}

pub(crate) fn parse_value<T: FromStr>(value: &str, name: &'static str) -> Result<T, FilterError> {
    value.parse().map_err(|_| FilterError::InvalidValue {
        field: name,
        value: value.to_string(),
    })
}

impl FilterState {
    /// Merge `patch` into a copy of this state and return the copy.
    ///
    /// Changing any criterion without also choosing a page resets the page.
    pub fn apply(&self, patch: FilterPatch) -> FilterState {
        let mut next = self.clone();
        let reset_page = patch.changes_criteria() && patch.page.is_keep();

        patch.property_type.merge_into(&mut next.property_type);
        patch.status.merge_into(&mut next.status);
        patch.min_price.merge_into(&mut next.price.min);
        patch.max_price.merge_into(&mut next.price.max);
        patch.bedrooms.merge_into(&mut next.bedrooms);
        patch.bathrooms.merge_into(&mut next.bathrooms);
        patch.min_area.merge_into(&mut next.area.min);
        patch.max_area.merge_into(&mut next.area.max);
        patch.location.merge_into(&mut next.location);
        patch.sort.merge_into(&mut next.sort);
        patch.page.merge_into(&mut next.page);

        match patch.amenities {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(set) => next.amenities = set,
            FieldUpdate::Clear => next.amenities.clear(),
        }

        if reset_page {
            next.page = None;
        }

        next
    }
}
