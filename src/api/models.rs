use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::api::FetchError;

// property
//  ├── id, title, description, price, type, status
//  ├── bedrooms, bathrooms, area, address
//  ├── featured_image, images[]
//  ├── amenities[]  (id, name, icon)
//  ├── is_favorite, created_at, updated_at
//  ├── location
//  │    ├── latitude, longitude
//  │    └── city
//  │         ├── id, name
//  │         └── state (id, name)
//  └── agent (id, name, email, phone, rating, specialization)

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    #[serde(deserialize_with = "flex::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "flex::text")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_number")]
    pub price: Option<f64>,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_count")]
    pub bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_number")]
    pub area: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "featured_image_url")]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "flex::list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "flex::list")]
    pub amenities: Vec<Amenity>,
    #[serde(default, deserialize_with = "flex::flag")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "flex::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flex::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub agent: Option<Agent>,
}

impl Property {
    /// "City, State" from whatever part of the hierarchy is present.
    pub fn place_label(&self) -> Option<String> {
        let location = self.location.as_ref()?;
        match (location.city_name(), location.state_name()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(state)) => Some(state.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Amenity {
    #[serde(deserialize_with = "flex::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "flex::text")]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "flex::opt_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_number")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<City>,
}

impl Location {
    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref()?.name.as_deref()
    }

    pub fn state_name(&self) -> Option<&str> {
        self.city.as_ref()?.state.as_ref()?.name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<State>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct State {
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Agent {
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_number")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "flex::opt_count")]
    pub current_page: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_count")]
    pub last_page: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_count")]
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub total: Option<u64>,
}

impl Pagination {
    fn from_object(map: &Map<String, Value>) -> Option<Self> {
        let source = match map.get("meta") {
            Some(Value::Object(meta)) => meta,
            _ => map,
        };
        let pagination: Pagination = serde_json::from_value(Value::Object(source.clone())).ok()?;
        (pagination != Pagination::default()).then_some(pagination)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page.map(|p| p > 1).unwrap_or(false)
    }

    pub fn has_next(&self) -> bool {
        match (self.current_page, self.last_page) {
            (Some(current), Some(last)) => current < last,
            _ => false,
        }
    }
}

/// One page of listing results, as produced by a single fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingResult {
    pub properties: Vec<Property>,
    pub pagination: Option<Pagination>,
}

impl ListingResult {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn from_body(body: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Self::from_value(value)
    }

    /// Accepts a bare array, `{ "data": [...] }`, or a paginator nested under
    /// `data` (`{ "data": { "data": [...], "current_page": .. } }`).
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Array(items) => Ok(Self {
                properties: decode_items(items)?,
                pagination: None,
            }),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Ok(Self {
                    properties: decode_items(items)?,
                    pagination: Pagination::from_object(&map),
                }),
                Some(inner @ Value::Object(_)) => Self::from_value(inner),
                Some(Value::Null) => Ok(Self {
                    properties: Vec::new(),
                    pagination: Pagination::from_object(&map),
                }),
                Some(other) => Err(FetchError::Decode(format!(
                    "`data` is neither a list nor an object: {other}"
                ))),
                None => Err(FetchError::Decode("response has no `data` key".into())),
            },
            other => Err(FetchError::Decode(format!(
                "expected a list or an object, got {other}"
            ))),
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, FetchError> {
    serde_json::from_value(Value::Array(items)).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Lenient field decoders. The backend sends decimals as strings,
/// ids as either, and `null` where a list is empty.
mod flex {
    use super::*;
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(u64),
        Float(f64),
        Bool(bool),
        Str(String),
    }

    fn scalar_to_f64<E: serde::de::Error>(s: Scalar) -> Result<Option<f64>, E> {
        match s {
            Scalar::Int(n) => Ok(Some(n as f64)),
            Scalar::Float(n) => Ok(Some(n)),
            Scalar::Bool(_) => Err(E::custom("expected a number, got a boolean")),
            Scalar::Str(s) if s.trim().is_empty() => Ok(None),
            Scalar::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("not a number: {s:?}"))),
        }
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            Some(s) => scalar_to_f64(s),
            None => Ok(None),
        }
    }

    pub fn opt_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        match opt_number(d)? {
            Some(n) if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
            Some(n) => Err(D::Error::custom(format!("not a count: {n}"))),
            None => Ok(None),
        }
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => Ok(Some(n)),
            Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(Scalar::Str(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("not an id: {s:?}"))),
            Some(_) => Err(D::Error::custom("expected an integer id")),
            None => Ok(None),
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        opt_id(d)?.ok_or_else(|| D::Error::custom("missing id"))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }

    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Bool(b)) => Ok(b),
            Some(Scalar::Int(n)) => Ok(n != 0),
            Some(Scalar::Str(s)) => Ok(matches!(s.as_str(), "1" | "true")),
            Some(Scalar::Float(n)) => Ok(n != 0.0),
            None => Ok(false),
        }
    }

    /// RFC 3339, or the `YYYY-MM-DD HH:MM:SS` form read as UTC.
    /// Unparseable timestamps become `None` rather than failing the page.
    pub fn opt_timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc()))
    }
}
