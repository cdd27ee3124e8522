//! Request parameters
//!
//! [`Params`] is the per-call parameter mapping handed to every endpoint. It is
//! never mutated by the client: routing derives new mappings from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key carrying the entity identifier used for path scoping
pub const GUID_KEY: &str = "guid";

/// Key carrying the authentication token
pub const APIKEY_KEY: &str = "apikey";

/// Entity types accepted by the simple search `type` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A business listing
    #[serde(rename = "business")]
    Business,
    /// Point of interest
    #[serde(rename = "POI")]
    Poi,
    /// Street intersection
    #[serde(rename = "intersection")]
    Intersection,
    /// Neighborhood
    #[serde(rename = "neighborhood")]
    Neighborhood,
    /// City
    #[serde(rename = "city")]
    City,
    /// Entity created by a user
    #[serde(rename = "user-entity")]
    UserEntity,
}

impl EntityType {
    /// Wire name of the entity type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Poi => "POI",
            Self::Intersection => "intersection",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::UserEntity => "user-entity",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter mapping for a single request
///
/// Keys are kept sorted, so the rendered query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Latitude of the coordinate set
    #[must_use]
    pub fn lat(self, lat: f64) -> Self {
        self.with("lat", lat)
    }

    /// Longitude of the coordinate set
    #[must_use]
    pub fn lon(self, lon: f64) -> Self {
        self.with("lon", lon)
    }

    /// Search radius: a number followed by a unit, e.g. `"1km"`
    #[must_use]
    pub fn radius(self, radius: impl Into<String>) -> Self {
        self.with("radius", radius.into())
    }

    /// Maximum number of results (the service defaults to 10, caps at 100)
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.with("limit", limit)
    }

    /// Restrict results to one entity type
    #[must_use]
    pub fn entity_type(self, kind: EntityType) -> Self {
        self.with("type", kind.as_str())
    }

    /// Text searched for by keyword search
    #[must_use]
    pub fn keyword(self, text: impl Into<String>) -> Self {
        self.with("q", text.into())
    }

    /// Entity identifier
    #[must_use]
    pub fn guid(self, guid: impl Into<String>) -> Self {
        self.with(GUID_KEY, guid.into())
    }

    /// Entity filter of a structured (MQL) query
    ///
    /// e.g. `json!([{"type": "business", "guid": null}])`
    #[must_use]
    pub fn entity(self, entity: Value) -> Self {
        self.with("entity", entity)
    }

    /// Insert a parameter, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Look up a parameter
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a parameter is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Split off `key`, returning its value and a new mapping without it
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn without(&self, key: &str) -> (Option<Value>, Params) {
        let mut rest = self.clone();
        let value = rest.remove(key);
        (value, rest)
    }

    /// The `guid` parameter rendered as text, unless absent or blank
    #[must_use]
    pub fn guid_value(&self) -> Option<String> {
        self.get(GUID_KEY)
            .filter(|v| !is_blank(v))
            .map(render_value)
    }

    /// A new mapping holding only `lat` and `lon`, when present
    #[must_use]
    pub fn coordinates(&self) -> Params {
        ["lat", "lon"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    /// Render every parameter as a `(key, value)` text pair, in key order
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), render_value(v)))
            .collect()
    }

    /// Borrow the underlying JSON object
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The mapping as a JSON object value
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Absent-equivalent values: null, or a string that is empty or whitespace
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Render a value as query-string text
///
/// Strings are taken verbatim, scalars use their JSON text, null is empty.
/// Arrays and objects become one percent-escaped JSON string.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => encode_structured(value),
    }
}

/// Serialize a value to compact JSON text and percent-escape it
#[must_use]
pub fn encode_structured(value: &Value) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}
