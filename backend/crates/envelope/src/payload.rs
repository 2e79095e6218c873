//! Payload shape classification and declared-outcome unwrapping.
//!
//! Handlers return loosely shaped JSON: a domain object, a bare array, a
//! `{statusKey, data}` wrapper, or nothing at all. The classifier reduces
//! that surface to five shapes the normalizers know how to present.

use serde_json::{Map, Value};

use crate::outcome::OutcomeKey;

/// Field under which handlers declare an outcome ahead of normalization.
pub const STATUS_KEY_FIELD: &str = "statusKey";
/// Field carrying the wrapped payload next to a declared outcome.
pub const DATA_FIELD: &str = "data";

/// Item-collection field names accepted on paginated objects.
const ITEM_FIELDS: [&str; 2] = ["items", "data"];
/// Pagination-metadata field names accepted on paginated objects.
const PAGINATION_FIELDS: [&str; 2] = ["paginations", "pagination"];

/// Shape of a handler's raw return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// Nothing to present; shapes to `{}` on the HTTP surface.
    ///
    /// Covers `null` and objects with zero keys. Collapsing empty objects
    /// keeps implementation-detail placeholders from leaking to clients.
    Empty,
    /// A bare string, number, or boolean.
    Scalar(Value),
    /// A bare array of values.
    List(Vec<Value>),
    /// A list of items plus pagination metadata.
    Paginated {
        /// The page of items; defaults to empty when the object carried
        /// pagination metadata without an item collection.
        items: Vec<Value>,
        /// Pagination metadata, passed through untouched.
        pagination: Value,
    },
    /// Any other object.
    Object(Map<String, Value>),
}

/// Classify a raw handler value into one of the presentable shapes.
#[must_use]
pub fn classify(raw: Value) -> Classified {
    match raw {
        Value::Null => Classified::Empty,
        Value::Array(items) => Classified::List(items),
        Value::Object(map) => classify_object(map),
        scalar => Classified::Scalar(scalar),
    }
}

fn classify_object(mut map: Map<String, Value>) -> Classified {
    if map.is_empty() {
        return Classified::Empty;
    }
    let Some(pagination) = take_first(&mut map, &PAGINATION_FIELDS) else {
        return Classified::Object(map);
    };
    let items = match take_first(&mut map, &ITEM_FIELDS) {
        Some(Value::Array(items)) => items,
        // Pagination metadata without an item collection degrades to an
        // empty page rather than failing the request.
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };
    Classified::Paginated { items, pagination }
}

fn take_first(map: &mut Map<String, Value>, fields: &[&str]) -> Option<Value> {
    fields.iter().find_map(|field| map.remove(*field))
}

/// Wrap a payload with a declared outcome for the normalizer to unwrap.
///
/// The inverse of [`unwrap_declared`]; handlers use it to pre-declare an
/// outcome without knowing about transport status codes.
#[must_use]
pub fn declare(key: OutcomeKey, data: Value) -> Value {
    serde_json::json!({ STATUS_KEY_FIELD: key, DATA_FIELD: data })
}

/// Split a declared outcome off a raw handler value.
///
/// An object carrying a recognized `statusKey` field yields that key and
/// its `data` field (absent `data` becomes `null`). Anything else, including
/// objects whose `statusKey` value is not a known outcome, passes through
/// untouched. This lets a handler pre-declare an outcome (`unchanged` for a
/// no-op update, say) without knowing about transport status codes.
#[must_use]
pub fn unwrap_declared(raw: Value) -> (Option<OutcomeKey>, Value) {
    match raw {
        Value::Object(mut map) => {
            let declared = map
                .get(STATUS_KEY_FIELD)
                .cloned()
                .and_then(|value| serde_json::from_value::<OutcomeKey>(value).ok());
            match declared {
                Some(key) => {
                    let inner = map.remove(DATA_FIELD).unwrap_or(Value::Null);
                    (Some(key), inner)
                }
                None => (None, Value::Object(map)),
            }
        }
        other => (None, other),
    }
}
