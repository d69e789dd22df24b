//! Opaque records passed through from the remote service

use serde_json::{Map, Value};

/// A trading partner or community as the remote service returned it
pub type Record = Map<String, Value>;

/// Key of the unique identifier on every record
pub const ID_KEY: &str = "_id";

/// Split a decoded response body into records.
///
/// An array yields its object elements, a lone object is a single record,
/// anything else yields nothing.
pub fn records(body: Value) -> Vec<Record> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        Value::Object(record) => vec![record],
        _ => Vec::new(),
    }
}

/// `_id` of each record in a response body, skipping records without one
pub fn record_ids(body: &Value) -> Vec<String> {
    let id_of = |item: &Value| item.get(ID_KEY).and_then(Value::as_str).map(str::to_string);
    match body {
        Value::Array(items) => items.iter().filter_map(id_of).collect(),
        Value::Object(_) => id_of(body).into_iter().collect(),
        _ => Vec::new(),
    }
}
