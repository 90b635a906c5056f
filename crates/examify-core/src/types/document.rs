//! Document values and the server-timestamp write sentinel.

use serde_json::{Map, Value, json};

/// A schemaless document as stored in the remote document store.
pub type Document = Map<String, Value>;

/// Marker key identifying a server-timestamp sentinel value.
const SENTINEL_KEY: &str = "__server_timestamp__";

/// A write-time sentinel resolved by the store into an authoritative
/// timestamp. Client clocks are never trusted for ordering.
pub fn server_timestamp() -> Value {
    json!({ SENTINEL_KEY: true })
}

/// Whether a value is the server-timestamp sentinel.
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.len() == 1 && obj.get(SENTINEL_KEY).is_some())
}
