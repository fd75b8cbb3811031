//! Conversion from JSON documents.
//!
//! JSON arrays become shared lists and objects become shared maps, so every
//! element of a converted document is addressable through its container.

use crate::{Key, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Unit,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(entries) => {
                Value::map(entries.into_iter().map(|(k, v)| (Key::Str(k), v)))
            }
        }
    }
}
