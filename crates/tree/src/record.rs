//! Field access capability for the items wrapped in tree nodes

use serde_json::{Map, Value};

/// Ordered key-value record representation
///
/// The raw record variant: a JSON object map that owns its fields
/// directly. Implements [`Record`] with full read/write capability.
pub type FieldMap = Map<String, Value>;

/// Field access over an item wrapped in a tree node
///
/// This is the capability contract the tree consumes: reads are required,
/// writes and structural serialization are optional. Types without keyed
/// write capability inherit the default no-op `set`/`remove` — writes
/// through the tree are then silently dropped, which is the documented
/// policy rather than an error.
pub trait Record {
    /// Read a field value
    ///
    /// Returns `None` when the field is absent.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Whether the field is present with a non-null value
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_null())
    }

    /// Write a field value
    ///
    /// Records without keyed write capability ignore the call.
    fn set(&mut self, _key: &str, _value: Value) {}

    /// Remove a field
    ///
    /// Records without keyed write capability ignore the call.
    fn remove(&mut self, _key: &str) {}

    /// The record's own structural form, if it has one
    ///
    /// `None` makes the record contribute an empty base mapping to
    /// structural serialization.
    fn to_object(&self) -> Option<FieldMap> {
        None
    }
}

impl Record for FieldMap {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        Map::remove(self, key);
    }

    fn to_object(&self) -> Option<FieldMap> {
        Some(self.clone())
    }
}

/// Whether a field value counts as empty
///
/// Used for primary/parent key classification during construction and for
/// the positional fallback in keyed column projection. Null, `false`,
/// numeric zero, the empty string and empty collections are empty.
pub fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Coerce a scalar field value to a map key
///
/// Strings are used as-is; numbers and booleans are rendered. Non-scalar
/// values have no key form.
pub fn value_to_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
