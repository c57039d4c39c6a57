//! Deep merge for layered configuration values.
//!
//! Objects merge key by key. Every other kind of value (arrays, strings,
//! numbers, booleans, null) in the overlay replaces the base outright.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use web_shared::config::deep_merge;
///
/// let base = json!({
///     "database": { "host": "db.internal", "port": 5432 },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "database": { "host": "localhost" },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(result, json!({
///     "database": { "host": "localhost", "port": 5432 },
///     "features": ["c"]
/// }));
/// ```
pub fn deep_merge(mut base: Value, overlay: Value) -> Value {
    merge_into(&mut base, overlay);
    base
}

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value;
        }
    }
}

/// Merge multiple values in order, with later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values
        .into_iter()
        .fold(Value::Object(serde_json::Map::new()), deep_merge)
}
