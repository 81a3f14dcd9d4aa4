//! JSON snapshot helpers.
//!
//! Reads never fail: a missing, unreadable or malformed record is logged and
//! reported as absent so callers fall back to their defaults.

use crate::{KeyValueStore, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Reads and decodes the record under `key`.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "failed to read stored record");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "ignoring malformed stored record");
            None
        }
    }
}

/// Encodes `value` and overwrites the record under `key`.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

/// Shallow object merge: fields of `overlay` replace fields of `base`.
///
/// A non-object on either side leaves `base` untouched.
pub fn overlay(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (field, value) in overlay {
                base.insert(field, value);
            }
            Value::Object(base)
        }
        (base, _) => base,
    }
}

/// Loads the record under `key` merged field-by-field over `defaults`.
///
/// Fields the stored record lacks keep their default, so records written by
/// older versions still load. A stored field that does not decode is dropped
/// on its own and the remaining fields are kept.
pub fn load_merged<T, S>(store: &S, key: &str, defaults: T) -> T
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(saved) = load_json::<Value, _>(store, key) else {
        return defaults;
    };

    let base = match serde_json::to_value(&defaults) {
        Ok(base) => base,
        Err(err) => {
            warn!(key, error = %err, "failed to encode defaults for merge");
            return defaults;
        }
    };

    if let Ok(merged) = serde_json::from_value(overlay(base.clone(), saved.clone())) {
        return merged;
    }

    let Value::Object(fields) = saved else {
        warn!(key, "stored record is not an object, using defaults");
        return defaults;
    };

    let mut accepted = base;
    for (field, value) in fields {
        let single = Value::Object(Map::from_iter([(field.clone(), value)]));
        let candidate = overlay(accepted.clone(), single);
        match serde_json::from_value::<T>(candidate.clone()) {
            Ok(_) => accepted = candidate,
            Err(err) => warn!(key, field = %field, error = %err, "dropping stored field that does not fit"),
        }
    }

    serde_json::from_value(accepted).unwrap_or(defaults)
}
