//! Bidirectional save/load over `serde_json::Value`.
//!
//! Scene nodes, widgets and components serialize through a single routine
//! that runs in either [`Direction`]. Each field goes through [`sync`], which
//! writes the value into the document on save and reads it back on load. A
//! key missing from a loaded document leaves the field untouched, so
//! hand-written scene files only need to mention what differs from the
//! defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::error::SceneError;

/// Which way a save/load routine is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Save,
    Load,
}

impl Direction {
    pub fn is_load(self) -> bool {
        self == Direction::Load
    }

    pub fn is_save(self) -> bool {
        self == Direction::Save
    }
}

/// Make sure `data` is a JSON object and return its map.
pub fn ensure_object(data: &mut Value) -> &mut Map<String, Value> {
    if !data.is_object() {
        *data = Value::Object(Map::new());
    }
    match data {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

/// Save `value` under `key`, or load it from there.
///
/// On load a missing or `null` key keeps `value` as it is. A present key that
/// does not deserialize into `T` is a [`SceneError::Document`].
pub fn sync<T>(data: &mut Value, key: &str, value: &mut T, direction: Direction) -> Result<(), SceneError>
where
    T: Serialize + DeserializeOwned,
{
    match direction {
        Direction::Save => {
            let encoded = serde_json::to_value(&*value).map_err(|e| SceneError::Document {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
            ensure_object(data).insert(key.to_string(), encoded);
        }
        Direction::Load => {
            if let Some(raw) = data.get(key).filter(|v| !v.is_null()) {
                *value = T::deserialize(raw).map_err(|e| SceneError::Document {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
            }
        }
    }
    Ok(())
}
