//! Compact wire representations of domain values
//!
//! Domain values are exchanged with the backend (and stored in the user
//! data key-value store) as compact records with short field names. Each
//! entity implements [`CompactCodec`] to map itself to and from its compact
//! shape; collections are JSON objects keyed by entity name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Error;
use crate::types::Result;

/// Two-way mapping between a rich domain value and its compact record
pub trait CompactCodec: Sized {
    /// Compact wire shape
    type Compact: Serialize + DeserializeOwned;

    /// User data key the collection of this entity is stored under
    const USER_DATA_KEY: &'static str;

    /// Key identifying this value inside its collection
    fn collection_key(&self) -> &str;

    /// Map to the compact record
    fn to_compact(&self) -> Self::Compact;

    /// Map back from the compact record
    fn from_compact(compact: Self::Compact) -> Result<Self>;

    /// Serialize into a compact JSON value
    fn serialize_compact(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_compact())?)
    }

    /// Deserialize a single compact JSON value, failing on malformed input
    fn deserialize_compact(value: Value) -> Result<Self> {
        let compact: Self::Compact = serde_json::from_value(value)?;
        Self::from_compact(compact)
    }
}

/// Decode a stored collection.
///
/// A missing collection decodes to an empty list. If any record fails to
/// decode the whole collection degrades to an empty list; this never
/// returns an error.
pub fn deserialize_collection<T: CompactCodec>(value: Option<Value>) -> Vec<T> {
    match try_deserialize_collection(value) {
        Ok(items) => items,
        Err(e) => {
            warn!(key = T::USER_DATA_KEY, "Failed to deserialize collection: {}", e);
            Vec::new()
        }
    }
}

/// Decode a stored collection record by record, skipping malformed ones
pub fn deserialize_collection_lenient<T: CompactCodec>(value: Option<Value>) -> Vec<T> {
    let records = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            warn!(key = T::USER_DATA_KEY, "Collection is not an object: {}", other);
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|(name, record)| match T::deserialize_compact(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key = T::USER_DATA_KEY, "Skipping malformed record {}: {}", name, e);
                None
            }
        })
        .collect()
}

fn try_deserialize_collection<T: CompactCodec>(value: Option<Value>) -> Result<Vec<T>> {
    let records = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(Error::Decode(format!(
                "{} collection must be an object",
                T::USER_DATA_KEY
            )))
        }
    };

    debug!(key = T::USER_DATA_KEY, "Deserializing {} records", records.len());
    records.into_iter().map(|(_, record)| T::deserialize_compact(record)).collect()
}

/// Encode a collection as an object keyed by each item's collection key.
///
/// Keys keep the order of `items`. A later item with the same key replaces
/// an earlier one in place.
pub fn serialize_collection<T: CompactCodec>(items: &[T]) -> Result<Value> {
    let mut map = Map::with_capacity(items.len());
    for item in items {
        map.insert(item.collection_key().to_string(), item.serialize_compact()?);
    }
    Ok(Value::Object(map))
}

/// Keep an optional string only when it is present and non-empty
pub(crate) fn non_empty_string(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Keep an optional list only when it is present and non-empty
pub(crate) fn non_empty_list<T: Clone>(value: &Option<Vec<T>>) -> Option<Vec<T>> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Reject an empty entity name
pub(crate) fn require_name(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(Error::Decode("Name cannot be empty".into()));
    }
    Ok(name)
}
