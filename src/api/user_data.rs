use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::client::ApiClient;
use crate::codec::{deserialize_collection, serialize_collection, CompactCodec};
use crate::error::Error;
use crate::types::Result;

/// User data key-value storage interface
#[async_trait]
pub trait UserDataStore: Send + Sync {
    /// Get the value stored under a key, `None` if nothing is stored
    async fn get_user_data(&self, data_type: &str) -> Result<Option<Value>>;

    /// Replace the value stored under a key
    async fn set_user_data(&self, data_type: &str, value: Value) -> Result<()>;
}

#[async_trait]
impl UserDataStore for ApiClient {
    async fn get_user_data(&self, data_type: &str) -> Result<Option<Value>> {
        ApiClient::get_user_data(self, data_type).await
    }

    async fn set_user_data(&self, data_type: &str, value: Value) -> Result<()> {
        ApiClient::set_user_data(self, data_type, &value).await
    }
}

/// Process-local user data storage
#[derive(Debug, Default)]
pub struct InMemoryUserDataStore {
    /// Stored values (data type -> value)
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryUserDataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDataStore for InMemoryUserDataStore {
    async fn get_user_data(&self, data_type: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .read()
            .map_err(|e| Error::Internal(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(data_type).cloned())
    }

    async fn set_user_data(&self, data_type: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| Error::Internal(format!("Failed to acquire write lock: {}", e)))?;
        values.insert(data_type.to_string(), value);
        Ok(())
    }
}

/// Load the stored collection of `T`.
///
/// Transport errors propagate; a malformed collection loads as empty.
pub async fn load_collection<T, S>(store: &S) -> Result<Vec<T>>
where
    T: CompactCodec,
    S: UserDataStore + ?Sized,
{
    let value = store.get_user_data(T::USER_DATA_KEY).await?;
    let items = deserialize_collection(value);
    debug!(key = T::USER_DATA_KEY, "Loaded {} items", items.len());
    Ok(items)
}

/// Replace the stored collection of `T`
pub async fn save_collection<T, S>(store: &S, items: &[T]) -> Result<()>
where
    T: CompactCodec,
    S: UserDataStore + ?Sized,
{
    let value = serialize_collection(items)?;
    store.set_user_data(T::USER_DATA_KEY, value).await?;
    info!(key = T::USER_DATA_KEY, "Saved {} items", items.len());
    Ok(())
}

/// Insert or replace an item by its collection key, returning the updated collection
pub async fn upsert_item<T, S>(store: &S, item: T) -> Result<Vec<T>>
where
    T: CompactCodec,
    S: UserDataStore + ?Sized,
{
    let mut items: Vec<T> = load_collection(store).await?;
    match items
        .iter()
        .position(|existing| existing.collection_key() == item.collection_key())
    {
        Some(index) => items[index] = item,
        None => items.push(item),
    }

    save_collection(store, &items).await?;
    Ok(items)
}

/// Remove an item by its collection key, returning the updated collection.
///
/// Nothing is written when no item has that key.
pub async fn remove_item<T, S>(store: &S, key: &str) -> Result<Vec<T>>
where
    T: CompactCodec,
    S: UserDataStore + ?Sized,
{
    let mut items: Vec<T> = load_collection(store).await?;
    let before = items.len();
    items.retain(|item| item.collection_key() != key);

    if items.len() != before {
        save_collection(store, &items).await?;
    }
    Ok(items)
}
