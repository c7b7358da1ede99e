//! Durable key-value storage used by the progress store.
//!
//! Values are arbitrary JSON and round-trip exactly. Each operation touches
//! a single key (or, for `clear`, the whole store) and is atomic on its own;
//! nothing here coordinates across keys.

pub mod file;
pub mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage file is not a JSON object: {}", .path.display())]
    Corrupt { path: PathBuf },
}

/// Asynchronous key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never set or was removed
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Delete a key; missing keys are not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored
    async fn list_keys(&self) -> Result<Vec<String>, StorageError>;

    /// Delete every key
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Read and deserialize a value; a stored `null` reads as `None`
pub async fn get_as<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Serialize and write a value
pub async fn set_as<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(value)?;
    store.set(key, value).await
}
