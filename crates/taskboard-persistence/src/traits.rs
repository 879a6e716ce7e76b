use async_trait::async_trait;
use taskboard_core::BoardResult;

/// Durable byte key-value storage, namespaced by fixed keys.
///
/// Implementations handle different backends (memory, files, ...).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when nothing is stored.
    async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>>;

    /// Overwrite the value under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> BoardResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> BoardResult<()>;
}

/// Trait for serialization/deserialization strategies
/// Allows swapping JSON for other encodings
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> BoardResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> BoardResult<T>;
}
