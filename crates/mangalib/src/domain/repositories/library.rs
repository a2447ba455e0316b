use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryStoreError {
    #[error("io error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Key-value storage split into namespaces, addressed by id.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, LibraryStoreError>;

    async fn set(&self, namespace: &str, id: &str, value: Value) -> Result<(), LibraryStoreError>;

    /// Stores the value only when `id` is not taken yet, in one step. Returns whether it was stored.
    async fn insert_if_absent(
        &self,
        namespace: &str,
        id: &str,
        value: Value,
    ) -> Result<bool, LibraryStoreError>;

    /// Returns whether an entry was removed.
    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, LibraryStoreError>;

    /// Entries in insertion order.
    async fn list(&self, namespace: &str) -> Result<Vec<(String, Value)>, LibraryStoreError>;

    async fn clear(&self, namespace: &str) -> Result<(), LibraryStoreError>;
}
