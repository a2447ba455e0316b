use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::config::{LibraryBackend, LibraryConfig};
use crate::domain::repositories::library::{KeyValueStore, LibraryStoreError};

type Document = Map<String, Value>;

/// Keeps every namespace in process memory; lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    namespaces: Arc<RwLock<HashMap<String, Document>>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, LibraryStoreError> {
        let namespaces = self.namespaces.read().await;

        Ok(namespaces.get(namespace).and_then(|doc| doc.get(id).cloned()))
    }

    async fn set(&self, namespace: &str, id: &str, value: Value) -> Result<(), LibraryStoreError> {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(id.to_string(), value);

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        namespace: &str,
        id: &str,
        value: Value,
    ) -> Result<bool, LibraryStoreError> {
        let mut namespaces = self.namespaces.write().await;
        let doc = namespaces.entry(namespace.to_string()).or_default();
        if doc.contains_key(id) {
            return Ok(false);
        }
        doc.insert(id.to_string(), value);

        Ok(true)
    }

    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, LibraryStoreError> {
        let mut namespaces = self.namespaces.write().await;

        Ok(namespaces
            .get_mut(namespace)
            .and_then(|doc| doc.shift_remove(id))
            .is_some())
    }

    async fn list(&self, namespace: &str) -> Result<Vec<(String, Value)>, LibraryStoreError> {
        let namespaces = self.namespaces.read().await;

        Ok(namespaces
            .get(namespace)
            .map(|doc| doc.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    async fn clear(&self, namespace: &str) -> Result<(), LibraryStoreError> {
        self.namespaces.write().await.remove(namespace);

        Ok(())
    }
}

/// One JSON object per namespace at `{dir}/{namespace}.json`, rewritten whole on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, LibraryStoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!("library stored at {}", dir.display());

        Ok(Self {
            dir,
            lock: Arc::new(RwLock::new(())),
        })
    }

    fn document_path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }

    async fn read(&self, namespace: &str) -> Result<Document, LibraryStoreError> {
        match tokio::fs::read(self.document_path(namespace)).await {
            Ok(bytes) if bytes.is_empty() => Ok(Document::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, namespace: &str, doc: &Document) -> Result<(), LibraryStoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(self.document_path(namespace), bytes).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, LibraryStoreError> {
        let _guard = self.lock.read().await;
        let mut doc = self.read(namespace).await?;

        Ok(doc.shift_remove(id))
    }

    async fn set(&self, namespace: &str, id: &str, value: Value) -> Result<(), LibraryStoreError> {
        let _guard = self.lock.write().await;
        let mut doc = self.read(namespace).await?;
        doc.insert(id.to_string(), value);

        self.write(namespace, &doc).await
    }

    async fn insert_if_absent(
        &self,
        namespace: &str,
        id: &str,
        value: Value,
    ) -> Result<bool, LibraryStoreError> {
        let _guard = self.lock.write().await;
        let mut doc = self.read(namespace).await?;
        if doc.contains_key(id) {
            return Ok(false);
        }
        doc.insert(id.to_string(), value);

        self.write(namespace, &doc).await?;
        Ok(true)
    }

    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, LibraryStoreError> {
        let _guard = self.lock.write().await;
        let mut doc = self.read(namespace).await?;
        if doc.shift_remove(id).is_none() {
            return Ok(false);
        }

        self.write(namespace, &doc).await?;
        Ok(true)
    }

    async fn list(&self, namespace: &str) -> Result<Vec<(String, Value)>, LibraryStoreError> {
        let _guard = self.lock.read().await;

        Ok(self.read(namespace).await?.into_iter().collect())
    }

    async fn clear(&self, namespace: &str) -> Result<(), LibraryStoreError> {
        let _guard = self.lock.write().await;

        self.write(namespace, &Document::new()).await
    }
}

/// The backend picked by configuration.
#[derive(Debug, Clone)]
pub enum LibraryStoreImpl {
    Memory(MemoryStore),
    File(FileStore),
}

impl LibraryStoreImpl {
    pub fn from_config(config: &LibraryConfig) -> Result<Self, LibraryStoreError> {
        match config.backend {
            LibraryBackend::Memory => Ok(Self::Memory(MemoryStore::default())),
            LibraryBackend::File => Ok(Self::File(FileStore::open(&config.path)?)),
        }
    }

    fn store(&self) -> &dyn KeyValueStore {
        match self {
            Self::Memory(store) => store,
            Self::File(store) => store,
        }
    }
}

#[async_trait]
impl KeyValueStore for LibraryStoreImpl {
    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, LibraryStoreError> {
        self.store().get(namespace, id).await
    }

    async fn set(&self, namespace: &str, id: &str, value: Value) -> Result<(), LibraryStoreError> {
        self.store().set(namespace, id, value).await
    }

    async fn insert_if_absent(
        &self,
        namespace: &str,
        id: &str,
        value: Value,
    ) -> Result<bool, LibraryStoreError> {
        self.store().insert_if_absent(namespace, id, value).await
    }

    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, LibraryStoreError> {
        self.store().delete(namespace, id).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<(String, Value)>, LibraryStoreError> {
        self.store().list(namespace).await
    }

    async fn clear(&self, namespace: &str) -> Result<(), LibraryStoreError> {
        self.store().clear(namespace).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    async fn exercise(store: &dyn KeyValueStore) {
        store.set("favorites", "b", json!({ "n": 1 })).await.unwrap();
        store.set("favorites", "a", json!({ "n": 2 })).await.unwrap();
        store.set("favorites", "b", json!({ "n": 3 })).await.unwrap();
        store.set("progress", "a", json!(10)).await.unwrap();

        assert_eq!(
            store.get("favorites", "b").await.unwrap(),
            Some(json!({ "n": 3 }))
        );
        assert_eq!(store.get("favorites", "z").await.unwrap(), None);

        let keys: Vec<String> = store
            .list("favorites")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);

        assert!(!store.insert_if_absent("favorites", "a", json!(0)).await.unwrap());
        assert!(store.insert_if_absent("favorites", "c", json!(4)).await.unwrap());
        assert_eq!(store.get("favorites", "a").await.unwrap(), Some(json!({ "n": 2 })));

        assert!(store.delete("favorites", "b").await.unwrap());
        assert!(!store.delete("favorites", "b").await.unwrap());

        store.clear("favorites").await.unwrap();
        assert!(store.list("favorites").await.unwrap().is_empty());
        assert_eq!(store.list("progress").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store() {
        exercise(&MemoryStore::default()).await;
    }

    #[tokio::test]
    async fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();

        exercise(&FileStore::open(dir.path()).unwrap()).await;
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("favorites", "m1", json!({ "title": "Monster" })).await.unwrap();
            store.set("favorites", "m2", json!({ "title": "Pluto" })).await.unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let entries = store.list("favorites").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "m1");
        assert!(dir.path().join("favorites.json").exists());
    }

    #[tokio::test]
    async fn test_backend_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig {
            backend: LibraryBackend::File,
            path: dir.path().join("library").display().to_string(),
        };

        let store = LibraryStoreImpl::from_config(&config).unwrap();
        store.set("favorites", "x", json!(true)).await.unwrap();

        assert!(matches!(store, LibraryStoreImpl::File(_)));
        assert!(dir.path().join("library").join("favorites.json").exists());
        assert!(matches!(
            LibraryStoreImpl::from_config(&LibraryConfig::default()).unwrap(),
            LibraryStoreImpl::Memory(_)
        ));
    }
}
