use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::domain::{
    entities::library::{FavoriteEntry, ReadingProgress},
    repositories::library::{KeyValueStore, LibraryStoreError},
};

pub const FAVORITES: &str = "favorites";
pub const READING_PROGRESS: &str = "readingProgress";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("store error: {0}")]
    StoreError(#[from] LibraryStoreError),
    #[error("malformed entry: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Favorites and reading progress kept on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct LibraryService<S>
where
    S: KeyValueStore,
{
    store: S,
}

impl<S> LibraryService<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>, LibraryError> {
        Ok(self
            .list(FAVORITES)
            .await?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    pub async fn get_favorite(&self, id: &str) -> Result<Option<FavoriteEntry>, LibraryError> {
        self.get(FAVORITES, id).await
    }

    pub async fn contains_favorite(&self, id: &str) -> Result<bool, LibraryError> {
        Ok(self.store.get(FAVORITES, id).await?.is_some())
    }

    /// Returns false, leaving the stored entry untouched, when the id is already a favorite.
    pub async fn add_favorite(&self, entry: FavoriteEntry) -> Result<bool, LibraryError> {
        let key = entry.key();
        let value = serde_json::to_value(&entry)?;
        let added = self.store.insert_if_absent(FAVORITES, &key, value).await?;
        if !added {
            debug!("{key} already in favorites");
        }

        Ok(added)
    }

    pub async fn remove_favorite(&self, id: &str) -> Result<bool, LibraryError> {
        Ok(self.store.delete(FAVORITES, id).await?)
    }

    pub async fn clear_favorites(&self) -> Result<(), LibraryError> {
        Ok(self.store.clear(FAVORITES).await?)
    }

    pub async fn get_progress(&self, id: &str) -> Result<Option<ReadingProgress>, LibraryError> {
        self.get(READING_PROGRESS, id).await
    }

    pub async fn set_progress(
        &self,
        id: &str,
        progress: &ReadingProgress,
    ) -> Result<(), LibraryError> {
        self.set(READING_PROGRESS, id, progress).await
    }

    pub async fn list_progress(&self) -> Result<Vec<(String, ReadingProgress)>, LibraryError> {
        self.list(READING_PROGRESS).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        namespace: &str,
        id: &str,
    ) -> Result<Option<T>, LibraryError> {
        match self.store.get(namespace, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize>(
        &self,
        namespace: &str,
        id: &str,
        value: &T,
    ) -> Result<(), LibraryError> {
        let value = serde_json::to_value(value)?;
        Ok(self.store.set(namespace, id, value).await?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        namespace: &str,
    ) -> Result<Vec<(String, T)>, LibraryError> {
        let mut entries = vec![];
        for (id, value) in self.store.list(namespace).await? {
            match serde_json::from_value(value) {
                Ok(entry) => entries.push((id, entry)),
                Err(e) => warn!("skipping malformed {namespace} entry {id}: {e}"),
            }
        }

        Ok(entries)
    }
}
