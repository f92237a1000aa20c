use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use platformd_core::{NewPlatform, Platform};

use super::{PlatformStore, StoreError};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Platform>,
}

/// In-memory platform store for dev/test runs.
///
/// Rows live in a `BTreeMap` keyed by id, so `list_all` comes back in
/// ascending id order. Ids start at 1 and only ever move forward, even after
/// deletes.
#[derive(Debug)]
pub struct InMemoryPlatformStore {
    inner: RwLock<Inner>,
}

impl InMemoryPlatformStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Populate an empty store with sample records. Does nothing if any rows
    /// already exist, so a restart against a shared instance never duplicates.
    pub fn seed(&self, drafts: Vec<NewPlatform>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.rows.is_empty() {
            return;
        }
        for draft in drafts {
            let id = inner.next_id;
            inner.next_id += 1;
            inner.rows.insert(id, draft.with_id(id));
        }
    }
}

impl Default for InMemoryPlatformStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformStore for InMemoryPlatformStore {
    async fn list_all(&self) -> Result<Vec<Platform>, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Platform>, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.get(&id).cloned())
    }

    async fn create(&self, draft: NewPlatform) -> Result<Platform, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        let platform = draft.with_id(id);
        inner.rows.insert(id, platform.clone());
        Ok(platform)
    }

    async fn update(&self, platform: &Platform) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(row) = inner.rows.get_mut(&platform.id) {
            *row = platform.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.rows.remove(&id);
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), StoreError> {
        // Mutations apply eagerly under the lock; nothing is buffered.
        Ok(())
    }
}
