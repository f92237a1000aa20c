use async_trait::async_trait;
use thiserror::Error;

use platformd_core::{NewPlatform, Platform};

mod in_memory;
mod postgres;

pub use in_memory::InMemoryPlatformStore;
pub use postgres::PostgresPlatformStore;

/// Platform store operation error.
///
/// Only the backing engine can fail here; absent rows are modeled as
/// `Ok(None)`, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistent collection of [`Platform`] records.
///
/// ## Semantics
///
/// - `create` assigns the next id and appends; two concurrent creates receive
///   distinct ids from the backend's own allocation mechanism.
/// - `get_by_id` on an id never issued yields `Ok(None)`.
/// - `update`/`delete` address an existing row by id; callers look the row up
///   first and treat absence as not-found at their own layer.
/// - `save_changes` is the explicit commit point. Durability and atomicity are
///   whatever the backing engine guarantees; both provided backends persist
///   eagerly, so for them this is a no-op.
///
/// No custom locking: concurrency correctness is delegated entirely to the
/// backing implementation.
#[async_trait]
pub trait PlatformStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Platform>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Platform>, StoreError>;

    /// Assign the next id and append the draft, returning the stored entity.
    async fn create(&self, draft: NewPlatform) -> Result<Platform, StoreError>;

    /// Rewrite the mutable fields of the row with `platform.id`.
    async fn update(&self, platform: &Platform) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn save_changes(&self) -> Result<(), StoreError>;
}
