//! Postgres-backed platform store.
//!
//! Concurrency correctness is delegated to Postgres: id allocation comes from
//! the `BIGSERIAL` sequence, and each statement commits on its own.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use platformd_core::{NewPlatform, Platform};

use super::{PlatformStore, StoreError};

pub struct PostgresPlatformStore {
    pool: PgPool,
}

impl PostgresPlatformStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `platforms` table if it does not exist yet.
    ///
    /// Run once at startup before the store is handed to the router.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS platforms (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                publisher TEXT NOT NULL,
                cost TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn row_to_platform(row: &PgRow) -> Result<Platform, sqlx::Error> {
    Ok(Platform {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        publisher: row.try_get("publisher")?,
        cost: row.try_get("cost")?,
    })
}

#[async_trait]
impl PlatformStore for PostgresPlatformStore {
    async fn list_all(&self) -> Result<Vec<Platform>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, publisher, cost
            FROM platforms
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let platforms = rows
            .iter()
            .map(row_to_platform)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(platforms)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Platform>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, publisher, cost
            FROM platforms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_platform(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, draft: NewPlatform) -> Result<Platform, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO platforms (name, publisher, cost)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.publisher)
        .bind(&draft.cost)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(draft.with_id(id))
    }

    async fn update(&self, platform: &Platform) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE platforms
            SET name = $2, publisher = $3, cost = $4
            WHERE id = $1
            "#,
        )
        .bind(platform.id)
        .bind(&platform.name)
        .bind(&platform.publisher)
        .bind(&platform.cost)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM platforms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn save_changes(&self) -> Result<(), StoreError> {
        // Each statement above commits on its own; there is no pending batch.
        Ok(())
    }
}
