//! Postgres-backed inventory store.
//!
//! One row per record in the `inventory` table; `id` is an identity column, so
//! ids are allocated by the database and never reused.
//!
//! ## Error Mapping
//!
//! Every sqlx failure becomes `InventoryStoreError::Database` tagged with the
//! operation name, except a closed pool which becomes `Unavailable`.
//!
//! ## Per-record serialization
//!
//! `update` locks the target row (`SELECT ... FOR UPDATE`) inside a
//! transaction, applies the patch in Rust, and writes the full row back.
//! Concurrent updates/deletes of the same id therefore queue on the row lock.

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{FromRow, Row};
use tracing::instrument;

use stockroom_core::InventoryId;
use stockroom_inventory::{InventoryFilter, InventoryPatch, InventoryRecord, NewInventory};

use super::r#trait::{InventoryStore, InventoryStoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS inventory (
    id            BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    sku           TEXT NOT NULL,
    name          TEXT,
    product_name  TEXT,
    factory_name  TEXT,
    seller_name   TEXT,
    url_key       TEXT,
    available_qty DOUBLE PRECISION,
    product_url   TEXT,
    price_info    TEXT
)
"#;

const INSERT: &str = r#"
INSERT INTO inventory (
    sku,
    name,
    product_name,
    factory_name,
    seller_name,
    url_key,
    available_qty,
    product_url,
    price_info
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
RETURNING id, sku, name, product_name, factory_name, seller_name, url_key, available_qty, product_url, price_info
"#;

/// Postgres-backed inventory table.
///
/// Uses a sqlx connection pool, so it is `Send + Sync` and cheap to share.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` with at most `max_connections` connections.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, InventoryStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `inventory` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), InventoryStoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self, new), fields(sku = %new.sku), err)]
    async fn insert(&self, new: NewInventory) -> Result<InventoryRecord, InventoryStoreError> {
        let row = bind_new(sqlx::query_as::<_, InventoryRow>(INSERT), &new)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(row.into())
    }

    #[instrument(skip(self, items), fields(count = items.len()), err)]
    async fn insert_many(
        &self,
        items: Vec<NewInventory>,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let mut records = Vec::with_capacity(items.len());
        for new in &items {
            // An early return drops `tx`, which rolls the whole batch back.
            let row = bind_new(sqlx::query_as::<_, InventoryRow>(INSERT), new)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_many", e))?;
            records.push(row.into());
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;
        Ok(records)
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: InventoryId) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, sku, name, product_name, factory_name, seller_name, url_key, available_qty, product_url, price_info
            FROM inventory
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn list(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        let (sku, needle) = match filter {
            InventoryFilter::All => (None, None),
            InventoryFilter::Sku(sku) => (Some(sku.as_str()), None),
            InventoryFilter::ProductNameContains(needle) => (None, Some(needle.as_str())),
        };

        // strpos instead of ILIKE so user input is never read as a pattern.
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, sku, name, product_name, factory_name, seller_name, url_key, available_qty, product_url, price_info
            FROM inventory
            WHERE ($1::text IS NULL OR sku = $1)
                AND ($2::text IS NULL OR strpos(lower(product_name), lower($2)) > 0)
            ORDER BY id ASC
            "#,
        )
        .bind(sku)
        .bind(needle)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, patch), err)]
    async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let current = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, sku, name, product_name, factory_name, seller_name, url_key, available_qty, product_url, price_info
            FROM inventory
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("lock_row", e))?;

        let Some(current) = current else {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Ok(None);
        };

        let mut record = InventoryRecord::from(current);
        record.apply_patch(patch);

        sqlx::query(
            r#"
            UPDATE inventory SET
                sku = $2,
                name = $3,
                product_name = $4,
                factory_name = $5,
                seller_name = $6,
                url_key = $7,
                available_qty = $8,
                product_url = $9,
                price_info = $10
            WHERE id = $1
            "#,
        )
        .bind(record.id.get())
        .bind(&record.sku)
        .bind(&record.name)
        .bind(&record.product_name)
        .bind(&record.factory_name)
        .bind(&record.seller_name)
        .bind(&record.url_key)
        .bind(record.available_qty)
        .bind(&record.product_url)
        .bind(&record.price_info)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;
        Ok(Some(record))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: InventoryId) -> Result<bool, InventoryStoreError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn bind_new<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, InventoryRow, sqlx::postgres::PgArguments>,
    new: &'q NewInventory,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, InventoryRow, sqlx::postgres::PgArguments> {
    query
        .bind(&new.sku)
        .bind(&new.name)
        .bind(&new.product_name)
        .bind(&new.factory_name)
        .bind(&new.seller_name)
        .bind(&new.url_key)
        .bind(new.available_qty)
        .bind(&new.product_url)
        .bind(&new.price_info)
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> InventoryStoreError {
    match err {
        sqlx::Error::Database(db_err) => InventoryStoreError::database(operation, db_err.message()),
        sqlx::Error::PoolClosed => {
            InventoryStoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            InventoryStoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        other => InventoryStoreError::database(operation, other.to_string()),
    }
}

// SQLx row types

#[derive(Debug)]
struct InventoryRow {
    id: i64,
    sku: String,
    name: Option<String>,
    product_name: Option<String>,
    factory_name: Option<String>,
    seller_name: Option<String>,
    url_key: Option<String>,
    available_qty: Option<f64>,
    product_url: Option<String>,
    price_info: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for InventoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InventoryRow {
            id: row.try_get("id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            product_name: row.try_get("product_name")?,
            factory_name: row.try_get("factory_name")?,
            seller_name: row.try_get("seller_name")?,
            url_key: row.try_get("url_key")?,
            available_qty: row.try_get("available_qty")?,
            product_url: row.try_get("product_url")?,
            price_info: row.try_get("price_info")?,
        })
    }
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        InventoryRecord {
            id: InventoryId::new(row.id),
            sku: row.sku,
            name: row.name,
            product_name: row.product_name,
            factory_name: row.factory_name,
            seller_name: row.seller_name,
            url_key: row.url_key,
            available_qty: row.available_qty,
            product_url: row.product_url,
            price_info: row.price_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Runs against a live database only when `DATABASE_URL` is set.
    async fn store_from_env() -> Option<PostgresInventoryStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let store = PostgresInventoryStore::connect(&url, 2).await.ok()?;
        store.ensure_schema().await.ok()?;
        Some(store)
    }

    #[tokio::test]
    async fn postgres_crud_round_trip() {
        let Some(store) = store_from_env().await else {
            return;
        };

        let sku = format!("PG-{}", std::process::id());
        let created = store
            .insert(NewInventory {
                product_name: Some("Blue Widget".to_string()),
                available_qty: Some(5.0),
                ..NewInventory::with_sku(sku.clone())
            })
            .await
            .unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));

        let by_sku = store.list(&InventoryFilter::Sku(sku.clone())).await.unwrap();
        assert!(by_sku.iter().any(|r| r.id == created.id));

        let by_name = store
            .list(&InventoryFilter::ProductNameContains("WIDGET".to_string()))
            .await
            .unwrap();
        assert!(by_name.iter().any(|r| r.id == created.id));

        let patch = InventoryPatch::from_json(&json!({ "available_qty": 1.5, "name": "renamed" })).unwrap();
        let updated = store.update(created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.available_qty, Some(1.5));
        assert_eq!(updated.product_name.as_deref(), Some("Blue Widget"));

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.update(created.id, &patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn postgres_batch_insert_is_atomic() {
        let Some(store) = store_from_env().await else {
            return;
        };

        let sku = format!("PG-BATCH-{}", std::process::id());
        let inserted = store
            .insert_many(vec![
                NewInventory::with_sku(sku.clone()),
                NewInventory::with_sku(sku.clone()),
            ])
            .await
            .unwrap();
        assert_eq!(inserted.len(), 2);
        assert!(inserted[0].id < inserted[1].id);

        for record in inserted {
            store.delete(record.id).await.unwrap();
        }
    }
}
