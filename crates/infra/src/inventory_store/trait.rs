use std::sync::Arc;

use thiserror::Error;

use stockroom_core::InventoryId;
use stockroom_inventory::{InventoryFilter, InventoryPatch, InventoryRecord, NewInventory};

/// Storage failure.
///
/// Input problems never reach the store; everything here is a backend fault
/// and maps to a server error at the HTTP boundary.
#[derive(Debug, Error)]
pub enum InventoryStoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl InventoryStoreError {
    pub fn database(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Database {
            operation,
            message: message.into(),
        }
    }
}

/// Persistent table of inventory records.
///
/// ## Contract
///
/// - Ids are assigned by the store, strictly increasing, never reused.
/// - `insert_many` is all-or-nothing.
/// - `list` returns records in ascending id order.
/// - `update` is a read-modify-write serialized per record; `None` means the id
///   does not exist and nothing was written.
/// - `delete` returns whether a record was removed.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    async fn insert(&self, new: NewInventory) -> Result<InventoryRecord, InventoryStoreError>;

    async fn insert_many(
        &self,
        items: Vec<NewInventory>,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError>;

    async fn get(&self, id: InventoryId) -> Result<Option<InventoryRecord>, InventoryStoreError>;

    async fn list(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError>;

    async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Option<InventoryRecord>, InventoryStoreError>;

    async fn delete(&self, id: InventoryId) -> Result<bool, InventoryStoreError>;
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn insert(&self, new: NewInventory) -> Result<InventoryRecord, InventoryStoreError> {
        (**self).insert(new).await
    }

    async fn insert_many(
        &self,
        items: Vec<NewInventory>,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        (**self).insert_many(items).await
    }

    async fn get(&self, id: InventoryId) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        (**self).get(id).await
    }

    async fn list(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        (**self).list(filter).await
    }

    async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: InventoryId) -> Result<bool, InventoryStoreError> {
        (**self).delete(id).await
    }
}
