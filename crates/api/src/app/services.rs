use std::sync::Arc;

use stockroom_core::InventoryId;
use stockroom_infra::{
    InMemoryInventoryStore, InventoryStore, InventoryStoreError, PostgresInventoryStore, StoreConfig,
};
use stockroom_inventory::{InventoryFilter, InventoryPatch, InventoryRecord, NewInventory};

use crate::app::errors::ApiError;

/// Service state shared by every handler.
///
/// Built once at startup and handed to the router; holds the only store handle.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn InventoryStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Services backed by a fresh in-memory table (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryInventoryStore::new()))
    }

    pub async fn inventory_list(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryRecord>, ApiError> {
        Ok(self.store.list(filter).await?)
    }

    pub async fn inventory_get(&self, id: InventoryId) -> Result<InventoryRecord, ApiError> {
        self.store.get(id).await?.ok_or(ApiError::NotFound)
    }

    pub async fn inventory_create(&self, new: NewInventory) -> Result<InventoryRecord, ApiError> {
        let record = self.store.insert(new).await?;
        tracing::info!(id = %record.id, sku = %record.sku, "inventory created");
        Ok(record)
    }

    /// Persist every item or none. Returns how many records were added.
    pub async fn inventory_create_batch(&self, items: Vec<NewInventory>) -> Result<usize, ApiError> {
        let created = self.store.insert_many(items).await?;
        tracing::info!(count = created.len(), "inventory batch created");
        Ok(created.len())
    }

    pub async fn inventory_update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<InventoryRecord, ApiError> {
        let record = self.store.update(id, patch).await?.ok_or(ApiError::NotFound)?;
        tracing::info!(id = %record.id, "inventory updated");
        Ok(record)
    }

    pub async fn inventory_delete(&self, id: InventoryId) -> Result<(), ApiError> {
        if !self.store.delete(id).await? {
            return Err(ApiError::NotFound);
        }
        tracing::info!(%id, "inventory deleted");
        Ok(())
    }
}

/// Wire services for the configured backend.
pub async fn build_services(config: &StoreConfig) -> Result<AppServices, InventoryStoreError> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("using in-memory inventory store; data is lost on restart");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres { url, max_connections } => {
            let store = PostgresInventoryStore::connect(url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres inventory store");
            Ok(AppServices::new(Arc::new(store)))
        }
    }
}
