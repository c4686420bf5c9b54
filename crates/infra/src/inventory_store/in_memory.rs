use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_core::InventoryId;
use stockroom_inventory::{InventoryFilter, InventoryPatch, InventoryRecord, NewInventory};

use super::r#trait::{InventoryStore, InventoryStoreError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<InventoryId, InventoryRecord>,
    /// Highest id ever handed out; survives deletes so ids are never reused.
    last_id: InventoryId,
}

impl Table {
    fn allocate(&mut self, new: NewInventory) -> InventoryRecord {
        let id = self.last_id.next();
        self.last_id = id;
        let record = InventoryRecord::from_new(id, new);
        self.rows.insert(id, record.clone());
        record
    }
}

/// In-memory inventory table.
///
/// Intended for tests/dev. A single lock guards rows and the id counter, so
/// every write (including batch inserts) is atomic with respect to readers.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    table: RwLock<Table>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, InventoryStoreError> {
        self.table
            .read()
            .map_err(|_| InventoryStoreError::Unavailable("inventory table lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, InventoryStoreError> {
        self.table
            .write()
            .map_err(|_| InventoryStoreError::Unavailable("inventory table lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn insert(&self, new: NewInventory) -> Result<InventoryRecord, InventoryStoreError> {
        let mut table = self.write()?;
        Ok(table.allocate(new))
    }

    async fn insert_many(
        &self,
        items: Vec<NewInventory>,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        let mut table = self.write()?;
        Ok(items.into_iter().map(|new| table.allocate(new)).collect())
    }

    async fn get(&self, id: InventoryId) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        let table = self.read()?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryRecord>, InventoryStoreError> {
        let table = self.read()?;
        Ok(table
            .rows
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Option<InventoryRecord>, InventoryStoreError> {
        let mut table = self.write()?;
        Ok(table.rows.get_mut(&id).map(|record| {
            record.apply_patch(patch);
            record.clone()
        }))
    }

    async fn delete(&self, id: InventoryId) -> Result<bool, InventoryStoreError> {
        let mut table = self.write()?;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(sku: &str, product_name: &str) -> NewInventory {
        NewInventory {
            product_name: Some(product_name.to_string()),
            ..NewInventory::with_sku(sku)
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = InMemoryInventoryStore::new();

        let a = store.insert(NewInventory::with_sku("A1")).await.unwrap();
        let b = store.insert(NewInventory::with_sku("A1")).await.unwrap();

        assert_eq!(a.id, InventoryId::new(1));
        assert_eq!(b.id, InventoryId::new(2));
        assert_eq!(store.get(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryInventoryStore::new();

        let a = store.insert(NewInventory::with_sku("A1")).await.unwrap();
        let b = store.insert(NewInventory::with_sku("B1")).await.unwrap();
        assert!(store.delete(b.id).await.unwrap());

        let c = store.insert(NewInventory::with_sku("C1")).await.unwrap();
        assert!(c.id > b.id);
        assert_ne!(c.id, a.id);
    }

    #[tokio::test]
    async fn list_applies_filter_in_id_order() {
        let store = InMemoryInventoryStore::new();
        store
            .insert_many(vec![
                widget("A1", "Blue Widget"),
                widget("B2", "Red Gadget"),
                widget("A1", "green widget"),
            ])
            .await
            .unwrap();

        let all = store.list(&InventoryFilter::All).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let by_sku = store.list(&InventoryFilter::Sku("A1".into())).await.unwrap();
        assert_eq!(by_sku.len(), 2);

        let by_name = store
            .list(&InventoryFilter::ProductNameContains("WIDGET".into()))
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);
        assert!(by_name.iter().all(|r| r.sku == "A1"));
    }

    #[tokio::test]
    async fn update_missing_id_writes_nothing() {
        let store = InMemoryInventoryStore::new();
        store.insert(NewInventory::with_sku("A1")).await.unwrap();

        let patch = InventoryPatch::from_json(&json!({ "sku": "Z9" })).unwrap();
        assert_eq!(store.update(InventoryId::new(42), &patch).await.unwrap(), None);

        let all = store.list(&InventoryFilter::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].sku, "A1");
    }

    #[tokio::test]
    async fn update_is_partial() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(widget("A1", "Blue Widget")).await.unwrap();

        let patch = InventoryPatch::from_json(&json!({ "available_qty": 3 })).unwrap();
        let updated = store.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.available_qty, Some(3.0));
        assert_eq!(updated.product_name.as_deref(), Some("Blue Widget"));
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(NewInventory::with_sku("A1")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
    }
}
