//! Inventory record store boundary.
//!
//! The store exclusively owns record lifetime and id allocation. The service
//! layer never caches records; every read goes through one of these backends.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use r#trait::{InventoryStore, InventoryStoreError};
