//! Infrastructure layer: record storage backends and configuration.

pub mod config;
pub mod inventory_store;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use inventory_store::{
    InMemoryInventoryStore, InventoryStore, InventoryStoreError, PostgresInventoryStore,
};
