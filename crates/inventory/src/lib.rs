//! Inventory domain module.
//!
//! This crate contains the inventory record and the rules for creating,
//! patching and filtering it, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod filter;
pub mod patch;
pub mod record;

pub use filter::InventoryFilter;
pub use patch::InventoryPatch;
pub use record::{InventoryRecord, NewInventory};
