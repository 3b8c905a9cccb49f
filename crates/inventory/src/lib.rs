//! Inventory stock keeping.
//!
//! A single [`InventoryStore`] maps item names to quantities, persists them to
//! a flat JSON file and reports through `tracing`. Mutations are best-effort:
//! failures are logged and absorbed, with `try_*` variants exposing the typed
//! errors underneath.

pub mod activity;
pub mod persistence;
pub mod store;

pub use activity::{ActivityEntry, ActivityLog};
pub use persistence::{PersistenceError, StockMap, read_stock_file, write_stock_file};
pub use store::{DEFAULT_LOW_STOCK_THRESHOLD, InventoryStore, Removal};
