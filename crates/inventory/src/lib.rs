//! `smartstock-inventory` — the authoritative in-memory inventory store.
//!
//! Single-writer, synchronous data structure owning Products, Furniture,
//! Sites, Categories and the append-only movement log. Every stock mutation
//! updates the owning record and appends exactly one log entry; business-rule
//! violations (unknown ids, over-draws) are absorbed as no-ops or clamps,
//! never surfaced as errors.

pub mod filter;
pub mod furniture;
pub mod log;
pub mod product;
pub mod report;
pub mod site;
pub mod store;

pub use filter::{ProductFilter, RangeFilter, SortKey, SortOrder, StockStatus, sort_products};
pub use furniture::{Furniture, FurnitureCondition, FurnitureDraft, FurnitureId};
pub use log::{InventoryLog, LogId, MovementKind};
pub use product::{Product, ProductDraft, ProductId};
pub use report::{DashboardSummary, MonthlyMovement};
pub use site::{Site, SiteId};
pub use store::{InventoryStore, StockChange, StoreConfig, StoreSnapshot};
