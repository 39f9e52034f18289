use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::{Currency, Entity, EntityId};

use crate::site::SiteId;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A consumable inventory line.
///
/// `current_stock` never goes negative: mutations clamp at zero. Field names
/// serialize in the camelCase shape carried by persisted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub monthly_need: i64,
    pub unit: String,
    pub unit_price: f64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub site_id: SiteId,
    pub last_inventory_date: DateTime<Utc>,
}

impl Product {
    /// Shortfall against the monthly target:
    /// `(min_stock + monthly_need) - current_stock`.
    ///
    /// Pure; used only to size replenishment suggestions, not to decide
    /// whether a product is in alert (see [`Product::needs_replenishment`]).
    pub fn replenishment_need(&self) -> i64 {
        (self.min_stock + self.monthly_need) - self.current_stock
    }

    /// Canonical alert predicate: at or below the reorder threshold.
    ///
    /// The dashboard alert count, the replenishment list and the stock-status
    /// filter all go through this single test so they can never disagree.
    pub fn needs_replenishment(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    /// Value of the on-hand quantity at the current unit price.
    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Field set accepted by `InventoryStore::upsert_product`.
///
/// Absent fields fall back to `StoreConfig` defaults on the create path and
/// leave the existing record untouched on the update path. The store performs
/// no cross-field validation here; required-field checks live at the form
/// layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub monthly_need: Option<i64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub currency: Option<Currency>,
    pub supplier: Option<String>,
    pub site_id: Option<SiteId>,
}

impl ProductDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
