use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::{Currency, Entity, EntityId};

use crate::site::SiteId;

/// Furniture identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FurnitureId(pub EntityId);

impl FurnitureId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for FurnitureId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for FurnitureId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Physical condition of an asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureCondition {
    New,
    Good,
    Worn,
    Damaged,
}

impl Default for FurnitureCondition {
    fn default() -> Self {
        FurnitureCondition::Good
    }
}

/// A depreciable asset record, counted rather than consumed.
///
/// `previous_count` holds the last observed count so checks can surface
/// drift between observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: FurnitureId,
    pub code: String,
    pub name: String,
    pub current_count: i64,
    pub previous_count: i64,
    pub condition: FurnitureCondition,
    pub assigned_to: String,
    pub purchase_price: f64,
    pub currency: Currency,
    pub purchase_date: DateTime<Utc>,
    pub site_id: SiteId,
}

impl Furniture {
    /// Difference between the latest observation and the one before it.
    pub fn count_drift(&self) -> i64 {
        self.current_count - self.previous_count
    }
}

impl Entity for Furniture {
    type Id = FurnitureId;

    fn id(&self) -> &FurnitureId {
        &self.id
    }
}

/// Field set accepted by `InventoryStore::upsert_furniture`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurnitureDraft {
    pub code: Option<String>,
    pub name: Option<String>,
    pub current_count: Option<i64>,
    pub condition: Option<FurnitureCondition>,
    pub assigned_to: Option<String>,
    pub purchase_price: Option<f64>,
    pub currency: Option<Currency>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub site_id: Option<SiteId>,
}
