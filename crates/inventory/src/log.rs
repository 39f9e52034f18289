use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::{Entity, EntityId};

use crate::site::SiteId;

/// Log entry identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub EntityId);

impl LogId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Movement classification.
///
/// Union of the tags observed in stored data; deserialization maps any
/// unknown tag to `Other` rather than failing, since no single dataset's
/// tag set is exhaustive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entry,
    Exit,
    Transfer,
    Adjustment,
    Refill,
    FurnitureCheck,
    ManualUpdate,
    InventoryCheck,
    #[serde(other)]
    Other,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entry",
            MovementKind::Exit => "exit",
            MovementKind::Transfer => "transfer",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Refill => "refill",
            MovementKind::FurnitureCheck => "furniture_check",
            MovementKind::ManualUpdate => "manual_update",
            MovementKind::InventoryCheck => "inventory_check",
            MovementKind::Other => "other",
        }
    }
}

/// Immutable audit record appended whenever stock changes.
///
/// Append-only: nothing mutates or deletes an entry once written; moving
/// entries to the archive list is the only permitted transition.
///
/// `product_name` is a denormalized snapshot taken at event time. It is a
/// flat, self-contained field — display code must not join it back against
/// the live product table, as that would silently rewrite history after a
/// rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    pub id: LogId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    /// Product — or, for furniture checks, furniture — the movement applies
    /// to. Kept as a bare entity id so the record stays valid after the
    /// referent is deleted.
    #[serde(rename = "productId")]
    pub subject_id: EntityId,
    pub product_name: String,
    /// Requested signed delta. Deliberately unclamped: an exit larger than
    /// the on-hand quantity records the full request while `final_stock`
    /// records the clamped outcome.
    pub change_amount: i64,
    /// Resulting stock after the change (post-clamp).
    pub final_stock: i64,
    pub responsible: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_site_id: Option<SiteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_site_id: Option<SiteId>,
}

impl Entity for InventoryLog {
    type Id = LogId;

    fn id(&self) -> &LogId {
        &self.id
    }
}
