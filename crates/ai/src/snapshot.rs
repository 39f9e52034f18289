//! Flat input snapshots handed across the AI boundary.
//!
//! These deliberately duplicate a few domain fields instead of importing the
//! inventory crate, keeping this subsystem decoupled from live state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::Currency;

/// Product state at the moment an analysis was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub monthly_need: i64,
    pub unit: String,
    pub unit_price: f64,
    pub currency: Currency,
}

impl ProductSnapshot {
    pub fn needs_replenishment(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    pub fn replenishment_need(&self) -> i64 {
        (self.min_stock + self.monthly_need) - self.current_stock
    }

    /// Days until the stock runs out at the average monthly burn rate.
    /// `None` when there is no meaningful consumption to project from.
    pub fn days_of_cover(&self) -> Option<f64> {
        if self.monthly_need <= 0 {
            return None;
        }
        let daily_burn = self.monthly_need as f64 / 30.0;
        Some(self.current_stock as f64 / daily_burn)
    }
}

/// One movement from the trailing log window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSnapshot {
    pub date: DateTime<Utc>,
    pub product_name: String,
    pub change_amount: i64,
    pub final_stock: i64,
}
