//! Read-side aggregates for the dashboard and the history screen.

use std::collections::BTreeMap;

use chrono::Datelike;

use smartstock_core::Currency;

use crate::store::InventoryStore;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub product_count: usize,
    /// Products at or below their reorder threshold (the canonical alert
    /// predicate — the same one the replenishment list filters on).
    pub alert_count: usize,
    pub site_count: usize,
    /// On-hand value per currency: Σ `current_stock * unit_price`.
    pub stock_value: BTreeMap<Currency, f64>,
}

/// One calendar month of movement totals from the live log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyMovement {
    pub year: i32,
    pub month: u32,
    /// Sum of positive requested deltas.
    pub inflow: i64,
    /// Sum of negative requested deltas, as a positive magnitude.
    pub outflow: i64,
}

impl InventoryStore {
    pub fn dashboard_summary(&self) -> DashboardSummary {
        let mut stock_value: BTreeMap<Currency, f64> = BTreeMap::new();
        for product in self.products() {
            *stock_value.entry(product.currency).or_default() += product.stock_value();
        }
        DashboardSummary {
            product_count: self.products().len(),
            alert_count: self
                .products()
                .iter()
                .filter(|p| p.needs_replenishment())
                .count(),
            site_count: self.sites().len(),
            stock_value,
        }
    }

    /// Movement totals grouped by calendar month, oldest first. Works over
    /// the live log only; archived entries are deliberately excluded.
    pub fn monthly_movements(&self) -> Vec<MonthlyMovement> {
        let mut buckets: BTreeMap<(i32, u32), (i64, i64)> = BTreeMap::new();
        for log in self.logs() {
            let bucket = buckets
                .entry((log.date.year(), log.date.month()))
                .or_default();
            if log.change_amount >= 0 {
                bucket.0 += log.change_amount;
            } else {
                bucket.1 += -log.change_amount;
            }
        }
        buckets
            .into_iter()
            .map(|((year, month), (inflow, outflow))| MonthlyMovement {
                year,
                month,
                inflow,
                outflow,
            })
            .collect()
    }
}
