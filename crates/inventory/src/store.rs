//! The inventory store: single-writer owner of all live collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::{Currency, Entity, EntityId};

use crate::filter::{ProductFilter, SortKey, SortOrder, sort_products};
use crate::furniture::{Furniture, FurnitureCondition, FurnitureDraft, FurnitureId};
use crate::log::{InventoryLog, LogId, MovementKind};
use crate::product::{Product, ProductDraft, ProductId};
use crate::site::{Site, SiteId};

/// Defaults applied when a draft omits a field on the create path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub default_min_stock: i64,
    pub default_monthly_need: i64,
    pub default_currency: Currency,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_min_stock: 10,
            default_monthly_need: 10,
            default_currency: Currency::default(),
        }
    }
}

/// Outcome of a stock mutation, returned so callers can re-read explicitly
/// instead of relying on implicit observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub product_id: ProductId,
    pub kind: MovementKind,
    /// The delta as requested, before clamping.
    pub requested_delta: i64,
    /// Stock after the change (never negative).
    pub new_stock: i64,
    pub log_id: LogId,
}

/// Owned copy of every collection, used by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub furniture: Vec<Furniture>,
    pub sites: Vec<Site>,
    pub categories: Vec<String>,
    pub logs: Vec<InventoryLog>,
    pub archived_logs: Vec<InventoryLog>,
}

/// Authoritative in-memory inventory state.
///
/// Synchronous and single-writer: operations execute in invocation order and
/// each stock mutation updates the record and appends its log entry before
/// returning, so the pair is never observable half-applied. No operation
/// errors for business-rule violations — unknown ids are no-ops and negative
/// results clamp to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    products: Vec<Product>,
    furniture: Vec<Furniture>,
    sites: Vec<Site>,
    categories: Vec<String>,
    logs: Vec<InventoryLog>,
    archived_logs: Vec<InventoryLog>,
    config: StoreConfig,
}

fn index_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

impl InventoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn from_snapshot(snapshot: StoreSnapshot, config: StoreConfig) -> Self {
        Self {
            products: snapshot.products,
            furniture: snapshot.furniture,
            sites: snapshot.sites,
            categories: snapshot.categories,
            logs: snapshot.logs,
            archived_logs: snapshot.archived_logs,
            config,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            products: self.products.clone(),
            furniture: self.furniture.clone(),
            sites: self.sites.clone(),
            categories: self.categories.clone(),
            logs: self.logs.clone(),
            archived_logs: self.archived_logs.clone(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn logs(&self) -> &[InventoryLog] {
        &self.logs
    }

    pub fn archived_logs(&self) -> &[InventoryLog] {
        &self.archived_logs
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        index_of(&self.products, &id).map(|i| &self.products[i])
    }

    pub fn furniture_item(&self, id: FurnitureId) -> Option<&Furniture> {
        index_of(&self.furniture, &id).map(|i| &self.furniture[i])
    }

    /// Live log entries referencing the given subject, oldest first.
    pub fn logs_for(&self, subject_id: EntityId) -> Vec<&InventoryLog> {
        self.logs.iter().filter(|l| l.subject_id == subject_id).collect()
    }

    /// Apply a signed stock delta to a product.
    ///
    /// New stock is `max(0, current + delta)` — stock is never recorded
    /// negative even when the requested decrease exceeds the on-hand
    /// quantity. The appended log keeps the *requested* delta while its
    /// `final_stock` carries the clamped outcome. The caller decides the
    /// sign; the kind tag is informational and never used to infer direction.
    ///
    /// Unknown `product_id` is a no-op returning `None` (callers are expected
    /// to have validated existence).
    pub fn apply_stock_change(
        &mut self,
        product_id: ProductId,
        delta: i64,
        kind: MovementKind,
        actor: &str,
        reason: Option<String>,
    ) -> Option<StockChange> {
        let index = index_of(&self.products, &product_id)?;
        let product = &mut self.products[index];

        let new_stock = (product.current_stock + delta).max(0);
        product.current_stock = new_stock;
        product.last_inventory_date = Utc::now();

        let log_id = self.append_log(InventoryLog {
            id: LogId::new(),
            date: Utc::now(),
            kind,
            subject_id: product_id.0,
            product_name: self.products[index].name.clone(),
            change_amount: delta,
            final_stock: new_stock,
            responsible: actor.to_string(),
            reason,
            from_site_id: None,
            to_site_id: None,
        });

        Some(StockChange {
            product_id,
            kind,
            requested_delta: delta,
            new_stock,
            log_id,
        })
    }

    /// Top the product up to `min_stock + monthly_need` when it is short.
    ///
    /// No-op (returning `None`) when the computed need is zero or negative.
    pub fn apply_refill(&mut self, product_id: ProductId, actor: &str) -> Option<StockChange> {
        let needed = self.product(product_id)?.replenishment_need();
        if needed <= 0 {
            return None;
        }
        self.apply_stock_change(product_id, needed, MovementKind::Refill, actor, None)
    }

    /// Refill every product currently at or below its threshold.
    ///
    /// Applied independently per product — a no-op on one product (e.g. a
    /// zero `monthly_need` leaving nothing to order) does not affect the
    /// others, and there is no batching or rollback.
    pub fn refill_all(&mut self, actor: &str) -> Vec<StockChange> {
        let under_threshold: Vec<ProductId> = self
            .products
            .iter()
            .filter(|p| p.needs_replenishment())
            .map(|p| p.id)
            .collect();

        under_threshold
            .into_iter()
            .filter_map(|id| self.apply_refill(id, actor))
            .collect()
    }

    /// Create or update a product.
    ///
    /// Create path: assigns a fresh id, stamps `last_inventory_date`, fills
    /// missing fields from `StoreConfig` defaults, and seeds an `entry` log
    /// with the initial stock as the opening balance when it is positive.
    ///
    /// Update path: merges only the supplied fields; `current_stock` moves
    /// only when explicitly present in the draft, and previously written log
    /// names are never rewritten. Unknown `existing` ids fall through to the
    /// create path. Only id uniqueness is guaranteed — duplicate names are
    /// allowed.
    pub fn upsert_product(&mut self, draft: ProductDraft, existing: Option<ProductId>) -> ProductId {
        if let Some(id) = existing {
            if let Some(index) = index_of(&self.products, &id) {
                let product = &mut self.products[index];
                if let Some(name) = draft.name {
                    product.name = name;
                }
                if let Some(category) = draft.category {
                    product.category = category;
                }
                if let Some(stock) = draft.current_stock {
                    product.current_stock = stock.max(0);
                }
                if let Some(min) = draft.min_stock {
                    product.min_stock = min;
                }
                if let Some(need) = draft.monthly_need {
                    product.monthly_need = need;
                }
                if let Some(unit) = draft.unit {
                    product.unit = unit;
                }
                if let Some(price) = draft.unit_price {
                    product.unit_price = price;
                }
                if let Some(currency) = draft.currency {
                    product.currency = currency;
                }
                if let Some(supplier) = draft.supplier {
                    product.supplier = Some(supplier);
                }
                if let Some(site_id) = draft.site_id {
                    product.site_id = site_id;
                }
                return id;
            }
        }

        let id = ProductId::new();
        let current_stock = draft.current_stock.unwrap_or(0).max(0);
        let product = Product {
            id,
            name: draft.name.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            current_stock,
            min_stock: draft.min_stock.unwrap_or(self.config.default_min_stock),
            monthly_need: draft.monthly_need.unwrap_or(self.config.default_monthly_need),
            unit: draft.unit.unwrap_or_else(|| "units".to_string()),
            unit_price: draft.unit_price.unwrap_or(0.0),
            currency: draft.currency.unwrap_or(self.config.default_currency),
            supplier: draft.supplier,
            site_id: draft
                .site_id
                .or_else(|| self.sites.first().map(|s| s.id))
                .unwrap_or_default(),
            last_inventory_date: Utc::now(),
        };
        let name = product.name.clone();
        self.products.push(product);

        if current_stock > 0 {
            self.append_log(InventoryLog {
                id: LogId::new(),
                date: Utc::now(),
                kind: MovementKind::Entry,
                subject_id: id.0,
                product_name: name,
                change_amount: current_stock,
                final_stock: current_stock,
                responsible: "system".to_string(),
                reason: Some("opening balance".to_string()),
                from_site_id: None,
                to_site_id: None,
            });
        }

        id
    }

    /// Irreversibly remove a product. Historical log entries referencing it
    /// are retained verbatim — audit trail over referential integrity.
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        match index_of(&self.products, &id) {
            Some(index) => {
                self.products.remove(index);
                true
            }
            None => false,
        }
    }

    /// Record a physical count: set stock to the observed quantity through a
    /// delta so the movement log captures the correction.
    pub fn record_inventory_check(
        &mut self,
        product_id: ProductId,
        observed: i64,
        actor: &str,
    ) -> Option<StockChange> {
        let delta = observed.max(0) - self.product(product_id)?.current_stock;
        self.apply_stock_change(
            product_id,
            delta,
            MovementKind::InventoryCheck,
            actor,
            None,
        )
    }

    /// Move a product to another site, logging the transfer with both
    /// endpoints. Quantity is untouched.
    pub fn transfer_product(
        &mut self,
        product_id: ProductId,
        to_site: SiteId,
        actor: &str,
    ) -> Option<LogId> {
        let index = index_of(&self.products, &product_id)?;
        let from_site = self.products[index].site_id;
        self.products[index].site_id = to_site;

        let log_id = self.append_log(InventoryLog {
            id: LogId::new(),
            date: Utc::now(),
            kind: MovementKind::Transfer,
            subject_id: product_id.0,
            product_name: self.products[index].name.clone(),
            change_amount: 0,
            final_stock: self.products[index].current_stock,
            responsible: actor.to_string(),
            reason: None,
            from_site_id: Some(from_site),
            to_site_id: Some(to_site),
        });
        Some(log_id)
    }

    /// Create or update a furniture record (same merge semantics as
    /// `upsert_product`).
    pub fn upsert_furniture(
        &mut self,
        draft: FurnitureDraft,
        existing: Option<FurnitureId>,
    ) -> FurnitureId {
        if let Some(id) = existing {
            if let Some(index) = index_of(&self.furniture, &id) {
                let item = &mut self.furniture[index];
                if let Some(code) = draft.code {
                    item.code = code;
                }
                if let Some(name) = draft.name {
                    item.name = name;
                }
                if let Some(count) = draft.current_count {
                    item.current_count = count.max(0);
                }
                if let Some(condition) = draft.condition {
                    item.condition = condition;
                }
                if let Some(assigned_to) = draft.assigned_to {
                    item.assigned_to = assigned_to;
                }
                if let Some(price) = draft.purchase_price {
                    item.purchase_price = price;
                }
                if let Some(currency) = draft.currency {
                    item.currency = currency;
                }
                if let Some(date) = draft.purchase_date {
                    item.purchase_date = date;
                }
                if let Some(site_id) = draft.site_id {
                    item.site_id = site_id;
                }
                return id;
            }
        }

        let id = FurnitureId::new();
        let count = draft.current_count.unwrap_or(0).max(0);
        self.furniture.push(Furniture {
            id,
            code: draft.code.unwrap_or_default(),
            name: draft.name.unwrap_or_default(),
            current_count: count,
            previous_count: count,
            condition: draft.condition.unwrap_or_default(),
            assigned_to: draft.assigned_to.unwrap_or_default(),
            purchase_price: draft.purchase_price.unwrap_or(0.0),
            currency: draft.currency.unwrap_or(self.config.default_currency),
            purchase_date: draft.purchase_date.unwrap_or_else(Utc::now),
            site_id: draft
                .site_id
                .or_else(|| self.sites.first().map(|s| s.id))
                .unwrap_or_default(),
        });
        id
    }

    /// Record an observed furniture count: the previous observation rolls
    /// into `previous_count`, the drift against it is logged. Returns the
    /// drift. Unknown id is a no-op.
    pub fn record_furniture_check(
        &mut self,
        furniture_id: FurnitureId,
        observed: i64,
        condition: Option<FurnitureCondition>,
        actor: &str,
    ) -> Option<i64> {
        let index = index_of(&self.furniture, &furniture_id)?;
        let item = &mut self.furniture[index];

        let observed = observed.max(0);
        let drift = observed - item.current_count;
        item.previous_count = item.current_count;
        item.current_count = observed;
        if let Some(condition) = condition {
            item.condition = condition;
        }

        let name = item.name.clone();
        self.append_log(InventoryLog {
            id: LogId::new(),
            date: Utc::now(),
            kind: MovementKind::FurnitureCheck,
            subject_id: furniture_id.0,
            product_name: name,
            change_amount: drift,
            final_stock: observed,
            responsible: actor.to_string(),
            reason: None,
            from_site_id: None,
            to_site_id: None,
        });
        Some(drift)
    }

    /// Irreversibly remove a furniture record; its check history stays.
    pub fn delete_furniture(&mut self, id: FurnitureId) -> bool {
        match index_of(&self.furniture, &id) {
            Some(index) => {
                self.furniture.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move log entries older than the cutoff to the archive list, preserving
    /// order and content. Returns how many entries moved. This is the only
    /// transition a written log entry ever undergoes.
    pub fn archive_logs_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let (old, live): (Vec<_>, Vec<_>) = self
            .logs
            .drain(..)
            .partition(|log| log.date < cutoff);
        self.logs = live;
        let moved = old.len();
        self.archived_logs.extend(old);
        moved
    }

    pub fn add_site(&mut self, name: impl Into<String>) -> SiteId {
        let id = SiteId::new();
        self.sites.push(Site {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a category unless an equal entry (case-insensitive) exists.
    pub fn add_category(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self
            .categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&name))
        {
            return false;
        }
        self.categories.push(name);
        true
    }

    /// Products matching the filter, in insertion order.
    pub fn filter_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Filtered and sorted view for the inventory table.
    pub fn filter_products_sorted(
        &self,
        filter: &ProductFilter,
        key: SortKey,
        order: SortOrder,
    ) -> Vec<&Product> {
        let mut result = self.filter_products(filter);
        sort_products(&mut result, key, order);
        result
    }

    fn append_log(&mut self, log: InventoryLog) -> LogId {
        let id = log.id;
        self.logs.push(log);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StockStatus;

    fn store_with_sites() -> (InventoryStore, SiteId, SiteId) {
        let mut store = InventoryStore::default();
        let a = store.add_site("Head Office");
        let b = store.add_site("North Annex");
        (store, a, b)
    }

    fn draft(name: &str, stock: i64, min: i64, monthly: i64) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_string()),
            current_stock: Some(stock),
            min_stock: Some(min),
            monthly_need: Some(monthly),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn stock_change_clamps_at_zero_but_logs_requested_delta() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Biscuits", 8, 15, 20), None);

        let change = store
            .apply_stock_change(id, -100, MovementKind::Exit, "admin", None)
            .unwrap();

        assert_eq!(change.new_stock, 0);
        assert_eq!(change.requested_delta, -100);
        assert_eq!(store.product(id).unwrap().current_stock, 0);

        let log = store.logs().last().unwrap();
        assert_eq!(log.change_amount, -100);
        assert_eq!(log.final_stock, 0);
        assert_eq!(log.kind, MovementKind::Exit);
    }

    #[test]
    fn stock_change_appends_exactly_one_log_with_matching_final_stock() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 10, 5, 5), None);
        let before = store.logs().len();

        store
            .apply_stock_change(id, 7, MovementKind::Entry, "admin", None)
            .unwrap();

        assert_eq!(store.logs().len(), before + 1);
        let log = store.logs().last().unwrap();
        assert_eq!(log.final_stock, store.product(id).unwrap().current_stock);
        assert_eq!(log.product_name, "Candy");
    }

    #[test]
    fn stock_change_on_unknown_product_is_a_silent_noop() {
        let (mut store, _, _) = store_with_sites();
        store.upsert_product(draft("Candy", 10, 5, 5), None);
        let before = store.snapshot();

        let result = store.apply_stock_change(
            ProductId::new(),
            -3,
            MovementKind::Exit,
            "admin",
            None,
        );

        assert!(result.is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn refill_tops_up_to_min_plus_monthly_need() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);
        let logs_before = store.logs_for(id.0).len();

        let change = store.apply_refill(id, "admin").unwrap();

        assert_eq!(change.requested_delta, 20);
        assert_eq!(change.new_stock, 35);
        assert_eq!(store.product(id).unwrap().current_stock, 35);

        let logs = store.logs_for(id.0);
        assert_eq!(logs.len(), logs_before + 1);
        let log = logs.last().unwrap();
        assert_eq!(log.kind, MovementKind::Refill);
        assert_eq!(log.change_amount, 20);
        assert_eq!(log.final_stock, 35);
    }

    #[test]
    fn refill_is_a_noop_when_nothing_is_needed() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Tablecloths", 40, 10, 10), None);
        let before = store.logs().len();

        assert!(store.apply_refill(id, "admin").is_none());
        assert_eq!(store.product(id).unwrap().current_stock, 40);
        assert_eq!(store.logs().len(), before);
    }

    #[test]
    fn refill_all_applies_independently_per_product() {
        let (mut store, _, _) = store_with_sites();
        let short = store.upsert_product(draft("Biscuits", 8, 15, 20), None);
        // At threshold with zero monthly need: selected, but nothing to order.
        let flat = store.upsert_product(draft("Napkins", 10, 10, 0), None);
        let fine = store.upsert_product(draft("Juice", 30, 10, 10), None);

        let changes = store.refill_all("admin");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].product_id, short);
        assert_eq!(store.product(short).unwrap().current_stock, 35);
        assert_eq!(store.product(flat).unwrap().current_stock, 10);
        assert_eq!(store.product(fine).unwrap().current_stock, 30);
    }

    #[test]
    fn create_fills_defaults_and_skips_opening_log_for_zero_stock() {
        let (mut store, site_a, _) = store_with_sites();
        let id = store.upsert_product(ProductDraft::named("Candy"), None);

        let product = store.product(id).unwrap();
        assert_eq!(product.current_stock, 0);
        assert_eq!(product.min_stock, 10);
        assert_eq!(product.monthly_need, 10);
        assert_eq!(product.currency, Currency::Usd);
        assert_eq!(product.unit, "units");
        assert_eq!(product.site_id, site_a);
        assert!(store.logs().is_empty());
    }

    #[test]
    fn create_with_stock_seeds_an_opening_balance_entry() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);

        let logs = store.logs_for(id.0);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].kind, MovementKind::Entry);
        assert_eq!(logs[0].change_amount, 15);
        assert_eq!(logs[0].final_stock, 15);
    }

    #[test]
    fn update_merges_fields_without_touching_stock_or_history() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);
        let logs_before = store.logs().len();

        let patch = ProductDraft {
            name: Some("Hard Candy".to_string()),
            unit_price: Some(3.25),
            ..ProductDraft::default()
        };
        let same_id = store.upsert_product(patch, Some(id));

        assert_eq!(same_id, id);
        let product = store.product(id).unwrap();
        assert_eq!(product.name, "Hard Candy");
        assert_eq!(product.unit_price, 3.25);
        assert_eq!(product.current_stock, 15);
        assert_eq!(store.logs().len(), logs_before);
        // Denormalized snapshot keeps the old name.
        assert_eq!(store.logs_for(id.0)[0].product_name, "Candy");
    }

    #[test]
    fn update_moves_stock_only_when_explicitly_included() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);

        let patch = ProductDraft {
            current_stock: Some(3),
            ..ProductDraft::default()
        };
        store.upsert_product(patch, Some(id));
        assert_eq!(store.product(id).unwrap().current_stock, 3);
    }

    #[test]
    fn delete_removes_product_but_retains_its_logs() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Juice", 12, 10, 15), None);
        store.apply_stock_change(id, -4, MovementKind::Exit, "admin", None);
        assert_eq!(store.logs_for(id.0).len(), 2);

        assert!(store.delete_product(id));
        assert!(store.product(id).is_none());

        let logs = store.logs_for(id.0);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].product_name, "Juice");
        // Second delete reports the miss.
        assert!(!store.delete_product(id));
    }

    #[test]
    fn inventory_check_sets_stock_to_observed_count() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Plates", 50, 30, 40), None);

        let change = store.record_inventory_check(id, 44, "auditor").unwrap();

        assert_eq!(change.requested_delta, -6);
        assert_eq!(store.product(id).unwrap().current_stock, 44);
        let log = store.logs().last().unwrap();
        assert_eq!(log.kind, MovementKind::InventoryCheck);
        assert_eq!(log.responsible, "auditor");
    }

    #[test]
    fn transfer_reassigns_site_and_logs_both_endpoints() {
        let (mut store, site_a, site_b) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);
        assert_eq!(store.product(id).unwrap().site_id, site_a);

        store.transfer_product(id, site_b, "admin").unwrap();

        assert_eq!(store.product(id).unwrap().site_id, site_b);
        let log = store.logs().last().unwrap();
        assert_eq!(log.kind, MovementKind::Transfer);
        assert_eq!(log.from_site_id, Some(site_a));
        assert_eq!(log.to_site_id, Some(site_b));
        assert_eq!(log.change_amount, 0);
        assert_eq!(log.final_stock, 15);
    }

    #[test]
    fn furniture_check_rolls_counts_and_logs_drift() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_furniture(
            FurnitureDraft {
                code: Some("CH-001".to_string()),
                name: Some("Armchair".to_string()),
                current_count: Some(12),
                ..FurnitureDraft::default()
            },
            None,
        );

        let drift = store
            .record_furniture_check(id, 10, Some(FurnitureCondition::Worn), "auditor")
            .unwrap();

        assert_eq!(drift, -2);
        let item = store.furniture_item(id).unwrap();
        assert_eq!(item.previous_count, 12);
        assert_eq!(item.current_count, 10);
        assert_eq!(item.condition, FurnitureCondition::Worn);
        assert_eq!(item.count_drift(), -2);

        let log = store.logs().last().unwrap();
        assert_eq!(log.kind, MovementKind::FurnitureCheck);
        assert_eq!(log.change_amount, -2);
        assert_eq!(log.final_stock, 10);

        assert!(store.delete_furniture(id));
        assert_eq!(store.logs_for(id.0).len(), 1);
    }

    #[test]
    fn archive_moves_old_entries_without_altering_them() {
        let (mut store, _, _) = store_with_sites();
        let id = store.upsert_product(draft("Candy", 15, 20, 20), None);
        store.apply_stock_change(id, -1, MovementKind::Exit, "admin", None);
        let total = store.logs().len();
        let copies: Vec<InventoryLog> = store.logs().to_vec();

        // Everything written so far is older than "now".
        let moved = store.archive_logs_before(Utc::now());
        assert_eq!(moved, total);
        assert!(store.logs().is_empty());
        assert_eq!(store.archived_logs(), copies.as_slice());

        // Nothing left to archive.
        assert_eq!(store.archive_logs_before(Utc::now()), 0);
    }

    #[test]
    fn dashboard_alert_count_agrees_with_replenishment_filter() {
        let (mut store, _, _) = store_with_sites();
        store.upsert_product(draft("Candy", 15, 20, 20), None);
        store.upsert_product(draft("Biscuits", 8, 15, 20), None);
        store.upsert_product(draft("Juice", 12, 10, 15), None);
        store.upsert_product(draft("Plates", 50, 30, 40), None);

        let summary = store.dashboard_summary();
        let alert_list =
            store.filter_products(&ProductFilter::default().with_status(StockStatus::Alert));

        assert_eq!(summary.alert_count, 2);
        assert_eq!(summary.alert_count, alert_list.len());
        let replenishment: Vec<_> = store
            .products()
            .iter()
            .filter(|p| p.needs_replenishment())
            .collect();
        assert_eq!(replenishment.len(), alert_list.len());
    }

    #[test]
    fn category_dedup_is_case_insensitive() {
        let (mut store, _, _) = store_with_sites();
        assert!(store.add_category("Food"));
        assert!(!store.add_category("food"));
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn snapshot_round_trips_through_from_snapshot() {
        let (mut store, _, _) = store_with_sites();
        store.upsert_product(draft("Candy", 15, 20, 20), None);
        store.add_category("Food");

        let rebuilt =
            InventoryStore::from_snapshot(store.snapshot(), store.config().clone());
        assert_eq!(rebuilt, store);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// New stock is always `max(0, current + delta)` and exactly one
            /// log records the requested delta with the clamped outcome.
            #[test]
            fn clamp_and_single_log_laws(
                initial in 0i64..10_000,
                delta in -20_000i64..20_000,
            ) {
                let mut store = InventoryStore::default();
                store.add_site("Head Office");
                let id = store.upsert_product(draft("Candy", initial, 10, 10), None);
                let logs_before = store.logs().len();

                let change = store
                    .apply_stock_change(id, delta, MovementKind::Adjustment, "admin", None)
                    .unwrap();

                let expected = (initial + delta).max(0);
                prop_assert_eq!(change.new_stock, expected);
                prop_assert_eq!(store.product(id).unwrap().current_stock, expected);
                prop_assert_eq!(store.logs().len(), logs_before + 1);

                let log = store.logs().last().unwrap();
                prop_assert_eq!(log.change_amount, delta);
                prop_assert_eq!(log.final_stock, expected);
            }

            /// The alert predicate agrees between the dashboard count and the
            /// status filter for arbitrary stock levels.
            #[test]
            fn alert_surfaces_agree(
                stocks in proptest::collection::vec((0i64..100, 0i64..100), 1..20),
            ) {
                let mut store = InventoryStore::default();
                store.add_site("Head Office");
                for (i, (stock, min)) in stocks.iter().enumerate() {
                    let mut d = draft(&format!("P{i}"), *stock, *min, 10);
                    d.monthly_need = Some(0);
                    store.upsert_product(d, None);
                }

                let summary = store.dashboard_summary();
                let filtered = store
                    .filter_products(&ProductFilter::default().with_status(StockStatus::Alert));
                prop_assert_eq!(summary.alert_count, filtered.len());
            }
        }
    }
}
