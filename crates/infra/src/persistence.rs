//! Whole-state load/save between the store and a key-value backend.
//!
//! Loading never fails: an absent or unparsable entry falls back to the
//! built-in seed (or to empty, for collections that start empty) and is
//! logged informationally. There is no schema versioning — a shape change in
//! a stored record simply fails to parse and reseeds that collection.

use serde::Serialize;

use smartstock_inventory::{InventoryStore, StoreConfig, StoreSnapshot};

use crate::backend::KeyValueBackend;
use crate::seed;

pub const PRODUCTS_KEY: &str = "stock.products";
pub const FURNITURE_KEY: &str = "stock.furniture";
pub const SITES_KEY: &str = "stock.sites";
pub const CATEGORIES_KEY: &str = "stock.categories";
pub const LOGS_KEY: &str = "stock.logs";
pub const ARCHIVED_LOGS_KEY: &str = "stock.logs.archive";

fn load_or<T, F>(backend: &impl KeyValueBackend, key: &str, fallback: F) -> T
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    match backend.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "stored entry is unreadable, falling back");
                fallback()
            }
        },
        Ok(None) => {
            tracing::info!(key, "no stored entry, seeding defaults");
            fallback()
        }
        Err(err) => {
            tracing::warn!(key, %err, "backend read failed, falling back");
            fallback()
        }
    }
}

/// Read every collection from the backend, seeding whatever is missing.
pub fn load_store(backend: &impl KeyValueBackend) -> InventoryStore {
    let sites = load_or(backend, SITES_KEY, seed::seed_sites);
    let snapshot = StoreSnapshot {
        products: load_or(backend, PRODUCTS_KEY, || seed::seed_products(&sites)),
        furniture: load_or(backend, FURNITURE_KEY, Vec::new),
        categories: load_or(backend, CATEGORIES_KEY, seed::seed_categories),
        logs: load_or(backend, LOGS_KEY, Vec::new),
        archived_logs: load_or(backend, ARCHIVED_LOGS_KEY, Vec::new),
        sites,
    };
    InventoryStore::from_snapshot(snapshot, StoreConfig::default())
}

fn put_json<T: Serialize>(
    backend: &mut impl KeyValueBackend,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value)
        .map_err(|err| anyhow::anyhow!("failed to serialize {key}: {err}"))?;
    backend.put(key, &raw)
}

/// Rewrite every collection under its key. Called after each state change;
/// the full current value is written each time, matching the load side.
pub fn save_store(backend: &mut impl KeyValueBackend, store: &InventoryStore) -> anyhow::Result<()> {
    let snapshot = store.snapshot();
    put_json(backend, PRODUCTS_KEY, &snapshot.products)?;
    put_json(backend, FURNITURE_KEY, &snapshot.furniture)?;
    put_json(backend, SITES_KEY, &snapshot.sites)?;
    put_json(backend, CATEGORIES_KEY, &snapshot.categories)?;
    put_json(backend, LOGS_KEY, &snapshot.logs)?;
    put_json(backend, ARCHIVED_LOGS_KEY, &snapshot.archived_logs)?;
    tracing::debug!(
        products = snapshot.products.len(),
        logs = snapshot.logs.len(),
        "store persisted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::telemetry;
    use smartstock_inventory::{MovementKind, ProductFilter, StockStatus};

    #[test]
    fn empty_backend_loads_the_seed_dataset() {
        telemetry::init();
        let backend = MemoryBackend::new();
        let store = load_store(&backend);

        assert_eq!(store.products().len(), 5);
        assert_eq!(store.sites().len(), 2);
        assert_eq!(store.categories().len(), 6);
        assert!(store.logs().is_empty());
        assert!(store.furniture().is_empty());
        // Seeded products reference seeded sites.
        assert!(store
            .products()
            .iter()
            .all(|p| store.sites().iter().any(|s| s.id == p.site_id)));
    }

    #[test]
    fn unparsable_entry_falls_back_to_seed_without_failing() {
        let mut backend = MemoryBackend::new();
        backend.put(PRODUCTS_KEY, "{not json").unwrap();
        backend.put(LOGS_KEY, "[{\"wrong\": \"shape\"}]").unwrap();

        let store = load_store(&backend);
        assert_eq!(store.products().len(), 5);
        assert!(store.logs().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_mutated_state() {
        let mut backend = MemoryBackend::new();
        let mut store = load_store(&backend);

        let candy = store
            .filter_products(&ProductFilter::default().with_search("candy"))
            .first()
            .map(|p| p.id)
            .unwrap();
        store.apply_refill(candy, "admin").unwrap();
        store.add_category("Cleaning");
        save_store(&mut backend, &store).unwrap();

        let reloaded = load_store(&backend);
        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert_eq!(reloaded.product(candy).unwrap().current_stock, 35);
        let log = reloaded.logs().last().unwrap();
        assert_eq!(log.kind, MovementKind::Refill);
        assert_eq!(log.change_amount, 20);
    }

    #[test]
    fn alert_filter_survives_persistence() {
        let mut backend = MemoryBackend::new();
        let store = load_store(&backend);
        let before = store
            .filter_products(&ProductFilter::default().with_status(StockStatus::Alert))
            .len();
        save_store(&mut backend, &store).unwrap();

        let reloaded = load_store(&backend);
        let after = reloaded
            .filter_products(&ProductFilter::default().with_status(StockStatus::Alert))
            .len();
        assert_eq!(before, after);
        assert_eq!(reloaded.dashboard_summary().alert_count, after);
    }
}
