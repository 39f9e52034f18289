//! Built-in seed dataset used when a stored entry is absent or unreadable.

use chrono::Utc;

use smartstock_core::Currency;
use smartstock_inventory::{Product, ProductId, Site, SiteId};

pub fn seed_sites() -> Vec<Site> {
    vec![
        Site { id: SiteId::new(), name: "Head Office".to_string() },
        Site { id: SiteId::new(), name: "North Annex".to_string() },
    ]
}

pub fn seed_categories() -> Vec<String> {
    ["Food", "Beverage", "Supplies", "Furniture", "Decoration", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Starter products, all attached to the first seed site. One of them sits
/// below its threshold so a fresh install has something on the dashboard.
pub fn seed_products(sites: &[Site]) -> Vec<Product> {
    let site_id = sites.first().map(|s| s.id).unwrap_or_default();
    let line = |name: &str, category: &str, stock: i64, min: i64, monthly: i64, unit: &str, price: f64, supplier: &str| Product {
        id: ProductId::new(),
        name: name.to_string(),
        category: category.to_string(),
        current_stock: stock,
        min_stock: min,
        monthly_need: monthly,
        unit: unit.to_string(),
        unit_price: price,
        currency: Currency::Usd,
        supplier: Some(supplier.to_string()),
        site_id,
        last_inventory_date: Utc::now(),
    };

    vec![
        line("Candy", "Food", 15, 20, 20, "bags", 2.5, "Supplier A"),
        line("Biscuits", "Food", 8, 15, 20, "packs", 3.0, "Supplier A"),
        line("Fruit juice", "Beverage", 12, 10, 15, "liters", 4.5, "Supplier B"),
        line("Disposable plates", "Supplies", 50, 30, 40, "units", 0.5, "Supplier C"),
        line("Tablecloths", "Decoration", 10, 5, 8, "units", 12.0, "Supplier D"),
    ]
}
