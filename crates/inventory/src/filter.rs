//! Read-side filtering and sorting over products. Pure; no state mutation.

use crate::product::Product;
use crate::site::SiteId;

/// Stock-status bucket for filtering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StockStatus {
    #[default]
    All,
    /// At or below the reorder threshold.
    Alert,
    /// Above the reorder threshold.
    Sufficient,
}

/// Optional inclusive numeric range; unset bounds match everything.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|m| value >= m) && self.max.is_none_or(|m| value <= m)
    }
}

/// Multi-predicate product filter.
///
/// Every dimension is ANDed; an empty/default dimension matches everything,
/// so predicate composition is order-independent by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub search: String,
    pub site: Option<SiteId>,
    pub category: Option<String>,
    pub status: StockStatus,
    pub unit_price: RangeFilter,
    /// Range over `current_stock * unit_price`.
    pub stock_value: RangeFilter,
}

impl ProductFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_site(mut self, site: SiteId) -> Self {
        self.site = Some(site);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: StockStatus) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !product.name.to_lowercase().contains(&needle) {
            return false;
        }
        if let Some(site) = self.site {
            if product.site_id != site {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        match self.status {
            StockStatus::All => {}
            StockStatus::Alert => {
                if !product.needs_replenishment() {
                    return false;
                }
            }
            StockStatus::Sufficient => {
                if product.needs_replenishment() {
                    return false;
                }
            }
        }
        self.unit_price.contains(product.unit_price)
            && self.stock_value.contains(product.stock_value())
    }
}

/// Sort dimension for the inventory table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Stock,
    Price,
    Category,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Single-key, two-directional sort. Ties keep their relative order (the
/// underlying sort is stable); no secondary key is applied.
pub fn sort_products(products: &mut [&Product], key: SortKey, order: SortOrder) {
    products.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Stock => a.current_stock.cmp(&b.current_stock),
            SortKey::Price => a.unit_price.total_cmp(&b.unit_price),
            SortKey::Category => a.category.cmp(&b.category),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;
    use chrono::Utc;
    use smartstock_core::Currency;

    fn product(name: &str, category: &str, stock: i64, min: i64, price: f64, site: SiteId) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            category: category.to_string(),
            current_stock: stock,
            min_stock: min,
            monthly_need: 10,
            unit: "units".to_string(),
            unit_price: price,
            currency: Currency::Usd,
            supplier: None,
            site_id: site,
            last_inventory_date: Utc::now(),
        }
    }

    fn fixture() -> (Vec<Product>, SiteId, SiteId) {
        let a = SiteId::new();
        let b = SiteId::new();
        let products = vec![
            product("Candy", "Food", 15, 20, 2.5, a),
            product("Biscuits", "Food", 8, 15, 3.0, a),
            product("Fruit juice", "Beverage", 12, 10, 4.5, b),
            product("Tablecloths", "Decoration", 10, 5, 12.0, b),
        ];
        (products, a, b)
    }

    fn apply<'a>(products: &[&'a Product], filter: &ProductFilter) -> Vec<&'a Product> {
        products.iter().copied().filter(|p| filter.matches(p)).collect()
    }

    #[test]
    fn default_filter_matches_everything() {
        let (products, _, _) = fixture();
        let refs: Vec<&Product> = products.iter().collect();
        assert_eq!(apply(&refs, &ProductFilter::default()).len(), products.len());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (products, _, _) = fixture();
        let refs: Vec<&Product> = products.iter().collect();
        let hits = apply(&refs, &ProductFilter::default().with_search("JUI"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Fruit juice");
    }

    #[test]
    fn status_buckets_split_on_the_alert_predicate() {
        let (products, _, _) = fixture();
        let refs: Vec<&Product> = products.iter().collect();
        let alert = apply(&refs, &ProductFilter::default().with_status(StockStatus::Alert));
        let sufficient = apply(&refs, &ProductFilter::default().with_status(StockStatus::Sufficient));
        assert_eq!(alert.len(), 2);
        assert_eq!(sufficient.len(), 2);
        assert_eq!(alert.len() + sufficient.len(), products.len());
    }

    #[test]
    fn price_and_value_ranges_are_inclusive() {
        let (products, _, _) = fixture();
        let refs: Vec<&Product> = products.iter().collect();
        let filter = ProductFilter {
            unit_price: RangeFilter { min: Some(3.0), max: Some(12.0) },
            ..ProductFilter::default()
        };
        let hits = apply(&refs, &filter);
        assert_eq!(hits.len(), 3);

        let filter = ProductFilter {
            // Candy: 15 * 2.5 = 37.5
            stock_value: RangeFilter { min: Some(37.5), max: Some(37.5) },
            ..ProductFilter::default()
        };
        let hits = apply(&refs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Candy");
    }

    #[test]
    fn sequential_single_dimension_filters_commute() {
        let (products, site_a, _) = fixture();
        let refs: Vec<&Product> = products.iter().collect();

        let by_site = ProductFilter::default().with_site(site_a);
        let by_category = ProductFilter::default().with_category("Food");
        let by_search = ProductFilter::default().with_search("bis");

        let mut orderings = Vec::new();
        for chain in [
            [&by_site, &by_category, &by_search],
            [&by_search, &by_site, &by_category],
            [&by_category, &by_search, &by_site],
        ] {
            let mut current = refs.clone();
            for filter in chain {
                current = apply(&current, filter);
            }
            let names: Vec<&str> = current.iter().map(|p| p.name.as_str()).collect();
            orderings.push(names);
        }
        assert_eq!(orderings[0], vec!["Biscuits"]);
        assert_eq!(orderings[0], orderings[1]);
        assert_eq!(orderings[1], orderings[2]);

        // Same result as one combined filter.
        let combined = ProductFilter::default()
            .with_site(site_a)
            .with_category("Food")
            .with_search("bis");
        let names: Vec<&str> = apply(&refs, &combined).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, orderings[0]);
    }

    #[test]
    fn sorts_by_name_case_insensitively_in_both_directions() {
        let (products, _, _) = fixture();
        let mut refs: Vec<&Product> = products.iter().collect();
        sort_products(&mut refs, SortKey::Name, SortOrder::Asc);
        let names: Vec<&str> = refs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Biscuits", "Candy", "Fruit juice", "Tablecloths"]);

        sort_products(&mut refs, SortKey::Name, SortOrder::Desc);
        let names: Vec<&str> = refs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tablecloths", "Fruit juice", "Candy", "Biscuits"]);
    }

    #[test]
    fn sorts_by_price() {
        let (products, _, _) = fixture();
        let mut refs: Vec<&Product> = products.iter().collect();
        sort_products(&mut refs, SortKey::Price, SortOrder::Desc);
        let prices: Vec<f64> = refs.iter().map(|p| p.unit_price).collect();
        assert_eq!(prices, vec![12.0, 4.5, 3.0, 2.5]);
    }
}
