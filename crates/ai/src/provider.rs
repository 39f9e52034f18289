//! Provider seam for the three analysis request shapes.

use std::fmt::Write as _;

use crate::decode::{ChartPoint, ExtractedProduct, StockReport};
use crate::error::AiError;
use crate::snapshot::{MovementSnapshot, ProductSnapshot};

/// The three request shapes served by the generative collaborator.
///
/// A remote implementation wraps an HTTP client; the local implementation
/// below answers deterministically from the snapshots alone. Either way a
/// failed call must leave the caller free to retry manually — nothing here
/// retries on its own.
pub trait InsightProvider {
    /// Free-text analysis of the product list and a trailing log window.
    fn stock_insights(
        &self,
        products: &[ProductSnapshot],
        recent: &[MovementSnapshot],
    ) -> Result<String, AiError>;

    /// Structured extraction of partial products from raw pasted text.
    fn extract_products(
        &self,
        raw_text: &str,
        allowed_categories: &[String],
    ) -> Result<Vec<ExtractedProduct>, AiError>;

    /// Structured report with summary, alerts, recommendations and chart data.
    fn stock_report(
        &self,
        products: &[ProductSnapshot],
        recent: &[MovementSnapshot],
    ) -> Result<StockReport, AiError>;
}

/// Deterministic provider computing every answer from the snapshots.
///
/// Threshold + run-out projection stand in for model judgement; extraction is
/// a delimiter-sniffing line parser. Useful offline and as the reference
/// behavior in tests.
#[derive(Debug, Clone)]
pub struct LocalInsightProvider {
    /// Products projected to run out within this many days get flagged.
    horizon_days: f64,
}

impl LocalInsightProvider {
    pub fn new() -> Self {
        Self { horizon_days: 14.0 }
    }

    pub fn with_horizon_days(mut self, horizon_days: f64) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    fn critical<'a>(&self, products: &'a [ProductSnapshot]) -> Vec<&'a ProductSnapshot> {
        products.iter().filter(|p| p.needs_replenishment()).collect()
    }

    fn running_out<'a>(&self, products: &'a [ProductSnapshot]) -> Vec<(&'a ProductSnapshot, f64)> {
        products
            .iter()
            .filter(|p| !p.needs_replenishment())
            .filter_map(|p| p.days_of_cover().map(|days| (p, days)))
            .filter(|(_, days)| *days <= self.horizon_days)
            .collect()
    }
}

impl Default for LocalInsightProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightProvider for LocalInsightProvider {
    fn stock_insights(
        &self,
        products: &[ProductSnapshot],
        recent: &[MovementSnapshot],
    ) -> Result<String, AiError> {
        let mut out = String::new();

        let critical = self.critical(products);
        if critical.is_empty() {
            out.push_str("All products are above their reorder thresholds.\n");
        } else {
            out.push_str("Critical stock:\n");
            for p in &critical {
                let _ = writeln!(
                    out,
                    "- {}: {} {} on hand (threshold {}); order {} to reach the monthly target",
                    p.name,
                    p.current_stock,
                    p.unit,
                    p.min_stock,
                    p.replenishment_need().max(0),
                );
            }
        }

        let running_out = self.running_out(products);
        if !running_out.is_empty() {
            let _ = writeln!(
                out,
                "Projected to run out within {} days at the average burn rate:",
                self.horizon_days
            );
            for (p, days) in running_out {
                let _ = writeln!(out, "- {}: about {days:.0} days of cover left", p.name);
            }
        }

        let inflows = recent.iter().filter(|m| m.change_amount > 0).count();
        let outflows = recent.iter().filter(|m| m.change_amount < 0).count();
        let _ = writeln!(
            out,
            "Recent activity: {inflows} inflow(s) and {outflows} outflow(s) across {} movement(s).",
            recent.len()
        );

        Ok(out)
    }

    fn extract_products(
        &self,
        raw_text: &str,
        allowed_categories: &[String],
    ) -> Result<Vec<ExtractedProduct>, AiError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(AiError::invalid_input("nothing to extract from empty text"));
        }

        let delimiter = sniff_delimiter(text);
        let mut products = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            // First line without any digit is almost certainly a header row.
            if line_no == 0 && !line.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }

            let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            let name = fields[0];
            if name.is_empty() {
                continue;
            }

            let mut numbers = fields[1..]
                .iter()
                .filter_map(|f| f.replace(',', ".").parse::<f64>().ok());
            let current_stock = numbers.next().map(|n| n.round() as i64).unwrap_or(0);
            let unit_price = numbers.next().unwrap_or(0.0);

            let category = fields[1..]
                .iter()
                .find_map(|f| {
                    allowed_categories
                        .iter()
                        .find(|c| c.eq_ignore_ascii_case(f))
                        .cloned()
                })
                .or_else(|| {
                    allowed_categories
                        .iter()
                        .find(|c| c.eq_ignore_ascii_case("other"))
                        .cloned()
                })
                .unwrap_or_default();

            let currency = fields[1..]
                .iter()
                .find_map(|f| f.parse().ok())
                .unwrap_or_default();

            products.push(ExtractedProduct {
                name: name.to_string(),
                category,
                current_stock: current_stock.max(0),
                min_stock: 10,
                monthly_need: 10,
                unit: "units".to_string(),
                unit_price: unit_price.max(0.0),
                currency,
                supplier: None,
            });
        }

        Ok(products)
    }

    fn stock_report(
        &self,
        products: &[ProductSnapshot],
        recent: &[MovementSnapshot],
    ) -> Result<StockReport, AiError> {
        let critical = self.critical(products);
        let summary = format!(
            "{} product(s) tracked, {} at or below threshold; {} recent movement(s) analyzed.",
            products.len(),
            critical.len(),
            recent.len()
        );

        let alerts = critical
            .iter()
            .map(|p| format!("{} is at {} {} (threshold {})", p.name, p.current_stock, p.unit, p.min_stock))
            .collect();

        let recommendations = critical
            .iter()
            .filter(|p| p.replenishment_need() > 0)
            .map(|p| format!("Order {} {} of {}", p.replenishment_need(), p.unit, p.name))
            .collect();

        let chart = products
            .iter()
            .map(|p| ChartPoint {
                label: p.name.clone(),
                value: p.current_stock as f64,
            })
            .collect();

        Ok(StockReport {
            summary,
            alerts,
            recommendations,
            chart,
        })
    }
}

/// Pick the most frequent candidate delimiter; tabs win ties.
fn sniff_delimiter(text: &str) -> char {
    let candidates = ['\t', ';', ','];
    candidates
        .into_iter()
        .max_by_key(|c| text.matches(*c).count())
        .unwrap_or(',')
}
