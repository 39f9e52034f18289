//! Defensive decoders for the structured response shapes.
//!
//! The collaborator declares a schema but the reply is still untrusted: only
//! the top-level type is required to match. Every field inside is defaulted
//! individually, and list elements of the wrong shape are skipped rather
//! than failing the whole payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use smartstock_core::Currency;

use crate::error::AiError;

/// Partial product extracted from pasted text or an image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProduct {
    pub name: String,
    pub category: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub monthly_need: i64,
    pub unit: String,
    pub unit_price: f64,
    pub currency: Currency,
    pub supplier: Option<String>,
}

/// Structured analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub summary: String,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

fn string_field(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    obj.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn int_field(obj: &Map<String, JsonValue>, key: &str, default: i64) -> i64 {
    match obj.get(key) {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f.round() as i64))
            .unwrap_or(default),
        None => default,
    }
}

fn float_field(obj: &Map<String, JsonValue>, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(JsonValue::as_f64).unwrap_or(default)
}

fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    value
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Decode the extraction response: a JSON array of partial product objects.
///
/// Categories are canonicalized against the allowed list when they match
/// (case-insensitively); unrecognized categories pass through untouched for
/// the caller to resolve. Non-object elements are dropped.
pub fn decode_extracted_products(
    value: &JsonValue,
    allowed_categories: &[String],
) -> Result<Vec<ExtractedProduct>, AiError> {
    let items = value
        .as_array()
        .ok_or_else(|| AiError::malformed("expected a top-level JSON array"))?;

    Ok(items
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            let raw_category = string_field(obj, "category").unwrap_or_default();
            let category = allowed_categories
                .iter()
                .find(|c| c.eq_ignore_ascii_case(&raw_category))
                .cloned()
                .unwrap_or(raw_category);
            let currency = string_field(obj, "currency")
                .and_then(|tag| tag.parse::<Currency>().ok())
                .unwrap_or_default();

            ExtractedProduct {
                name: string_field(obj, "name").unwrap_or_default(),
                category,
                current_stock: int_field(obj, "currentStock", 0),
                min_stock: int_field(obj, "minStock", 10),
                monthly_need: int_field(obj, "monthlyNeed", 10),
                unit: string_field(obj, "unit").unwrap_or_else(|| "units".to_string()),
                unit_price: float_field(obj, "unitPrice", 0.0),
                currency,
                supplier: string_field(obj, "supplier"),
            }
        })
        .collect())
}

/// Decode the structured report response: a JSON object with a summary,
/// alert/recommendation string arrays, and a small chart-data array.
pub fn decode_stock_report(value: &JsonValue) -> Result<StockReport, AiError> {
    let obj = value
        .as_object()
        .ok_or_else(|| AiError::malformed("expected a top-level JSON object"))?;

    let chart = obj
        .get("chartData")
        .or_else(|| obj.get("chart"))
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_object)
                .map(|point| ChartPoint {
                    label: string_field(point, "label")
                        .or_else(|| string_field(point, "name"))
                        .unwrap_or_default(),
                    value: float_field(point, "value", 0.0),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(StockReport {
        summary: string_field(obj, "summary").unwrap_or_default(),
        alerts: string_list(obj.get("alerts")),
        recommendations: string_list(obj.get("recommendations")),
        chart,
    })
}
