//! Mapping from the legacy product-data format to domain products.
//!
//! The legacy file is a JSON object keyed by menu section, each holding a list
//! of loosely-typed records:
//!
//! ```json
//! { "licores": [ { "nombre": "Ron Bacardi", "precio": "$900", "precioCopa": "$90" } ] }
//! ```
//!
//! Sections map onto the fixed domain categories; prices may be numbers or
//! `$`-prefixed strings. Records that cannot become a valid product are skipped
//! with a warning instead of failing the whole catalog.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use comanda_core::{DomainResult, Money, ProductId};
use comanda_products::{Product, ProductCategory, ProductName};

use super::in_memory::InMemoryProductCatalog;
use crate::error::StoreError;

const PRICE_PLACEHOLDER: &str = "--";

/// One product as found in the legacy data.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRecord {
    #[serde(default)]
    pub id: Option<Value>,
    pub nombre: String,
    #[serde(default)]
    pub precio: Option<Value>,
    #[serde(default, rename = "precioCopa")]
    pub precio_copa: Option<Value>,
    #[serde(default)]
    pub ingredientes: Option<String>,
}

/// Map a legacy menu section onto a domain category. Unknown sections are food.
pub fn map_category(section: &str) -> ProductCategory {
    match section.trim().to_lowercase().as_str() {
        "pizzas" | "alitas" | "sopas" | "ensaladas" | "carnes" | "postres" => {
            ProductCategory::Comida
        }
        "cafes" | "cafe" => ProductCategory::Bebidas,
        "cocteleria" => ProductCategory::Cocteles,
        other => ProductCategory::from_str(other).unwrap_or(ProductCategory::Comida),
    }
}

/// Per-glass price when there is one, else the regular price, else zero.
///
/// A price that is present but unparseable counts as zero; it does not fall
/// through to the next field.
pub fn extract_price(record: &LegacyRecord) -> Money {
    let by_glass = record
        .precio_copa
        .as_ref()
        .filter(|v| is_present(v) && v.as_str().map(str::trim) != Some(PRICE_PLACEHOLDER));
    if let Some(value) = by_glass {
        return parse_price(value).unwrap_or(Money::ZERO);
    }
    record
        .precio
        .as_ref()
        .filter(|v| is_present(v))
        .and_then(parse_price)
        .unwrap_or(Money::ZERO)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

fn parse_price(value: &Value) -> Option<Money> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|f| Money::from_f64(f).ok()),
        Value::String(s) => {
            let cleaned = s.replace('$', "");
            let cleaned = cleaned.trim();
            let amount = Decimal::from_str(cleaned).ok().or_else(|| {
                let prefix: String = cleaned
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                    .collect();
                Decimal::from_str(&prefix).ok()
            })?;
            Money::new(amount).ok()
        }
        _ => None,
    }
}

fn record_id(record: &LegacyRecord) -> String {
    match &record.id {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => record.nombre.clone(),
    }
}

fn normalize_ingredients(raw: Option<&str>) -> String {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    })
    .unwrap_or_default()
}

/// Build a domain product from one legacy record.
pub fn to_product(section: &str, record: &LegacyRecord) -> DomainResult<Product> {
    Ok(Product::new(
        ProductId::new(record_id(record))?,
        ProductName::new(record.nombre.trim())?,
        map_category(section),
        extract_price(record),
        normalize_ingredients(record.ingredientes.as_deref()),
    ))
}

/// Parse a whole legacy catalog document.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, StoreError> {
    let document: serde_json::Map<String, Value> = serde_json::from_str(json)
        .map_err(|e| StoreError::Data(format!("catalog is not a JSON object: {e}")))?;

    let mut products = Vec::new();
    for (section, entries) in document {
        let Value::Array(entries) = entries else {
            tracing::warn!(section = %section, "catalog section is not a list; skipped");
            continue;
        };
        for (index, entry) in entries.into_iter().enumerate() {
            let record: LegacyRecord = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(section = %section, index, error = %e, "malformed catalog record; skipped");
                    continue;
                }
            };
            match to_product(&section, &record) {
                Ok(product) => products.push(product),
                Err(e) => {
                    tracing::warn!(section = %section, product = %record.nombre, error = %e, "invalid catalog record; skipped");
                }
            }
        }
    }
    tracing::debug!(count = products.len(), "legacy catalog parsed");
    Ok(products)
}

/// Read a legacy catalog file into an in-memory catalog.
pub fn load_catalog(path: &Path) -> Result<InMemoryProductCatalog, StoreError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
    let products = parse_catalog(&json)?;
    tracing::info!(path = %path.display(), products = products.len(), "catalog loaded");
    Ok(InMemoryProductCatalog::from_products(products))
}
