use serde::{Deserialize, Serialize};

use comanda_core::ValueObject;

use crate::rules::DrinkRule;

/// A mixer the customer picked to accompany a liquor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrinkSelection {
    pub drink_name: String,
    pub quantity: u32,
}

impl DrinkSelection {
    pub fn new(drink_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            drink_name: drink_name.into(),
            quantity,
        }
    }
}

impl ValueObject for DrinkSelection {}

/// Mixers and limits that apply to one product. Computed on demand from the rule
/// table, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkOptions {
    pub available: Vec<String>,
    pub max_count: u32,
    pub min_count: u32,
    pub allow_multiple: bool,
}

impl DrinkOptions {
    /// No mixers at all (products that do not take a drink selection).
    pub fn none() -> Self {
        Self {
            available: Vec::new(),
            max_count: 0,
            min_count: 0,
            allow_multiple: false,
        }
    }

    pub fn has_options(&self) -> bool {
        !self.available.is_empty()
    }

    /// Exact, case-sensitive match against the allow-list.
    pub fn is_valid_option(&self, drink_name: &str) -> bool {
        self.available.iter().any(|d| d == drink_name)
    }
}

impl From<&DrinkRule> for DrinkOptions {
    fn from(rule: &DrinkRule) -> Self {
        Self {
            available: rule.allowed.iter().map(|d| d.to_string()).collect(),
            max_count: rule.max_count,
            min_count: rule.min_count,
            allow_multiple: rule.allow_multiple,
        }
    }
}

impl ValueObject for DrinkOptions {}
