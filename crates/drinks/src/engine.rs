//! Drink-pairing validation.
//!
//! Validation is a sequential gate over the rule table. Expected business
//! violations are returned as an invalid [`ValidationResult`], never as an error;
//! it is up to the caller whether a rejection aborts anything.

use std::collections::BTreeMap;
use std::sync::Arc;

use comanda_core::ValidationResult;
use comanda_products::Product;
use comanda_products::classifier::normalize;

use crate::options::{DrinkOptions, DrinkSelection};
use crate::rules::{DrinkProfile, DrinkRule, SpecialRule, rule_for};

const CITRUS_KEYWORDS: &[&str] = &["naranja", "limon", "lima"];
const JUICE_KEYWORDS: &[&str] = &["jugo"];
const SODA_KEYWORDS: &[&str] = &["coca", "sprite", "refresco"];

/// Drink-pairing rules as seen by the rest of the system.
pub trait DrinkRules: Send + Sync {
    /// Mixers and limits for a product; empty when it takes no drink selection.
    fn available_options(&self, product: &Product) -> DrinkOptions;

    /// Validate a full selection for a product.
    fn validate_drink_selection(
        &self,
        product: &Product,
        selections: &[DrinkSelection],
    ) -> ValidationResult;

    fn max_drink_limit(&self, product: &Product) -> u32;

    fn min_drink_limit(&self, product: &Product) -> u32;

    fn requires_drink_selection(&self, product: &Product) -> bool;

    fn allows_multiple_drinks(&self, product: &Product) -> bool;

    /// Options for a table entry, independent of any product.
    fn rules_for_profile(&self, profile: DrinkProfile) -> DrinkOptions;

    /// Check a single mixer against a product (incremental, UI-side checks).
    fn validate_drink_compatibility(&self, product: &Product, drink_name: &str)
    -> ValidationResult;
}

impl<R> DrinkRules for Arc<R>
where
    R: DrinkRules + ?Sized,
{
    fn available_options(&self, product: &Product) -> DrinkOptions {
        (**self).available_options(product)
    }

    fn validate_drink_selection(
        &self,
        product: &Product,
        selections: &[DrinkSelection],
    ) -> ValidationResult {
        (**self).validate_drink_selection(product, selections)
    }

    fn max_drink_limit(&self, product: &Product) -> u32 {
        (**self).max_drink_limit(product)
    }

    fn min_drink_limit(&self, product: &Product) -> u32 {
        (**self).min_drink_limit(product)
    }

    fn requires_drink_selection(&self, product: &Product) -> bool {
        (**self).requires_drink_selection(product)
    }

    fn allows_multiple_drinks(&self, product: &Product) -> bool {
        (**self).allows_multiple_drinks(product)
    }

    fn rules_for_profile(&self, profile: DrinkProfile) -> DrinkOptions {
        (**self).rules_for_profile(profile)
    }

    fn validate_drink_compatibility(
        &self,
        product: &Product,
        drink_name: &str,
    ) -> ValidationResult {
        (**self).validate_drink_compatibility(product, drink_name)
    }
}

/// Table-driven implementation of [`DrinkRules`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DrinkPairingEngine;

impl DrinkPairingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Table entry for a product, or `None` when it takes no drinks.
    fn rule(product: &Product) -> Option<&'static DrinkRule> {
        product
            .requires_drink_selection()
            .then(|| rule_for(DrinkProfile::for_product(product)))
    }
}

impl DrinkRules for DrinkPairingEngine {
    fn available_options(&self, product: &Product) -> DrinkOptions {
        Self::rule(product).map(DrinkOptions::from).unwrap_or_else(DrinkOptions::none)
    }

    fn validate_drink_selection(
        &self,
        product: &Product,
        selections: &[DrinkSelection],
    ) -> ValidationResult {
        let Some(rule) = Self::rule(product) else {
            if selections.is_empty() {
                return ValidationResult::success();
            }
            return ValidationResult::failure("product does not allow drink selection");
        };

        // Served-alone check runs ahead of the count limits.
        if !selections.is_empty() && rule.special.contains(&SpecialRule::NoDrinks) {
            return ValidationResult::failure(served_alone_reason());
        }

        let total: u64 = selections.iter().map(|s| u64::from(s.quantity)).sum();
        if total < u64::from(rule.min_count) {
            return ValidationResult::failure(format!(
                "at least {} drink(s) must be selected",
                rule.min_count
            ));
        }
        if total > u64::from(rule.max_count) {
            return ValidationResult::failure(format!(
                "no more than {} drink(s) may be selected",
                rule.max_count
            ));
        }

        let mut warnings = Vec::new();
        let mut servings: BTreeMap<&str, u64> = BTreeMap::new();
        for selection in selections {
            if !rule.allowed.contains(&selection.drink_name.as_str()) {
                let reason = special_rule_violation(rule, std::slice::from_ref(selection))
                    .unwrap_or_else(|| format!("drink not available: {}", selection.drink_name));
                return ValidationResult::failure(reason).with_prior_warnings(warnings);
            }
            if selection.quantity == 0 {
                return ValidationResult::failure(format!(
                    "quantity must be greater than zero for: {}",
                    selection.drink_name
                ))
                .with_prior_warnings(warnings);
            }
            *servings.entry(selection.drink_name.as_str()).or_default() +=
                u64::from(selection.quantity);
        }

        if !rule.allow_multiple {
            for (drink, count) in &servings {
                if *count > 1 {
                    warnings.push(format!(
                        "{drink} selected {count} times; this liquor is usually served with one of each"
                    ));
                }
            }
        }

        if let Some(reason) = special_rule_violation(rule, selections) {
            return ValidationResult::failure(reason).with_prior_warnings(warnings);
        }

        if let Some(reason) = cross_compatibility_violation(selections) {
            return ValidationResult::failure(reason).with_prior_warnings(warnings);
        }

        ValidationResult::from_warnings(warnings)
    }

    fn max_drink_limit(&self, product: &Product) -> u32 {
        Self::rule(product).map(|r| r.max_count).unwrap_or(0)
    }

    fn min_drink_limit(&self, product: &Product) -> u32 {
        Self::rule(product).map(|r| r.min_count).unwrap_or(0)
    }

    fn requires_drink_selection(&self, product: &Product) -> bool {
        product.requires_drink_selection()
    }

    fn allows_multiple_drinks(&self, product: &Product) -> bool {
        Self::rule(product).map(|r| r.allow_multiple).unwrap_or(false)
    }

    fn rules_for_profile(&self, profile: DrinkProfile) -> DrinkOptions {
        DrinkOptions::from(rule_for(profile))
    }

    fn validate_drink_compatibility(
        &self,
        product: &Product,
        drink_name: &str,
    ) -> ValidationResult {
        let single = [DrinkSelection::new(drink_name, 1)];
        let Some(rule) = Self::rule(product) else {
            return ValidationResult::failure(format!(
                "drink not compatible with this product: {drink_name}"
            ));
        };
        if let Some(reason) = special_rule_violation(rule, &single) {
            return ValidationResult::failure(reason);
        }
        if !rule.allowed.contains(&drink_name) {
            return ValidationResult::failure(format!(
                "drink not compatible with this product: {drink_name}"
            ));
        }
        ValidationResult::success()
    }
}

fn served_alone_reason() -> &'static str {
    "Jägermeister is served alone (sola), without mixers"
}

fn mentions_any(name: &str, keywords: &[&str]) -> bool {
    let name = normalize(name);
    keywords.iter().any(|k| name.contains(k))
}

fn special_rule_violation(rule: &DrinkRule, selections: &[DrinkSelection]) -> Option<String> {
    rule.special.iter().find_map(|special| match special {
        SpecialRule::NoDrinks if !selections.is_empty() => Some(served_alone_reason().to_string()),
        SpecialRule::NoCitrus
            if selections
                .iter()
                .any(|s| mentions_any(&s.drink_name, CITRUS_KEYWORDS)) =>
        {
            Some("rum cannot be mixed with citrus juices".to_string())
        }
        _ => None,
    })
}

fn cross_compatibility_violation(selections: &[DrinkSelection]) -> Option<String> {
    let has_juice = selections
        .iter()
        .any(|s| mentions_any(&s.drink_name, JUICE_KEYWORDS));
    let has_soda = selections
        .iter()
        .any(|s| mentions_any(&s.drink_name, SODA_KEYWORDS));
    (has_juice && has_soda).then(|| "juices cannot be mixed with sodas".to_string())
}
