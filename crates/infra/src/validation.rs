//! Pre-flight product validation for a product selection.
//!
//! Collects every problem with a selection (not just the first) so a caller can
//! show them together before anything touches the order.

use std::sync::Arc;

use comanda_core::ValidationResult;
use comanda_drinks::{DrinkOptions, DrinkRules, DrinkSelection};
use comanda_products::Product;

use crate::catalog::ProductCatalog;
use crate::config::DEFAULT_HIGH_QUANTITY_THRESHOLD;
use crate::error::StoreError;

pub const COOKING_TERMS: &[&str] = &["crudo", "poco cocido", "término medio", "bien cocido", "muy cocido"];

/// What the caller wants to check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductValidationRequest {
    pub product_name: String,
    pub quantity: Option<i64>,
    pub drinks: Vec<DrinkSelection>,
    pub cooking_term: Option<String>,
}

/// Outcome of [`ProductValidator::validate_product`].
#[derive(Debug, Clone)]
pub struct ProductValidation {
    pub valid: bool,
    pub product: Option<Arc<Product>>,
    pub drink_options: Option<DrinkOptions>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ProductValidation {
    fn rejected(error: String) -> Self {
        Self {
            valid: false,
            product: None,
            drink_options: None,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

/// Drink-related facts about one product.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    pub product: Arc<Product>,
    pub drink_options: DrinkOptions,
    pub requires_drinks: bool,
    pub max_drinks: u32,
    pub min_drinks: u32,
}

#[derive(Debug)]
pub struct ProductValidator<C, R> {
    catalog: C,
    rules: R,
    high_quantity_threshold: u32,
}

impl<C, R> ProductValidator<C, R> {
    pub fn new(catalog: C, rules: R) -> Self {
        Self {
            catalog,
            rules,
            high_quantity_threshold: DEFAULT_HIGH_QUANTITY_THRESHOLD,
        }
    }

    pub fn with_high_quantity_threshold(mut self, threshold: u32) -> Self {
        self.high_quantity_threshold = threshold;
        self
    }
}

impl<C, R> ProductValidator<C, R>
where
    C: ProductCatalog,
    R: DrinkRules,
{
    pub async fn validate_product(
        &self,
        request: &ProductValidationRequest,
    ) -> Result<ProductValidation, StoreError> {
        let name = request.product_name.trim();
        if name.is_empty() {
            return Ok(ProductValidation::rejected("product name is required".to_string()));
        }
        let Some(product) = self.catalog.find_by_name(name).await? else {
            return Ok(ProductValidation::rejected(format!("product not found: {name}")));
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let drink_options = self.rules.available_options(&product);

        if let Some(quantity) = request.quantity {
            if quantity <= 0 {
                errors.push("quantity must be greater than zero".to_string());
            } else if quantity > i64::from(self.high_quantity_threshold) {
                warnings.push(format!("unusually high quantity ({quantity}); please confirm"));
            }
        }

        if self.rules.requires_drink_selection(&product) {
            let result = self.rules.validate_drink_selection(&product, &request.drinks);
            if let Some(reason) = result.reason() {
                errors.push(reason.to_string());
            }
            warnings.extend(result.warnings().iter().cloned());
        } else if !request.drinks.is_empty() {
            warnings.push("this product does not take a drink selection".to_string());
        }

        if let Some(term) = request.cooking_term.as_deref().filter(|t| !t.trim().is_empty()) {
            if let Some(error) = cooking_term_error(&product, term) {
                errors.push(error);
            }
        }

        tracing::debug!(
            product = %product.name(),
            errors = errors.len(),
            warnings = warnings.len(),
            "product validated"
        );

        Ok(ProductValidation {
            valid: errors.is_empty(),
            product: Some(product),
            drink_options: Some(drink_options),
            errors,
            warnings,
        })
    }

    pub async fn drink_options_for(&self, name: &str) -> Result<Option<DrinkOptions>, StoreError> {
        Ok(self
            .catalog
            .find_by_name(name)
            .await?
            .map(|p| self.rules.available_options(&p)))
    }

    pub async fn product_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.catalog.exists(name).await
    }

    /// Drink check only; an unknown product is an invalid result, not an error.
    pub async fn validate_drink_selection_only(
        &self,
        name: &str,
        drinks: &[DrinkSelection],
    ) -> Result<ValidationResult, StoreError> {
        Ok(match self.catalog.find_by_name(name).await? {
            Some(product) => self.rules.validate_drink_selection(&product, drinks),
            None => ValidationResult::failure(format!("product not found: {name}")),
        })
    }

    pub async fn product_info(&self, name: &str) -> Result<Option<ProductInfo>, StoreError> {
        Ok(self.catalog.find_by_name(name).await?.map(|product| ProductInfo {
            drink_options: self.rules.available_options(&product),
            requires_drinks: self.rules.requires_drink_selection(&product),
            max_drinks: self.rules.max_drink_limit(&product),
            min_drinks: self.rules.min_drink_limit(&product),
            product,
        }))
    }
}

fn cooking_term_error(product: &Product, term: &str) -> Option<String> {
    if !product.is_food() {
        return Some("only food can take a cooking term".to_string());
    }
    let term = term.trim().to_lowercase();
    if COOKING_TERMS.contains(&term.as_str()) {
        return None;
    }
    Some(format!(
        "invalid cooking term '{term}'; options: {}",
        COOKING_TERMS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use comanda_core::Money;
    use comanda_drinks::DrinkPairingEngine;

    use crate::catalog::InMemoryProductCatalog;

    fn validator() -> ProductValidator<InMemoryProductCatalog, DrinkPairingEngine> {
        let product = |name: &str, category: &str| {
            Product::try_from_parts(name, name, category, Money::from_cents(10000), "").unwrap()
        };
        let catalog = InMemoryProductCatalog::from_products([
            product("Arrachera", "comida"),
            product("Ron Bacardi", "licores"),
            product("Coca Cola", "refrescos"),
        ]);
        ProductValidator::new(catalog, DrinkPairingEngine::new())
    }

    fn request(name: &str) -> ProductValidationRequest {
        ProductValidationRequest {
            product_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn name_is_required_and_must_exist() {
        let v = validator();
        let out = v.validate_product(&request(" ")).await.unwrap();
        assert!(!out.valid);
        assert_eq!(out.errors, vec!["product name is required"]);

        let out = v.validate_product(&request("Tacos")).await.unwrap();
        assert!(out.errors[0].contains("not found"));
        assert!(out.product.is_none());
    }

    #[tokio::test]
    async fn quantity_checks() {
        let v = validator().with_high_quantity_threshold(10);
        let mut req = request("Arrachera");
        req.quantity = Some(0);
        assert!(!v.validate_product(&req).await.unwrap().valid);

        req.quantity = Some(11);
        let out = v.validate_product(&req).await.unwrap();
        assert!(out.valid);
        assert_eq!(out.warnings.len(), 1);
    }

    #[tokio::test]
    async fn liquor_selection_goes_through_the_engine() {
        let v = validator();
        let mut req = request("Ron Bacardi");
        let out = v.validate_product(&req).await.unwrap();
        assert!(!out.valid);
        assert!(out.errors[0].contains("at least 1"));
        assert_eq!(out.drink_options.unwrap().max_count, 2);

        req.drinks = vec![DrinkSelection::new("Coca Cola", 1)];
        assert!(v.validate_product(&req).await.unwrap().valid);
    }

    #[tokio::test]
    async fn drinks_on_a_non_liquor_only_warn() {
        let v = validator();
        let mut req = request("Arrachera");
        req.drinks = vec![DrinkSelection::new("Hielos", 1)];
        let out = v.validate_product(&req).await.unwrap();
        assert!(out.valid);
        assert_eq!(out.warnings.len(), 1);
    }

    #[tokio::test]
    async fn cooking_terms() {
        let v = validator();
        let mut req = request("Arrachera");
        req.cooking_term = Some("Término Medio".to_string());
        assert!(v.validate_product(&req).await.unwrap().valid);

        req.cooking_term = Some("al carbón".to_string());
        assert!(!v.validate_product(&req).await.unwrap().valid);

        let mut req = request("Coca Cola");
        req.cooking_term = Some("crudo".to_string());
        let out = v.validate_product(&req).await.unwrap();
        assert_eq!(out.errors, vec!["only food can take a cooking term"]);
    }

    #[tokio::test]
    async fn lookups() {
        let v = validator();
        assert!(v.product_exists("ron bacardi").await.unwrap());
        assert!(v.drink_options_for("Tacos").await.unwrap().is_none());

        let result = v.validate_drink_selection_only("Tacos", &[]).await.unwrap();
        assert!(!result.is_valid());

        let info = v.product_info("Ron Bacardi").await.unwrap().unwrap();
        assert!(info.requires_drinks);
        assert_eq!((info.min_drinks, info.max_drinks), (1, 2));
        let info = v.product_info("Coca Cola").await.unwrap().unwrap();
        assert!(!info.requires_drinks);
        assert_eq!(info.max_drinks, 0);
    }
}
