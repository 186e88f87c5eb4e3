use serde::{Deserialize, Serialize};

use comanda_core::{DomainError, DomainResult, Entity, Money, ProductId, ValueObject};

use crate::category::ProductCategory;
use crate::classifier::{self, LiquorType};

const MAX_NAME_LEN: usize = 100;

/// Display name of a product. Compared case-insensitively.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if value.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "product name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test.
    pub fn contains(&self, term: &str) -> bool {
        self.0.to_lowercase().contains(&term.to_lowercase())
    }
}

impl PartialEq for ProductName {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl ValueObject for ProductName {}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

/// A menu product as resolved from the catalog.
///
/// Immutable once built; order lines share it behind an `Arc`. Flags such as
/// "is a bottle" are derived from name and category on demand and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    category: ProductCategory,
    price: Money,
    #[serde(default)]
    ingredients: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: ProductName,
        category: ProductCategory,
        price: Money,
        ingredients: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name,
            category,
            price,
            ingredients: ingredients.into(),
        }
    }

    /// Build a product from raw parts, validating each one.
    pub fn try_from_parts(
        id: &str,
        name: &str,
        category: &str,
        price: Money,
        ingredients: &str,
    ) -> DomainResult<Self> {
        Ok(Self::new(
            ProductId::new(id)?,
            ProductName::new(name)?,
            category.parse()?,
            price,
            ingredients,
        ))
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn has_ingredient(&self, ingredient: &str) -> bool {
        self.ingredients
            .to_lowercase()
            .contains(&ingredient.to_lowercase())
    }

    pub fn is_liquor(&self) -> bool {
        classifier::is_liquor(self.category)
    }

    pub fn is_jagermeister(&self) -> bool {
        classifier::is_jagermeister(self.name.as_str())
    }

    pub fn is_bottle(&self) -> bool {
        classifier::is_bottle(self.name.as_str())
    }

    pub fn is_digestivo(&self) -> bool {
        classifier::is_digestivo(self.name.as_str(), self.category)
    }

    pub fn is_espumoso(&self) -> bool {
        classifier::is_espumoso(self.name.as_str(), self.category)
    }

    pub fn is_beverage(&self) -> bool {
        self.category.is_beverage()
    }

    pub fn is_food(&self) -> bool {
        self.category.is_food()
    }

    pub fn is_cocktail(&self) -> bool {
        self.category.is_cocktail()
    }

    pub fn requires_drink_selection(&self) -> bool {
        classifier::requires_drink_selection(self.name.as_str(), self.category)
    }

    pub fn liquor_type(&self) -> LiquorType {
        classifier::liquor_type(self.name.as_str(), self.category)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.category, self.price)
    }
}
