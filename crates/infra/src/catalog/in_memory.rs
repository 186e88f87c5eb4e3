use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use comanda_core::{Money, ProductId};
use comanda_products::{Product, ProductCategory, ProductName};

use super::r#trait::ProductCatalog;
use crate::error::{StoreError, poisoned};

/// In-memory product catalog.
///
/// Intended for tests/dev and for catalogs loaded once from a file. Lookups are
/// linear scans in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<Vec<Arc<Product>>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(Arc::new).collect()),
        }
    }

    /// Add a product, replacing any existing product with the same id.
    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let product = Arc::new(product);
        match products
            .iter()
            .position(|p| p.id_typed() == product.id_typed())
        {
            Some(idx) => products[idx] = product,
            None => products.push(product),
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.products.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Result<Vec<Arc<Product>>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.iter().filter(|p| keep(p)).cloned().collect())
    }

    fn first(&self, keep: impl Fn(&Product) -> bool) -> Result<Option<Arc<Product>>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.iter().find(|p| keep(p)).cloned())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_by_name(&self, name: &str) -> Result<Option<Arc<Product>>, StoreError> {
        let Ok(wanted) = ProductName::new(name.trim()) else {
            return Ok(None);
        };
        self.first(|p| *p.name() == wanted)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Arc<Product>>, StoreError> {
        self.first(|p| p.id_typed() == id)
    }

    async fn find_all(&self) -> Result<Vec<Arc<Product>>, StoreError> {
        self.filtered(|_| true)
    }

    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        self.filtered(|p| p.category() == category)
    }

    async fn search(&self, term: &str) -> Result<Vec<Arc<Product>>, StoreError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.filtered(|p| p.name().contains(term) || p.has_ingredient(term))
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        self.filtered(|p| {
            ingredients
                .iter()
                .filter(|i| !i.trim().is_empty())
                .any(|i| p.has_ingredient(i.trim()))
        })
    }

    async fn find_by_price_range(
        &self,
        min: Money,
        max: Money,
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        self.filtered(|p| p.price() >= min && p.price() <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str, cents: u64, ingredients: &str) -> Product {
        Product::try_from_parts(id, name, category, Money::from_cents(cents), ingredients).unwrap()
    }

    fn catalog() -> InMemoryProductCatalog {
        InMemoryProductCatalog::from_products([
            product("1", "Pizza Hawaiana", "comida", 18000, "piña, jamón, queso"),
            product("2", "Ron Bacardi", "licores", 9000, ""),
            product("3", "Sopa de Tortilla", "comida", 8500, "tortilla, chile, queso"),
            product("4", "Coca Cola", "refrescos", 3500, ""),
        ])
    }

    fn names(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.name().as_str()).collect()
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive_exact() {
        let catalog = catalog();
        let found = catalog.find_by_name("ron bacardi").await.unwrap().unwrap();
        assert_eq!(found.id_typed().as_str(), "2");
        assert!(catalog.find_by_name("Ron").await.unwrap().is_none());
        assert!(catalog.find_by_name("  ").await.unwrap().is_none());
        assert!(catalog.exists("COCA COLA").await.unwrap());
    }

    #[tokio::test]
    async fn search_matches_names_and_ingredients() {
        let catalog = catalog();
        let found = catalog.search("queso").await.unwrap();
        assert_eq!(names(&found), vec!["Pizza Hawaiana", "Sopa de Tortilla"]);
        let found = catalog.search("bacardi").await.unwrap();
        assert_eq!(names(&found), vec!["Ron Bacardi"]);
    }

    #[tokio::test]
    async fn secondary_lookups() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_category(ProductCategory::Comida).await.unwrap().len(), 2);
        let drinks = catalog
            .find_by_categories(&[ProductCategory::Licores, ProductCategory::Refrescos])
            .await
            .unwrap();
        assert_eq!(drinks.len(), 2);

        let cheap = catalog
            .find_by_price_range(Money::from_cents(3500), Money::from_cents(9000))
            .await
            .unwrap();
        assert_eq!(names(&cheap), vec!["Ron Bacardi", "Sopa de Tortilla", "Coca Cola"]);

        let chile = catalog
            .find_by_ingredients(&["chile".to_string(), "mole".to_string()])
            .await
            .unwrap();
        assert_eq!(names(&chile), vec!["Sopa de Tortilla"]);
    }

    #[tokio::test]
    async fn insert_replaces_by_id() {
        let catalog = catalog();
        catalog
            .insert(product("2", "Ron Bacardi Blanco", "licores", 9500, ""))
            .unwrap();
        assert_eq!(catalog.len().unwrap(), 4);
        let id = ProductId::new("2").unwrap();
        let found = catalog.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.price(), Money::from_cents(9500));
    }
}
