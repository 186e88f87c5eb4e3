use std::sync::Arc;

use async_trait::async_trait;

use comanda_core::{Money, ProductId};
use comanda_products::{Product, ProductCategory};

use crate::error::StoreError;

/// Read-only product lookup.
///
/// Implementations return fully-built products or `None`; a partially
/// populated product never crosses this boundary. Products are shared behind
/// an `Arc` so order lines can hold them without copying.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Case-insensitive exact match on the display name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Arc<Product>>, StoreError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Arc<Product>>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Arc<Product>>, StoreError>;

    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Arc<Product>>, StoreError>;

    /// Name or ingredient contains the term (case-insensitive).
    async fn search(&self, term: &str) -> Result<Vec<Arc<Product>>, StoreError>;

    /// Products listing any of the given ingredients.
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Arc<Product>>, StoreError>;

    /// Inclusive on both ends.
    async fn find_by_price_range(
        &self,
        min: Money,
        max: Money,
    ) -> Result<Vec<Arc<Product>>, StoreError>;

    async fn find_by_categories(
        &self,
        categories: &[ProductCategory],
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        let mut found = Vec::new();
        for category in categories {
            found.extend(self.find_by_category(*category).await?);
        }
        Ok(found)
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}

#[async_trait]
impl<C> ProductCatalog for Arc<C>
where
    C: ProductCatalog + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> Result<Option<Arc<Product>>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Arc<Product>>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).find_all().await
    }

    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).find_by_category(category).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).search(term).await
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).find_by_ingredients(ingredients).await
    }

    async fn find_by_price_range(
        &self,
        min: Money,
        max: Money,
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).find_by_price_range(min, max).await
    }

    async fn find_by_categories(
        &self,
        categories: &[ProductCategory],
    ) -> Result<Vec<Arc<Product>>, StoreError> {
        (**self).find_by_categories(categories).await
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        (**self).exists(name).await
    }
}
