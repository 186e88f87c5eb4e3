//! Order orchestration (application-level coordination).
//!
//! `OrderService` is the glue between the order aggregate and its
//! collaborators:
//!
//! ```text
//! ProductSelection
//!   ↓
//! 1. Resolve (or create) the current order from the store
//!   ↓
//! 2. Resolve the product from the catalog
//!   ↓
//! 3. Validate drink pairing; reject before building a line
//!   ↓
//! 4. Mutate the aggregate
//!   ↓
//! 5. Persist (only when something changed)
//! ```
//!
//! It owns no invariants of its own; everything it enforces comes from the
//! domain crates. Collaborators are passed in explicitly at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use comanda_core::{DomainError, Money, OrderId, OrderItemId};
use comanda_drinks::{DrinkRules, DrinkSelection};
use comanda_orders::{Customization, Order, OrderItem, OrderStatus};

use crate::catalog::ProductCatalog;
use crate::error::StoreError;
use crate::order_store::OrderStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn default_quantity() -> u32 {
    1
}

/// A customer's pick from the menu, before it becomes an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub drinks: Vec<DrinkSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_term: Option<String>,
    #[serde(default)]
    pub special_requests: Vec<String>,
}

impl ProductSelection {
    pub fn new(product_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            drinks: Vec::new(),
            cooking_term: None,
            special_requests: Vec::new(),
        }
    }

    pub fn with_drink(mut self, drink_name: impl Into<String>, quantity: u32) -> Self {
        self.drinks.push(DrinkSelection::new(drink_name, quantity));
        self
    }

    pub fn with_cooking_term(mut self, term: impl Into<String>) -> Self {
        self.cooking_term = Some(term.into());
        self
    }

    pub fn with_special_request(mut self, request: impl Into<String>) -> Self {
        self.special_requests.push(request.into());
        self
    }

    /// Drinks first, then the cooking term, then special requests.
    pub fn customizations(&self) -> Vec<Customization> {
        let drinks = self
            .drinks
            .iter()
            .map(|d| Customization::drink(d.drink_name.clone(), d.quantity));
        let term = self
            .cooking_term
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Customization::cooking_term(t.trim()));
        let requests = self
            .special_requests
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| Customization::special_request(r.trim()));
        drinks.chain(term).chain(requests).collect()
    }
}

/// One line of an [`OrderSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineSummary {
    pub item_id: OrderItemId,
    pub product: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    pub customizations: Vec<Customization>,
}

/// Read-only view of an order for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub item_count: u64,
    pub total: Money,
    pub can_be_completed: bool,
    pub lines: Vec<OrderLineSummary>,
}

impl OrderSummary {
    pub fn from_order(order: &Order) -> Result<Self, DomainError> {
        let lines = order
            .items()
            .iter()
            .map(|item| {
                Ok(OrderLineSummary {
                    item_id: item.id_typed(),
                    product: item.product().name().to_string(),
                    quantity: item.quantity(),
                    unit_price: item.unit_price(),
                    subtotal: item.subtotal()?,
                    customizations: item.customizations().to_vec(),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self {
            order_id: order.id_typed(),
            status: order.status(),
            item_count: order.item_count(),
            total: order.total(),
            can_be_completed: order.can_be_completed(),
            lines,
        })
    }
}

/// Use-case layer over a catalog, an order store and the drink rules.
#[derive(Debug)]
pub struct OrderService<C, S, R> {
    catalog: C,
    store: S,
    rules: R,
}

impl<C, S, R> OrderService<C, S, R> {
    pub fn new(catalog: C, store: S, rules: R) -> Self {
        Self {
            catalog,
            store,
            rules,
        }
    }

    pub fn into_parts(self) -> (C, S, R) {
        (self.catalog, self.store, self.rules)
    }
}

impl<C, S, R> OrderService<C, S, R>
where
    C: ProductCatalog,
    S: OrderStore,
    R: DrinkRules,
{
    /// The current order, creating an empty draft when there is none.
    pub async fn current_order(&self) -> ServiceResult<Order> {
        if let Some(order) = self.store.current_order().await? {
            return Ok(order);
        }
        Ok(self.store.create_order(None).await?)
    }

    /// Add a product to the current order. Returns the saved order.
    pub async fn add_product(&self, selection: &ProductSelection) -> ServiceResult<Order> {
        let name = selection.product_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name is required").into());
        }
        let product = self
            .catalog
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("product not found: {name}")))?;

        let check = self
            .rules
            .validate_drink_selection(&product, &selection.drinks);
        for warning in check.warnings() {
            tracing::warn!(product = %product.name(), warning = %warning, "drink selection warning");
        }
        check.into_result()?;

        let item = OrderItem::new(product, selection.quantity, selection.customizations())?;
        let item_id = item.id_typed();

        let mut order = self.current_order().await?;
        order.add_item(item)?;
        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = %order.id_typed(),
            product = %name,
            item_id = %item_id,
            quantity = selection.quantity,
            total = %order.total(),
            "product added to order"
        );
        Ok(order)
    }

    /// `false` when the current order has no such line.
    pub async fn remove_item(&self, item_id: OrderItemId) -> ServiceResult<bool> {
        let mut order = self.current_order().await?;
        let removed = order.remove_item(item_id)?;
        if removed {
            self.store.save(order).await?;
            tracing::info!(item_id = %item_id, "item removed from order");
        }
        Ok(removed)
    }

    /// Negative quantities are rejected; zero removes the line.
    pub async fn update_item_quantity(
        &self,
        item_id: OrderItemId,
        quantity: i64,
    ) -> ServiceResult<bool> {
        if quantity < 0 {
            return Err(DomainError::invalid_quantity("quantity cannot be negative").into());
        }
        let mut order = self.current_order().await?;
        let updated = order.update_item_quantity(item_id, quantity)?;
        if updated {
            self.store.save(order).await?;
            tracing::info!(item_id = %item_id, quantity, "item quantity updated");
        }
        Ok(updated)
    }

    /// Replace a line's customizations, re-validating its drinks.
    pub async fn update_item_customizations(
        &self,
        item_id: OrderItemId,
        customizations: Vec<Customization>,
    ) -> ServiceResult<bool> {
        let mut order = self.current_order().await?;
        let Some(item) = order.find_item(item_id) else {
            return Ok(false);
        };

        let candidate = item.with_customizations(customizations.clone());
        let drinks = candidate.drink_selections()?;
        self.rules
            .validate_drink_selection(candidate.product(), &drinks)
            .into_result()?;

        let updated = order.update_item_customizations(item_id, customizations)?;
        if updated {
            self.store.save(order).await?;
            tracing::info!(item_id = %item_id, "item customizations updated");
        }
        Ok(updated)
    }

    /// Complete the current order and release the current slot.
    pub async fn complete_current_order(&self) -> ServiceResult<Order> {
        let mut order = self.current_order().await?;
        if !order.can_be_completed() {
            return Err(DomainError::invalid_transition(
                "order cannot be completed: it must be a draft with items",
            )
            .into());
        }
        order.complete()?;
        let order = self.store.save(order).await?;
        self.store.clear_current_order().await?;
        tracing::info!(order_id = %order.id_typed(), total = %order.total(), "order completed");
        Ok(order)
    }

    /// Cancel the current order and release the current slot.
    pub async fn cancel_current_order(&self) -> ServiceResult<Order> {
        let mut order = self.current_order().await?;
        order.cancel()?;
        let order = self.store.save(order).await?;
        self.store.clear_current_order().await?;
        tracing::info!(order_id = %order.id_typed(), "order cancelled");
        Ok(order)
    }

    /// Empty the current order; it stays current and in draft.
    pub async fn clear_current_order(&self) -> ServiceResult<Order> {
        let mut order = self.current_order().await?;
        order.clear()?;
        let order = self.store.save(order).await?;
        tracing::info!(order_id = %order.id_typed(), "order cleared");
        Ok(order)
    }

    pub async fn order_summary(&self) -> ServiceResult<OrderSummary> {
        let order = self.current_order().await?;
        Ok(OrderSummary::from_order(&order)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_becomes_customizations_in_order() {
        let selection = ProductSelection::new("Arrachera", 1)
            .with_special_request("sin sal")
            .with_cooking_term(" término medio ")
            .with_special_request("  ");
        let customizations = selection.customizations();
        assert_eq!(
            customizations,
            vec![
                Customization::cooking_term("término medio"),
                Customization::special_request("sin sal"),
            ]
        );

        let drinks = ProductSelection::new("Ron Bacardi", 1).with_drink("Coca Cola", 1);
        assert_eq!(drinks.customizations(), vec![Customization::drink("Coca Cola", 1)]);
    }

    #[test]
    fn selection_json_defaults() {
        let selection: ProductSelection =
            serde_json::from_str(r#"{"product_name": "Pizza Hawaiana"}"#).unwrap();
        assert_eq!(selection, ProductSelection::new("Pizza Hawaiana", 1));
    }

    #[test]
    fn errors_convert_from_both_layers() {
        let domain: ServiceError = DomainError::not_found("x").into();
        assert!(matches!(domain, ServiceError::Domain(DomainError::NotFound(_))));
        let store: ServiceError = StoreError::Unavailable("down".into()).into();
        assert_eq!(store.to_string(), "store unavailable: down");
    }
}
