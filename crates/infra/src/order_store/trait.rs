use std::sync::Arc;

use async_trait::async_trait;

use comanda_core::{CustomerId, OrderId};
use comanda_orders::Order;

use crate::error::StoreError;

/// Persistence for orders plus the single "current order" slot of a session.
///
/// The store is the only arbiter of which order is current; callers never
/// keep their own notion of it.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// The order in progress, if any.
    async fn current_order(&self) -> Result<Option<Order>, StoreError>;

    /// Create a new draft and make it the current order.
    async fn create_order(&self, customer_id: Option<CustomerId>) -> Result<Order, StoreError>;

    /// Insert or overwrite an order. Does not change which order is current.
    async fn save(&self, order: Order) -> Result<Order, StoreError>;

    /// Forget the current order (the order itself stays stored).
    async fn clear_current_order(&self) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Returns `false` when no such order exists.
    async fn delete(&self, id: OrderId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn current_order(&self) -> Result<Option<Order>, StoreError> {
        (**self).current_order().await
    }

    async fn create_order(&self, customer_id: Option<CustomerId>) -> Result<Order, StoreError> {
        (**self).create_order(customer_id).await
    }

    async fn save(&self, order: Order) -> Result<Order, StoreError> {
        (**self).save(order).await
    }

    async fn clear_current_order(&self) -> Result<(), StoreError> {
        (**self).clear_current_order().await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        (**self).find_all().await
    }

    async fn delete(&self, id: OrderId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
