use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use comanda_core::{CustomerId, OrderId};
use comanda_orders::Order;

use super::r#trait::OrderStore;
use crate::error::{StoreError, poisoned};

#[derive(Debug, Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    current: Option<OrderId>,
}

/// In-memory order store with a single current-order slot.
///
/// Intended for tests/dev and single-terminal sessions.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    state: RwLock<State>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_count(&self) -> Result<usize, StoreError> {
        Ok(self.state.read().map_err(|_| poisoned())?.orders.len())
    }

    pub fn has_current_order(&self) -> Result<bool, StoreError> {
        Ok(self.state.read().map_err(|_| poisoned())?.current.is_some())
    }

    /// Drop every order and the current slot.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.orders.clear();
        state.current = None;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn current_order(&self) -> Result<Option<Order>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.current.and_then(|id| state.orders.get(&id).cloned()))
    }

    async fn create_order(&self, customer_id: Option<CustomerId>) -> Result<Order, StoreError> {
        let order = Order::create(customer_id);
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let id = order.id_typed();
        state.orders.insert(id, order.clone());
        state.current = Some(id);
        tracing::debug!(order_id = %id, "order created");
        Ok(order)
    }

    async fn save(&self, order: Order) -> Result<Order, StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.orders.insert(order.id_typed(), order.clone());
        Ok(order)
    }

    async fn clear_current_order(&self) -> Result<(), StoreError> {
        self.state.write().map_err(|_| poisoned())?.current = None;
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.orders.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let mut orders: Vec<Order> = state.orders.values().cloned().collect();
        orders.sort_by_key(|o| o.created_at());
        Ok(orders)
    }

    async fn delete(&self, id: OrderId) -> Result<bool, StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let existed = state.orders.remove(&id).is_some();
        if state.current == Some(id) {
            state.current = None;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_makes_the_order_current() {
        let store = InMemoryOrderStore::new();
        assert!(store.current_order().await.unwrap().is_none());

        let order = store.create_order(None).await.unwrap();
        let current = store.current_order().await.unwrap().unwrap();
        assert_eq!(current.id_typed(), order.id_typed());
        assert!(store.has_current_order().unwrap());
    }

    #[tokio::test]
    async fn clearing_the_slot_keeps_the_order() {
        let store = InMemoryOrderStore::new();
        let order = store.create_order(None).await.unwrap();
        store.clear_current_order().await.unwrap();

        assert!(store.current_order().await.unwrap().is_none());
        assert!(store.find_by_id(order.id_typed()).await.unwrap().is_some());
        assert_eq!(store.order_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn deleting_the_current_order_clears_the_slot() {
        let store = InMemoryOrderStore::new();
        let order = store.create_order(None).await.unwrap();
        assert!(store.delete(order.id_typed()).await.unwrap());
        assert!(!store.delete(order.id_typed()).await.unwrap());
        assert!(!store.has_current_order().unwrap());
    }

    #[tokio::test]
    async fn save_overwrites_without_touching_the_slot() {
        let store = InMemoryOrderStore::new();
        let first = store.create_order(None).await.unwrap();
        let mut second = Order::create(None);
        second.cancel().unwrap();
        store.save(second.clone()).await.unwrap();

        let current = store.current_order().await.unwrap().unwrap();
        assert_eq!(current.id_typed(), first.id_typed());
        assert_eq!(store.find_all().await.unwrap().len(), 2);

        store.reset().unwrap();
        assert_eq!(store.order_count().unwrap(), 0);
    }
}
