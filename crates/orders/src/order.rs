use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use comanda_core::{
    AggregateRoot, CustomerId, DomainError, DomainResult, Money, OrderId, OrderItemId,
};

use crate::customization::Customization;
use crate::item::OrderItem;

/// Order status lifecycle: draft, then exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: Order.
///
/// Owns its lines exclusively. Every mutation builds the new line list and
/// total first and only then swaps them in, so a failed operation leaves the
/// order exactly as it was.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    customer_id: Option<CustomerId>,
    items: Vec<OrderItem>,
    total: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Order {
    /// A fresh, empty draft.
    pub fn create(customer_id: Option<CustomerId>) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            customer_id,
            items: Vec::new(),
            total: Money::ZERO,
            status: OrderStatus::Draft,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_draft(&self) -> bool {
        self.status == OrderStatus::Draft
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    pub fn can_be_completed(&self) -> bool {
        self.is_draft() && !self.is_empty()
    }

    pub fn find_item(&self, item_id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id_typed() == item_id)
    }

    /// Add a line, merging into an existing line with the same product and
    /// customization set.
    pub fn add_item(&mut self, item: OrderItem) -> DomainResult<()> {
        self.ensure_draft("add items to")?;

        let mut items = self.items.clone();
        match items
            .iter()
            .position(|existing| existing.is_same_line_as(item.product(), item.customizations()))
        {
            Some(idx) => {
                let merged = merge_quantities(&items[idx], item.quantity())?;
                items[idx] = merged;
            }
            None => items.push(item),
        }
        self.replace_items(items)
    }

    /// Returns `false` when no line has this id.
    pub fn remove_item(&mut self, item_id: OrderItemId) -> DomainResult<bool> {
        self.ensure_draft("remove items from")?;

        if self.find_item(item_id).is_none() {
            return Ok(false);
        }
        let items = self
            .items
            .iter()
            .filter(|i| i.id_typed() != item_id)
            .cloned()
            .collect();
        self.replace_items(items)?;
        Ok(true)
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn update_item_quantity(&mut self, item_id: OrderItemId, quantity: i64) -> DomainResult<bool> {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }
        self.ensure_draft("update items in")?;

        let quantity = u32::try_from(quantity).map_err(|_| {
            DomainError::invalid_quantity(format!("item quantity too large: {quantity}"))
        })?;
        let Some(idx) = self.position_of(item_id) else {
            return Ok(false);
        };
        let mut items = self.items.clone();
        items[idx] = items[idx].with_quantity(quantity)?;
        self.replace_items(items)?;
        Ok(true)
    }

    /// Replace a line's customizations. If the line then matches another line,
    /// the two are merged into the earlier one.
    pub fn update_item_customizations(
        &mut self,
        item_id: OrderItemId,
        customizations: Vec<Customization>,
    ) -> DomainResult<bool> {
        self.ensure_draft("update items in")?;

        let Some(idx) = self.position_of(item_id) else {
            return Ok(false);
        };
        let updated = self.items[idx].with_customizations(customizations);

        let twin = self.items.iter().enumerate().position(|(other, existing)| {
            other != idx && existing.is_same_line_as(updated.product(), updated.customizations())
        });

        let mut items = self.items.clone();
        match twin {
            Some(twin) => {
                let (keep, drop) = if twin < idx { (twin, idx) } else { (idx, twin) };
                let merged = if keep == idx {
                    merge_quantities(&updated, items[twin].quantity())?
                } else {
                    merge_quantities(&items[twin], updated.quantity())?
                };
                items[keep] = merged;
                items.remove(drop);
            }
            None => items[idx] = updated,
        }
        self.replace_items(items)?;
        Ok(true)
    }

    /// draft → completed; requires at least one line.
    pub fn complete(&mut self) -> DomainResult<()> {
        self.ensure_draft("complete")?;
        if self.items.is_empty() {
            return Err(DomainError::invalid_transition(
                "cannot complete an order without items",
            ));
        }
        self.status = OrderStatus::Completed;
        self.touch();
        Ok(())
    }

    /// draft → cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.ensure_draft("cancel")?;
        self.status = OrderStatus::Cancelled;
        self.touch();
        Ok(())
    }

    /// Drop every line, staying in draft.
    pub fn clear(&mut self) -> DomainResult<()> {
        self.ensure_draft("clear")?;
        self.replace_items(Vec::new())
    }

    fn ensure_draft(&self, action: &str) -> DomainResult<()> {
        if !self.is_draft() {
            return Err(DomainError::invalid_transition(format!(
                "cannot {action} a {} order",
                self.status
            )));
        }
        Ok(())
    }

    fn position_of(&self, item_id: OrderItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id_typed() == item_id)
    }

    fn replace_items(&mut self, items: Vec<OrderItem>) -> DomainResult<()> {
        let total = compute_total(&items)?;
        self.items = items;
        self.total = total;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

fn merge_quantities(line: &OrderItem, added: u32) -> DomainResult<OrderItem> {
    let quantity = line
        .quantity()
        .checked_add(added)
        .ok_or_else(|| DomainError::invalid_quantity("merged item quantity overflowed"))?;
    line.with_quantity(quantity)
}

fn compute_total(items: &[OrderItem]) -> DomainResult<Money> {
    items
        .iter()
        .try_fold(Money::ZERO, |acc, item| acc.add(&item.subtotal()?))
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order {} [{}] {} item(s) - {}",
            self.id,
            self.status,
            self.item_count(),
            self.total
        )
    }
}
