use std::sync::Arc;

use comanda_core::{DomainError, DomainResult, Entity, Money, OrderItemId};
use comanda_drinks::DrinkSelection;
use comanda_products::Product;

use crate::customization::{Customization, CustomizationKind, same_customizations};

/// One line of an order.
///
/// Immutable: quantity and customization updates produce a new value with the
/// same id. The unit price is captured at construction so later catalog price
/// changes never alter an existing line.
#[derive(Debug, Clone)]
pub struct OrderItem {
    id: OrderItemId,
    product: Arc<Product>,
    quantity: u32,
    customizations: Vec<Customization>,
    unit_price: Money,
}

impl OrderItem {
    /// New line priced at the product's current price.
    pub fn new(
        product: Arc<Product>,
        quantity: u32,
        customizations: Vec<Customization>,
    ) -> DomainResult<Self> {
        let unit_price = product.price();
        Self::with_unit_price(product, quantity, customizations, unit_price)
    }

    pub fn with_unit_price(
        product: Arc<Product>,
        quantity: u32,
        customizations: Vec<Customization>,
        unit_price: Money,
    ) -> DomainResult<Self> {
        ensure_positive(quantity)?;
        Ok(Self {
            id: OrderItemId::new(),
            product,
            quantity,
            customizations,
            unit_price,
        })
    }

    pub fn id_typed(&self) -> OrderItemId {
        self.id
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn customizations(&self) -> &[Customization] {
        &self.customizations
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// unit price × quantity, plus every customization surcharge × quantity.
    pub fn subtotal(&self) -> DomainResult<Money> {
        let base = self.unit_price.times(self.quantity)?;
        self.customizations
            .iter()
            .filter_map(Customization::additional_cost)
            .try_fold(base, |acc, cost| acc.add(&cost.times(self.quantity)?))
    }

    pub fn with_quantity(&self, quantity: u32) -> DomainResult<Self> {
        ensure_positive(quantity)?;
        Ok(Self {
            quantity,
            ..self.clone()
        })
    }

    pub fn with_customizations(&self, customizations: Vec<Customization>) -> Self {
        Self {
            customizations,
            ..self.clone()
        }
    }

    /// Same product and the same customization multiset.
    pub fn is_same_line_as(&self, product: &Product, customizations: &[Customization]) -> bool {
        self.product.id_typed() == product.id_typed()
            && same_customizations(&self.customizations, customizations)
    }

    pub fn selected_drinks(&self) -> impl Iterator<Item = &Customization> {
        self.customizations.iter().filter(|c| c.is_drink())
    }

    pub fn cooking_term(&self) -> Option<&str> {
        self.customizations
            .iter()
            .find(|c| c.kind() == CustomizationKind::CookingTerm)
            .map(Customization::value)
    }

    pub fn special_requests(&self) -> Vec<&str> {
        self.customizations
            .iter()
            .filter(|c| c.kind() == CustomizationKind::SpecialRequest)
            .map(Customization::value)
            .collect()
    }

    pub fn has_customizations(&self) -> bool {
        !self.customizations.is_empty()
    }

    pub fn has_drink_selection(&self) -> bool {
        self.selected_drinks().next().is_some()
    }

    /// Drink customizations parsed back into selections.
    pub fn drink_selections(&self) -> DomainResult<Vec<DrinkSelection>> {
        self.selected_drinks()
            .map(|c| {
                let quantity = c.value().trim().parse::<u32>().map_err(|_| {
                    DomainError::rule_violation(format!(
                        "drink quantity is not a number for {}: {:?}",
                        c.name(),
                        c.value()
                    ))
                })?;
                Ok(DrinkSelection::new(c.name(), quantity))
            })
            .collect()
    }

    pub fn total_drinks_count(&self) -> DomainResult<u64> {
        Ok(self
            .drink_selections()?
            .iter()
            .map(|s| u64::from(s.quantity))
            .sum())
    }
}

fn ensure_positive(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::invalid_quantity(
            "item quantity must be greater than zero",
        ));
    }
    Ok(())
}

impl Entity for OrderItem {
    type Id = OrderItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for OrderItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OrderItem {}

impl core::fmt::Display for OrderItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x {}", self.quantity, self.product.name())?;
        if !self.customizations.is_empty() {
            let parts: Vec<String> = self.customizations.iter().map(|c| c.to_string()).collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        match self.subtotal() {
            Ok(subtotal) => write!(f, " - {subtotal}"),
            Err(_) => f.write_str(" - n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, cents: u64) -> Arc<Product> {
        Arc::new(Product::try_from_parts(name, name, category, Money::from_cents(cents), "").unwrap())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = OrderItem::new(product("Pizza", "comida", 15000), 0, vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    #[test]
    fn subtotal_includes_surcharges_per_unit() {
        let extra = Customization::special_request("extra queso")
            .with_additional_cost(Money::from_cents(2000));
        let item = OrderItem::new(product("Pizza", "comida", 15000), 3, vec![extra]).unwrap();
        assert_eq!(item.subtotal().unwrap(), Money::from_cents(51000));
    }

    #[test]
    fn unit_price_is_a_snapshot() {
        let item = OrderItem::with_unit_price(
            product("Pizza", "comida", 15000),
            1,
            vec![],
            Money::from_cents(12000),
        )
        .unwrap();
        assert_eq!(item.unit_price(), Money::from_cents(12000));
        assert_eq!(item.subtotal().unwrap(), Money::from_cents(12000));
    }

    #[test]
    fn updates_preserve_identity() {
        let item = OrderItem::new(product("Ron Bacardi", "licores", 9000), 1, vec![]).unwrap();
        let more = item.with_quantity(4).unwrap();
        assert_eq!(more, item);
        assert_eq!(more.quantity(), 4);
        assert_eq!(more.unit_price(), item.unit_price());
        assert!(item.with_quantity(0).is_err());

        let mixed = item.with_customizations(vec![Customization::drink("Coca Cola", 1)]);
        assert!(mixed.same_identity_as(&item));
        assert!(mixed.has_drink_selection());
        assert!(!item.has_customizations());
    }

    #[test]
    fn with_quantity_is_idempotent() {
        let item = OrderItem::new(product("Sopa", "comida", 8000), 2, vec![]).unwrap();
        let once = item.with_quantity(5).unwrap();
        let twice = once.with_quantity(5).unwrap();
        assert_eq!(once.quantity(), twice.quantity());
        assert_eq!(once.customizations(), twice.customizations());
        assert_eq!(twice.product().id_typed(), item.product().id_typed());
    }

    #[test]
    fn drink_customizations_parse_back_to_selections() {
        let item = OrderItem::new(
            product("Ron Bacardi", "licores", 9000),
            1,
            vec![
                Customization::drink("Coca Cola", 1),
                Customization::drink("Hielos", 1),
                Customization::special_request("vaso alto"),
            ],
        )
        .unwrap();
        assert_eq!(item.total_drinks_count().unwrap(), 2);
        assert_eq!(item.drink_selections().unwrap()[0], DrinkSelection::new("Coca Cola", 1));
        assert_eq!(item.special_requests(), vec!["vaso alto"]);
        assert_eq!(item.cooking_term(), None);
    }

    #[test]
    fn malformed_drink_quantity_is_a_rule_violation() {
        let broken = Customization::new(CustomizationKind::Drink, "Sprite", "dos");
        let item = OrderItem::new(product("Ron Bacardi", "licores", 9000), 1, vec![broken]).unwrap();
        assert!(matches!(
            item.total_drinks_count(),
            Err(DomainError::RuleViolation(_))
        ));
    }

    #[test]
    fn display_lists_customizations_and_subtotal() {
        let item = OrderItem::new(
            product("Arrachera", "comida", 25000),
            2,
            vec![Customization::cooking_term("término medio")],
        )
        .unwrap();
        assert_eq!(
            item.to_string(),
            "2x Arrachera (Término de cocción: término medio) - $500.00"
        );
    }
}
