//! Ticket replay: price a list of product selections against a catalog.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use comanda_drinks::DrinkRules;
use comanda_infra::{OrderService, OrderStore, OrderSummary, ProductCatalog, ProductSelection};

/// A ticket file: selections in the order they were rung up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub items: Vec<ProductSelection>,
    /// Close the order once every item is added.
    #[serde(default)]
    pub complete: bool,
}

pub fn load_ticket(path: &Path) -> anyhow::Result<Ticket> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading ticket {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing ticket {}", path.display()))
}

/// Add every selection to the current order and summarise the result.
pub async fn run_ticket<C, S, R>(
    service: &OrderService<C, S, R>,
    ticket: &Ticket,
) -> anyhow::Result<OrderSummary>
where
    C: ProductCatalog,
    S: OrderStore,
    R: DrinkRules,
{
    for (line, selection) in ticket.items.iter().enumerate() {
        service
            .add_product(selection)
            .await
            .with_context(|| format!("ticket line {}: {}", line + 1, selection.product_name))?;
    }

    if ticket.complete {
        let order = service.complete_current_order().await?;
        tracing::info!(order_id = %order.id_typed(), "ticket closed");
        return Ok(OrderSummary::from_order(&order)?);
    }
    Ok(service.order_summary().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comanda_core::Money;
    use comanda_drinks::DrinkPairingEngine;
    use comanda_infra::catalog::legacy;
    use comanda_infra::{InMemoryOrderStore, InMemoryProductCatalog};

    fn service() -> OrderService<InMemoryProductCatalog, InMemoryOrderStore, DrinkPairingEngine> {
        let menu = r#"{
            "licores": [{"nombre": "Whisky Buchanan's", "precioCopa": "$120"}],
            "pizzas": [{"nombre": "Pizza Hawaiana", "precio": "$180"}]
        }"#;
        let catalog = InMemoryProductCatalog::from_products(legacy::parse_catalog(menu).unwrap());
        OrderService::new(catalog, InMemoryOrderStore::new(), DrinkPairingEngine::new())
    }

    #[tokio::test]
    async fn replays_and_closes_a_ticket() {
        let ticket: Ticket = serde_json::from_str(
            r#"{
                "items": [
                    {"product_name": "Pizza Hawaiana", "quantity": 2},
                    {"product_name": "Whisky Buchanan's", "drinks": [{"drink_name": "Hielos", "quantity": 1}]}
                ],
                "complete": true
            }"#,
        )
        .unwrap();

        let summary = run_ticket(&service(), &ticket).await.unwrap();
        assert_eq!(summary.total, Money::from_cents(48000));
        assert_eq!(summary.item_count, 3);
        assert!(!summary.can_be_completed);
    }

    #[tokio::test]
    async fn failing_line_is_named() {
        let ticket = Ticket {
            items: vec![ProductSelection::new("Whisky Buchanan's", 1)],
            complete: false,
        };
        let err = run_ticket(&service(), &ticket).await.unwrap_err();
        assert!(format!("{err:#}").contains("ticket line 1: Whisky Buchanan's"));
    }
}
