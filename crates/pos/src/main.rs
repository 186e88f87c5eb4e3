use std::path::PathBuf;

use anyhow::Context;

use comanda_drinks::DrinkPairingEngine;
use comanda_infra::catalog::legacy;
use comanda_infra::config::CATALOG_PATH_VAR;
use comanda_infra::{ComandaConfig, InMemoryOrderStore, OrderService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ComandaConfig::from_env().context("reading configuration")?;
    comanda_observability::init_with(config.log_format);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (catalog_path, ticket_path) = match args.as_slice() {
        [catalog, ticket] => (PathBuf::from(catalog), PathBuf::from(ticket)),
        [ticket] => {
            let catalog = config.catalog_path.clone().with_context(|| {
                format!("no catalog given and {CATALOG_PATH_VAR} is not set")
            })?;
            (catalog, PathBuf::from(ticket))
        }
        _ => anyhow::bail!("usage: comanda-pos [catalog.json] <ticket.json>"),
    };

    tracing::info!(catalog = %catalog_path.display(), ticket = %ticket_path.display(), "replaying ticket");
    let catalog = legacy::load_catalog(&catalog_path)?;
    let ticket = comanda_pos::load_ticket(&ticket_path)?;

    let service = OrderService::new(catalog, InMemoryOrderStore::new(), DrinkPairingEngine::new());
    let summary = comanda_pos::run_ticket(&service, &ticket).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
