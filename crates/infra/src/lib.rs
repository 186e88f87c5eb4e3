//! Infrastructure layer: collaborator boundaries, adapters, configuration and
//! the order orchestration that ties them to the domain.

pub mod catalog;
pub mod config;
pub mod error;
pub mod order_store;
pub mod service;
pub mod validation;

pub use catalog::{InMemoryProductCatalog, ProductCatalog};
pub use config::{ComandaConfig, ConfigError};
pub use error::StoreError;
pub use order_store::{InMemoryOrderStore, OrderStore};
pub use service::{OrderService, OrderSummary, ProductSelection, ServiceError, ServiceResult};
pub use validation::{ProductValidation, ProductValidationRequest, ProductValidator};
