//! `comanda-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod validation;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, OrderId, OrderItemId, ProductId};
pub use money::Money;
pub use validation::ValidationResult;
pub use value_object::ValueObject;
