//! Orders domain module.
//!
//! The order aggregate, its lines and their customizations. Pure domain logic
//! with no IO; the infra crate coordinates catalogs, stores and drink rules
//! around it.

pub mod customization;
pub mod item;
pub mod order;

pub use customization::{Customization, CustomizationKind};
pub use item::OrderItem;
pub use order::{Order, OrderStatus};
