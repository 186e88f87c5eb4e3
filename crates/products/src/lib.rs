//! Products domain module.
//!
//! Catalog products, their categories, and the name/category-based classification
//! used to decide whether (and how) a liquor is served with mixers. Pure domain
//! logic: no IO, no storage.

pub mod category;
pub mod classifier;
pub mod product;

pub use category::ProductCategory;
pub use classifier::LiquorType;
pub use product::{Product, ProductName};
