//! Product catalog boundary.
//!
//! The order core only ever sees the `ProductCatalog` trait; the in-memory
//! adapter and the legacy-file mapping live behind it.

pub mod in_memory;
pub mod legacy;
pub mod r#trait;

pub use in_memory::InMemoryProductCatalog;
pub use r#trait::ProductCatalog;
