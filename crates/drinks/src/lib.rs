//! Drink-pairing rules.
//!
//! Decides which mixers may accompany a liquor, how many, and under which
//! special constraints. Stateless and IO-free.

pub mod engine;
pub mod options;
pub mod rules;

pub use engine::{DrinkPairingEngine, DrinkRules};
pub use options::{DrinkOptions, DrinkSelection};
pub use rules::{DrinkProfile, DrinkRule, SpecialRule};
