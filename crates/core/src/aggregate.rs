//! Aggregate root trait.

/// Aggregate root marker + minimal interface.
///
/// An aggregate owns its children exclusively and is the only entry point for
/// mutating them, so its invariants can be checked in one place.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Bumped once per successful mutation; failed operations leave it untouched.
    fn version(&self) -> u64;
}
