//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities compare by identity. An updated copy that keeps the same id is the
/// same entity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
