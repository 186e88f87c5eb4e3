//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their attribute
//! values. `Money` and an order-line `Customization` are value objects; an order
//! line itself is an entity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// let a = Money::from_cents(1250);
/// let b = Money::from_f64(12.5)?;
/// assert_eq!(a, b); // equal by value
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
