//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// They are immutable: to "modify" one, construct a new one through its
/// validating constructor.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(9.5), Price(9.5));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
