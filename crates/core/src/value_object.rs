//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An [`ItemName`]
/// is one: two names with the same text denote the same stock line.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy around
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: useful in log lines and test failures
///
/// [`ItemName`]: crate::ItemName
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
