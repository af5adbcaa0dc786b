//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** domain objects defined entirely by their
/// attribute values: two with the same values are equal, and "modifying" one
/// means constructing a new one. A unit price is a value object; a product
/// is an entity (same id, same product, even after a rename).
///
/// The supertraits keep value objects cheap to copy, comparable by value and
/// printable in logs and test failures.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
