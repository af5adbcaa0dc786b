//! Product catalog types consumed by the cart.
//!
//! Products are referenced by the cart, never mutated by it; the cart only
//! relies on a product's identifier and unit price.

pub mod product;

pub use product::{Price, Product, ProductId};
