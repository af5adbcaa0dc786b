//! Shopping-cart domain module.
//!
//! This crate contains the cart's business rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod cart;

pub use cart::{Cart, CartId, CartLine};
