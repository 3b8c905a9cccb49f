//! `stockroom-core` — domain building blocks shared by the inventory crates.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod error;
pub mod item;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use item::{ItemName, Quantity};
pub use value_object::ValueObject;
