//! `stockbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage concerns):
//! opaque record identifiers and the loosely-typed quantity scalar with its
//! numeric-coercion policy.

pub mod id;
pub mod quantity;

pub use id::EntityId;
pub use quantity::RawQuantity;
