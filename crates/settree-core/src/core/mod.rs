//! # Core Module
//!
//! The hierarchical settings store and the types it is built from.
//!
//! - **Keys** ([`key`]) - String and integer keys, their iteration order, and the
//!   case-insensitive lookup wrapper.
//! - **Values** ([`value`]) - Scalars, shared list leaves, and nested nodes.
//! - **Plain trees** ([`plain`]) - The node-free mirror used for serialization and round-trips.
//! - **The store** ([`settings`]) - [`Settings`](settings::Settings) itself: lookup,
//!   auto-vivification, merging, copying and rendering.
//! - **Errors** ([`error`]) - Key resolution and type mismatch failures.

pub mod error;
pub mod key;
pub mod plain;
pub mod settings;
pub mod value;

#[cfg(test)]
mod proptests;
