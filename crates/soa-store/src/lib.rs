//! `soa-store` — Structure-of-Arrays column storage.
//!
//! A `SoaStore<(A, B, C)>` behaves like a `Vec<(A, B, C)>` whose fields live in
//! three separate contiguous `Vec`s, so bulk passes over one field touch only
//! that field's memory.
//!
//! ```rust
//! use soa_store::SoaStore;
//!
//! let mut store: SoaStore<(i32, String)> = SoaStore::new();
//! store.push((5, "x".to_string()));
//! store.push((7, "y".to_string()));
//!
//! store.erase(0).unwrap();            // order-preserving
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.get::<0>(0), Ok(&7));
//! assert_eq!(store.array::<1>(), &["y"]);
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                     |
//! |---------------|----------------------------------------------|
//! | [`store`]     | `SoaStore` (columns + structural operations) |
//! | [`builder`]   | `SoaStoreBuilder` (fluent construction)      |
//!
//! Not thread-safe for concurrent mutation: every mutating method takes
//! `&mut self`, so a store is either written by one owner or read by many.

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::SoaStoreBuilder;
pub use soa_core::{CloneRow, Column, DefaultRow, Row, SoaError, SoaResult};
pub use store::SoaStore;
