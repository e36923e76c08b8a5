//! `soa-mapped` — keyed access on top of `soa-store`.
//!
//! [`MappedSoa<K, R>`] wraps a [`SoaStore<R>`](soa_store::SoaStore) and gives
//! each row an external key with O(1) `has`/`add`/`remove`/lookup.  Removal
//! swaps the last row into the hole, so storage stays dense but row order is
//! not preserved.
//!
//! ```rust
//! use soa_mapped::MappedSoa;
//!
//! let mut entities: MappedSoa<&str, (i32,)> = MappedSoa::new();
//! entities.add("a", (1,)).unwrap();
//! entities.add("b", (2,)).unwrap();
//! entities.add("c", (3,)).unwrap();
//! assert_eq!(entities.get_index("b"), Ok(1));
//!
//! entities.remove("a");
//! assert_eq!(entities.len(), 2);
//! assert_eq!(entities.get_index("c"), Ok(0));   // swapped in from the end
//! assert_eq!(entities.get_index("b"), Ok(1));
//! assert!(!entities.has("a"));
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the key → index map.   |

pub mod mapped;


pub use mapped::MappedSoa;
pub use soa_core::{CloneRow, Column, DefaultRow, Row, SoaError, SoaResult};
