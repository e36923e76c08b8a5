//! Fluent builder for a pre-sized [`SoaStore`].
//!
//! # Usage
//!
//! ```rust
//! use soa_store::SoaStoreBuilder;
//!
//! let store = SoaStoreBuilder::<(u32, f32, String)>::new()
//!     .capacity(1_024)
//!     .rows(10)
//!     .build();
//!
//! assert_eq!(store.len(), 10);
//! assert!(store.capacity() >= 1_024);
//!
//! // All rows start at `Default` values; write real data afterwards.
//! assert_eq!(store.array::<1>()[9], 0.0);
//! ```

use soa_core::{DefaultRow, Row};

use crate::SoaStore;

/// Fluent builder for [`SoaStore`].
///
/// Columns are allocated once at build time so later writes are indexed
/// assignments or pushes that do not reallocate.
pub struct SoaStoreBuilder<R: Row> {
    capacity: usize,
    rows:     usize,
    fill:     Option<fn(&mut R::Arrays, usize)>,
}

impl<R: Row> SoaStoreBuilder<R> {
    pub fn new() -> Self {
        Self {
            capacity: 0,
            rows:     0,
            fill:     None,
        }
    }

    /// Reserve room for `capacity` rows in every column.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Construct the store.
    ///
    /// Capacity is the larger of [`capacity`](Self::capacity) and
    /// [`rows`](Self::rows).
    pub fn build(self) -> SoaStore<R> {
        let mut store = SoaStore::with_capacity(self.capacity.max(self.rows));
        if let Some(fill) = self.fill {
            store.fill_with(fill, self.rows);
        }
        store
    }
}

impl<R: DefaultRow> SoaStoreBuilder<R> {
    /// Start with `rows` rows of `Default` values.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self.fill = Some(R::resize);
        self
    }
}

impl<R: Row> Default for SoaStoreBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
