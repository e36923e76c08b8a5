//! `MappedSoa` — a [`SoaStore`] addressed by external keys.
//!
//! # Design
//!
//! Two maps are kept as an exact bijection over the live rows:
//!
//! - `key_to_index`: hash map `K → row`, one entry per live key.
//! - `index_to_key`: `Vec<K>` with the same length as the store, so
//!   `index_to_key[i]` is the key owning row `i`.
//!
//! For every live `i`, `key_to_index[index_to_key[i]] == i`, and both maps
//! hold exactly `len()` entries.
//!
//! # Removal reorders rows
//!
//! [`MappedSoa::remove`] swaps the victim row with the last row and pops it,
//! so removal is O(1) and the store never has holes.  The cost is order: the
//! former last row now sits where the removed one was.  Code that walks rows
//! by raw index must not assume the order survives a `remove`; look rows up
//! by key instead.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use soa_core::{CloneRow, Column, DefaultRow, Row, SoaError, SoaResult};
use soa_store::SoaStore;
use tracing::{debug, trace};

#[cfg(not(feature = "fx-hash"))]
type KeyMap<K> = std::collections::HashMap<K, usize>;

#[cfg(feature = "fx-hash")]
type KeyMap<K> = rustc_hash::FxHashMap<K, usize>;

/// Column store with a stable key per row and O(1) key lookup and removal.
///
/// # Per-key lifecycle
///
/// `add` binds a key to a new row; `remove` unbinds it.  While bound, the
/// key's row index may change (when another key is removed, or on an explicit
/// [`swap`](Self::swap)), but the key always resolves to its own values.
pub struct MappedSoa<K, R: Row> {
    store:        SoaStore<R>,
    key_to_index: KeyMap<K>,
    index_to_key: Vec<K>,
}

impl<K, R> MappedSoa<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: Row,
{
    pub fn new() -> Self {
        Self {
            store:        SoaStore::new(),
            key_to_index: KeyMap::default(),
            index_to_key: Vec::new(),
        }
    }

    /// Empty container with room for `capacity` rows and keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store:        SoaStore::with_capacity(capacity),
            key_to_index: KeyMap::with_capacity_and_hasher(capacity, Default::default()),
            index_to_key: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// `true` if `key` is bound to a row.  O(1).
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.key_to_index.contains_key(key)
    }

    // ── Keyed mutation ────────────────────────────────────────────────────

    /// Bind `key` to a new row at the end of the store.
    ///
    /// Returns the new row index.
    ///
    /// # Errors
    ///
    /// [`SoaError::DuplicateKey`] if `key` is already bound; nothing changes.
    pub fn add(&mut self, key: K, row: R) -> SoaResult<usize> {
        if self.key_to_index.contains_key(&key) {
            return Err(SoaError::duplicate_key(&key));
        }
        let index = self.store.push(row);
        self.bind(key, index);
        Ok(index)
    }

    /// Replace `key`'s row in place, or [`add`](Self::add) it if absent.
    ///
    /// An existing key keeps its index.
    pub fn set(&mut self, key: K, row: R) -> SoaResult<usize> {
        match self.key_to_index.get(&key) {
            Some(&index) => {
                self.store.replace(index, row)?;
                Ok(index)
            }
            None => self.add(key, row),
        }
    }

    /// Unbind `key` and return its row, or `None` if it was not bound.
    ///
    /// O(1): the last row is swapped into the vacated slot before popping.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = *self.key_to_index.get(key)?;
        let last = self.len() - 1;
        if index != last {
            self.swap(index, last).ok()?;
            trace!(moved = ?self.index_to_key[index], from = last, to = index, "relocated row on remove");
        }

        let row = self.store.pop()?;
        self.index_to_key.pop();
        self.key_to_index.remove(key);
        Some(row)
    }

    /// Exchange rows `a` and `b`; both keys follow their data.
    pub fn swap(&mut self, a: usize, b: usize) -> SoaResult<()> {
        self.store.swap(a, b)?;
        if a == b {
            return Ok(());
        }

        self.index_to_key.swap(a, b);
        for index in [a, b] {
            if let Some(slot) = self.key_to_index.get_mut(&self.index_to_key[index]) {
                *slot = index;
            }
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Current row index of `key`.
    ///
    /// # Errors
    ///
    /// [`SoaError::KeyNotFound`] if `key` is not bound.
    pub fn get_index<Q>(&self, key: &Q) -> SoaResult<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.key_to_index
            .get(key)
            .copied()
            .ok_or_else(|| SoaError::key_not_found(&key))
    }

    /// Key owning row `index`.
    pub fn key_at(&self, index: usize) -> SoaResult<&K> {
        self.index_to_key.get(index).ok_or(SoaError::RowOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Column `N` of `key`'s row.
    pub fn get<const N: usize>(&self, key: &K) -> SoaResult<&<R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        let index = self.get_index(key)?;
        self.store.get::<N>(index)
    }

    pub fn get_mut<const N: usize>(&mut self, key: &K) -> SoaResult<&mut <R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        let index = self.get_index(key)?;
        self.store.get_mut::<N>(index)
    }

    /// Column `N` at raw row `index`.
    pub fn at<const N: usize>(&self, index: usize) -> SoaResult<&<R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        self.store.get::<N>(index)
    }

    pub fn at_mut<const N: usize>(&mut self, index: usize) -> SoaResult<&mut <R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        self.store.get_mut::<N>(index)
    }

    /// References to every column of `key`'s row.
    pub fn row<Q>(&self, key: &Q) -> SoaResult<R::Ref<'_>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let index = self.get_index(key)?;
        self.store.row(index)
    }

    pub fn row_mut<Q>(&mut self, key: &Q) -> SoaResult<R::Mut<'_>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let index = self.get_index(key)?;
        self.store.row_mut(index)
    }

    // ── Raw access ────────────────────────────────────────────────────────

    /// Whole column `N`, in row order.  Pair with [`keys`](Self::keys) to
    /// know which key owns each element.
    pub fn array<const N: usize>(&self) -> &[<R as Column<N>>::Elem]
    where
        R: Column<N>,
    {
        self.store.array::<N>()
    }

    pub fn array_mut<const N: usize>(&mut self) -> &mut [<R as Column<N>>::Elem]
    where
        R: Column<N>,
    {
        self.store.array_mut::<N>()
    }

    /// The index → key sequence: `keys()[i]` owns row `i`.
    pub fn keys(&self) -> &[K] {
        &self.index_to_key
    }

    /// `(key, row)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, R::Ref<'_>)> + '_ {
        self.index_to_key.iter().zip(self.store.iter())
    }

    /// Read-only view of the wrapped column store.
    pub fn store(&self) -> &SoaStore<R> {
        &self.store
    }

    // ── Bulk operations ───────────────────────────────────────────────────

    /// Make room for at least `total` rows and keys.
    pub fn reserve(&mut self, total: usize) {
        let additional = total.saturating_sub(self.len());
        self.store.reserve(total);
        self.key_to_index.reserve(additional);
        self.index_to_key.reserve(additional);
    }

    /// Drop every row at index `len` and above, unbinding their keys.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        for key in self.index_to_key.drain(len..) {
            self.key_to_index.remove(&key);
        }
        self.store.truncate(len);
        debug!(len, "truncated keyed store");
    }

    pub fn clear(&mut self) {
        self.key_to_index.clear();
        self.index_to_key.clear();
        self.store.clear();
    }

    /// Verify the key/index bijection and the column-length invariant.
    pub fn check_invariants(&self) -> SoaResult<()> {
        let len = self.len();
        if self.index_to_key.len() != len || self.key_to_index.len() != len {
            return Err(SoaError::Inconsistent(format!(
                "store has {len} rows, index_to_key {}, key_to_index {}",
                self.index_to_key.len(),
                self.key_to_index.len()
            )));
        }
        if !self.store.columns_consistent() {
            return Err(SoaError::Inconsistent("column lengths differ".into()));
        }
        for (index, key) in self.index_to_key.iter().enumerate() {
            match self.key_to_index.get(key) {
                Some(&mapped) if mapped == index => {}
                other => {
                    return Err(SoaError::Inconsistent(format!(
                        "row {index} owned by {key:?} but key maps to {other:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn bind(&mut self, key: K, index: usize) {
        self.index_to_key.push(key.clone());
        self.key_to_index.insert(key, index);
    }
}

impl<K, R> MappedSoa<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: CloneRow,
{
    /// Overwrite row `to` with a clone of row `from`.
    ///
    /// Only values move; key bindings are unchanged, so the key owning `to`
    /// now resolves to a copy of `from`'s data.
    pub fn copy(&mut self, from: usize, to: usize) -> SoaResult<()> {
        self.store.copy(from, to)
    }
}

impl<K, R> MappedSoa<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: DefaultRow,
{
    /// Bind `key` to a new row of `Default` values.
    pub fn add_default(&mut self, key: K) -> SoaResult<usize> {
        if self.key_to_index.contains_key(&key) {
            return Err(SoaError::duplicate_key(&key));
        }
        let index = self.store.push_default();
        self.bind(key, index);
        Ok(index)
    }

    /// Grow or shrink to exactly `len` rows.
    ///
    /// Shrinking unbinds the keys of the dropped rows.  Growing binds each new
    /// row `i` to `make_key(i)` and fills it with `Default` values.
    ///
    /// # Errors
    ///
    /// [`SoaError::DuplicateKey`] if a generated key is already bound or is
    /// generated twice.  Nothing changes in that case.
    pub fn resize<F>(&mut self, len: usize, mut make_key: F) -> SoaResult<()>
    where
        F: FnMut(usize) -> K,
    {
        let current = self.len();
        if len <= current {
            self.truncate(len);
            return Ok(());
        }

        let mut fresh: KeyMap<K> = KeyMap::with_capacity_and_hasher(len - current, Default::default());
        let mut keys = Vec::with_capacity(len - current);
        for index in current..len {
            let key = make_key(index);
            if self.key_to_index.contains_key(&key) || fresh.insert(key.clone(), index).is_some() {
                return Err(SoaError::duplicate_key(&key));
            }
            keys.push(key);
        }

        self.store.resize(len);
        self.index_to_key.extend(keys);
        self.key_to_index.extend(fresh);
        debug!(from = current, to = len, "resized keyed store");
        Ok(())
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl<K, R> Default for MappedSoa<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: Row,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> Clone for MappedSoa<K, R>
where
    K: Clone,
    R: CloneRow,
{
    fn clone(&self) -> Self {
        Self {
            store:        self.store.clone(),
            key_to_index: self.key_to_index.clone(),
            index_to_key: self.index_to_key.clone(),
        }
    }
}

impl<K, R> fmt::Debug for MappedSoa<K, R>
where
    K: fmt::Debug,
    R: Row,
    R::Arrays: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedSoa")
            .field("keys", &self.index_to_key)
            .field("store", &self.store)
            .finish()
    }
}
