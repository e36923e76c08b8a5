//! The column store: `SoaStore<R>`, one contiguous `Vec` per column of `R`.
//!
//! # Rows are positions, not identities
//!
//! A row is whatever sits at index `i` across all columns.  Any structural
//! mutation ([`SoaStore::swap`], [`SoaStore::erase`],
//! [`SoaStore::swap_remove`], [`SoaStore::pop`], ...) may change what lives
//! at an index, so indices must not be held across one.  Slices returned by
//! [`SoaStore::array`] borrow the store, so the borrow checker already
//! enforces this for column access.
//!
//! # Two removal flavours
//!
//! | Method          | Cost          | Order of remaining rows |
//! |-----------------|---------------|-------------------------|
//! | `erase`         | O(len − i)    | preserved               |
//! | `erase_range`   | O(len − start)| preserved               |
//! | `swap_remove`   | O(1)          | last row moves into `i` |
//! | `pop`           | O(1)          | preserved               |

use std::fmt;

use soa_core::{CloneRow, Column, DefaultRow, Row, SoaError, SoaResult, check_row};
use tracing::debug;

/// Structure-of-Arrays storage for rows of type `R`.
///
/// Every column `Vec` has exactly [`len`](Self::len) elements; the row index is
/// the index into all of them:
///
/// ```ignore
/// let hp = store.array::<1>()[row];  // O(1), cache-friendly
/// ```
pub struct SoaStore<R: Row> {
    arrays: R::Arrays,

    /// Number of rows.  Equals the length of every column.
    len: usize,
}

impl<R: Row> SoaStore<R> {
    pub fn new() -> Self {
        Self {
            arrays: R::Arrays::default(),
            len:    0,
        }
    }

    /// Empty store with room for `capacity` rows in every column.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = Self::new();
        R::reserve(&mut store.arrays, capacity);
        store
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rows every column can hold without reallocating.
    pub fn capacity(&self) -> usize {
        R::capacity(&self.arrays)
    }

    /// Number of columns declared by `R`.
    pub fn column_count(&self) -> usize {
        R::COLUMNS
    }

    /// `true` if every column's length equals [`len`](Self::len).
    ///
    /// Always holds after a public method returns; exposed for tests and
    /// debug assertions in wrapping containers.
    pub fn columns_consistent(&self) -> bool {
        R::lens_match(&self.arrays, self.len)
    }

    // ── Row mutation ──────────────────────────────────────────────────────

    /// Append a row, returning its index (the old `len`).
    pub fn push(&mut self, row: R) -> usize {
        let index = self.len;
        R::push(&mut self.arrays, row);
        self.len += 1;
        index
    }

    /// Overwrite row `index` in place.
    pub fn replace(&mut self, index: usize, row: R) -> SoaResult<()> {
        check_row(index, self.len)?;
        R::replace(&mut self.arrays, index, row);
        Ok(())
    }

    /// Exchange rows `a` and `b` across every column.  No-op when `a == b`.
    pub fn swap(&mut self, a: usize, b: usize) -> SoaResult<()> {
        check_row(a, self.len)?;
        check_row(b, self.len)?;
        if a != b {
            R::swap(&mut self.arrays, a, b);
        }
        Ok(())
    }

    /// Remove and return the last row, or `None` if the store is empty.
    pub fn pop(&mut self) -> Option<R> {
        let row = R::pop(&mut self.arrays)?;
        self.len -= 1;
        Some(row)
    }

    /// Remove row `index`, shifting every later row down by one.
    ///
    /// Order-preserving; O(len − index).
    pub fn erase(&mut self, index: usize) -> SoaResult<R> {
        check_row(index, self.len)?;
        let row = R::remove(&mut self.arrays, index);
        self.len -= 1;
        Ok(row)
    }

    /// Remove `count` contiguous rows starting at `start`, keeping the order
    /// of the rest.
    ///
    /// # Errors
    ///
    /// [`SoaError::RangeOutOfBounds`] if `start >= len` or the range runs past
    /// the last row.  The store is left unchanged.
    pub fn erase_range(&mut self, start: usize, count: usize) -> SoaResult<()> {
        let in_bounds = start < self.len
            && start.checked_add(count).is_some_and(|end| end <= self.len);
        if !in_bounds {
            return Err(SoaError::RangeOutOfBounds {
                start,
                count,
                len: self.len,
            });
        }
        R::drain(&mut self.arrays, start, count);
        self.len -= count;
        debug!(start, count, len = self.len, "erased row range");
        Ok(())
    }

    /// Remove row `index` in O(1) by moving the last row into its slot.
    ///
    /// Row order is **not** preserved: the former last row now lives at
    /// `index`.  Use [`erase`](Self::erase) when order matters.
    pub fn swap_remove(&mut self, index: usize) -> SoaResult<R> {
        check_row(index, self.len)?;
        let row = R::swap_remove(&mut self.arrays, index);
        self.len -= 1;
        Ok(row)
    }

    // ── Bulk operations ───────────────────────────────────────────────────

    /// Make room for at least `total` rows in every column.
    pub fn reserve(&mut self, total: usize) {
        let additional = total.saturating_sub(self.len);
        R::reserve(&mut self.arrays, additional);
        debug!(total, capacity = self.capacity(), "reserved column capacity");
    }

    /// Drop every row at index `len` and above.  No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        R::truncate(&mut self.arrays, len);
        debug!(from = self.len, to = len, "truncated store");
        self.len = len;
    }

    pub fn clear(&mut self) {
        R::clear(&mut self.arrays);
        debug!(dropped = self.len, "cleared store");
        self.len = 0;
    }

    pub fn shrink_to_fit(&mut self) {
        R::shrink_to_fit(&mut self.arrays);
    }

    // ── Column access ─────────────────────────────────────────────────────

    /// Whole column `N` as a slice, for tight loops and bulk processing.
    ///
    /// ```ignore
    /// let total: i64 = store.array::<0>().iter().sum();
    /// ```
    pub fn array<const N: usize>(&self) -> &[<R as Column<N>>::Elem]
    where
        R: Column<N>,
    {
        <R as Column<N>>::column(&self.arrays)
    }

    /// Mutable column `N`.  Values may change; the column length cannot.
    pub fn array_mut<const N: usize>(&mut self) -> &mut [<R as Column<N>>::Elem]
    where
        R: Column<N>,
    {
        <R as Column<N>>::column_mut(&mut self.arrays)
    }

    /// Element of column `N` at row `index`.
    pub fn get<const N: usize>(&self, index: usize) -> SoaResult<&<R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        let len = self.len;
        <R as Column<N>>::column(&self.arrays)
            .get(index)
            .ok_or(SoaError::RowOutOfRange { index, len })
    }

    pub fn get_mut<const N: usize>(
        &mut self,
        index: usize,
    ) -> SoaResult<&mut <R as Column<N>>::Elem>
    where
        R: Column<N>,
    {
        let len = self.len;
        <R as Column<N>>::column_mut(&mut self.arrays)
            .get_mut(index)
            .ok_or(SoaError::RowOutOfRange { index, len })
    }

    // ── Row access ────────────────────────────────────────────────────────

    /// References to every element of row `index`.
    pub fn row(&self, index: usize) -> SoaResult<R::Ref<'_>> {
        check_row(index, self.len)?;
        Ok(R::row_ref(&self.arrays, index))
    }

    pub fn row_mut(&mut self, index: usize) -> SoaResult<R::Mut<'_>> {
        check_row(index, self.len)?;
        Ok(R::row_mut(&mut self.arrays, index))
    }

    /// Iterator over all rows in ascending index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = R::Ref<'_>> + '_ {
        (0..self.len).map(move |index| R::row_ref(&self.arrays, index))
    }
}

impl<R: CloneRow> SoaStore<R> {
    /// Overwrite row `to` with a clone of row `from`.  No-op when equal.
    pub fn copy(&mut self, from: usize, to: usize) -> SoaResult<()> {
        check_row(from, self.len)?;
        check_row(to, self.len)?;
        if from != to {
            R::copy(&mut self.arrays, from, to);
        }
        Ok(())
    }

    /// Owned clone of row `index`.
    pub fn cloned_row(&self, index: usize) -> SoaResult<R> {
        check_row(index, self.len)?;
        Ok(R::cloned(&self.arrays, index))
    }
}

impl<R: DefaultRow> SoaStore<R> {
    /// Grow or shrink every column to exactly `len` rows.
    ///
    /// New rows hold `Default` values; dropped rows are destroyed.
    pub fn resize(&mut self, len: usize) {
        R::resize(&mut self.arrays, len);
        debug!(from = self.len, to = len, "resized store");
        self.len = len;
    }

    /// Append a row of `Default` values, returning its index.
    pub fn push_default(&mut self) -> usize {
        let index = self.len;
        R::push_default(&mut self.arrays);
        self.len += 1;
        index
    }
}

// ── Package-private helpers used by SoaStoreBuilder ──────────────────────────

impl<R: Row> SoaStore<R> {
    /// Run a whole-store fill such as `DefaultRow::resize` and adopt `rows` as
    /// the new length.
    pub(crate) fn fill_with(&mut self, fill: fn(&mut R::Arrays, usize), rows: usize) {
        fill(&mut self.arrays, rows);
        self.len = rows;
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl<R: Row> Default for SoaStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CloneRow> Clone for SoaStore<R> {
    fn clone(&self) -> Self {
        Self {
            arrays: R::clone_arrays(&self.arrays),
            len:    self.len,
        }
    }
}

impl<R: Row> fmt::Debug for SoaStore<R>
where
    R::Arrays: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoaStore")
            .field("len", &self.len)
            .field("arrays", &self.arrays)
            .finish()
    }
}

impl<R: Row> Extend<R> for SoaStore<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        R::reserve(&mut self.arrays, iter.size_hint().0);
        for row in iter {
            self.push(row);
        }
    }
}

impl<R: Row> FromIterator<R> for SoaStore<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
