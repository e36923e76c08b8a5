//! Row types and the per-column fan-out.
//!
//! # Design
//!
//! A row type is a plain tuple of element types, e.g. `(i32, String, f32)`.
//! Its storage ([`Row::Arrays`]) is the matching tuple of vectors,
//! `(Vec<i32>, Vec<String>, Vec<f32>)`, so each column is contiguous and
//! element construction/destruction is owned by `Vec`.
//!
//! Every structural operation (push, swap, pop, erase, ...) is expanded by
//! `impl_row!` into one statement per column, which keeps all columns the
//! same length without any runtime type dispatch.  Tuples of arity 1 to 12
//! are supported.
//!
//! Column access is typed through [`Column<N>`]: `<(i32, String) as
//! Column<1>>::Elem` is `String`, and `Column<2>` simply does not exist for a
//! two-column row, so an out-of-range column index is a compile error.
//!
//! ```rust
//! use soa_core::{Column, Row};
//!
//! let mut arrays = <(u32, &'static str) as Row>::Arrays::default();
//! <(u32, &str)>::push(&mut arrays, (7, "seven"));
//! <(u32, &str)>::push(&mut arrays, (8, "eight"));
//! assert!(<(u32, &str)>::lens_match(&arrays, 2));
//! assert_eq!(<(u32, &str) as Column<1>>::column(&arrays), &["seven", "eight"]);
//! ```

// ── Traits ────────────────────────────────────────────────────────────────────

/// A fixed list of column element types, expressed as a tuple.
///
/// The trait is sealed (only implementable inside this crate) via the private
/// `Sealed` supertrait, preventing external implementations that could break
/// the equal-length invariant.
///
/// Methods taking an index assume the caller has already bounds-checked it
/// against the store length; they panic on a bad index like `Vec` does.
pub trait Row: Sized + 'static + sealed::Sealed {
    /// One `Vec` per column.
    type Arrays: Default + 'static;

    /// Shared references to every element of one row.
    type Ref<'a>;

    /// Exclusive references to every element of one row.
    type Mut<'a>;

    /// Number of columns.
    const COLUMNS: usize;

    /// Append one value to every column.
    fn push(arrays: &mut Self::Arrays, row: Self);

    /// Overwrite `index` in every column.
    fn replace(arrays: &mut Self::Arrays, index: usize, row: Self);

    /// Exchange rows `a` and `b` in every column.
    fn swap(arrays: &mut Self::Arrays, a: usize, b: usize);

    /// Remove the last row, or `None` if the columns are empty.
    fn pop(arrays: &mut Self::Arrays) -> Option<Self>;

    /// Remove `index`, shifting every later row down by one.
    fn remove(arrays: &mut Self::Arrays, index: usize) -> Self;

    /// Remove `index` by moving the last row into its slot.
    fn swap_remove(arrays: &mut Self::Arrays, index: usize) -> Self;

    /// Drop `count` rows starting at `start`, shifting the tail down.
    fn drain(arrays: &mut Self::Arrays, start: usize, count: usize);

    fn truncate(arrays: &mut Self::Arrays, len: usize);

    fn clear(arrays: &mut Self::Arrays);

    /// Reserve room for `additional` more rows in every column.
    fn reserve(arrays: &mut Self::Arrays, additional: usize);

    fn shrink_to_fit(arrays: &mut Self::Arrays);

    fn row_ref(arrays: &Self::Arrays, index: usize) -> Self::Ref<'_>;

    fn row_mut(arrays: &mut Self::Arrays, index: usize) -> Self::Mut<'_>;

    /// `true` if every column holds exactly `len` elements.
    fn lens_match(arrays: &Self::Arrays, len: usize) -> bool;

    /// Smallest capacity over all columns.
    fn capacity(arrays: &Self::Arrays) -> usize;
}

/// Rows whose every element is `Clone`.
pub trait CloneRow: Row {
    /// Overwrite row `to` with a clone of row `from`.
    fn copy(arrays: &mut Self::Arrays, from: usize, to: usize);

    fn cloned(arrays: &Self::Arrays, index: usize) -> Self;

    fn clone_arrays(arrays: &Self::Arrays) -> Self::Arrays;
}

/// Rows whose every element is `Default`.
pub trait DefaultRow: Row {
    /// Grow with `Default` values or shrink to exactly `len` rows.
    fn resize(arrays: &mut Self::Arrays, len: usize);

    fn push_default(arrays: &mut Self::Arrays);
}

/// Typed access to column `N` of a row type.
pub trait Column<const N: usize>: Row {
    type Elem: 'static;

    fn column(arrays: &Self::Arrays) -> &[Self::Elem];

    /// A mutable slice: values can change, the column length cannot.
    fn column_mut(arrays: &mut Self::Arrays) -> &mut [Self::Elem];
}

mod sealed {
    pub trait Sealed {}
}

// ── Tuple impls ───────────────────────────────────────────────────────────────

/// Implement [`Row`], [`CloneRow`], [`DefaultRow`] and one [`Column`] per
/// index for a tuple of the listed arity.
macro_rules! impl_row {
    (@columns $generics:tt; $($idx:tt : $T:ident),+) => {
        $( impl_row!(@column $generics; $idx : $T); )+
    };

    (@column [$($G:ident),+]; $idx:tt : $T:ident) => {
        impl<$($G: 'static),+> Column<$idx> for ($($G,)+) {
            type Elem = $T;

            #[inline]
            fn column(arrays: &Self::Arrays) -> &[$T] {
                &arrays.$idx
            }

            #[inline]
            fn column_mut(arrays: &mut Self::Arrays) -> &mut [$T] {
                &mut arrays.$idx
            }
        }
    };

    ($count:expr => $($idx:tt : $T:ident),+) => {
        impl<$($T: 'static),+> sealed::Sealed for ($($T,)+) {}

        impl<$($T: 'static),+> Row for ($($T,)+) {
            type Arrays = ($(Vec<$T>,)+);
            type Ref<'a> = ($(&'a $T,)+);
            type Mut<'a> = ($(&'a mut $T,)+);

            const COLUMNS: usize = $count;

            #[inline]
            fn push(arrays: &mut Self::Arrays, row: Self) {
                $( arrays.$idx.push(row.$idx); )+
            }

            #[inline]
            fn replace(arrays: &mut Self::Arrays, index: usize, row: Self) {
                $( arrays.$idx[index] = row.$idx; )+
            }

            #[inline]
            fn swap(arrays: &mut Self::Arrays, a: usize, b: usize) {
                $( arrays.$idx.swap(a, b); )+
            }

            #[inline]
            fn pop(arrays: &mut Self::Arrays) -> Option<Self> {
                Some(($( arrays.$idx.pop()?, )+))
            }

            fn remove(arrays: &mut Self::Arrays, index: usize) -> Self {
                ($( arrays.$idx.remove(index), )+)
            }

            #[inline]
            fn swap_remove(arrays: &mut Self::Arrays, index: usize) -> Self {
                ($( arrays.$idx.swap_remove(index), )+)
            }

            fn drain(arrays: &mut Self::Arrays, start: usize, count: usize) {
                $( arrays.$idx.drain(start..start + count); )+
            }

            fn truncate(arrays: &mut Self::Arrays, len: usize) {
                $( arrays.$idx.truncate(len); )+
            }

            fn clear(arrays: &mut Self::Arrays) {
                $( arrays.$idx.clear(); )+
            }

            fn reserve(arrays: &mut Self::Arrays, additional: usize) {
                $( arrays.$idx.reserve(additional); )+
            }

            fn shrink_to_fit(arrays: &mut Self::Arrays) {
                $( arrays.$idx.shrink_to_fit(); )+
            }

            #[inline]
            fn row_ref(arrays: &Self::Arrays, index: usize) -> Self::Ref<'_> {
                ($( &arrays.$idx[index], )+)
            }

            #[inline]
            fn row_mut(arrays: &mut Self::Arrays, index: usize) -> Self::Mut<'_> {
                ($( &mut arrays.$idx[index], )+)
            }

            fn lens_match(arrays: &Self::Arrays, len: usize) -> bool {
                true $( && arrays.$idx.len() == len )+
            }

            fn capacity(arrays: &Self::Arrays) -> usize {
                let mut cap = usize::MAX;
                $( cap = cap.min(arrays.$idx.capacity()); )+
                cap
            }
        }

        impl<$($T: Clone + 'static),+> CloneRow for ($($T,)+) {
            fn copy(arrays: &mut Self::Arrays, from: usize, to: usize) {
                $(
                    let value = arrays.$idx[from].clone();
                    arrays.$idx[to] = value;
                )+
            }

            fn cloned(arrays: &Self::Arrays, index: usize) -> Self {
                ($( arrays.$idx[index].clone(), )+)
            }

            fn clone_arrays(arrays: &Self::Arrays) -> Self::Arrays {
                ($( arrays.$idx.clone(), )+)
            }
        }

        impl<$($T: Default + 'static),+> DefaultRow for ($($T,)+) {
            fn resize(arrays: &mut Self::Arrays, len: usize) {
                $( arrays.$idx.resize_with(len, $T::default); )+
            }

            fn push_default(arrays: &mut Self::Arrays) {
                $( arrays.$idx.push($T::default()); )+
            }
        }

        impl_row!(@columns [$($T),+]; $($idx : $T),+);
    };
}

impl_row!(1 => 0: A);
impl_row!(2 => 0: A, 1: B);
impl_row!(3 => 0: A, 1: B, 2: C);
impl_row!(4 => 0: A, 1: B, 2: C, 3: D);
impl_row!(5 => 0: A, 1: B, 2: C, 3: D, 4: E);
impl_row!(6 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
impl_row!(7 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
impl_row!(8 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H);
impl_row!(9 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I);
impl_row!(10 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J);
impl_row!(11 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K);
impl_row!(12 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L);
