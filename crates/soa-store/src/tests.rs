//! Unit tests for soa-store.

#[cfg(test)]
mod store {
    use crate::{SoaError, SoaStore};

    type Store = SoaStore<(i32, String)>;

    fn store_of(rows: &[(i32, &str)]) -> Store {
        rows.iter().map(|&(n, s)| (n, s.to_string())).collect()
    }

    fn ints(store: &Store) -> Vec<i32> {
        store.array::<0>().to_vec()
    }

    #[test]
    fn new_is_empty() {
        let store = Store::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.column_count(), 2);
        assert!(store.columns_consistent());
    }

    #[test]
    fn push_returns_new_index() {
        let mut store = Store::new();
        assert_eq!(store.push((1, "a".into())), 0);
        assert_eq!(store.push((2, "b".into())), 1);
        assert_eq!(store.len(), 2);
        assert!(store.columns_consistent());
    }

    #[test]
    fn erase_preserves_order() {
        // append (5, "x"), (7, "y"); erase(0) → row 0 is (7, "y").
        let mut store = store_of(&[(5, "x"), (7, "y")]);
        let removed = store.erase(0).unwrap();
        assert_eq!(removed, (5, "x".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get::<0>(0), Ok(&7));
        assert_eq!(store.get::<1>(0).unwrap(), "y");
    }

    #[test]
    fn erase_out_of_range() {
        let mut store = store_of(&[(1, "a")]);
        assert_eq!(store.erase(1), Err(SoaError::RowOutOfRange { index: 1, len: 1 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn erase_range_keeps_tail_order() {
        let mut store = store_of(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        store.erase_range(0, 2).unwrap();
        assert_eq!(ints(&store), vec![3, 4]);
        assert_eq!(store.array::<1>(), &["c", "d"]);
    }

    #[test]
    fn erase_range_rejects_bad_ranges() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        let err = store.erase_range(1, 2).unwrap_err();
        assert_eq!(err, SoaError::RangeOutOfBounds { start: 1, count: 2, len: 2 });
        assert!(store.erase_range(2, 0).is_err());
        assert!(store.erase_range(1, usize::MAX).is_err());
        assert_eq!(store.len(), 2, "failed erase must not touch the store");
    }

    #[test]
    fn swap_remove_moves_last_row() {
        let mut store = store_of(&[(1, "a"), (2, "b"), (3, "c")]);
        let removed = store.swap_remove(0).unwrap();
        assert_eq!(removed.0, 1);
        assert_eq!(ints(&store), vec![3, 2]);
        assert_eq!(store.array::<1>(), &["c", "b"]);
    }

    #[test]
    fn replace_in_place() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        store.replace(1, (20, "B".into())).unwrap();
        assert_eq!(store.cloned_row(1).unwrap(), (20, "B".to_string()));
        assert_eq!(ints(&store), vec![1, 20]);
        assert!(store.replace(2, (0, String::new())).is_err());
    }

    #[test]
    fn swap_twice_restores() {
        let mut store = store_of(&[(1, "a"), (2, "b"), (3, "c")]);
        store.swap(0, 2).unwrap();
        assert_eq!(ints(&store), vec![3, 2, 1]);
        assert_eq!(store.array::<1>(), &["c", "b", "a"]);
        store.swap(0, 2).unwrap();
        assert_eq!(ints(&store), vec![1, 2, 3]);
    }

    #[test]
    fn swap_same_index_is_noop() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        store.swap(1, 1).unwrap();
        assert_eq!(ints(&store), vec![1, 2]);
        assert!(store.swap(0, 5).is_err());
    }

    #[test]
    fn copy_row_over_another() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        store.copy(0, 1).unwrap();
        assert_eq!(ints(&store), vec![1, 1]);
        assert_eq!(store.array::<1>(), &["a", "a"]);
        store.copy(1, 1).unwrap();
        assert!(store.copy(0, 2).is_err());
    }

    #[test]
    fn pop_back() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        assert_eq!(store.pop(), Some((2, "b".to_string())));
        assert_eq!(store.len(), 1);
        store.pop();
        assert_eq!(store.pop(), None, "pop on empty is a no-op");
        assert!(store.is_empty());
    }

    #[test]
    fn resize_to_zero_then_grow() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        store.resize(0);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());

        store.resize(3);
        assert_eq!(store.len(), 3);
        assert_eq!(ints(&store), vec![0, 0, 0]);
        assert!(store.array::<1>().iter().all(String::is_empty));
        assert!(store.columns_consistent());
    }

    #[test]
    fn reserve_is_total_rows() {
        let mut store = store_of(&[(1, "a")]);
        store.reserve(64);
        assert!(store.capacity() >= 64);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn truncate_and_clear() {
        let mut store = store_of(&[(1, "a"), (2, "b"), (3, "c")]);
        store.truncate(5);
        assert_eq!(store.len(), 3);
        store.truncate(1);
        assert_eq!(ints(&store), vec![1]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.columns_consistent());
    }

    #[test]
    fn get_mut_and_array_mut_write_through() {
        let mut store = store_of(&[(1, "a"), (2, "b")]);
        *store.get_mut::<0>(0).unwrap() = 10;
        store.get_mut::<1>(1).unwrap().push('!');
        for n in store.array_mut::<0>() {
            *n += 1;
        }
        assert_eq!(ints(&store), vec![11, 3]);
        assert_eq!(store.get::<1>(1).unwrap(), "b!");
        assert_eq!(store.get::<0>(2), Err(SoaError::RowOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn row_access() {
        let mut store = store_of(&[(1, "a")]);
        let (n, s) = store.row(0).unwrap();
        assert_eq!((*n, s.as_str()), (1, "a"));

        let (n, s) = store.row_mut(0).unwrap();
        *n = 9;
        s.clear();
        assert_eq!(store.cloned_row(0).unwrap(), (9, String::new()));
        assert!(store.row(1).is_err());
    }

    #[test]
    fn iter_in_index_order() {
        let store = store_of(&[(1, "a"), (2, "b")]);
        let rows: Vec<(i32, &str)> = store.iter().map(|(n, s)| (*n, s.as_str())).collect();
        assert_eq!(rows, vec![(1, "a"), (2, "b")]);
        assert_eq!(store.iter().len(), 2);
    }

    #[test]
    fn clone_is_deep() {
        let original = store_of(&[(1, "a")]);
        let mut copy = original.clone();
        copy.get_mut::<1>(0).unwrap().push('z');
        assert_eq!(original.get::<1>(0).unwrap(), "a");
        assert_eq!(copy.get::<1>(0).unwrap(), "az");
    }

    #[test]
    fn elements_are_dropped_on_removal() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut store: SoaStore<(u8, Rc<()>)> = SoaStore::new();
        for i in 0..4 {
            store.push((i, Rc::clone(&tracker)));
        }
        assert_eq!(Rc::strong_count(&tracker), 5);

        store.pop();
        store.erase(0).unwrap();
        assert_eq!(Rc::strong_count(&tracker), 3);

        store.erase_range(0, 1).unwrap();
        store.truncate(0);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn three_columns_stay_aligned() {
        // SoA<int, string, int> walk-through: push, swap, erase, erase range.
        let mut store: SoaStore<(i32, String, i32)> = SoaStore::new();
        store.push((22, "Kitty".into(), 4));
        store.push((0, "Hi".into(), 2));
        store.swap(0, 1).unwrap();
        *store.get_mut::<1>(0).unwrap() = "changed".into();
        store.erase(0).unwrap();
        assert_eq!(store.cloned_row(0).unwrap(), (22, "Kitty".to_string(), 4));

        store.push((1, "for now".into(), 5));
        store.push((80, "survivor".into(), 20));
        store.erase_range(0, 2).unwrap();
        assert_eq!(store.cloned_row(0).unwrap(), (80, "survivor".to_string(), 20));
        assert!(store.columns_consistent());
    }
}

#[cfg(test)]
mod builder {
    use crate::{SoaStore, SoaStoreBuilder};

    #[test]
    fn default_rows() {
        let store = SoaStoreBuilder::<(u8, bool)>::new().rows(4).build();
        assert_eq!(store.len(), 4);
        assert_eq!(store.array::<0>(), &[0, 0, 0, 0]);
        assert!(!store.array::<1>()[3]);
    }

    #[test]
    fn capacity_only() {
        let store: SoaStore<(u8, bool)> = SoaStoreBuilder::new().capacity(32).build();
        assert!(store.is_empty());
        assert!(store.capacity() >= 32);
    }

    #[test]
    fn rows_without_default_elements_still_build() {
        struct NoDefault(#[allow(dead_code)] u8);
        let store = SoaStoreBuilder::<(NoDefault,)>::new().capacity(2).build();
        assert!(store.is_empty());
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::SoaStore;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u16),
        Pop,
        Erase(usize),
        EraseRange(usize, usize),
        SwapRemove(usize),
        Swap(usize, usize),
        Copy(usize, usize),
        Resize(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u16>().prop_map(Op::Push),
            1 => Just(Op::Pop),
            1 => (0..12usize).prop_map(Op::Erase),
            1 => (0..12usize, 0..4usize).prop_map(|(s, c)| Op::EraseRange(s, c)),
            1 => (0..12usize).prop_map(Op::SwapRemove),
            1 => (0..12usize, 0..12usize).prop_map(|(a, b)| Op::Swap(a, b)),
            1 => (0..12usize, 0..12usize).prop_map(|(a, b)| Op::Copy(a, b)),
            1 => (0..12usize).prop_map(Op::Resize),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// The store behaves like a `Vec` of rows and never lets its columns
        /// drift apart, whatever mix of (possibly invalid) calls is made.
        #[test]
        fn matches_vec_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut store: SoaStore<(u16, String)> = SoaStore::new();
            let mut model: Vec<(u16, String)> = Vec::new();

            for op in ops {
                match op {
                    Op::Push(v) => {
                        store.push((v, v.to_string()));
                        model.push((v, v.to_string()));
                    }
                    Op::Pop => {
                        prop_assert_eq!(store.pop(), model.pop());
                    }
                    Op::Erase(i) => {
                        let got = store.erase(i).ok();
                        let want = (i < model.len()).then(|| model.remove(i));
                        prop_assert_eq!(got, want);
                    }
                    Op::EraseRange(s, c) => {
                        let ok = store.erase_range(s, c).is_ok();
                        let valid = s < model.len() && s + c <= model.len();
                        prop_assert_eq!(ok, valid);
                        if valid {
                            model.drain(s..s + c);
                        }
                    }
                    Op::SwapRemove(i) => {
                        let got = store.swap_remove(i).ok();
                        let want = (i < model.len()).then(|| model.swap_remove(i));
                        prop_assert_eq!(got, want);
                    }
                    Op::Swap(a, b) => {
                        let ok = store.swap(a, b).is_ok();
                        prop_assert_eq!(ok, a < model.len() && b < model.len());
                        if ok {
                            model.swap(a, b);
                        }
                    }
                    Op::Copy(a, b) => {
                        let ok = store.copy(a, b).is_ok();
                        prop_assert_eq!(ok, a < model.len() && b < model.len());
                        if ok {
                            model[b] = model[a].clone();
                        }
                    }
                    Op::Resize(n) => {
                        store.resize(n);
                        model.resize(n, (0, String::new()));
                    }
                }

                prop_assert!(store.columns_consistent());
                prop_assert_eq!(store.len(), model.len());
            }

            let rows: Vec<(u16, String)> = (0..store.len())
                .map(|i| store.cloned_row(i).unwrap())
                .collect();
            prop_assert_eq!(rows, model);
        }
    }
}
