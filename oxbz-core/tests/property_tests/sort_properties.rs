//! Property-based tests for the sort table

use oxbz_core::sort::SortManager;
use proptest::prelude::*;

proptest! {
    /// Equal structural keys yield equal handles
    #[test]
    fn bitvec_sort_uniqueness(width in 1u32..4096) {
        let mut sorts = SortManager::new(0);
        let a = sorts.bitvec(width).unwrap();
        let b = sorts.bitvec(width).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(sorts.get(a).unwrap().bv_get_size(), Some(width));
        prop_assert_eq!(width == 1, a == sorts.bool_sort);
    }

    /// Floating-point sorts report the widths they were built with
    #[test]
    fn fp_sort_widths(exp in 2u32..=32, sig in 2u32..128) {
        let mut sorts = SortManager::new(0);
        let s = sorts.floating_point(exp, sig).unwrap();
        let sort = sorts.get(s).unwrap();
        prop_assert!(sort.is_fp());
        prop_assert_eq!(sort.fp_get_exp_size(), Some(exp));
        prop_assert_eq!(sort.fp_get_sig_size(), Some(sig));
    }

    /// Array sorts remember index and element
    #[test]
    fn array_sort_parts(i in 1u32..64, e in 1u32..64) {
        let mut sorts = SortManager::new(0);
        let index = sorts.bitvec(i).unwrap();
        let element = sorts.bitvec(e).unwrap();
        let arr = sorts.array(index, element).unwrap();
        prop_assert_eq!(arr, sorts.array(index, element).unwrap());
        let sort = sorts.get(arr).unwrap();
        prop_assert_eq!(sort.array_get_index(), Some(index));
        prop_assert_eq!(sort.array_get_element(), Some(element));
    }
}
