//! Property-based tests for term construction
//!
//! This module tests fundamental properties of the term table such as:
//! - Value interning and uniqueness
//! - Freshness of constants
//! - Substitution correctness

use num_bigint::BigUint;
use oxbz_core::ast::{Kind, Substitution, TermManager};
use oxbz_core::value::BvValue;
use proptest::prelude::*;

/// Strategy for generating bit-vector widths
fn width_strategy() -> impl Strategy<Value = u32> {
    1u32..=64
}

/// Strategy for binary operators over same-sorted bit-vectors
fn binop_strategy() -> impl Strategy<Value = Kind> {
    prop::sample::select(vec![
        Kind::BvAdd,
        Kind::BvSub,
        Kind::BvMul,
        Kind::BvAnd,
        Kind::BvOr,
        Kind::BvXor,
        Kind::BvUdiv,
        Kind::BvShl,
    ])
}

proptest! {
    /// Values equal modulo 2^width are the same term
    #[test]
    fn bv_value_uniqueness(width in width_strategy(), n in any::<u64>()) {
        let mut tm = TermManager::new();
        let wrapped = BigUint::from(n) + (BigUint::from(1u8) << width);
        let t1 = tm.mk_bv_value(BvValue::new(width, BigUint::from(n))).unwrap();
        let t2 = tm.mk_bv_value(BvValue::new(width, wrapped)).unwrap();
        prop_assert_eq!(t1, t2);
    }

    /// Constants are never shared, whatever their name
    #[test]
    fn constants_are_fresh(width in width_strategy(), name in "[a-z]{1,4}") {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bitvec(width).unwrap();
        let a = tm.mk_const(sort, Some(&name)).unwrap();
        let b = tm.mk_const(sort, Some(&name)).unwrap();
        prop_assert_ne!(a, b);
        prop_assert_eq!(tm.symbol(a), Some(name.as_str()));
    }

    /// Repeating a construction returns the same handle and allocates nothing
    #[test]
    fn application_interning(kind in binop_strategy(), width in width_strategy()) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bitvec(width).unwrap();
        let x = tm.mk_const(sort, None).unwrap();
        let y = tm.mk_const(sort, None).unwrap();
        let t1 = tm.mk_term(kind, &[x, y], &[]).unwrap();
        let count = tm.term_count();
        let t2 = tm.mk_term(kind, &[x, y], &[]).unwrap();
        prop_assert_eq!(t1, t2);
        prop_assert_eq!(tm.term_count(), count);
        prop_assert_eq!(tm.sort_of(t1).unwrap(), sort);
    }

    /// Extract succeeds exactly when lo <= hi < width
    #[test]
    fn extract_index_rules(width in 1u32..32, hi in 0u32..40, lo in 0u32..40) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bitvec(width).unwrap();
        let x = tm.mk_const(sort, None).unwrap();
        let result = tm.mk_term(Kind::BvExtract, &[x], &[hi, lo]);
        prop_assert_eq!(result.is_ok(), lo <= hi && hi < width);
        if let Ok(t) = result {
            let size = tm.sorts.sort(tm.sort_of(t).unwrap()).unwrap().bv_get_size();
            prop_assert_eq!(size, Some(hi - lo + 1));
        }
    }

    /// Substituting x by itself is the identity
    #[test]
    fn identity_substitution(kind in binop_strategy(), depth in 1usize..8) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bitvec(8).unwrap();
        let x = tm.mk_const(sort, None).unwrap();
        let y = tm.mk_const(sort, None).unwrap();
        let mut t = x;
        for _ in 0..depth {
            t = tm.mk_term(kind, &[t, y], &[]).unwrap();
        }
        let subst: Substitution = [(x, x)].into_iter().collect();
        prop_assert_eq!(tm.substitute(t, &subst).unwrap(), t);
    }

    /// Insertion order of bindings does not change the result
    #[test]
    fn substitution_order_independent(kind in binop_strategy(), swap in any::<bool>()) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bitvec(8).unwrap();
        let x = tm.mk_const(sort, None).unwrap();
        let y = tm.mk_const(sort, None).unwrap();
        let a = tm.mk_const(sort, None).unwrap();
        let b = tm.mk_const(sort, None).unwrap();
        let t = tm.mk_term(kind, &[x, y], &[]).unwrap();
        let expected = tm.mk_term(kind, &[a, b], &[]).unwrap();

        let mut bindings = vec![(x, a), (y, b)];
        if swap {
            bindings.reverse();
        }
        let mut subst = Substitution::new();
        for (k, v) in bindings {
            subst.insert(k, v);
        }
        prop_assert_eq!(tm.substitute(t, &subst).unwrap(), expected);
    }
}
