//! Property-based tests for deciding ground formulas

use num_bigint::BigUint;
use oxbz_solver::{Context, Kind, SolverConfig, SolverResult};
use proptest::prelude::*;

proptest! {
    /// Integer, big-integer and textual spellings build the same value
    #[test]
    fn value_spellings_are_shared(n in any::<u64>(), width in 1u32..96) {
        let mut ctx = Context::new();
        let sort = ctx.mk_bv_sort(width).unwrap();
        let from_int = ctx.mk_bv_value(sort, n).unwrap();
        prop_assert_eq!(ctx.mk_bv_value(sort, BigUint::from(n)).unwrap(), from_int);
        prop_assert_eq!(ctx.mk_bv_value(sort, n.to_string()).unwrap(), from_int);
        prop_assert_eq!(ctx.mk_bv_value(sort, format!("#x{n:x}")).unwrap(), from_int);
    }

    /// Ground arithmetic equalities are decided exactly
    #[test]
    fn ground_addition_is_decided(a in any::<u32>(), b in any::<u32>(), off in 1u32..) {
        let mut ctx = Context::with_config(SolverConfig::incremental());
        let sort = ctx.mk_bv_sort(32).unwrap();
        let x = ctx.mk_bv_value(sort, a).unwrap();
        let y = ctx.mk_bv_value(sort, b).unwrap();
        let sum = ctx.mk_term(Kind::BvAdd, &[x, y], &[]).unwrap();

        let right = ctx.mk_bv_value(sort, a.wrapping_add(b)).unwrap();
        let eq = ctx.mk_term(Kind::Equal, &[sum, right], &[]).unwrap();
        ctx.assume_formula(eq).unwrap();
        prop_assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);

        let wrong = ctx.mk_bv_value(sort, a.wrapping_add(b).wrapping_add(off)).unwrap();
        let ne = ctx.mk_term(Kind::Equal, &[sum, wrong], &[]).unwrap();
        ctx.assume_formula(ne).unwrap();
        prop_assert_eq!(ctx.check_sat().unwrap(), SolverResult::Unsat);
        prop_assert_eq!(ctx.get_unsat_assumptions().unwrap(), vec![ne]);
    }
}
