//! Property-based tests for the assertion scope stack

use oxbz_solver::{Context, OxbzError, SolverConfig, SolverResult};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Push(u32),
    Pop(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(1u32..4).prop_map(Op::Push), (1u32..4).prop_map(Op::Pop)]
}

proptest! {
    /// The level count follows a simple counter and over-popping is rejected
    /// without touching the stack
    #[test]
    fn levels_follow_counter(ops in prop::collection::vec(op(), 0..40)) {
        let mut ctx = Context::with_config(SolverConfig::incremental());
        let mut depth = 0u32;
        for op in ops {
            match op {
                Op::Push(n) => {
                    ctx.push(n).unwrap();
                    depth += n;
                }
                Op::Pop(n) if n <= depth => {
                    ctx.pop(n).unwrap();
                    depth -= n;
                }
                Op::Pop(n) => {
                    prop_assert_eq!(
                        ctx.pop(n).unwrap_err(),
                        OxbzError::PopOutOfRange { requested: n, available: depth }
                    );
                }
            }
            prop_assert_eq!(ctx.num_levels(), depth as usize);
        }
    }

    /// A contradiction asserted inside a scope is gone once the scope is popped
    #[test]
    fn pop_discards_scoped_assertions(outer in 0u32..4, inner in 1u32..4) {
        let mut ctx = Context::with_config(SolverConfig::incremental());
        if outer > 0 {
            ctx.push(outer).unwrap();
        }
        let t = ctx.mk_true();
        ctx.assert_formula(t).unwrap();
        ctx.push(inner).unwrap();
        let f = ctx.mk_false();
        ctx.assert_formula(f).unwrap();
        prop_assert_eq!(ctx.check_sat().unwrap(), SolverResult::Unsat);
        ctx.pop(inner).unwrap();
        prop_assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);
        prop_assert_eq!(ctx.num_levels(), outer as usize);
    }
}
