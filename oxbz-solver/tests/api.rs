//! Public API integration tests
//!
//! Floating-point constructions accept either success or the
//! "FPU not configured" configuration error, so the suite passes with and
//! without the `fpu` feature.

use oxbz_solver::{
    Context, ErrorKind, Kind, OxbzError, Result, RoundingMode, SolverConfig, SolverOption,
    SolverResult, SortId, Substitution, TermId,
};
use std::time::{SystemTime, UNIX_EPOCH};

struct Env {
    ctx: Context,
    bv8: SortId,
    bv32: SortId,
    fp16: SortId,
    fp32: SortId,
}

impl Env {
    fn new() -> Self {
        let mut ctx = Context::new();
        let bv8 = ctx.mk_bv_sort(8).unwrap();
        let bv32 = ctx.mk_bv_sort(32).unwrap();
        let fp16 = ctx.mk_fp_sort(5, 11).unwrap();
        let fp32 = ctx.mk_fp_sort(8, 24).unwrap();
        Self {
            ctx,
            bv8,
            bv32,
            fp16,
            fp32,
        }
    }
}

/// Run `f` and tolerate a build without floating-point support
fn with_fpu(f: impl FnOnce() -> Result<()>) {
    if let Err(e) = f() {
        assert_eq!(e.kind(), ErrorKind::Configuration, "{e}");
        assert!(e.to_string().contains("FPU not configured"));
    }
}

#[test]
fn test_new() {
    let _ = Context::new();
}

#[test]
fn test_set_term() {
    let mut ctx = Context::new();
    let start = 100.0;
    ctx.set_term(move || {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        now - start > 1.0
    });
    assert!(ctx.terminate());
}

#[test]
fn test_terminate() {
    let mut ctx = Context::new();
    assert!(!ctx.terminate());
    ctx.set_term(|| true);
    assert!(ctx.terminate());
    assert!(ctx.terminate());
}

#[test]
fn test_terminator_interrupts_check_sat() {
    let mut ctx = Context::new();
    let t = ctx.mk_true();
    ctx.assert_formula(t).unwrap();
    ctx.set_term(|| true);
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Unknown);
}

#[test]
fn test_metadata() {
    let ctx = Context::new();
    assert!(!ctx.copyright().is_empty());
    assert!(!ctx.version().is_empty());
    assert!(!ctx.git_id().is_empty());
}

#[test]
fn test_push() {
    let mut ctx = Context::new();
    let err = ctx.push(1).unwrap_err();
    assert!(err.to_string().contains("incremental usage not enabled"));
    assert_eq!(err.kind(), ErrorKind::Usage);

    ctx.set_option(SolverOption::Incremental, true).unwrap();
    ctx.push(1).unwrap();
    ctx.push(3).unwrap();
    assert_eq!(ctx.num_levels(), 4);
}

#[test]
fn test_pop() {
    let mut ctx = Context::new();
    let err = ctx.pop(1).unwrap_err();
    assert!(err.to_string().contains("incremental usage not enabled"));

    ctx.set_option(SolverOption::Incremental, true).unwrap();
    let err = ctx.pop(1).unwrap_err();
    assert!(err.to_string().contains("number of levels to pop"));
    assert_eq!(
        err,
        OxbzError::PopOutOfRange {
            requested: 1,
            available: 0
        }
    );

    ctx.push(1).unwrap();
    ctx.pop(1).unwrap();
    ctx.push(3).unwrap();
    ctx.pop(3).unwrap();
    assert_eq!(ctx.num_levels(), 0);
}

#[test]
fn test_set_option() {
    let mut ctx = Context::new();
    ctx.set_option(SolverOption::ProduceModels, 1u32).unwrap();
    ctx.set_option(SolverOption::Incremental, true).unwrap();
    ctx.set_option(SolverOption::SatEngine, "cadical").unwrap();
    let err = ctx
        .set_option(SolverOption::SatEngine, "adical")
        .unwrap_err();
    assert!(err.to_string().contains("invalid option value"));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn test_get_option() {
    let mut ctx = Context::new();
    ctx.set_option(SolverOption::Incremental, true).unwrap();
    assert_eq!(ctx.get_option(SolverOption::Incremental).as_bool(), Some(true));
    ctx.set_option(SolverOption::Incremental, false).unwrap();
    assert_eq!(ctx.get_option(SolverOption::Incremental).as_bool(), Some(false));
}

#[test]
fn test_mk_bool_sort() {
    let ctx = Context::new();
    let sort = ctx.sort(ctx.mk_bool_sort()).unwrap();
    assert!(sort.is_bv());
    assert!(sort.is_bool());
    assert_eq!(sort.bv_get_size(), Some(1));
}

#[test]
fn test_mk_bv_sort() {
    let mut ctx = Context::new();
    let s = ctx.mk_bv_sort(32).unwrap();
    assert!(ctx.sort(s).unwrap().is_bv());
    assert_eq!(ctx.sort(s).unwrap().bv_get_size(), Some(32));
    assert_eq!(ctx.mk_bv_sort(0).unwrap_err().kind(), ErrorKind::Usage);
}

#[test]
fn test_mk_fp_sort() {
    let env = Env::new();
    assert!(env.ctx.sort(env.fp16).unwrap().is_fp());
    assert!(env.ctx.sort(env.fp32).unwrap().is_fp());
    assert_eq!(env.ctx.sort(env.fp32).unwrap().fp_get_exp_size(), Some(8));
    assert_eq!(env.ctx.sort(env.fp32).unwrap().fp_get_sig_size(), Some(24));
}

#[test]
fn test_mk_rm_sort() {
    let ctx = Context::new();
    assert!(ctx.sort(ctx.mk_rm_sort()).unwrap().is_rm());
}

#[test]
fn test_mk_array_sort() {
    let mut env = Env::new();
    let a = env.ctx.mk_array_sort(env.bv32, env.bv8).unwrap();
    let sort = env.ctx.sort(a).unwrap();
    assert!(sort.is_array());
    assert_eq!(sort.array_get_index(), Some(env.bv32));
    assert_eq!(sort.array_get_element(), Some(env.bv8));
}

#[test]
fn test_mk_fun_sort() {
    let mut env = Env::new();
    let f = env
        .ctx
        .mk_fun_sort(&[env.bv8, env.bv32, env.fp32], env.fp16)
        .unwrap();
    let sort = env.ctx.sort(f).unwrap();
    assert!(sort.is_fun());
    assert_eq!(sort.fun_get_arity(), Some(3));
    assert_eq!(sort.fun_get_codomain(), Some(env.fp16));
}

#[test]
fn test_mk_bv_value() {
    let mut ctx = Context::new();
    let s = ctx.mk_bv_sort(32).unwrap();
    ctx.mk_bv_value(s, 123).unwrap();
    ctx.mk_bv_value(s, "-123").unwrap();
    ctx.mk_bv_value(s, "0x123").unwrap();
    ctx.mk_bv_value(s, "#x1213").unwrap();
    ctx.mk_bv_value(s, "0b101").unwrap();
    ctx.mk_bv_value(s, "#b101").unwrap();
    assert_eq!(
        ctx.mk_bv_value(s, "0b1111011").unwrap(),
        ctx.mk_bv_value(s, "0x7b").unwrap()
    );
    let err = ctx.mk_bv_value(s, "12a").unwrap_err();
    assert!(err.to_string().contains("invalid value"));
}

#[test]
fn test_mk_bv_ones() {
    let mut ctx = Context::new();
    let s = ctx.mk_bv_sort(3).unwrap();
    let ones = ctx.mk_bv_ones(s).unwrap();
    let spellings: Vec<TermId> = vec![
        ctx.mk_bv_value(s, -1).unwrap(),
        ctx.mk_bv_value(s, "-1").unwrap(),
        ctx.mk_bv_value(s, 7).unwrap(),
        ctx.mk_bv_value(s, "7").unwrap(),
        ctx.mk_bv_value(s, "0b111").unwrap(),
        ctx.mk_bv_value(s, "#b111").unwrap(),
    ];
    for t in spellings {
        assert_eq!(t, ones);
    }
}

#[test]
fn test_mk_bv_min_signed() {
    let mut ctx = Context::new();
    for i in 0..16usize {
        let s = ctx.mk_bv_sort(i as u32 + 1).unwrap();
        let min = ctx.mk_bv_min_signed(s).unwrap();
        let lit = format!("0b1{}", "0".repeat(i));
        assert_eq!(min, ctx.mk_bv_value(s, lit).unwrap());
    }
}

#[test]
fn test_mk_bv_max_signed() {
    let mut ctx = Context::new();
    for i in 0..16usize {
        let s = ctx.mk_bv_sort(i as u32 + 1).unwrap();
        let max = ctx.mk_bv_max_signed(s).unwrap();
        let lit = format!("0b0{}", "1".repeat(i));
        assert_eq!(max, ctx.mk_bv_value(s, lit).unwrap());
    }
}

#[test]
fn test_mk_fp_value() {
    let mut ctx = Context::new();
    with_fpu(|| {
        let rne = ctx.mk_rm_value(RoundingMode::Rne)?;
        let fp16 = ctx.mk_fp_sort(5, 16)?;
        ctx.mk_fp_value(fp16, 0, 15, 1234)?;
        ctx.mk_fp_value(fp16, "1", 0b1100, "#b1110010010")?;
        ctx.mk_fp_value_from(fp16, rne, 0.31213)?;
        ctx.mk_fp_value_from(fp16, rne, 1.0 / 3.0)?;
        ctx.mk_fp_value_from(fp16, rne, "1/3")?;
        ctx.mk_fp_value_from(fp16, rne, "1.2/-3.03")?;
        ctx.mk_fp_value_from(fp16, rne, "-.123")?;
        let err = ctx.mk_fp_value_from(fp16, rne, "0..1").unwrap_err();
        assert!(err.to_string().contains("invalid value"));
        Ok(())
    });
}

#[test]
fn test_mk_fp_value_from_rounds_exactly() {
    let mut ctx = Context::new();
    with_fpu(|| {
        let fp32 = ctx.mk_fp_sort(8, 24)?;
        let rne = ctx.mk_rm_value(RoundingMode::Rne)?;
        let third = ctx.mk_fp_value_from(fp32, rne, "1/3")?;
        // 0x3EAAAAAB
        let expected = ctx.mk_fp_value(fp32, 0, 0x7d, 0x2a_aaab)?;
        assert_eq!(third, expected);
        Ok(())
    });
}

#[test]
fn test_mk_fp_specials() {
    let mut env = Env::new();
    let fp32 = env.fp32;
    let ctx = &mut env.ctx;
    with_fpu(|| {
        let v = ctx.mk_fp_pos_zero(fp32)?;
        assert!(ctx.term(v)?.is_fp_value_pos_zero());
        let v = ctx.mk_fp_neg_zero(fp32)?;
        assert!(ctx.term(v)?.is_fp_value_neg_zero());
        let v = ctx.mk_fp_pos_inf(fp32)?;
        assert!(ctx.term(v)?.is_fp_value_pos_inf());
        let v = ctx.mk_fp_neg_inf(fp32)?;
        assert!(ctx.term(v)?.is_fp_value_neg_inf());
        let v = ctx.mk_fp_nan(fp32)?;
        assert!(ctx.term(v)?.is_fp_value_nan());
        Ok(())
    });
}

#[test]
fn test_mk_rm_value() {
    let mut ctx = Context::new();
    with_fpu(|| {
        for rm in RoundingMode::ALL {
            let v = ctx.mk_rm_value(rm)?;
            assert!(ctx.term(v)?.is_rm_value());
        }
        Ok(())
    });
}

#[test]
fn test_mk_const() {
    let mut env = Env::new();
    let c1 = env.ctx.mk_const(env.bv8, None).unwrap();
    let c2 = env.ctx.mk_const(env.bv32, None).unwrap();
    assert!(env.ctx.term(c1).unwrap().is_const());
    assert!(env.ctx.term(c2).unwrap().is_const());
    assert_ne!(c1, env.ctx.mk_const(env.bv8, None).unwrap());
    let fp32 = env.fp32;
    let ctx = &mut env.ctx;
    with_fpu(|| {
        let c3 = ctx.mk_const(fp32, None)?;
        assert!(ctx.term(c3)?.is_const());
        Ok(())
    });
}

#[test]
fn test_mk_const_array() {
    let mut env = Env::new();
    let asort = env.ctx.mk_array_sort(env.bv32, env.bv8).unwrap();
    let val = env.ctx.mk_bv_value(env.bv8, 0).unwrap();
    let a = env.ctx.mk_const_array(asort, val).unwrap();
    assert!(env.ctx.term(a).unwrap().is_const_array());

    let wrong = env.ctx.mk_bv_value(env.bv32, 0).unwrap();
    assert!(env.ctx.mk_const_array(asort, wrong).is_err());

    let (fp16, fp32) = (env.fp16, env.fp32);
    let ctx = &mut env.ctx;
    with_fpu(|| {
        let asort = ctx.mk_array_sort(fp32, fp16)?;
        let val = ctx.mk_fp_pos_zero(fp16)?;
        let a = ctx.mk_const_array(asort, val)?;
        assert!(ctx.term(a)?.is_const_array());
        Ok(())
    });
}

#[test]
fn test_mk_var() {
    let mut env = Env::new();
    let v1 = env.ctx.mk_var(env.bv8, None).unwrap();
    let v2 = env.ctx.mk_var(env.bv32, None).unwrap();
    assert!(env.ctx.term(v1).unwrap().is_var());
    assert!(env.ctx.term(v2).unwrap().is_var());
    let fp32 = env.fp32;
    let ctx = &mut env.ctx;
    with_fpu(|| {
        let v3 = ctx.mk_var(fp32, None)?;
        assert!(ctx.term(v3)?.is_var());
        Ok(())
    });
}

#[test]
fn test_mk_term() {
    let mut env = Env::new();
    let ctx = &mut env.ctx;
    let c1 = ctx.mk_const(env.bv32, None).unwrap();
    let c2 = ctx.mk_const(env.bv32, None).unwrap();
    ctx.mk_term(Kind::Distinct, &[c1, c2], &[]).unwrap();
    let t2 = ctx.mk_term(Kind::BvNeg, &[c1], &[]).unwrap();
    let t3 = ctx.mk_term(Kind::BvAdd, &[t2, c1, t2], &[]).unwrap();
    let t4 = ctx.mk_term(Kind::BvExtract, &[t3], &[15, 0]).unwrap();
    assert_eq!(ctx.sort(ctx.sort_of(t4).unwrap()).unwrap().bv_get_size(), Some(16));

    assert!(ctx.mk_term(Kind::Distinct, &[c1], &[]).is_err());
    assert!(ctx.mk_term(Kind::BvExtract, &[t3], &[32, 0]).is_err());
    assert!(ctx.mk_term(Kind::BvExtract, &[t3], &[3, 4]).is_err());

    with_fpu(|| {
        let rne = ctx.mk_rm_value(RoundingMode::Rne)?;
        let t5 = ctx.mk_term(Kind::FpToFpFromBv, &[t3], &[8, 24])?;
        ctx.mk_term(Kind::FpToSbv, &[rne, t5], &[32])?;
        ctx.mk_term(Kind::FpToUbv, &[rne, t5], &[32])?;
        Ok(())
    });
}

#[test]
fn test_substitute() {
    let mut env = Env::new();
    let ctx = &mut env.ctx;
    let x = ctx.mk_var(env.bv32, Some("x")).unwrap();
    let y = ctx.mk_var(env.bv32, Some("y")).unwrap();
    let a = ctx.mk_const(env.bv32, Some("a")).unwrap();
    let b = ctx.mk_const(env.bv32, Some("b")).unwrap();

    let bool_sort = ctx.mk_bool_sort();
    let fsort = ctx.mk_fun_sort(&[env.bv32], bool_sort).unwrap();
    let p = ctx.mk_const(fsort, Some("P")).unwrap();
    let p_x = ctx.mk_term(Kind::Apply, &[p, x], &[]).unwrap();
    let p_y = ctx.mk_term(Kind::Apply, &[p, y], &[]).unwrap();
    let p_a = ctx.mk_term(Kind::Apply, &[p, a], &[]).unwrap();
    let p_b = ctx.mk_term(Kind::Apply, &[p, b], &[]).unwrap();

    let subst: Substitution = [(x, a)].into_iter().collect();
    assert_eq!(ctx.substitute(p_x, &subst).unwrap(), p_a);

    let subst: Substitution = [(x, a), (y, b)].into_iter().collect();
    assert_eq!(
        ctx.substitute_terms(&[p_x, p_y], &subst).unwrap(),
        vec![p_a, p_b]
    );
}

#[test]
fn test_disabled_floating_point() {
    let mut ctx = Context::with_config(SolverConfig::default().with_floating_point(false));
    assert!(!ctx.has_floating_point());
    // Floating-point and rounding-mode sorts are still available
    let fp32 = ctx.mk_fp_sort(8, 24).unwrap();
    let rm = ctx.mk_rm_sort();
    let bv32 = ctx.mk_bv_sort(32).unwrap();
    let fp_array = ctx.mk_array_sort(bv32, fp32).unwrap();
    let rm_array = ctx.mk_array_sort(rm, bv32).unwrap();
    let fp_fun = ctx.mk_fun_sort(&[bv32], fp32).unwrap();
    let x = ctx.mk_const(bv32, None).unwrap();

    let errors = [
        ctx.mk_fp_value(fp32, 0, 127, 0).unwrap_err(),
        ctx.mk_fp_value_from(fp32, x, "1/3").unwrap_err(),
        ctx.mk_fp_pos_zero(fp32).unwrap_err(),
        ctx.mk_fp_neg_zero(fp32).unwrap_err(),
        ctx.mk_fp_pos_inf(fp32).unwrap_err(),
        ctx.mk_fp_neg_inf(fp32).unwrap_err(),
        ctx.mk_fp_nan(fp32).unwrap_err(),
        ctx.mk_rm_value(RoundingMode::Rtz).unwrap_err(),
        ctx.mk_const(fp32, None).unwrap_err(),
        ctx.mk_const(rm, None).unwrap_err(),
        ctx.mk_const(fp_fun, None).unwrap_err(),
        ctx.mk_var(fp32, None).unwrap_err(),
        ctx.mk_var(rm_array, None).unwrap_err(),
        ctx.mk_const_array(fp_array, x).unwrap_err(),
        ctx.mk_term(Kind::FpToFpFromBv, &[x], &[8, 24]).unwrap_err(),
        ctx.mk_term(Kind::FpToFpFromUbv, &[x, x], &[8, 24]).unwrap_err(),
        ctx.mk_term(Kind::FpAdd, &[x, x, x], &[]).unwrap_err(),
        ctx.mk_term(Kind::FpIsNan, &[x], &[]).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Configuration, "{err}");
        assert!(err.to_string().contains("FPU not configured"));
    }

    // Bit-vector construction is unaffected
    let y = ctx.mk_const(bv32, None).unwrap();
    assert!(ctx.mk_term(Kind::BvAdd, &[x, y], &[]).is_ok());
}

#[test]
fn test_fp_value_sign_must_be_a_bit() {
    let mut ctx = Context::new();
    with_fpu(|| {
        let fp16 = ctx.mk_fp_sort(5, 11)?;
        let pos_zero = ctx.mk_fp_pos_zero(fp16)?;
        assert_eq!(ctx.mk_fp_value(fp16, 0, 0, 0)?, pos_zero);
        let err = ctx.mk_fp_value(fp16, 2, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("invalid value"));
        assert!(ctx.mk_fp_value(fp16, -1, 0, 0).is_err());
        // exponent and significand wrap like bit-vector values
        assert_eq!(
            ctx.mk_fp_value(fp16, 1, 0b100000, 0)?,
            ctx.mk_fp_value(fp16, "#b1", 0, 0)?
        );
        Ok(())
    });
}

#[test]
fn test_foreign_handles_are_rejected() {
    let mut ctx1 = Context::new();
    let mut ctx2 = Context::new();
    let s1 = ctx1.mk_bv_sort(8).unwrap();
    let c1 = ctx1.mk_const(s1, None).unwrap();
    let s2 = ctx2.mk_bv_sort(8).unwrap();
    let c2 = ctx2.mk_const(s2, None).unwrap();

    let err = ctx2.mk_const(s1, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(ctx2.mk_term(Kind::BvAdd, &[c1, c2], &[]).is_err());
    assert!(ctx2.assert_formula(c1).is_err());
}

#[test]
fn test_solving_hooks() {
    let mut ctx = Context::with_config(
        SolverConfig::incremental()
            .with_option(SolverOption::ProduceUnsatCores, true)
            .unwrap(),
    );
    let bv8 = ctx.mk_bv_sort(8).unwrap();
    let x = ctx.mk_const(bv8, Some("x")).unwrap();
    let five = ctx.mk_bv_value(bv8, 5).unwrap();
    let zero = ctx.mk_bv_zero(bv8).unwrap();
    let x_is_zero = ctx.mk_term(Kind::Equal, &[x, zero], &[]).unwrap();
    let lt = ctx.mk_term(Kind::BvUlt, &[x, five], &[]).unwrap();

    ctx.assert_formula(lt).unwrap();
    ctx.assume_formula(x_is_zero).unwrap();
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);
    assert_eq!(ctx.get_value(x).unwrap(), zero);
    let model = ctx.print_model().unwrap();
    assert!(model.contains("(define-fun x () (_ BitVec 8) #b00000000)"));
    assert!(ctx.get_unsat_core().is_err());

    let f = ctx.mk_false();
    ctx.assume_formula(f).unwrap();
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Unsat);
    assert!(ctx.is_unsat_assumption(f).unwrap());
    assert_eq!(ctx.get_unsat_assumptions().unwrap(), vec![f]);
    assert!(ctx.get_unsat_core().unwrap().is_empty());
    assert!(ctx.get_value(x).is_err());

    // Assumptions only hold for one check
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);

    ctx.assume_formula(f).unwrap();
    ctx.reset_assumptions().unwrap();
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);

    ctx.assume_formula(f).unwrap();
    ctx.fixate_assumptions().unwrap();
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Unsat);
    assert_eq!(ctx.get_unsat_core().unwrap(), vec![f]);
}

#[test]
fn test_assume_requires_incremental() {
    let mut ctx = Context::new();
    let t = ctx.mk_true();
    assert_eq!(
        ctx.assume_formula(t).unwrap_err(),
        OxbzError::IncrementalNotEnabled
    );
}

#[test]
fn test_get_value_requires_models() {
    let mut ctx = Context::new();
    let t = ctx.mk_true();
    ctx.assert_formula(t).unwrap();
    assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);
    assert!(ctx.get_value(t).is_err());
}
