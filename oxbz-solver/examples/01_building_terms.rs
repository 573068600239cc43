//! # Building Terms Example
//!
//! This example walks through the solver context API:
//! - Creating bit-vector and floating-point sorts and values
//! - Building operator applications
//! - Incremental solving with scopes and assumptions
//! - Reading values from a model
//!
//! Run with: cargo run --example 01_building_terms

use oxbz_solver::{Context, Kind, Result, RoundingMode, SolverConfig, SolverOption};

fn main() -> Result<()> {
    println!("=== OxBZ: Building Terms ===\n");

    let config =
        SolverConfig::incremental().with_option(SolverOption::ProduceUnsatCores, true)?;
    let mut ctx = Context::with_config(config);
    println!("{} ({})", ctx.version(), ctx.git_id());

    // ===== Bit-vectors =====
    println!("\n--- Bit-vectors ---");
    let bv8 = ctx.mk_bv_sort(8)?;
    let x = ctx.mk_const(bv8, Some("x"))?;
    let ones = ctx.mk_bv_ones(bv8)?;
    let minus_one = ctx.mk_bv_value(bv8, -1)?;
    println!(
        "ones = {}, -1 = {}",
        ctx.term_to_string(ones)?,
        ctx.term_to_string(minus_one)?
    );
    assert_eq!(ones, minus_one);

    let neg = ctx.mk_term(Kind::BvNeg, &[x], &[])?;
    let sum = ctx.mk_term(Kind::BvAdd, &[x, neg], &[])?;
    let low = ctx.mk_term(Kind::BvExtract, &[sum], &[3, 0])?;
    println!("term: {}", ctx.term_to_string(low)?);
    println!("sort: {}", ctx.sort_to_string(ctx.sort_of(low)?)?);

    // ===== Floating-point =====
    println!("\n--- Floating-point ---");
    if ctx.has_floating_point() {
        let fp32 = ctx.mk_fp_sort(8, 24)?;
        let rne = ctx.mk_rm_value(RoundingMode::Rne)?;
        let third = ctx.mk_fp_value_from(fp32, rne, "1/3")?;
        println!("1/3 as fp32: {}", ctx.term_to_string(third)?);
    } else {
        println!("built without floating-point support");
    }

    // ===== Incremental solving =====
    println!("\n--- Incremental solving ---");
    let five = ctx.mk_bv_value(bv8, 5)?;
    let lt = ctx.mk_term(Kind::BvUlt, &[x, five], &[])?;
    ctx.assert_formula(lt)?;

    ctx.push(1)?;
    let zero = ctx.mk_bv_zero(bv8)?;
    let is_zero = ctx.mk_term(Kind::Equal, &[x, zero], &[])?;
    ctx.assert_formula(is_zero)?;
    println!("check-sat: {}", ctx.check_sat()?);
    let value = ctx.get_value(x)?;
    println!("x = {}", ctx.term_to_string(value)?);
    println!("{}", ctx.print_model()?);
    ctx.pop(1)?;

    let f = ctx.mk_false();
    ctx.assume_formula(f)?;
    println!("check-sat with false assumed: {}", ctx.check_sat()?);
    println!("unsat assumptions: {:?}", ctx.get_unsat_assumptions()?);

    println!("\n--- Script ---");
    print!("{}", ctx.dump_formula("smt2")?);

    Ok(())
}
