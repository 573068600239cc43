//! Property-based tests for floating-point rounding and arithmetic

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use oxbz_core::value::{FpFormat, FpValue, RoundingMode};
use oxbz_theories::fp::{convert, ops};
use proptest::prelude::*;

const RNE: RoundingMode = RoundingMode::Rne;

fn finite_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO
}

fn value(x: f32) -> FpValue {
    convert::from_bits(FpFormat::FLOAT32, &BigUint::from(x.to_bits()))
}

fn bits(v: &FpValue) -> u32 {
    convert::to_bits(v).to_u32().unwrap()
}

proptest! {
    /// Every finite value is exactly representable, so rounding it is the identity
    #[test]
    fn rational_round_trip(x in finite_f32()) {
        prop_assume!(x != 0.0);
        let v = value(x);
        let q = convert::to_rational(&v).unwrap();
        for rm in RoundingMode::ALL {
            prop_assert_eq!(bits(&convert::from_rational(FpFormat::FLOAT32, rm, &q)), x.to_bits());
        }
    }

    /// Exact-then-round arithmetic agrees with hardware binary32
    #[test]
    fn arithmetic_matches_native(x in finite_f32(), y in finite_f32()) {
        let (a, b) = (value(x), value(y));
        prop_assert_eq!(bits(&ops::add(RNE, &a, &b)), (x + y).to_bits());
        prop_assert_eq!(bits(&ops::sub(RNE, &a, &b)), (x - y).to_bits());
        prop_assert_eq!(bits(&ops::mul(RNE, &a, &b)), (x * y).to_bits());
        if y != 0.0 {
            prop_assert_eq!(bits(&ops::div(RNE, &a, &b)), (x / y).to_bits());
        }
    }

    /// Fused multiply-add rounds once
    #[test]
    fn fma_matches_native(x in finite_f32(), y in finite_f32(), z in finite_f32()) {
        let r = ops::fma(RNE, &value(x), &value(y), &value(z));
        let expected = x.mul_add(y, z);
        prop_assume!(!expected.is_nan());
        prop_assert_eq!(bits(&r), expected.to_bits());
    }

    /// Comparisons agree with hardware comparisons
    #[test]
    fn comparisons_match_native(x in finite_f32(), y in finite_f32()) {
        let (a, b) = (value(x), value(y));
        prop_assert_eq!(ops::lt(&a, &b), x < y);
        prop_assert_eq!(ops::leq(&a, &b), x <= y);
        prop_assert_eq!(ops::eq(&a, &b), x == y);
    }

    /// Widening to binary64 is exact
    #[test]
    fn widening_is_exact(x in finite_f32()) {
        let wide = ops::to_fp(RNE, &value(x), FpFormat::FLOAT64);
        let expected = BigUint::from(f64::from(x).to_bits());
        prop_assert_eq!(convert::to_bits(&wide), expected);
    }
}
