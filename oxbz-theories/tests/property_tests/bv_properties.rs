//! Property-based tests for bit-vector literals and operations

use num_bigint::BigInt;
use oxbz_core::value::BvValue;
use oxbz_theories::bv::{BvLiteral, ops, wrap};
use proptest::prelude::*;

fn bv64(n: u64) -> BvValue {
    BvLiteral::from(n).to_value(64).unwrap()
}

proptest! {
    /// Decimal, hex and binary spellings denote the same value
    #[test]
    fn literal_spellings_agree(n in any::<u64>(), width in 1u32..80) {
        let dec = BvLiteral::from(n.to_string()).to_value(width).unwrap();
        let hex = BvLiteral::from(format!("#x{n:x}")).to_value(width).unwrap();
        let bin = BvLiteral::from(format!("0b{n:b}")).to_value(width).unwrap();
        prop_assert_eq!(&dec, &hex);
        prop_assert_eq!(&dec, &bin);
        prop_assert_eq!(dec, BvLiteral::from(n).to_value(width).unwrap());
    }

    /// Negative literals are two's complement
    #[test]
    fn negative_literals_wrap(n in any::<i32>()) {
        let v = BvLiteral::from(n).to_value(32).unwrap();
        prop_assert_eq!(v.bits().clone(), num_bigint::BigUint::from(n as u32));
        prop_assert_eq!(ops::to_signed(&v), BigInt::from(n));
    }

    /// Modular arithmetic matches machine words
    #[test]
    fn arithmetic_matches_u64(a in any::<u64>(), b in any::<u64>()) {
        let (x, y) = (bv64(a), bv64(b));
        prop_assert_eq!(ops::add(&x, &y), bv64(a.wrapping_add(b)));
        prop_assert_eq!(ops::sub(&x, &y), bv64(a.wrapping_sub(b)));
        prop_assert_eq!(ops::mul(&x, &y), bv64(a.wrapping_mul(b)));
        prop_assert_eq!(ops::xor(&x, &y), bv64(a ^ b));
        prop_assert_eq!(ops::uaddo(&x, &y), a.checked_add(b).is_none());
        if b != 0 {
            prop_assert_eq!(ops::udiv(&x, &y), bv64(a / b));
            prop_assert_eq!(ops::urem(&x, &y), bv64(a % b));
        }
    }

    /// Signed division and remainder recombine to the dividend
    #[test]
    fn signed_division_identity(a in any::<i16>(), b in any::<i16>()) {
        prop_assume!(b != 0);
        let x = BvLiteral::from(a).to_value(16).unwrap();
        let y = BvLiteral::from(b).to_value(16).unwrap();
        let q = ops::sdiv(&x, &y);
        let r = ops::srem(&x, &y);
        prop_assert_eq!(ops::add(&ops::mul(&q, &y), &r), x);
        prop_assert_eq!(ops::to_signed(&q), BigInt::from(a.wrapping_div(b)));
    }

    /// Shifts beyond the width clear (or sign-fill) the value
    #[test]
    fn shifts_match_u32(a in any::<u32>(), s in 0u32..40) {
        let x = BvLiteral::from(a).to_value(32).unwrap();
        let amount = BvLiteral::from(s).to_value(32).unwrap();
        let expected = a.checked_shl(s).unwrap_or(0);
        prop_assert_eq!(ops::shl(&x, &amount), BvLiteral::from(expected).to_value(32).unwrap());
        let expected = ((a as i32) >> s.min(31)) as u32;
        prop_assert_eq!(ops::ashr(&x, &amount), BvLiteral::from(expected).to_value(32).unwrap());
    }

    /// Signed extremes round-trip through their signed reading
    #[test]
    fn signed_extremes(width in 1u32..128) {
        let half = BigInt::from(1) << (width - 1);
        prop_assert_eq!(ops::to_signed(&BvValue::min_signed(width)), -half.clone());
        prop_assert_eq!(ops::to_signed(&BvValue::max_signed(width)), half - 1);
        prop_assert_eq!(wrap(&BigInt::from(-1), width), BvValue::ones(width));
    }
}
