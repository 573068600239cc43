//! Floating-point operations on concrete values
//!
//! Finite operands are combined exactly as rationals and rounded once, which
//! gives the correctly rounded IEEE-754 result. Special operands (NaN,
//! infinities, signed zeros) are dispatched first.
//!
//! Operations whose result the SMT-LIB standard leaves unspecified return
//! `None` (`fp.min`/`fp.max` of zeros with different signs, out-of-range
//! `fp.to_ubv`/`fp.to_sbv`), as does `fp.sqrt` of a value whose root is not
//! computed here.

use super::convert::{from_integer, from_rational, round_to_integer, to_rational};
use crate::bv::{ops::to_signed, wrap};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use oxbz_core::value::{BvValue, FpFormat, FpValue, RoundingMode};
use std::cmp::Ordering;

/// Magnitude with the sign bit cleared
#[must_use]
pub fn abs(a: &FpValue) -> FpValue {
    if a.is_nan() {
        return a.clone();
    }
    FpValue::new(a.format(), false, a.exponent().clone(), a.significand().clone())
}

/// Sign bit flipped
#[must_use]
pub fn neg(a: &FpValue) -> FpValue {
    if a.is_nan() {
        return a.clone();
    }
    FpValue::new(
        a.format(),
        !a.sign(),
        a.exponent().clone(),
        a.significand().clone(),
    )
}

/// Negative and not NaN
#[must_use]
pub fn is_negative(a: &FpValue) -> bool {
    !a.is_nan() && a.sign()
}

/// Positive and not NaN
#[must_use]
pub fn is_positive(a: &FpValue) -> bool {
    !a.is_nan() && !a.sign()
}

/// Total order of non-NaN values where both zeros compare equal
#[must_use]
pub fn compare(a: &FpValue, b: &FpValue) -> Option<Ordering> {
    if a.is_nan() || b.is_nan() {
        return None;
    }
    let rank = |v: &FpValue| match (v.is_infinite(), v.sign()) {
        (true, true) => 0,
        (true, false) => 2,
        _ => 1,
    };
    match rank(a).cmp(&rank(b)) {
        Ordering::Equal if rank(a) == 1 => Some(to_rational(a)?.cmp(&to_rational(b)?)),
        ord => Some(ord),
    }
}

/// IEEE equality (`fp.eq`)
#[must_use]
pub fn eq(a: &FpValue, b: &FpValue) -> bool {
    compare(a, b) == Some(Ordering::Equal)
}

/// `fp.lt`
#[must_use]
pub fn lt(a: &FpValue, b: &FpValue) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

/// `fp.leq`
#[must_use]
pub fn leq(a: &FpValue, b: &FpValue) -> bool {
    matches!(compare(a, b), Some(Ordering::Less | Ordering::Equal))
}

fn exact_zero_sum(rm: RoundingMode) -> bool {
    rm == RoundingMode::Rtn
}

/// `fp.add`
#[must_use]
pub fn add(rm: RoundingMode, a: &FpValue, b: &FpValue) -> FpValue {
    let format = a.format();
    if a.is_nan() || b.is_nan() {
        return FpValue::nan(format);
    }
    match (a.is_infinite(), b.is_infinite()) {
        (true, true) if a.sign() != b.sign() => return FpValue::nan(format),
        (true, _) => return a.clone(),
        (_, true) => return b.clone(),
        _ => {}
    }
    if a.is_zero() && b.is_zero() && a.sign() == b.sign() {
        return a.clone();
    }
    let (Some(qa), Some(qb)) = (to_rational(a), to_rational(b)) else {
        return FpValue::nan(format);
    };
    let sum = qa + qb;
    if sum.is_zero() {
        return FpValue::zero(format, exact_zero_sum(rm));
    }
    from_rational(format, rm, &sum)
}

/// `fp.sub`
#[must_use]
pub fn sub(rm: RoundingMode, a: &FpValue, b: &FpValue) -> FpValue {
    add(rm, a, &neg(b))
}

/// `fp.mul`
#[must_use]
pub fn mul(rm: RoundingMode, a: &FpValue, b: &FpValue) -> FpValue {
    let format = a.format();
    let sign = a.sign() != b.sign();
    if a.is_nan() || b.is_nan() {
        return FpValue::nan(format);
    }
    if a.is_infinite() || b.is_infinite() {
        if a.is_zero() || b.is_zero() {
            return FpValue::nan(format);
        }
        return FpValue::infinity(format, sign);
    }
    if a.is_zero() || b.is_zero() {
        return FpValue::zero(format, sign);
    }
    let (Some(qa), Some(qb)) = (to_rational(a), to_rational(b)) else {
        return FpValue::nan(format);
    };
    from_rational(format, rm, &(qa * qb))
}

/// `fp.div`
#[must_use]
pub fn div(rm: RoundingMode, a: &FpValue, b: &FpValue) -> FpValue {
    let format = a.format();
    let sign = a.sign() != b.sign();
    if a.is_nan() || b.is_nan() {
        return FpValue::nan(format);
    }
    match (a.is_infinite(), b.is_infinite()) {
        (true, true) => return FpValue::nan(format),
        (true, false) => return FpValue::infinity(format, sign),
        (false, true) => return FpValue::zero(format, sign),
        (false, false) => {}
    }
    match (a.is_zero(), b.is_zero()) {
        (true, true) => return FpValue::nan(format),
        (false, true) => return FpValue::infinity(format, sign),
        (true, false) => return FpValue::zero(format, sign),
        (false, false) => {}
    }
    let (Some(qa), Some(qb)) = (to_rational(a), to_rational(b)) else {
        return FpValue::nan(format);
    };
    from_rational(format, rm, &(qa / qb))
}

/// `fp.fma`: `a * b + c` with a single rounding
#[must_use]
pub fn fma(rm: RoundingMode, a: &FpValue, b: &FpValue, c: &FpValue) -> FpValue {
    let format = a.format();
    if a.is_nan() || b.is_nan() || c.is_nan() {
        return FpValue::nan(format);
    }
    let product_sign = a.sign() != b.sign();
    if a.is_infinite() || b.is_infinite() {
        if a.is_zero() || b.is_zero() || (c.is_infinite() && c.sign() != product_sign) {
            return FpValue::nan(format);
        }
        return FpValue::infinity(format, product_sign);
    }
    if c.is_infinite() {
        return c.clone();
    }
    let (Some(qa), Some(qb), Some(qc)) = (to_rational(a), to_rational(b), to_rational(c)) else {
        return FpValue::nan(format);
    };
    let product = qa * qb;
    let product_is_zero = product.is_zero();
    let sum = product + qc;
    if sum.is_zero() {
        let sign = if product_is_zero && c.is_zero() && product_sign == c.sign() {
            product_sign
        } else {
            exact_zero_sum(rm)
        };
        return FpValue::zero(format, sign);
    }
    from_rational(format, rm, &sum)
}

/// `fp.rem`: `a - b * n` where `n` is `a / b` rounded to nearest even
#[must_use]
pub fn rem(a: &FpValue, b: &FpValue) -> FpValue {
    let format = a.format();
    if a.is_nan() || b.is_nan() || a.is_infinite() || b.is_zero() {
        return FpValue::nan(format);
    }
    if b.is_infinite() || a.is_zero() {
        return a.clone();
    }
    let (Some(qa), Some(qb)) = (to_rational(a), to_rational(b)) else {
        return FpValue::nan(format);
    };
    let n = round_to_integer(&(&qa / &qb), RoundingMode::Rne);
    let r = qa - qb * BigRational::from_integer(n);
    if r.is_zero() {
        return FpValue::zero(format, a.sign());
    }
    // The remainder is exactly representable.
    from_rational(format, RoundingMode::Rne, &r)
}

/// `fp.roundToIntegral`
#[must_use]
pub fn round_to_integral(rm: RoundingMode, a: &FpValue) -> FpValue {
    if a.is_nan() || a.is_infinite() || a.is_zero() {
        return a.clone();
    }
    let Some(q) = to_rational(a) else {
        return a.clone();
    };
    let n = round_to_integer(&q, rm);
    if n.is_zero() {
        return FpValue::zero(a.format(), a.sign());
    }
    from_integer(a.format(), rm, &n)
}

/// `fp.sqrt`, folded only when the root is exact
#[must_use]
pub fn sqrt(rm: RoundingMode, a: &FpValue) -> Option<FpValue> {
    let format = a.format();
    if a.is_nan() || (a.sign() && !a.is_zero()) {
        return Some(FpValue::nan(format));
    }
    if a.is_zero() || a.is_infinite() {
        return Some(a.clone());
    }
    let q = to_rational(a)?;
    let (n, d) = (q.numer().sqrt(), q.denom().sqrt());
    if &n * &n == *q.numer() && &d * &d == *q.denom() {
        return Some(from_rational(format, rm, &BigRational::new(n, d)));
    }
    None
}

fn min_max(a: &FpValue, b: &FpValue, pick: Ordering) -> Option<FpValue> {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => return Some(a.clone()),
        (true, false) => return Some(b.clone()),
        (false, true) => return Some(a.clone()),
        (false, false) => {}
    }
    if a.is_zero() && b.is_zero() && a.sign() != b.sign() {
        return None;
    }
    match compare(a, b)? {
        ord if ord == pick => Some(a.clone()),
        Ordering::Equal => Some(a.clone()),
        _ => Some(b.clone()),
    }
}

/// `fp.min`
#[must_use]
pub fn min(a: &FpValue, b: &FpValue) -> Option<FpValue> {
    min_max(a, b, Ordering::Less)
}

/// `fp.max`
#[must_use]
pub fn max(a: &FpValue, b: &FpValue) -> Option<FpValue> {
    min_max(a, b, Ordering::Greater)
}

/// Conversion between formats
#[must_use]
pub fn to_fp(rm: RoundingMode, a: &FpValue, format: FpFormat) -> FpValue {
    if a.is_nan() {
        return FpValue::nan(format);
    }
    if a.is_infinite() {
        return FpValue::infinity(format, a.sign());
    }
    if a.is_zero() {
        return FpValue::zero(format, a.sign());
    }
    match to_rational(a) {
        Some(q) => from_rational(format, rm, &q),
        None => FpValue::nan(format),
    }
}

/// Signed bit-vector to float
#[must_use]
pub fn from_sbv(rm: RoundingMode, bv: &BvValue, format: FpFormat) -> FpValue {
    from_integer(format, rm, &to_signed(bv))
}

/// Unsigned bit-vector to float
#[must_use]
pub fn from_ubv(rm: RoundingMode, bv: &BvValue, format: FpFormat) -> FpValue {
    from_integer(format, rm, &BigInt::from(bv.bits().clone()))
}

fn to_integer(rm: RoundingMode, a: &FpValue) -> Option<BigInt> {
    if a.is_nan() || a.is_infinite() {
        return None;
    }
    Some(round_to_integer(&to_rational(a)?, rm))
}

/// Float to unsigned bit-vector of `width` bits, `None` when out of range
#[must_use]
pub fn to_ubv(rm: RoundingMode, a: &FpValue, width: u32) -> Option<BvValue> {
    let n = to_integer(rm, a)?;
    let limit = BigInt::one() << width;
    (n >= BigInt::zero() && n < limit).then(|| wrap(&n, width))
}

/// Float to signed bit-vector of `width` bits, `None` when out of range
#[must_use]
pub fn to_sbv(rm: RoundingMode, a: &FpValue, width: u32) -> Option<BvValue> {
    let n = to_integer(rm, a)?;
    let half = BigInt::one() << (width - 1);
    (n >= -half.clone() && n < half).then(|| wrap(&n, width))
}
