//! Exact conversion between rationals and floating-point values
//!
//! [`from_rational`] is correctly rounded under all five rounding modes:
//! the significand is computed exactly with big integers, the remainder
//! decides the rounding direction, and overflow and gradual underflow are
//! handled after rounding.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use oxbz_core::value::{BvValue, FpFormat, FpValue, RoundingMode};
use std::cmp::Ordering;

/// Decide whether a truncated magnitude must be incremented
///
/// `half` compares the discarded remainder against half a unit in the last
/// place, `odd` is the parity of the truncated magnitude.
#[must_use]
pub fn should_round_up(
    rm: RoundingMode,
    sign: bool,
    odd: bool,
    half: Ordering,
    inexact: bool,
) -> bool {
    match rm {
        RoundingMode::Rne => half == Ordering::Greater || (half == Ordering::Equal && odd),
        RoundingMode::Rna => half != Ordering::Less,
        RoundingMode::Rtp => inexact && !sign,
        RoundingMode::Rtn => inexact && sign,
        RoundingMode::Rtz => false,
    }
}

/// Floor of `num / den` with the rounding information of the remainder
fn divide(num: &BigInt, den: &BigInt) -> (BigInt, Ordering, bool) {
    let (q, r) = num.div_mod_floor(den);
    let half = (&r << 1u32).cmp(den);
    (q, half, !r.is_zero())
}

/// Round `q` to an integer under `rm`
#[must_use]
pub fn round_to_integer(q: &BigRational, rm: RoundingMode) -> BigInt {
    let sign = q.is_negative();
    let a = q.abs();
    let (m, half, inexact) = divide(a.numer(), a.denom());
    let m = if should_round_up(rm, sign, m.is_odd(), half, inexact) {
        m + 1u32
    } else {
        m
    };
    if sign { -m } else { m }
}

/// Value closest to infinity with `sign` allowed by `rm` on overflow
fn overflow(format: FpFormat, rm: RoundingMode, sign: bool) -> FpValue {
    match rm {
        RoundingMode::Rtp if sign => FpValue::max_finite(format, true),
        RoundingMode::Rtn if !sign => FpValue::max_finite(format, false),
        RoundingMode::Rtz => FpValue::max_finite(format, sign),
        _ => FpValue::infinity(format, sign),
    }
}

/// `floor(log2(n / d))` for positive `n`, `d`
fn floor_log2(n: &BigInt, d: &BigInt) -> i64 {
    let e0 = n.bits() as i64 - d.bits() as i64;
    let below = if e0 >= 0 {
        *n < d << (e0 as u64)
    } else {
        (n << ((-e0) as u64)) < *d
    };
    if below { e0 - 1 } else { e0 }
}

/// Round the rational `q` into `format` under `rm`
///
/// Zero converts to +0.
#[must_use]
pub fn from_rational(format: FpFormat, rm: RoundingMode, q: &BigRational) -> FpValue {
    if q.is_zero() {
        return FpValue::pos_zero(format);
    }
    let sign = q.is_negative();
    let a = q.abs();
    let (n, d) = (a.numer(), a.denom());

    let p = i64::from(format.significand);
    let bias = format.bias();
    let (emin, emax) = (1 - bias, bias);
    let exp = floor_log2(n, d);

    if exp > emax + 1 {
        return overflow(format, rm, sign);
    }

    let (mut m, mut e) = if exp < emin - p {
        // Below half the smallest subnormal: truncates to zero.
        let up = should_round_up(rm, sign, false, Ordering::Less, true);
        (if up { BigInt::one() } else { BigInt::zero() }, emin)
    } else {
        let e = exp.max(emin);
        let shift = p - 1 - e;
        let (num, den) = if shift >= 0 {
            (n << (shift as u64), d.clone())
        } else {
            (n.clone(), d << ((-shift) as u64))
        };
        let (m, half, inexact) = divide(&num, &den);
        let m = if should_round_up(rm, sign, m.is_odd(), half, inexact) {
            m + 1u32
        } else {
            m
        };
        (m, e)
    };

    let hidden = BigInt::one() << ((p - 1) as u64);
    if m == &hidden << 1u32 {
        m = hidden.clone();
        e += 1;
    }
    if e > emax {
        return overflow(format, rm, sign);
    }

    let (biased, trailing) = if m >= hidden {
        (e + bias, m - &hidden)
    } else {
        (0, m)
    };
    let (_, trailing) = trailing.into_parts();
    FpValue::new(format, sign, BigUint::from(biased as u64), trailing)
}

/// Exact value of a finite floating-point number; `None` for NaN and infinities
#[must_use]
pub fn to_rational(v: &FpValue) -> Option<BigRational> {
    if v.is_nan() || v.is_infinite() {
        return None;
    }
    let format = v.format();
    let bias = format.bias();
    let p = i64::from(format.significand);
    let biased = v.exponent().to_i64()?;
    let trailing = BigInt::from(v.significand().clone());
    let (m, e) = if biased == 0 {
        (trailing, 1 - bias)
    } else {
        (trailing + (BigInt::one() << ((p - 1) as u64)), biased - bias)
    };
    let shift = e - (p - 1);
    let magnitude = if shift >= 0 {
        BigRational::from_integer(m << (shift as u64))
    } else {
        BigRational::new(m, BigInt::one() << ((-shift) as u64))
    };
    Some(if v.sign() { -magnitude } else { magnitude })
}

/// Value of a signed or unsigned integer in `format`, rounded under `rm`
#[must_use]
pub fn from_integer(format: FpFormat, rm: RoundingMode, n: &BigInt) -> FpValue {
    from_rational(format, rm, &BigRational::from_integer(n.clone()))
}

/// Reinterpret an IEEE interchange bit pattern as a value of `format`
#[must_use]
pub fn from_bits(format: FpFormat, bits: &BigUint) -> FpValue {
    let trailing = format.trailing_bits();
    let significand = bits & BvValue::mask(trailing);
    let exponent = (bits >> trailing) & BvValue::mask(format.exponent);
    let sign = bits.bit(u64::from(trailing + format.exponent));
    FpValue::new(format, sign, exponent, significand)
}

/// IEEE interchange bit pattern of `v`
#[must_use]
pub fn to_bits(v: &FpValue) -> BigUint {
    let format = v.format();
    let trailing = format.trailing_bits();
    let sign = if v.sign() {
        BigUint::one() << (trailing + format.exponent)
    } else {
        BigUint::zero()
    };
    sign | (v.exponent() << trailing) | v.significand()
}
