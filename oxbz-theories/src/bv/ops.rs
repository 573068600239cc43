//! Bit-vector operations on concrete values
//!
//! Every function follows the SMT-LIB `FixedSizeBitVectors` semantics,
//! including the total definitions of division and remainder by zero.
//! Binary operations expect operands of equal width; term construction
//! guarantees this before evaluation reaches here.

use super::literal::wrap;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive};
use oxbz_core::value::BvValue;
use std::cmp::Ordering;

fn mk(width: u32, bits: BigUint) -> BvValue {
    BvValue::new(width, bits)
}

/// Two's complement reading of `a`
#[must_use]
pub fn to_signed(a: &BvValue) -> BigInt {
    let unsigned = BigInt::from(a.bits().clone());
    if a.bit(a.width() - 1) {
        unsigned - (BigInt::one() << a.width())
    } else {
        unsigned
    }
}

fn msb(a: &BvValue) -> bool {
    a.bit(a.width() - 1)
}

fn shift_amount(b: &BvValue, width: u32) -> Option<u32> {
    b.bits().to_u32().filter(|&n| n < width)
}

/// Bitwise not
#[must_use]
pub fn not(a: &BvValue) -> BvValue {
    mk(a.width(), BvValue::mask(a.width()) ^ a.bits())
}

/// Two's complement negation
#[must_use]
pub fn neg(a: &BvValue) -> BvValue {
    let modulus = BigUint::one() << a.width();
    mk(a.width(), (modulus - a.bits()) & BvValue::mask(a.width()))
}

/// `a + 1`
#[must_use]
pub fn inc(a: &BvValue) -> BvValue {
    mk(a.width(), a.bits() + 1u32)
}

/// `a - 1`
#[must_use]
pub fn dec(a: &BvValue) -> BvValue {
    sub(a, &BvValue::one(a.width()))
}

/// All bits set
#[must_use]
pub fn redand(a: &BvValue) -> bool {
    *a.bits() == BvValue::mask(a.width())
}

/// Any bit set
#[must_use]
pub fn redor(a: &BvValue) -> bool {
    !a.is_zero()
}

/// Odd number of bits set
#[must_use]
pub fn redxor(a: &BvValue) -> bool {
    a.bits().count_ones() % 2 == 1
}

/// Modular addition
#[must_use]
pub fn add(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width(), a.bits() + b.bits())
}

/// Modular subtraction
#[must_use]
pub fn sub(a: &BvValue, b: &BvValue) -> BvValue {
    add(a, &neg(b))
}

/// Modular multiplication
#[must_use]
pub fn mul(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width(), a.bits() * b.bits())
}

/// Bitwise and
#[must_use]
pub fn and(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width(), a.bits() & b.bits())
}

/// Bitwise or
#[must_use]
pub fn or(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width(), a.bits() | b.bits())
}

/// Bitwise xor
#[must_use]
pub fn xor(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width(), a.bits() ^ b.bits())
}

/// Bitwise nand
#[must_use]
pub fn nand(a: &BvValue, b: &BvValue) -> BvValue {
    not(&and(a, b))
}

/// Bitwise nor
#[must_use]
pub fn nor(a: &BvValue, b: &BvValue) -> BvValue {
    not(&or(a, b))
}

/// Bitwise xnor
#[must_use]
pub fn xnor(a: &BvValue, b: &BvValue) -> BvValue {
    not(&xor(a, b))
}

/// Shift left; amounts of at least the width give zero
#[must_use]
pub fn shl(a: &BvValue, b: &BvValue) -> BvValue {
    match shift_amount(b, a.width()) {
        Some(n) => mk(a.width(), a.bits() << n),
        None => BvValue::zero(a.width()),
    }
}

/// Logical shift right
#[must_use]
pub fn lshr(a: &BvValue, b: &BvValue) -> BvValue {
    match shift_amount(b, a.width()) {
        Some(n) => mk(a.width(), a.bits() >> n),
        None => BvValue::zero(a.width()),
    }
}

/// Arithmetic shift right
#[must_use]
pub fn ashr(a: &BvValue, b: &BvValue) -> BvValue {
    if msb(a) {
        not(&lshr(&not(a), b))
    } else {
        lshr(a, b)
    }
}

/// Unsigned division; division by zero gives all ones
#[must_use]
pub fn udiv(a: &BvValue, b: &BvValue) -> BvValue {
    if b.is_zero() {
        return BvValue::ones(a.width());
    }
    mk(a.width(), a.bits() / b.bits())
}

/// Unsigned remainder; remainder by zero gives the dividend
#[must_use]
pub fn urem(a: &BvValue, b: &BvValue) -> BvValue {
    if b.is_zero() {
        return a.clone();
    }
    mk(a.width(), a.bits() % b.bits())
}

/// Signed division, truncating
#[must_use]
pub fn sdiv(a: &BvValue, b: &BvValue) -> BvValue {
    match (msb(a), msb(b)) {
        (false, false) => udiv(a, b),
        (true, false) => neg(&udiv(&neg(a), b)),
        (false, true) => neg(&udiv(a, &neg(b))),
        (true, true) => udiv(&neg(a), &neg(b)),
    }
}

/// Signed remainder, sign follows the dividend
#[must_use]
pub fn srem(a: &BvValue, b: &BvValue) -> BvValue {
    match (msb(a), msb(b)) {
        (false, false) => urem(a, b),
        (true, false) => neg(&urem(&neg(a), b)),
        (false, true) => urem(a, &neg(b)),
        (true, true) => neg(&urem(&neg(a), &neg(b))),
    }
}

/// Signed modulo, sign follows the divisor
#[must_use]
pub fn smod(a: &BvValue, b: &BvValue) -> BvValue {
    let abs_a = if msb(a) { neg(a) } else { a.clone() };
    let abs_b = if msb(b) { neg(b) } else { b.clone() };
    let u = urem(&abs_a, &abs_b);
    if u.is_zero() {
        return u;
    }
    match (msb(a), msb(b)) {
        (false, false) => u,
        (true, false) => add(&neg(&u), b),
        (false, true) => add(&u, b),
        (true, true) => neg(&u),
    }
}

/// Rotate left by a constant
#[must_use]
pub fn roli(a: &BvValue, n: u32) -> BvValue {
    let w = a.width();
    let n = n % w;
    if n == 0 {
        return a.clone();
    }
    mk(w, (a.bits() << n) | (a.bits() >> (w - n)))
}

/// Rotate right by a constant
#[must_use]
pub fn rori(a: &BvValue, n: u32) -> BvValue {
    let w = a.width();
    roli(a, w - n % w)
}

fn rotation(a: &BvValue, b: &BvValue) -> u32 {
    let w = BigUint::from(a.width());
    (b.bits() % w).to_u32().unwrap_or(0)
}

/// Rotate left by a bit-vector amount
#[must_use]
pub fn rol(a: &BvValue, b: &BvValue) -> BvValue {
    roli(a, rotation(a, b))
}

/// Rotate right by a bit-vector amount
#[must_use]
pub fn ror(a: &BvValue, b: &BvValue) -> BvValue {
    rori(a, rotation(a, b))
}

/// Concatenation, first operand most significant
#[must_use]
pub fn concat(a: &BvValue, b: &BvValue) -> BvValue {
    mk(a.width() + b.width(), (a.bits() << b.width()) | b.bits())
}

/// Bits `hi` down to `lo`
#[must_use]
pub fn extract(a: &BvValue, hi: u32, lo: u32) -> BvValue {
    mk(hi - lo + 1, a.bits() >> lo)
}

/// `n` copies of `a`
#[must_use]
pub fn repeat(a: &BvValue, n: u32) -> BvValue {
    let mut acc = a.clone();
    for _ in 1..n {
        acc = concat(&acc, a);
    }
    acc
}

/// Zero extension by `n` bits
#[must_use]
pub fn zero_extend(a: &BvValue, n: u32) -> BvValue {
    mk(a.width() + n, a.bits().clone())
}

/// Sign extension by `n` bits
#[must_use]
pub fn sign_extend(a: &BvValue, n: u32) -> BvValue {
    wrap(&to_signed(a), a.width() + n)
}

/// Unsigned comparison
#[must_use]
pub fn ucmp(a: &BvValue, b: &BvValue) -> Ordering {
    a.bits().cmp(b.bits())
}

/// Signed comparison
#[must_use]
pub fn scmp(a: &BvValue, b: &BvValue) -> Ordering {
    to_signed(a).cmp(&to_signed(b))
}

fn signed_fits(n: &BigInt, width: u32) -> bool {
    let half = BigInt::one() << (width - 1);
    *n >= -half.clone() && *n < half
}

/// Unsigned addition overflows
#[must_use]
pub fn uaddo(a: &BvValue, b: &BvValue) -> bool {
    (a.bits() + b.bits()).bits() > u64::from(a.width())
}

/// Signed addition overflows
#[must_use]
pub fn saddo(a: &BvValue, b: &BvValue) -> bool {
    !signed_fits(&(to_signed(a) + to_signed(b)), a.width())
}

/// Unsigned multiplication overflows
#[must_use]
pub fn umulo(a: &BvValue, b: &BvValue) -> bool {
    (a.bits() * b.bits()).bits() > u64::from(a.width())
}

/// Signed multiplication overflows
#[must_use]
pub fn smulo(a: &BvValue, b: &BvValue) -> bool {
    !signed_fits(&(to_signed(a) * to_signed(b)), a.width())
}

/// Unsigned subtraction overflows
#[must_use]
pub fn usubo(a: &BvValue, b: &BvValue) -> bool {
    a.bits() < b.bits()
}

/// Signed subtraction overflows
#[must_use]
pub fn ssubo(a: &BvValue, b: &BvValue) -> bool {
    !signed_fits(&(to_signed(a) - to_signed(b)), a.width())
}

/// Signed division overflows: minimum signed value divided by -1
#[must_use]
pub fn sdivo(a: &BvValue, b: &BvValue) -> bool {
    *a == BvValue::min_signed(a.width()) && *b == BvValue::ones(b.width())
}
