//! Bit-vector literal normalization
//!
//! A [`BvLiteral`] is any of the accepted spellings of a bit-vector value:
//! a Rust integer, a big integer, or a string in decimal, `0x`/`#x` hex or
//! `0b`/`#b` binary, each optionally preceded by `-`. Converting a literal to
//! a [`BvValue`] reduces it modulo `2^width`, so every spelling of the same
//! two's complement pattern yields the same value.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{Num, One};
use oxbz_core::error::{OxbzError, Result};
use oxbz_core::value::BvValue;

const EXPECTED: &str = "a decimal, hexadecimal (0x, #x) or binary (0b, #b) literal";

/// A bit-vector literal in one of its accepted encodings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BvLiteral {
    /// Integer literal
    Int(BigInt),
    /// Textual literal, parsed on conversion
    Text(String),
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for BvLiteral {
            fn from(n: $t) -> Self {
                Self::Int(BigInt::from(n))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<bool> for BvLiteral {
    fn from(b: bool) -> Self {
        Self::Int(BigInt::from(u8::from(b)))
    }
}

impl From<BigInt> for BvLiteral {
    fn from(n: BigInt) -> Self {
        Self::Int(n)
    }
}

impl From<BigUint> for BvLiteral {
    fn from(n: BigUint) -> Self {
        Self::Int(BigInt::from(n))
    }
}

impl From<&str> for BvLiteral {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for BvLiteral {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl BvLiteral {
    /// The literal as an unbounded integer
    pub fn to_bigint(&self) -> Result<BigInt> {
        match self {
            Self::Int(n) => Ok(n.clone()),
            Self::Text(s) => parse_text(s),
        }
    }

    /// The value of this literal at `width` bits, in two's complement
    pub fn to_value(&self, width: u32) -> Result<BvValue> {
        if width == 0 {
            return Err(OxbzError::invalid_argument(
                "bit-vector width must be greater than zero",
            ));
        }
        Ok(wrap(&self.to_bigint()?, width))
    }

    /// The value of this literal at `width` bits, rejecting negative literals
    /// and literals of `2^width` or more instead of wrapping them
    pub fn to_unsigned_value(&self, width: u32) -> Result<BvValue> {
        let n = self.to_bigint()?;
        if n.sign() == Sign::Minus || n.bits() > u64::from(width) {
            return Err(OxbzError::invalid_value(
                n.to_string(),
                format!("an unsigned value of at most {width} bits"),
            ));
        }
        self.to_value(width)
    }
}

/// Reduce `n` modulo `2^width`
#[must_use]
pub fn wrap(n: &BigInt, width: u32) -> BvValue {
    let modulus = BigInt::one() << width;
    let reduced = n.mod_floor(&modulus);
    let (_, magnitude) = reduced.into_parts();
    BvValue::new(width, magnitude)
}

fn parse_text(text: &str) -> Result<BigInt> {
    let invalid = || OxbzError::invalid_value(text, EXPECTED);
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = if let Some(d) = body.strip_prefix("0x").or(body.strip_prefix("#x")) {
        (16, d)
    } else if let Some(d) = body.strip_prefix("0b").or(body.strip_prefix("#b")) {
        (2, d)
    } else {
        (10, body)
    };
    // from_str_radix tolerates a sign and underscores; only plain digits are valid here
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    let magnitude = BigUint::from_str_radix(digits, radix).map_err(|_| invalid())?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}
