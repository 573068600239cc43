//! Real-number literals for floating-point construction
//!
//! Accepted textual forms are decimals (`3`, `-0.5`, `.25`, `7.`) and
//! fractions `a/b` where both sides are decimals (`1.2/-3.03`). Finite Rust
//! floats and integers are taken at their exact value.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Num, Pow, Zero};
use oxbz_core::error::{OxbzError, Result};

const EXPECTED: &str = "a decimal (e.g. -1.25) or a fraction of decimals (e.g. 1/3)";

/// A real-number literal
#[derive(Debug, Clone, PartialEq)]
pub enum RealLiteral {
    /// Textual literal, parsed on conversion
    Text(String),
    /// Binary floating-point literal
    Float(f64),
    /// Exact rational
    Rational(BigRational),
}

impl From<&str> for RealLiteral {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RealLiteral {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RealLiteral {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<f32> for RealLiteral {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<BigRational> for RealLiteral {
    fn from(q: BigRational) -> Self {
        Self::Rational(q)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for RealLiteral {
            fn from(n: $t) -> Self {
                Self::Rational(BigRational::from_integer(BigInt::from(n)))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl RealLiteral {
    /// The exact rational denoted by this literal
    pub fn to_rational(&self) -> Result<BigRational> {
        match self {
            Self::Text(s) => parse_text(s),
            Self::Float(x) => BigRational::from_float(*x)
                .ok_or_else(|| OxbzError::invalid_value(x.to_string(), "a finite number")),
            Self::Rational(q) => Ok(q.clone()),
        }
    }
}

fn parse_text(text: &str) -> Result<BigRational> {
    let invalid = || OxbzError::invalid_value(text, EXPECTED);
    match text.split_once('/') {
        Some((num, den)) => {
            let num = parse_decimal(num).ok_or_else(invalid)?;
            let den = parse_decimal(den).ok_or_else(invalid)?;
            if den.is_zero() {
                return Err(invalid());
            }
            Ok(num / den)
        }
        None => parse_decimal(text).ok_or_else(invalid),
    }
}

/// `-?digits*(.digits*)?` with at least one digit
fn parse_decimal(text: &str) -> Option<BigRational> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    let digits = format!("{int_part}{frac_part}");
    let mantissa = BigUint::from_str_radix(&digits, 10).ok()?;
    let scale = BigInt::from(10u32).pow(frac_part.len());
    let mut value = BigRational::new(BigInt::from(mantissa), scale);
    if negative {
        value = -value;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn parse(lit: impl Into<RealLiteral>) -> Result<BigRational> {
        lit.into().to_rational()
    }

    #[test]
    fn test_decimals() {
        assert_eq!(parse("3").unwrap(), q(3, 1));
        assert_eq!(parse("-.123").unwrap(), q(-123, 1000));
        assert_eq!(parse("7.").unwrap(), q(7, 1));
        assert_eq!(parse("0.31213").unwrap(), q(31213, 100000));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse("1/3").unwrap(), q(1, 3));
        assert_eq!(parse("1.2/-3.03").unwrap(), q(-120, 303));
        assert_eq!(parse("-1/-2").unwrap(), q(1, 2));
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(parse(0.5f64).unwrap(), q(1, 2));
        assert_eq!(parse(-3i32).unwrap(), q(-3, 1));
        assert_eq!(parse(0.25f32).unwrap(), q(1, 4));
    }

    #[test]
    fn test_invalid() {
        for bad in ["0..1", "", "-", ".", "1/0", "1/", "/2", "1e5", "+1", "1/2/3", "abc", " 1"] {
            let err = parse(bad).unwrap_err();
            assert!(err.to_string().contains("invalid value"), "{bad:?}");
        }
        assert!(parse(f64::NAN).is_err());
        assert!(parse(f64::INFINITY).is_err());
    }
}
