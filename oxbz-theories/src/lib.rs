//! OxBZ Theories - Bit-Vector and Floating-Point Values
//!
//! This crate turns user literals into canonical theory values and computes
//! with them:
//! - [`bv`]: bit-vector literal normalization and SMT-LIB bit-vector operations
//! - [`fp`]: real-number literals, exact IEEE-754 rounding and floating-point operations
//! - [`eval`]: evaluation of terms under a (partial) model
//!
//! # Examples
//!
//! ```
//! use oxbz_core::value::{FpFormat, RoundingMode};
//! use oxbz_theories::fp::{RealLiteral, convert};
//!
//! let third = RealLiteral::from("1/3").to_rational().unwrap();
//! let value = convert::from_rational(FpFormat::FLOAT32, RoundingMode::Rne, &third);
//! assert_eq!(convert::to_bits(&value), num_bigint::BigUint::from(0x3EAA_AAABu32));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bv;
pub mod eval;
pub mod fp;

pub use bv::{BvLiteral, wrap};
pub use eval::Evaluator;
pub use fp::RealLiteral;
