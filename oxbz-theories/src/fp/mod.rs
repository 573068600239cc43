//! FloatingPoint theory values
//!
//! # Modules
//!
//! - **literal**: Real-number literals (decimals, fractions, native floats)
//! - **convert**: Exact rounding of rationals into IEEE-754 formats
//! - **ops**: Arithmetic, comparison and conversion on concrete values

mod literal;
pub mod convert;
pub mod ops;

pub use literal::RealLiteral;
