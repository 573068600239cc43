//! OxBZ Core - Sorts, Terms and Errors for the SMT Solver Facade
//!
//! This crate provides the foundational types for the OxBZ solver facade:
//! - Hash-consed sorts with cheap [`SortId`] handles
//! - Hash-consed terms with cheap [`TermId`] handles, sort-checked on construction
//! - Canonical bit-vector, floating-point and rounding-mode values
//! - Simultaneous, capture-avoiding substitution
//! - SMT-LIB rendering of sorts and terms
//!
//! # Examples
//!
//! ```
//! use oxbz_core::ast::{Kind, TermManager};
//! use oxbz_core::value::BvValue;
//!
//! let mut tm = TermManager::new();
//! let bv8 = tm.sorts.bitvec(8).unwrap();
//!
//! let x = tm.mk_const(bv8, Some("x")).unwrap();
//! let one = tm.mk_bv_value(BvValue::one(8)).unwrap();
//! let sum = tm.mk_term(Kind::BvAdd, &[x, one], &[]).unwrap();
//!
//! // Structurally equal terms are the same handle
//! assert_eq!(sum, tm.mk_term(Kind::BvAdd, &[x, one], &[]).unwrap());
//! assert_eq!(tm.display(sum).to_string(), "(bvadd x #b00000001)");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod error_utils;
pub mod sort;
pub mod value;

pub use ast::{Kind, Substitution, Term, TermId, TermKind, TermManager};
pub use error::{ErrorKind, OxbzError, Result};
pub use error_utils::{sort_mismatch, validate_arity, validate_min_arity};
pub use sort::{Sort, SortId, SortKind, SortManager};
pub use value::{BvValue, FpFormat, FpValue, RoundingMode};
