//! OxBZ Solver - Solver Context for the SMT Solver Facade
//!
//! The [`Context`] is the entry point: it builds sorts, terms and values,
//! holds the option set and the assertion scope stack, and forwards
//! satisfiability checks to a [`SolverBackend`]. The default backend,
//! [`GroundBackend`], decides formulas that constant folding settles.
//!
//! # Examples
//!
//! ```
//! use oxbz_solver::{Context, Kind, SolverConfig, SolverOption, SolverResult};
//!
//! let mut ctx = Context::with_config(SolverConfig::incremental());
//! let bv8 = ctx.mk_bv_sort(8).unwrap();
//!
//! // Every spelling of the same bit pattern is the same term
//! let ones = ctx.mk_bv_ones(bv8).unwrap();
//! assert_eq!(ones, ctx.mk_bv_value(bv8, -1).unwrap());
//! assert_eq!(ones, ctx.mk_bv_value(bv8, "#xff").unwrap());
//!
//! let x = ctx.mk_const(bv8, Some("x")).unwrap();
//! let zero = ctx.mk_bv_zero(bv8).unwrap();
//! let eq = ctx.mk_term(Kind::Equal, &[x, zero], &[]).unwrap();
//!
//! ctx.push(1).unwrap();
//! ctx.assert_formula(eq).unwrap();
//! assert_eq!(ctx.check_sat().unwrap(), SolverResult::Sat);
//! assert_eq!(ctx.get_value(x).unwrap(), zero);
//! ctx.pop(1).unwrap();
//!
//! assert!(ctx.get_option(SolverOption::Incremental).as_bool().unwrap());
//! ```
//!
//! # Floating-point support
//!
//! Floating-point support is controlled by the `fpu` cargo feature (on by
//! default) and by [`SolverConfig::with_floating_point`]. Without it every
//! floating-point construction fails with
//! [`OxbzError::NotConfigured`](oxbz_core::OxbzError::NotConfigured), whose
//! message names the missing component.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod context;
pub mod options;
pub mod terminate;

pub use backend::{CheckOutcome, GroundBackend, SolverBackend, SolverResult};
pub use config::SolverConfig;
pub use context::{Context, State};
pub use options::{OptionValue, Options, SatEngine, SolverOption};
pub use terminate::Terminator;

pub use oxbz_core::{
    ErrorKind, Kind, OxbzError, Result, Sort, SortId, Substitution, Term, TermId,
};
pub use oxbz_core::value::RoundingMode;
pub use oxbz_theories::{BvLiteral, RealLiteral};
