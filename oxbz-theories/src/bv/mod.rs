//! BitVector theory values
//!
//! # Modules
//!
//! - **literal**: Normalization of the accepted bit-vector literal spellings
//! - **ops**: Concrete bit-vector operations with SMT-LIB semantics

mod literal;
pub mod ops;

pub use literal::{BvLiteral, wrap};
