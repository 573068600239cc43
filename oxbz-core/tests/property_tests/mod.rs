//! Property-based tests for oxbz-core
//!
//! This module contains property-based tests using proptest to verify
//! interning, sort checking and substitution.

mod ast_properties;
mod sort_properties;
