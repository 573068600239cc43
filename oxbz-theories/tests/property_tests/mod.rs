//! Property-based tests for theory values

mod bv_properties;
mod fp_properties;
