//! Property-based tests for the solver context

mod ground_properties;
mod option_properties;
mod scope_properties;
