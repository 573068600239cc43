//! Error Utilities and Helper Functions.
//!
//! Provides convenience functions for the validation patterns shared by term
//! construction and the value constructors.

use crate::ast::{Kind, TermId};
use crate::error::{OxbzError, Result};
use crate::sort::{SortId, SortManager};

/// Helper to create a sort mismatch error.
pub fn sort_mismatch(expected: impl Into<String>, found: impl Into<String>) -> OxbzError {
    OxbzError::SortMismatch {
        expected: expected.into(),
        found: found.into(),
    }
}

/// Helper to create a sort mismatch error between two interned sorts.
pub fn sort_mismatch_between(sorts: &SortManager, expected: SortId, found: SortId) -> OxbzError {
    sort_mismatch(
        sorts.display(expected).to_string(),
        sorts.display(found).to_string(),
    )
}

/// Helper to validate argument count.
pub fn validate_arity(kind: Kind, args: &[TermId], expected: usize) -> Result<()> {
    if args.len() != expected {
        Err(OxbzError::ArityMismatch {
            op: kind.name(),
            expected: expected.to_string(),
            found: args.len(),
        })
    } else {
        Ok(())
    }
}

/// Helper to validate argument count (at least N).
pub fn validate_min_arity(kind: Kind, args: &[TermId], min: usize) -> Result<()> {
    if args.len() < min {
        Err(OxbzError::ArityMismatch {
            op: kind.name(),
            expected: format!("at least {min}"),
            found: args.len(),
        })
    } else {
        Ok(())
    }
}

/// Helper to validate the number of static indices.
pub fn validate_index_count(kind: Kind, indices: &[u32]) -> Result<()> {
    let expected = kind.num_indices();
    if indices.len() != expected {
        Err(OxbzError::invalid_argument(format!(
            "'{}' expects {} indices, found {}",
            kind.name(),
            expected,
            indices.len()
        )))
    } else {
        Ok(())
    }
}
