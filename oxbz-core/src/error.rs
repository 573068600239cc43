//! Error types for OxBZ

use thiserror::Error;

/// Result type alias for OxBZ operations
pub type Result<T> = std::result::Result<T, OxbzError>;

/// Identifier of the optional floating-point component.
///
/// Appears in the message of [`OxbzError::NotConfigured`] so callers can
/// detect a build without floating-point support.
pub const FPU_COMPONENT: &str = "FPU";

/// Broad classification of an [`OxbzError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid API sequencing or arguments
    Usage,
    /// A requested capability is absent from this build
    Configuration,
}

/// Main error type for OxBZ
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OxbzError {
    /// Invalid argument passed to a constructor or operation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed or out-of-domain value literal
    #[error("invalid value '{value}', expected {expected}")]
    InvalidValue {
        /// The rejected literal
        value: String,
        /// Description of the accepted forms
        expected: String,
    },

    /// Option value outside the option's domain
    #[error("invalid option value '{value}' for option '{option}'")]
    InvalidOptionValue {
        /// Option name
        option: &'static str,
        /// The rejected value, rendered
        value: String,
    },

    /// Scope operation without incremental mode
    #[error("incremental usage not enabled")]
    IncrementalNotEnabled,

    /// Pop request exceeding the scope stack
    #[error(
        "number of levels to pop ({requested}) exceeds the number of pushed levels ({available})"
    )]
    PopOutOfRange {
        /// Levels requested
        requested: u32,
        /// Levels currently pushed
        available: u32,
    },

    /// Operand or value of the wrong sort
    #[error("sort mismatch: expected {expected}, found {found}")]
    SortMismatch {
        /// Expected sort description
        expected: String,
        /// Actual sort description
        found: String,
    },

    /// Wrong number of operands or indices
    #[error("arity mismatch for '{op}': expected {expected}, found {found}")]
    ArityMismatch {
        /// Operator name
        op: &'static str,
        /// Expected count (rendered, e.g. "2" or "at least 2")
        expected: String,
        /// Actual count
        found: usize,
    },

    /// Handle created by a different context
    #[error("{what} does not belong to this solver instance")]
    ForeignHandle {
        /// "term" or "sort"
        what: &'static str,
    },

    /// Operation not allowed in the current solver state
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Optional component missing from this build
    #[error("{component} not configured")]
    NotConfigured {
        /// Component identifier, e.g. [`FPU_COMPONENT`]
        component: &'static str,
    },
}

impl OxbzError {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured { .. } => ErrorKind::Configuration,
            _ => ErrorKind::Usage,
        }
    }

    /// Shorthand for [`OxbzError::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Shorthand for [`OxbzError::InvalidValue`]
    pub fn invalid_value(value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Shorthand for [`OxbzError::InvalidState`]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// The error raised when floating-point support is missing
    #[must_use]
    pub fn fpu_not_configured() -> Self {
        Self::NotConfigured {
            component: FPU_COMPONENT,
        }
    }
}
