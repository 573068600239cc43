//! Context configuration

use crate::options::{OptionValue, Options, SolverOption};
use oxbz_core::error::Result;

/// Configuration a [`Context`](crate::Context) is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Floating-point support; always off when the `fpu` feature is disabled
    pub floating_point: bool,
    /// Initial option values
    pub options: Options,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            floating_point: cfg!(feature = "fpu"),
            options: Options::default(),
        }
    }
}

impl SolverConfig {
    /// Configuration for incremental use: push/pop, assumptions, models
    #[must_use]
    pub fn incremental() -> Self {
        let mut config = Self::default();
        config.options.incremental = true;
        config.options.produce_models = 1;
        config
    }

    /// Enable or disable floating-point support
    #[must_use]
    pub fn with_floating_point(mut self, enabled: bool) -> Self {
        self.floating_point = enabled && cfg!(feature = "fpu");
        self
    }

    /// Replace every option at once
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set one option, validated against its domain
    pub fn with_option(
        mut self,
        option: SolverOption,
        value: impl Into<OptionValue>,
    ) -> Result<Self> {
        self.options.set(option, value.into())?;
        Ok(self)
    }
}
