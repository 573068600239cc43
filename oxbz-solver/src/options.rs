//! Solver options with validated value domains

use oxbz_core::error::{OxbzError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configurable solver option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverOption {
    /// Enable push/pop, assumptions and repeated check-sat
    Incremental,
    /// Model generation: 0 (off), 1 (constants), 2 (all terms)
    ProduceModels,
    /// Unsat core generation
    ProduceUnsatCores,
    /// Back-end SAT engine
    SatEngine,
    /// Random seed
    Seed,
    /// Verbosity level
    Verbosity,
    /// Rewriting level
    RewriteLevel,
}

impl SolverOption {
    /// Every option
    pub const ALL: [Self; 7] = [
        Self::Incremental,
        Self::ProduceModels,
        Self::ProduceUnsatCores,
        Self::SatEngine,
        Self::Seed,
        Self::Verbosity,
        Self::RewriteLevel,
    ];

    /// Option name as used on the command line of SMT solvers
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::ProduceModels => "produce-models",
            Self::ProduceUnsatCores => "produce-unsat-cores",
            Self::SatEngine => "sat-engine",
            Self::Seed => "seed",
            Self::Verbosity => "verbosity",
            Self::RewriteLevel => "rewrite-level",
        }
    }

    /// Look up an option by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.name() == name)
    }
}

impl fmt::Display for SolverOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SAT engine selectable through [`SolverOption::SatEngine`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatEngine {
    /// CaDiCaL
    #[default]
    Cadical,
    /// CryptoMiniSat
    Cms,
    /// Glucose
    Glucose,
    /// Kissat
    Kissat,
    /// Lingeling
    Lingeling,
    /// MiniSat
    Minisat,
    /// PicoSAT
    Picosat,
}

impl SatEngine {
    /// Every engine
    pub const ALL: [Self; 7] = [
        Self::Cadical,
        Self::Cms,
        Self::Glucose,
        Self::Kissat,
        Self::Lingeling,
        Self::Minisat,
        Self::Picosat,
    ];

    /// Engine name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cadical => "cadical",
            Self::Cms => "cms",
            Self::Glucose => "glucose",
            Self::Kissat => "kissat",
            Self::Lingeling => "lingeling",
            Self::Minisat => "minisat",
            Self::Picosat => "picosat",
        }
    }

    /// Look up an engine by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }
}

/// Value passed to or read from an option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Flag
    Bool(bool),
    /// Unsigned number
    Numeric(u32),
    /// Symbolic value
    Str(String),
}

impl OptionValue {
    /// Truth value of a flag or number (non-zero is true)
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Numeric(n) => Some(*n != 0),
            Self::Str(_) => None,
        }
    }

    /// Numeric reading; flags read as 0/1
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Bool(b) => Some(u32::from(*b)),
            Self::Numeric(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Symbolic reading
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u32> for OptionValue {
    fn from(n: u32) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<SatEngine> for OptionValue {
    fn from(engine: SatEngine) -> Self {
        Self::Str(engine.name().to_string())
    }
}

/// Snapshot of every option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Options {
    /// See [`SolverOption::Incremental`]
    pub incremental: bool,
    /// See [`SolverOption::ProduceModels`]
    pub produce_models: u32,
    /// See [`SolverOption::ProduceUnsatCores`]
    pub produce_unsat_cores: bool,
    /// See [`SolverOption::SatEngine`]
    pub sat_engine: SatEngine,
    /// See [`SolverOption::Seed`]
    pub seed: u32,
    /// See [`SolverOption::Verbosity`]
    pub verbosity: u32,
    /// See [`SolverOption::RewriteLevel`]
    pub rewrite_level: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            incremental: false,
            produce_models: 0,
            produce_unsat_cores: false,
            sat_engine: SatEngine::default(),
            seed: 0,
            verbosity: 0,
            rewrite_level: 3,
        }
    }
}

const MAX_PRODUCE_MODELS: u32 = 2;
const MAX_VERBOSITY: u32 = 4;
const MAX_REWRITE_LEVEL: u32 = 3;

impl Options {
    /// Current value of `option`
    #[must_use]
    pub fn get(&self, option: SolverOption) -> OptionValue {
        match option {
            SolverOption::Incremental => self.incremental.into(),
            SolverOption::ProduceModels => self.produce_models.into(),
            SolverOption::ProduceUnsatCores => self.produce_unsat_cores.into(),
            SolverOption::SatEngine => self.sat_engine.into(),
            SolverOption::Seed => self.seed.into(),
            SolverOption::Verbosity => self.verbosity.into(),
            SolverOption::RewriteLevel => self.rewrite_level.into(),
        }
    }

    /// Validate `value` against the domain of `option` and store it
    ///
    /// On error the options are left unchanged.
    pub fn set(&mut self, option: SolverOption, value: OptionValue) -> Result<()> {
        let invalid = || OxbzError::InvalidOptionValue {
            option: option.name(),
            value: value.to_string(),
        };
        let flag = || match value {
            OptionValue::Bool(b) => Some(b),
            OptionValue::Numeric(n @ (0 | 1)) => Some(n == 1),
            _ => None,
        };
        let bounded = |max: u32| value.as_u32().filter(|&n| n <= max);

        match option {
            SolverOption::Incremental => self.incremental = flag().ok_or_else(invalid)?,
            SolverOption::ProduceModels => {
                self.produce_models = bounded(MAX_PRODUCE_MODELS).ok_or_else(invalid)?;
            }
            SolverOption::ProduceUnsatCores => {
                self.produce_unsat_cores = flag().ok_or_else(invalid)?;
            }
            SolverOption::SatEngine => {
                self.sat_engine = value
                    .as_str()
                    .and_then(SatEngine::from_name)
                    .ok_or_else(invalid)?;
            }
            SolverOption::Seed => {
                self.seed = match value {
                    OptionValue::Numeric(n) => n,
                    _ => return Err(invalid()),
                };
            }
            SolverOption::Verbosity => {
                self.verbosity = bounded(MAX_VERBOSITY).ok_or_else(invalid)?;
            }
            SolverOption::RewriteLevel => {
                self.rewrite_level = bounded(MAX_REWRITE_LEVEL).ok_or_else(invalid)?;
            }
        }
        Ok(())
    }
}
