//! Decision procedure hook

use crate::terminate::Terminator;
use oxbz_core::ast::{TermId, TermManager};
use oxbz_core::error::Result;
use oxbz_theories::Evaluator;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Result of a satisfiability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverResult {
    /// Satisfiable
    Sat,
    /// Unsatisfiable
    Unsat,
    /// Unknown (incomplete, interrupted)
    Unknown,
}

impl fmt::Display for SolverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sat => "sat",
            Self::Unsat => "unsat",
            Self::Unknown => "unknown",
        })
    }
}

/// Everything a backend reports for one check
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The verdict
    pub result: SolverResult,
    /// Model evaluator, present for `Sat`
    pub model: Option<Evaluator>,
    /// Assumptions responsible for `Unsat`
    pub unsat_assumptions: Vec<TermId>,
    /// Assertions responsible for `Unsat`
    pub unsat_core: Vec<TermId>,
}

impl CheckOutcome {
    /// Outcome carrying only a verdict
    #[must_use]
    pub fn new(result: SolverResult) -> Self {
        Self {
            result,
            model: None,
            unsat_assumptions: Vec::new(),
            unsat_core: Vec::new(),
        }
    }
}

/// A decision procedure the context delegates `check_sat` to
pub trait SolverBackend {
    /// Decide the conjunction of `assertions` and `assumptions`
    ///
    /// `terminator` must be polled at checkpoints; when it fires the backend
    /// returns [`SolverResult::Unknown`].
    fn check(
        &mut self,
        tm: &mut TermManager,
        assertions: &[TermId],
        assumptions: &[TermId],
        terminator: Option<&dyn Terminator>,
    ) -> Result<CheckOutcome>;
}

/// Backend deciding formulas that constant folding settles
///
/// Assertions are evaluated first with no model, which decides them when
/// they fold to constants regardless of the constants they mention. Failing
/// that, the default assignment (zero, +0, RNE) is tried as a witness. Any
/// other formula is `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundBackend;

impl GroundBackend {
    /// Create the backend
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn interrupted(terminator: Option<&dyn Terminator>) -> bool {
    terminator.is_some_and(|t| t.should_terminate())
}

impl SolverBackend for GroundBackend {
    fn check(
        &mut self,
        tm: &mut TermManager,
        assertions: &[TermId],
        assumptions: &[TermId],
        terminator: Option<&dyn Terminator>,
    ) -> Result<CheckOutcome> {
        let t = tm.mk_bool(true);
        let f = tm.mk_bool(false);

        let mut exact = Evaluator::new();
        let mut undecided = false;
        let mut core = Vec::new();
        let mut failed = Vec::new();
        for (formula, is_assumption) in assertions
            .iter()
            .map(|&a| (a, false))
            .chain(assumptions.iter().map(|&a| (a, true)))
        {
            if interrupted(terminator) {
                trace!("ground check interrupted");
                return Ok(CheckOutcome::new(SolverResult::Unknown));
            }
            let value = exact.eval(tm, formula)?;
            if value == f {
                if is_assumption {
                    failed.push(formula);
                } else {
                    core.push(formula);
                }
            } else if value != t {
                undecided = true;
            }
        }

        if !core.is_empty() || !failed.is_empty() {
            return Ok(CheckOutcome {
                unsat_assumptions: failed,
                unsat_core: core,
                ..CheckOutcome::new(SolverResult::Unsat)
            });
        }

        let mut witness = Evaluator::new().with_completion(true);
        if undecided {
            for &formula in assertions.iter().chain(assumptions) {
                if interrupted(terminator) {
                    return Ok(CheckOutcome::new(SolverResult::Unknown));
                }
                if witness.eval(tm, formula)? != t {
                    return Ok(CheckOutcome::new(SolverResult::Unknown));
                }
            }
        }
        Ok(CheckOutcome {
            model: Some(witness),
            ..CheckOutcome::new(SolverResult::Sat)
        })
    }
}
