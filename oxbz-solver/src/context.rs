//! The solver context
//!
//! A [`Context`] owns the sort and term tables, the option set, the assertion
//! scope stack and the termination callback. Every handle it returns belongs
//! to it; handles of another context are rejected.

use crate::backend::{CheckOutcome, GroundBackend, SolverBackend, SolverResult};
use crate::config::SolverConfig;
use crate::options::{OptionValue, Options, SolverOption};
use crate::terminate::Terminator;
use oxbz_core::ast::{Kind, Substitution, Term, TermId, TermKind, TermManager};
use oxbz_core::error::{OxbzError, Result};
use oxbz_core::error_utils::sort_mismatch_between;
use oxbz_core::sort::{Sort, SortId, SortKind};
use oxbz_core::value::{BvValue, FpFormat, FpValue, RoundingMode};
use oxbz_theories::fp::{RealLiteral, convert};
use oxbz_theories::{BvLiteral, Evaluator};
use rustc_hash::FxHashSet;
use std::fmt;
use std::fmt::Write as _;
use tracing::debug;

const COPYRIGHT: &str = "\
OxBZ SMT solver facade
Copyright (C) 2024-2026 the OxBZ authors

Licensed under the Apache License, Version 2.0 or the MIT license, at your
option.";

const GIT_ID: &str = match option_env!("OXBZ_GIT_ID") {
    Some(id) => id,
    None => concat!("v", env!("CARGO_PKG_VERSION")),
};

/// Lifecycle of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Options may be changed freely
    Configuring,
    /// Something was asserted, assumed, pushed or checked
    Ready,
}

/// SMT solver context
pub struct Context {
    tm: TermManager,
    floating_point: bool,
    options: Options,
    state: State,
    /// Base frame followed by one frame per pushed level
    scopes: Vec<Vec<TermId>>,
    assumptions: Vec<TermId>,
    last_assumptions: Vec<TermId>,
    last: Option<CheckOutcome>,
    num_checks: u64,
    terminator: Option<Box<dyn Terminator>>,
    backend: Box<dyn SolverBackend>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("floating_point", &self.floating_point)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("levels", &self.num_levels())
            .field("terms", &self.tm.term_count())
            .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Context with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Context with `config`
    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            tm: TermManager::new(),
            floating_point: config.floating_point,
            options: config.options,
            state: State::Configuring,
            scopes: vec![Vec::new()],
            assumptions: Vec::new(),
            last_assumptions: Vec::new(),
            last: None,
            num_checks: 0,
            terminator: None,
            backend: Box::new(GroundBackend::new()),
        }
    }

    /// Replace the decision procedure used by [`Context::check_sat`]
    pub fn set_backend(&mut self, backend: impl SolverBackend + 'static) {
        self.backend = Box::new(backend);
        self.last = None;
    }

    /// The term table
    #[must_use]
    pub fn term_manager(&self) -> &TermManager {
        &self.tm
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Is floating-point support available
    #[must_use]
    pub fn has_floating_point(&self) -> bool {
        self.floating_point
    }

    // ------------------------------------------------------------------
    // Build metadata

    /// Copyright notice
    #[must_use]
    pub fn copyright(&self) -> &'static str {
        COPYRIGHT
    }

    /// Crate version
    #[must_use]
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Source revision, taken from `OXBZ_GIT_ID` at build time
    #[must_use]
    pub fn git_id(&self) -> &'static str {
        GIT_ID
    }

    // ------------------------------------------------------------------
    // Termination

    /// Install the termination predicate polled during `check_sat`
    pub fn set_term(&mut self, terminator: impl Terminator + 'static) {
        self.terminator = Some(Box::new(terminator));
    }

    /// Evaluate the termination predicate; `false` when none is installed
    #[must_use]
    pub fn terminate(&self) -> bool {
        self.terminator
            .as_ref()
            .is_some_and(|t| t.should_terminate())
    }

    // ------------------------------------------------------------------
    // Options

    /// Change an option
    ///
    /// Once the context is [`State::Ready`], `incremental` is frozen and the
    /// other options may only change when incremental usage is enabled.
    pub fn set_option(
        &mut self,
        option: SolverOption,
        value: impl Into<OptionValue>,
    ) -> Result<()> {
        if self.state == State::Ready {
            if option == SolverOption::Incremental {
                return Err(OxbzError::invalid_state(
                    "option 'incremental' cannot be changed after the first assertion",
                ));
            }
            if !self.options.incremental {
                return Err(OxbzError::IncrementalNotEnabled);
            }
        }
        let value = value.into();
        self.options.set(option, value.clone())?;
        debug!(%option, %value, "option set");
        Ok(())
    }

    /// Current value of an option
    #[must_use]
    pub fn get_option(&self, option: SolverOption) -> OptionValue {
        self.options.get(option)
    }

    /// Snapshot of every option
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn require_incremental(&self) -> Result<()> {
        if self.options.incremental {
            Ok(())
        } else {
            Err(OxbzError::IncrementalNotEnabled)
        }
    }

    fn enter_ready(&mut self) {
        if self.state == State::Configuring {
            debug!("context ready, options fixed");
            self.state = State::Ready;
        }
    }

    // ------------------------------------------------------------------
    // Scopes

    /// Number of pushed levels
    #[must_use]
    pub fn num_levels(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Push `n` assertion levels
    ///
    /// `n` must be at least 1. Use [`Context::push1`] for the common
    /// single-level case.
    pub fn push(&mut self, n: u32) -> Result<()> {
        self.require_incremental()?;
        if n == 0 {
            return Err(OxbzError::invalid_argument(
                "number of levels to push must be at least 1",
            ));
        }
        self.enter_ready();
        self.scopes.extend((0..n).map(|_| Vec::new()));
        self.last = None;
        debug!(n, levels = self.num_levels(), "push");
        Ok(())
    }

    /// Push one assertion level, like `(push 1)`
    pub fn push1(&mut self) -> Result<()> {
        self.push(1)
    }

    /// Pop one assertion level, like `(pop 1)`
    pub fn pop1(&mut self) -> Result<()> {
        self.pop(1)
    }

    /// Pop `n` assertion levels, discarding their assertions
    ///
    /// `n` must be at least 1 and at most [`Context::num_levels`].
    pub fn pop(&mut self, n: u32) -> Result<()> {
        self.require_incremental()?;
        if n == 0 {
            return Err(OxbzError::invalid_argument(
                "number of levels to pop must be at least 1",
            ));
        }
        let available = self.num_levels();
        if n as usize > available {
            return Err(OxbzError::PopOutOfRange {
                requested: n,
                available: u32::try_from(available).unwrap_or(u32::MAX),
            });
        }
        self.scopes.truncate(self.scopes.len() - n as usize);
        self.last = None;
        debug!(n, levels = self.num_levels(), "pop");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sorts

    fn require_fpu(&self) -> Result<()> {
        if self.floating_point {
            Ok(())
        } else {
            Err(OxbzError::fpu_not_configured())
        }
    }

    fn require_fpu_for_sort(&self, sort: SortId) -> Result<()> {
        self.tm.sorts.check(sort)?;
        if self.tm.sorts.mentions_fp(sort) {
            self.require_fpu()?;
        }
        Ok(())
    }

    /// Sort behind a handle
    pub fn sort(&self, sort: SortId) -> Result<&Sort> {
        self.tm.sorts.sort(sort)
    }

    /// The Boolean sort, which is `(_ BitVec 1)`
    #[must_use]
    pub fn mk_bool_sort(&self) -> SortId {
        self.tm.sorts.bool_sort
    }

    /// Bit-vector sort of `width` bits
    pub fn mk_bv_sort(&mut self, width: u32) -> Result<SortId> {
        self.tm.sorts.bitvec(width)
    }

    /// Floating-point sort
    pub fn mk_fp_sort(&mut self, exponent: u32, significand: u32) -> Result<SortId> {
        self.tm.sorts.floating_point(exponent, significand)
    }

    /// The rounding-mode sort
    #[must_use]
    pub fn mk_rm_sort(&self) -> SortId {
        self.tm.sorts.rm_sort
    }

    /// Array sort
    pub fn mk_array_sort(&mut self, index: SortId, element: SortId) -> Result<SortId> {
        self.tm.sorts.array(index, element)
    }

    /// Function sort
    pub fn mk_fun_sort(&mut self, domain: &[SortId], codomain: SortId) -> Result<SortId> {
        self.tm.sorts.function(domain, codomain)
    }

    /// SMT-LIB rendering of a sort
    pub fn sort_to_string(&self, sort: SortId) -> Result<String> {
        self.tm.sorts.check(sort)?;
        Ok(self.tm.sorts.display(sort).to_string())
    }

    // ------------------------------------------------------------------
    // Terms

    /// Term behind a handle
    pub fn term(&self, term: TermId) -> Result<&Term> {
        self.tm.term(term)
    }

    /// Sort of a term
    pub fn sort_of(&self, term: TermId) -> Result<SortId> {
        self.tm.sort_of(term)
    }

    /// SMT-LIB rendering of a term
    pub fn term_to_string(&self, term: TermId) -> Result<String> {
        self.tm.check(term)?;
        Ok(self.tm.display(term).to_string())
    }

    /// Fresh constant
    pub fn mk_const(&mut self, sort: SortId, name: Option<&str>) -> Result<TermId> {
        self.require_fpu_for_sort(sort)?;
        self.tm.mk_const(sort, name)
    }

    /// Fresh variable
    pub fn mk_var(&mut self, sort: SortId, name: Option<&str>) -> Result<TermId> {
        self.require_fpu_for_sort(sort)?;
        self.tm.mk_var(sort, name)
    }

    /// Array holding `value` at every index
    pub fn mk_const_array(&mut self, array_sort: SortId, value: TermId) -> Result<TermId> {
        self.require_fpu_for_sort(array_sort)?;
        self.tm.mk_const_array(array_sort, value)
    }

    /// Operator application; `indices` are the static parameters of indexed
    /// operators such as `extract`
    pub fn mk_term(&mut self, kind: Kind, args: &[TermId], indices: &[u32]) -> Result<TermId> {
        if kind.is_fp() {
            self.require_fpu()?;
        }
        for &arg in args {
            let sort = self.tm.sort_of(arg)?;
            if self.tm.sorts.mentions_fp(sort) {
                self.require_fpu()?;
            }
        }
        self.tm.mk_term(kind, args, indices)
    }

    /// Simultaneously replace keys of `subst` in `term`
    pub fn substitute(&mut self, term: TermId, subst: &Substitution) -> Result<TermId> {
        self.tm.substitute(term, subst)
    }

    /// [`Context::substitute`] over several terms with one mapping
    pub fn substitute_terms(
        &mut self,
        terms: &[TermId],
        subst: &Substitution,
    ) -> Result<Vec<TermId>> {
        self.tm.substitute_terms(terms, subst)
    }

    // ------------------------------------------------------------------
    // Values

    fn bv_width(&self, sort: SortId) -> Result<u32> {
        self.tm
            .sorts
            .sort(sort)?
            .bv_get_size()
            .ok_or_else(|| OxbzError::SortMismatch {
                expected: "bit-vector sort".to_string(),
                found: self.tm.sorts.display(sort).to_string(),
            })
    }

    fn fp_format(&self, sort: SortId) -> Result<FpFormat> {
        self.require_fpu()?;
        match self.tm.sorts.sort(sort)?.kind {
            SortKind::FloatingPoint {
                exponent,
                significand,
            } => Ok(FpFormat::new(exponent, significand)),
            _ => Err(OxbzError::SortMismatch {
                expected: "floating-point sort".to_string(),
                found: self.tm.sorts.display(sort).to_string(),
            }),
        }
    }

    fn mk_bv(&mut self, sort: SortId, value: impl FnOnce(u32) -> BvValue) -> Result<TermId> {
        let width = self.bv_width(sort)?;
        self.tm.mk_bv_value(value(width))
    }

    /// Bit-vector value of sort `sort`
    ///
    /// Integers and strings (decimal, `0x`/`#x` hex, `0b`/`#b` binary, each
    /// optionally negated) are reduced modulo `2^width`, so every spelling of
    /// the same bit pattern yields the same term.
    pub fn mk_bv_value(&mut self, sort: SortId, literal: impl Into<BvLiteral>) -> Result<TermId> {
        let width = self.bv_width(sort)?;
        let value = literal.into().to_value(width)?;
        self.tm.mk_bv_value(value)
    }

    /// Zero of sort `sort`
    pub fn mk_bv_zero(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_bv(sort, BvValue::zero)
    }

    /// One of sort `sort`
    pub fn mk_bv_one(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_bv(sort, BvValue::one)
    }

    /// All bits set
    pub fn mk_bv_ones(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_bv(sort, BvValue::ones)
    }

    /// Smallest signed value, `#b10...0`
    pub fn mk_bv_min_signed(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_bv(sort, BvValue::min_signed)
    }

    /// Largest signed value, `#b01...1`
    pub fn mk_bv_max_signed(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_bv(sort, BvValue::max_signed)
    }

    /// Boolean true
    pub fn mk_true(&mut self) -> TermId {
        self.tm.mk_bool(true)
    }

    /// Boolean false
    pub fn mk_false(&mut self) -> TermId {
        self.tm.mk_bool(false)
    }

    /// Floating-point value from its sign, exponent and trailing significand
    /// bit-vectors (widths 1, `exponent` and `significand - 1`)
    ///
    /// The sign must be 0 or 1. Exponent and significand literals follow the
    /// bit-vector rule and are reduced modulo `2^width`.
    pub fn mk_fp_value(
        &mut self,
        sort: SortId,
        sign: impl Into<BvLiteral>,
        exponent: impl Into<BvLiteral>,
        significand: impl Into<BvLiteral>,
    ) -> Result<TermId> {
        let format = self.fp_format(sort)?;
        let sign = sign.into().to_unsigned_value(1)?;
        let exponent = exponent.into().to_value(format.exponent)?;
        let significand = significand.into().to_value(format.trailing_bits())?;
        let value = FpValue::new(
            format,
            sign.bit(0),
            exponent.bits().clone(),
            significand.bits().clone(),
        );
        self.tm.mk_fp_value(value)
    }

    /// Floating-point value nearest to `real` under rounding mode `rm`
    ///
    /// `real` is a decimal string, a fraction `"a/b"` of decimals, or a
    /// finite native number.
    pub fn mk_fp_value_from(
        &mut self,
        sort: SortId,
        rm: TermId,
        real: impl Into<RealLiteral>,
    ) -> Result<TermId> {
        let format = self.fp_format(sort)?;
        let mode = self.tm.term(rm)?.rm_value().ok_or_else(|| {
            OxbzError::invalid_argument("rounding mode must be a rounding-mode value")
        })?;
        let q = real.into().to_rational()?;
        self.tm.mk_fp_value(convert::from_rational(format, mode, &q))
    }

    fn mk_fp(&mut self, sort: SortId, value: impl FnOnce(FpFormat) -> FpValue) -> Result<TermId> {
        let format = self.fp_format(sort)?;
        self.tm.mk_fp_value(value(format))
    }

    /// +0
    pub fn mk_fp_pos_zero(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_fp(sort, FpValue::pos_zero)
    }

    /// -0
    pub fn mk_fp_neg_zero(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_fp(sort, FpValue::neg_zero)
    }

    /// +oo
    pub fn mk_fp_pos_inf(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_fp(sort, FpValue::pos_infinity)
    }

    /// -oo
    pub fn mk_fp_neg_inf(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_fp(sort, FpValue::neg_infinity)
    }

    /// NaN
    pub fn mk_fp_nan(&mut self, sort: SortId) -> Result<TermId> {
        self.mk_fp(sort, FpValue::nan)
    }

    /// Rounding-mode value
    pub fn mk_rm_value(&mut self, rm: RoundingMode) -> Result<TermId> {
        self.require_fpu()?;
        Ok(self.tm.mk_rm_value(rm))
    }

    // ------------------------------------------------------------------
    // Solving

    fn require_bool(&self, term: TermId) -> Result<()> {
        let sort = self.tm.sort_of(term)?;
        let bool_sort = self.tm.sorts.bool_sort;
        if sort != bool_sort {
            return Err(sort_mismatch_between(&self.tm.sorts, bool_sort, sort));
        }
        Ok(())
    }

    fn assertions(&self) -> Vec<TermId> {
        self.scopes.iter().flatten().copied().collect()
    }

    /// Assert a Boolean formula at the current level
    pub fn assert_formula(&mut self, term: TermId) -> Result<()> {
        self.require_bool(term)?;
        self.enter_ready();
        if let Some(frame) = self.scopes.last_mut() {
            frame.push(term);
        }
        self.last = None;
        Ok(())
    }

    /// Assume a Boolean formula for the next `check_sat` only
    pub fn assume_formula(&mut self, term: TermId) -> Result<()> {
        self.require_incremental()?;
        self.require_bool(term)?;
        self.enter_ready();
        self.assumptions.push(term);
        Ok(())
    }

    /// Decide the current assertions and assumptions
    ///
    /// Without incremental usage only one check is allowed.
    pub fn check_sat(&mut self) -> Result<SolverResult> {
        if self.num_checks > 0 && !self.options.incremental {
            return Err(OxbzError::IncrementalNotEnabled);
        }
        self.enter_ready();
        let assertions = self.assertions();
        let assumptions = std::mem::take(&mut self.assumptions);
        let outcome = self.backend.check(
            &mut self.tm,
            &assertions,
            &assumptions,
            self.terminator.as_deref(),
        )?;
        let result = outcome.result;
        self.num_checks += 1;
        self.last_assumptions = assumptions;
        self.last = Some(outcome);
        debug!(
            %result,
            assertions = assertions.len(),
            assumptions = self.last_assumptions.len(),
            "check-sat"
        );
        Ok(result)
    }

    /// Replace every assertion by its constant-folded form
    ///
    /// Returns `Unsat` if an assertion folds to false, `Sat` if all fold to
    /// true and `Unknown` otherwise.
    pub fn simplify(&mut self) -> Result<SolverResult> {
        self.enter_ready();
        let t = self.tm.mk_bool(true);
        let f = self.tm.mk_bool(false);
        let mut evaluator = Evaluator::new();
        let mut result = SolverResult::Sat;
        for frame in &mut self.scopes {
            for assertion in frame.iter_mut() {
                *assertion = evaluator.eval(&mut self.tm, *assertion)?;
                if *assertion == f {
                    result = SolverResult::Unsat;
                } else if *assertion != t && result == SolverResult::Sat {
                    result = SolverResult::Unknown;
                }
            }
        }
        self.last = None;
        debug!(%result, "simplify");
        Ok(result)
    }

    /// Constant-fold a single term without touching the assertions
    pub fn simplify_term(&mut self, term: TermId) -> Result<TermId> {
        self.tm.check(term)?;
        Evaluator::new().eval(&mut self.tm, term)
    }

    fn last_outcome(&self, expected: SolverResult) -> Result<&CheckOutcome> {
        match &self.last {
            Some(outcome) if outcome.result == expected => Ok(outcome),
            _ => Err(OxbzError::invalid_state(format!(
                "last check-sat result is not {expected}"
            ))),
        }
    }

    fn require_models(&self) -> Result<()> {
        if self.options.produce_models == 0 {
            return Err(OxbzError::invalid_state("model generation is not enabled"));
        }
        self.last_outcome(SolverResult::Sat).map(|_| ())
    }

    /// Value of `term` in the model of the last satisfiable check
    pub fn get_value(&mut self, term: TermId) -> Result<TermId> {
        self.require_models()?;
        self.tm.check(term)?;
        let model = self
            .last
            .as_mut()
            .and_then(|outcome| outcome.model.as_mut())
            .ok_or_else(|| OxbzError::invalid_state("no model available"))?;
        model.eval(&mut self.tm, term)
    }

    fn asserted_consts(&self) -> Vec<TermId> {
        let mut seen = FxHashSet::default();
        let mut consts = Vec::new();
        let mut stack = self.assertions();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(term) = self.tm.get(id) else {
                continue;
            };
            match &term.kind {
                TermKind::Const { .. } => consts.push(id),
                TermKind::ConstArray(fill) => stack.push(*fill),
                TermKind::App { args, .. } => stack.extend(args.iter().copied()),
                _ => {}
            }
        }
        consts.sort_unstable();
        consts
    }

    /// The model of the last satisfiable check, in SMT-LIB syntax
    pub fn print_model(&mut self) -> Result<String> {
        self.require_models()?;
        let mut entries = Vec::new();
        for c in self.asserted_consts() {
            let value = self.get_value(c)?;
            entries.push((c, self.tm.sort_of(c)?, value));
        }
        render(|out| {
            writeln!(out, "(model")?;
            for (c, sort, value) in entries {
                writeln!(
                    out,
                    "  (define-fun {} () {} {})",
                    self.tm.display(c),
                    self.tm.sorts.display(sort),
                    self.tm.display(value)
                )?;
            }
            write!(out, ")")
        })
    }

    /// The current assertions as a script; `format` must be `"smt2"`
    pub fn dump_formula(&self, format: &str) -> Result<String> {
        if format != "smt2" {
            return Err(OxbzError::invalid_value(format, "\"smt2\""));
        }
        let mut decls = Vec::new();
        for c in self.asserted_consts() {
            let sort = self.tm.sort_of(c)?;
            decls.push((c, sort, &self.tm.sorts.sort(sort)?.kind));
        }
        let assertions = self.assertions();
        render(|out| {
            for (c, sort, kind) in decls {
                let name = self.tm.display(c);
                match kind {
                    SortKind::Function { domain, codomain } => {
                        write!(out, "(declare-fun {name} (")?;
                        for (i, &d) in domain.iter().enumerate() {
                            if i > 0 {
                                out.push(' ');
                            }
                            write!(out, "{}", self.tm.sorts.display(d))?;
                        }
                        writeln!(out, ") {})", self.tm.sorts.display(*codomain))?;
                    }
                    _ => writeln!(out, "(declare-const {name} {})", self.tm.sorts.display(sort))?,
                }
            }
            for assertion in assertions {
                writeln!(out, "(assert {})", self.tm.display(assertion))?;
            }
            out.push_str("(check-sat)\n(exit)\n");
            Ok(())
        })
    }

    fn unsat_outcome_for_assumptions(&self) -> Result<&CheckOutcome> {
        self.require_incremental()?;
        self.last_outcome(SolverResult::Unsat)
    }

    /// Was `term`, assumed for the last check, responsible for `Unsat`
    pub fn is_unsat_assumption(&self, term: TermId) -> Result<bool> {
        let outcome = self.unsat_outcome_for_assumptions()?;
        if !self.last_assumptions.contains(&term) {
            return Err(OxbzError::invalid_argument(
                "term was not assumed in the last check-sat",
            ));
        }
        Ok(outcome.unsat_assumptions.contains(&term))
    }

    /// Assumptions responsible for the last `Unsat`
    pub fn get_unsat_assumptions(&self) -> Result<Vec<TermId>> {
        Ok(self.unsat_outcome_for_assumptions()?.unsat_assumptions.clone())
    }

    /// Turn pending assumptions into assertions at the current level
    pub fn fixate_assumptions(&mut self) -> Result<()> {
        self.require_incremental()?;
        let pending = std::mem::take(&mut self.assumptions);
        if let Some(frame) = self.scopes.last_mut() {
            frame.extend(pending);
        }
        self.last = None;
        Ok(())
    }

    /// Drop pending assumptions
    pub fn reset_assumptions(&mut self) -> Result<()> {
        self.require_incremental()?;
        self.assumptions.clear();
        Ok(())
    }

    /// Assertions responsible for the last `Unsat`
    pub fn get_unsat_core(&self) -> Result<Vec<TermId>> {
        if !self.options.produce_unsat_cores {
            return Err(OxbzError::invalid_state("unsat core generation is not enabled"));
        }
        Ok(self.last_outcome(SolverResult::Unsat)?.unsat_core.clone())
    }
}

/// Run a formatter into a fresh string
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String> {
    let mut out = String::new();
    write(&mut out).map_err(|e| OxbzError::invalid_state(format!("rendering failed: {e}")))?;
    Ok(out)
}
