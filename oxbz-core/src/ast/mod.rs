//! Abstract syntax: hash-consed terms
//!
//! Terms live in a [`TermManager`] arena and are referred to by [`TermId`]
//! handles. Every term except constants and variables is interned by its
//! structural key (kind, operand handles, indices and sort), so handle
//! equality is structural equality. Constants and variables are fresh on
//! every request: each one denotes a distinct symbol.

mod display;
mod kind;
mod subst;
mod typecheck;

pub use display::TermDisplay;
pub use kind::Kind;
pub use subst::Substitution;

use crate::error::{OxbzError, Result};
use crate::sort::{SortId, SortManager};
use crate::value::{BvValue, FpFormat, FpValue, RoundingMode};
use lasso::{Rodeo, Spur};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide arena counter. Tags are unique among the first `2^32`
/// arenas created by a process; after that the counter wraps and a handle
/// from a long-dropped arena may pass the ownership check of a new one.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);

/// Handle to a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId {
    owner: u32,
    index: u32,
}

impl TermId {
    pub(crate) const fn new(owner: u32, index: u32) -> Self {
        Self { owner, index }
    }

    /// Position of this term in its arena
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Identifier of the arena that created this handle
    #[must_use]
    pub const fn owner(self) -> u32 {
        self.owner
    }
}

/// Structural content of a term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Free constant (uninterpreted symbol)
    Const {
        /// Optional user-provided name
        name: Option<Spur>,
    },
    /// Variable, bound by a binder term
    Var {
        /// Optional user-provided name
        name: Option<Spur>,
    },
    /// Bit-vector literal
    BvValue(BvValue),
    /// Floating-point literal
    FpValue(FpValue),
    /// Rounding-mode literal
    RmValue(RoundingMode),
    /// Array mapping every index to the same value
    ConstArray(TermId),
    /// Operator application
    App {
        /// Operator
        kind: Kind,
        /// Operands, in order
        args: SmallVec<[TermId; 4]>,
        /// Static integer parameters, in order
        indices: SmallVec<[u32; 2]>,
    },
}

/// A term stored in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Handle of this term
    pub id: TermId,
    /// Structural content
    pub kind: TermKind,
    /// Sort of the term
    pub sort: SortId,
}

impl Term {
    /// Free constant
    #[must_use]
    pub fn is_const(&self) -> bool {
        matches!(self.kind, TermKind::Const { .. })
    }

    /// Bound variable
    #[must_use]
    pub fn is_var(&self) -> bool {
        matches!(self.kind, TermKind::Var { .. })
    }

    /// Any theory literal
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(
            self.kind,
            TermKind::BvValue(_) | TermKind::FpValue(_) | TermKind::RmValue(_)
        )
    }

    /// Bit-vector literal
    #[must_use]
    pub fn is_bv_value(&self) -> bool {
        matches!(self.kind, TermKind::BvValue(_))
    }

    /// Floating-point literal
    #[must_use]
    pub fn is_fp_value(&self) -> bool {
        matches!(self.kind, TermKind::FpValue(_))
    }

    /// Rounding-mode literal
    #[must_use]
    pub fn is_rm_value(&self) -> bool {
        matches!(self.kind, TermKind::RmValue(_))
    }

    /// Constant array
    #[must_use]
    pub fn is_const_array(&self) -> bool {
        matches!(self.kind, TermKind::ConstArray(_))
    }

    fn fp_value_matches(&self, pred: impl Fn(&FpValue) -> bool) -> bool {
        match &self.kind {
            TermKind::FpValue(v) => pred(v),
            _ => false,
        }
    }

    /// The floating-point literal +0
    #[must_use]
    pub fn is_fp_value_pos_zero(&self) -> bool {
        self.fp_value_matches(FpValue::is_pos_zero)
    }

    /// The floating-point literal -0
    #[must_use]
    pub fn is_fp_value_neg_zero(&self) -> bool {
        self.fp_value_matches(FpValue::is_neg_zero)
    }

    /// The floating-point literal +oo
    #[must_use]
    pub fn is_fp_value_pos_inf(&self) -> bool {
        self.fp_value_matches(FpValue::is_pos_infinity)
    }

    /// The floating-point literal -oo
    #[must_use]
    pub fn is_fp_value_neg_inf(&self) -> bool {
        self.fp_value_matches(FpValue::is_neg_infinity)
    }

    /// The floating-point literal NaN
    #[must_use]
    pub fn is_fp_value_nan(&self) -> bool {
        self.fp_value_matches(FpValue::is_nan)
    }

    /// Operator of an application
    #[must_use]
    pub fn app_kind(&self) -> Option<Kind> {
        match self.kind {
            TermKind::App { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Operands (the fill value for a constant array)
    #[must_use]
    pub fn children(&self) -> &[TermId] {
        match &self.kind {
            TermKind::App { args, .. } => args,
            TermKind::ConstArray(value) => std::slice::from_ref(value),
            _ => &[],
        }
    }

    /// Static indices of an application
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        match &self.kind {
            TermKind::App { indices, .. } => indices,
            _ => &[],
        }
    }

    /// Bit-vector literal payload
    #[must_use]
    pub fn bv_value(&self) -> Option<&BvValue> {
        match &self.kind {
            TermKind::BvValue(v) => Some(v),
            _ => None,
        }
    }

    /// Floating-point literal payload
    #[must_use]
    pub fn fp_value(&self) -> Option<&FpValue> {
        match &self.kind {
            TermKind::FpValue(v) => Some(v),
            _ => None,
        }
    }

    /// Rounding-mode literal payload
    #[must_use]
    pub fn rm_value(&self) -> Option<RoundingMode> {
        match self.kind {
            TermKind::RmValue(rm) => Some(rm),
            _ => None,
        }
    }
}

/// Arena and hash-consing table for terms, owning the sort table
#[derive(Debug)]
pub struct TermManager {
    owner: u32,
    terms: Vec<Term>,
    cache: FxHashMap<(TermKind, SortId), TermId>,
    names: Rodeo,
    /// Sort table
    pub sorts: SortManager,
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TermManager {
    /// Create an empty arena with its own ownership tag
    ///
    /// Tags are drawn from a process-wide counter, so two live arenas never
    /// share one unless `2^32` arenas have been created in between.
    #[must_use]
    pub fn new() -> Self {
        let owner = NEXT_OWNER.fetch_add(1, Ordering::Relaxed);
        Self {
            owner,
            terms: Vec::new(),
            cache: FxHashMap::default(),
            names: Rodeo::default(),
            sorts: SortManager::new(owner),
        }
    }

    /// Ownership tag shared by all handles from this arena
    #[must_use]
    pub fn owner(&self) -> u32 {
        self.owner
    }

    fn alloc(&mut self, kind: TermKind, sort: SortId) -> TermId {
        let id = TermId::new(self.owner, self.terms.len() as u32);
        self.terms.push(Term { id, kind, sort });
        id
    }

    /// Intern `(kind, sort)`, allocating on first request
    pub(crate) fn intern(&mut self, kind: TermKind, sort: SortId) -> TermId {
        let key = (kind, sort);
        if let Some(&id) = self.cache.get(&key) {
            return id;
        }
        let id = self.alloc(key.0.clone(), sort);
        tracing::trace!(index = id.index, "new term");
        self.cache.insert(key, id);
        id
    }

    /// Reject handles created by another arena
    pub fn check(&self, id: TermId) -> Result<()> {
        if id.owner != self.owner || id.index as usize >= self.terms.len() {
            return Err(OxbzError::ForeignHandle { what: "term" });
        }
        Ok(())
    }

    /// Get a term by handle
    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        if id.owner != self.owner {
            return None;
        }
        self.terms.get(id.index as usize)
    }

    /// Get a term by handle, rejecting foreign handles
    pub fn term(&self, id: TermId) -> Result<&Term> {
        self.get(id)
            .ok_or(OxbzError::ForeignHandle { what: "term" })
    }

    /// Sort of a term
    pub fn sort_of(&self, id: TermId) -> Result<SortId> {
        Ok(self.term(id)?.sort)
    }

    /// Number of terms in the arena
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// All terms, in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Resolve the name of a constant or variable
    #[must_use]
    pub fn symbol(&self, id: TermId) -> Option<&str> {
        match self.get(id)?.kind {
            TermKind::Const { name: Some(name) } | TermKind::Var { name: Some(name) } => {
                Some(self.names.resolve(&name))
            }
            _ => None,
        }
    }

    /// Fresh constant of `sort`
    pub fn mk_const(&mut self, sort: SortId, name: Option<&str>) -> Result<TermId> {
        self.sorts.check(sort)?;
        let name = name.map(|n| self.names.get_or_intern(n));
        Ok(self.alloc(TermKind::Const { name }, sort))
    }

    /// Fresh variable of `sort`
    pub fn mk_var(&mut self, sort: SortId, name: Option<&str>) -> Result<TermId> {
        let sort_ref = self.sorts.sort(sort)?;
        if sort_ref.is_fun() {
            return Err(OxbzError::invalid_argument(
                "variables of function sort are not supported",
            ));
        }
        let name = name.map(|n| self.names.get_or_intern(n));
        Ok(self.alloc(TermKind::Var { name }, sort))
    }

    /// Bit-vector literal; the sort is derived from the width
    pub fn mk_bv_value(&mut self, value: BvValue) -> Result<TermId> {
        let sort = self.sorts.bitvec(value.width())?;
        Ok(self.intern(TermKind::BvValue(value), sort))
    }

    /// Boolean literal
    pub fn mk_bool(&mut self, b: bool) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::BvValue(BvValue::from_bool(b)), sort)
    }

    /// Floating-point literal; the sort is derived from the format
    pub fn mk_fp_value(&mut self, value: FpValue) -> Result<TermId> {
        let FpFormat {
            exponent,
            significand,
        } = value.format();
        let sort = self.sorts.floating_point(exponent, significand)?;
        Ok(self.intern(TermKind::FpValue(value), sort))
    }

    /// Rounding-mode literal
    pub fn mk_rm_value(&mut self, rm: RoundingMode) -> TermId {
        let sort = self.sorts.rm_sort;
        self.intern(TermKind::RmValue(rm), sort)
    }

    /// Constant array of sort `array_sort` holding `value` everywhere
    pub fn mk_const_array(&mut self, array_sort: SortId, value: TermId) -> Result<TermId> {
        let element = self
            .sorts
            .sort(array_sort)?
            .array_get_element()
            .ok_or_else(|| OxbzError::SortMismatch {
                expected: "array sort".to_string(),
                found: self.sorts.display(array_sort).to_string(),
            })?;
        let value_sort = self.sort_of(value)?;
        if value_sort != element {
            return Err(OxbzError::SortMismatch {
                expected: self.sorts.display(element).to_string(),
                found: self.sorts.display(value_sort).to_string(),
            });
        }
        Ok(self.intern(TermKind::ConstArray(value), array_sort))
    }

    /// Operator application, validated and interned
    pub fn mk_term(&mut self, kind: Kind, args: &[TermId], indices: &[u32]) -> Result<TermId> {
        for &arg in args {
            self.check(arg)?;
        }
        let sort = typecheck::result_sort(self, kind, args, indices)?;
        Ok(self.intern(
            TermKind::App {
                kind,
                args: args.iter().copied().collect(),
                indices: indices.iter().copied().collect(),
            },
            sort,
        ))
    }

    /// SMT-LIB rendering of a term
    #[must_use]
    pub fn display(&self, id: TermId) -> TermDisplay<'_> {
        TermDisplay::new(self, id)
    }
}
