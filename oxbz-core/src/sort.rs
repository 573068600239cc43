//! Sort system: interned bit-vector, floating-point, rounding-mode, array
//! and function sorts.
//!
//! Every sort is hash-consed by its [`SortKind`], so two structurally equal
//! requests yield the same [`SortId`] and handle equality is sort equality.
//! The Boolean sort is the bit-vector sort of width 1.

use crate::error::{OxbzError, Result};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Largest supported exponent width of a floating-point sort
pub const MAX_FP_EXPONENT_WIDTH: u32 = 32;

/// Handle to an interned sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortId {
    owner: u32,
    index: u32,
}

impl SortId {
    pub(crate) const fn new(owner: u32, index: u32) -> Self {
        Self { owner, index }
    }

    /// Position of this sort in its table
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Identifier of the table that created this handle
    #[must_use]
    pub const fn owner(self) -> u32 {
        self.owner
    }
}

/// Structural key of a sort
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Bit-vector of the given width (width 1 doubles as Boolean)
    BitVec(u32),
    /// IEEE-754 style floating-point
    FloatingPoint {
        /// Exponent width
        exponent: u32,
        /// Significand width, including the hidden bit
        significand: u32,
    },
    /// Rounding mode
    RoundingMode,
    /// Array from index sort to element sort
    Array {
        /// Index sort
        index: SortId,
        /// Element sort
        element: SortId,
    },
    /// Function sort
    Function {
        /// Domain sorts, in order
        domain: SmallVec<[SortId; 4]>,
        /// Codomain sort
        codomain: SortId,
    },
}

/// An interned sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Handle of this sort
    pub id: SortId,
    /// Structural key
    pub kind: SortKind,
}

impl Sort {
    /// Is this a bit-vector sort (Boolean included)
    #[must_use]
    pub fn is_bv(&self) -> bool {
        matches!(self.kind, SortKind::BitVec(_))
    }

    /// Is this the Boolean sort
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.kind, SortKind::BitVec(1))
    }

    /// Is this a floating-point sort
    #[must_use]
    pub fn is_fp(&self) -> bool {
        matches!(self.kind, SortKind::FloatingPoint { .. })
    }

    /// Is this the rounding-mode sort
    #[must_use]
    pub fn is_rm(&self) -> bool {
        matches!(self.kind, SortKind::RoundingMode)
    }

    /// Is this an array sort
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, SortKind::Array { .. })
    }

    /// Is this a function sort
    #[must_use]
    pub fn is_fun(&self) -> bool {
        matches!(self.kind, SortKind::Function { .. })
    }

    /// Width of a bit-vector sort (1 for Boolean)
    #[must_use]
    pub fn bv_get_size(&self) -> Option<u32> {
        match self.kind {
            SortKind::BitVec(width) => Some(width),
            _ => None,
        }
    }

    /// Exponent width of a floating-point sort
    #[must_use]
    pub fn fp_get_exp_size(&self) -> Option<u32> {
        match self.kind {
            SortKind::FloatingPoint { exponent, .. } => Some(exponent),
            _ => None,
        }
    }

    /// Significand width (hidden bit included) of a floating-point sort
    #[must_use]
    pub fn fp_get_sig_size(&self) -> Option<u32> {
        match self.kind {
            SortKind::FloatingPoint { significand, .. } => Some(significand),
            _ => None,
        }
    }

    /// Index sort of an array sort
    #[must_use]
    pub fn array_get_index(&self) -> Option<SortId> {
        match self.kind {
            SortKind::Array { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Element sort of an array sort
    #[must_use]
    pub fn array_get_element(&self) -> Option<SortId> {
        match self.kind {
            SortKind::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Domain sorts of a function sort
    #[must_use]
    pub fn fun_get_domain(&self) -> Option<&[SortId]> {
        match &self.kind {
            SortKind::Function { domain, .. } => Some(domain),
            _ => None,
        }
    }

    /// Codomain sort of a function sort
    #[must_use]
    pub fn fun_get_codomain(&self) -> Option<SortId> {
        match self.kind {
            SortKind::Function { codomain, .. } => Some(codomain),
            _ => None,
        }
    }

    /// Number of arguments of a function sort
    #[must_use]
    pub fn fun_get_arity(&self) -> Option<usize> {
        self.fun_get_domain().map(<[SortId]>::len)
    }
}

/// Sort table owned by a [`TermManager`](crate::ast::TermManager)
#[derive(Debug)]
pub struct SortManager {
    owner: u32,
    sorts: Vec<Sort>,
    cache: FxHashMap<SortKind, SortId>,
    /// The Boolean sort (bit-vector of width 1)
    pub bool_sort: SortId,
    /// The rounding-mode sort
    pub rm_sort: SortId,
}

impl SortManager {
    /// Create a sort table tagged with `owner`
    #[must_use]
    pub fn new(owner: u32) -> Self {
        let mut manager = Self {
            owner,
            sorts: Vec::new(),
            cache: FxHashMap::default(),
            bool_sort: SortId::new(owner, 0),
            rm_sort: SortId::new(owner, 0),
        };
        manager.bool_sort = manager.intern(SortKind::BitVec(1));
        manager.rm_sort = manager.intern(SortKind::RoundingMode);
        manager
    }

    fn intern(&mut self, kind: SortKind) -> SortId {
        if let Some(&id) = self.cache.get(&kind) {
            return id;
        }
        let id = SortId::new(self.owner, self.sorts.len() as u32);
        tracing::trace!(?kind, index = id.index, "new sort");
        self.sorts.push(Sort {
            id,
            kind: kind.clone(),
        });
        self.cache.insert(kind, id);
        id
    }

    /// Reject handles created by another table
    pub fn check(&self, id: SortId) -> Result<()> {
        if id.owner != self.owner || id.index as usize >= self.sorts.len() {
            return Err(OxbzError::ForeignHandle { what: "sort" });
        }
        Ok(())
    }

    /// Get a sort by handle
    #[must_use]
    pub fn get(&self, id: SortId) -> Option<&Sort> {
        if id.owner != self.owner {
            return None;
        }
        self.sorts.get(id.index as usize)
    }

    /// Get a sort by handle, rejecting foreign handles
    pub fn sort(&self, id: SortId) -> Result<&Sort> {
        self.get(id)
            .ok_or(OxbzError::ForeignHandle { what: "sort" })
    }

    /// Bit-vector sort of `width` bits
    pub fn bitvec(&mut self, width: u32) -> Result<SortId> {
        if width == 0 {
            return Err(OxbzError::invalid_argument(
                "bit-vector width must be greater than zero",
            ));
        }
        Ok(self.intern(SortKind::BitVec(width)))
    }

    /// Floating-point sort with the given exponent and significand widths
    pub fn floating_point(&mut self, exponent: u32, significand: u32) -> Result<SortId> {
        if exponent < 2 || exponent > MAX_FP_EXPONENT_WIDTH {
            return Err(OxbzError::invalid_argument(format!(
                "exponent width must be between 2 and {MAX_FP_EXPONENT_WIDTH}, found {exponent}"
            )));
        }
        if significand < 2 {
            return Err(OxbzError::invalid_argument(format!(
                "significand width must be at least 2, found {significand}"
            )));
        }
        Ok(self.intern(SortKind::FloatingPoint {
            exponent,
            significand,
        }))
    }

    /// Array sort from `index` to `element`
    pub fn array(&mut self, index: SortId, element: SortId) -> Result<SortId> {
        self.check(index)?;
        self.check(element)?;
        Ok(self.intern(SortKind::Array { index, element }))
    }

    /// Function sort from `domain` to `codomain`
    pub fn function(&mut self, domain: &[SortId], codomain: SortId) -> Result<SortId> {
        if domain.is_empty() {
            return Err(OxbzError::invalid_argument(
                "function sort requires at least one domain sort",
            ));
        }
        for &sort in domain.iter().chain(std::iter::once(&codomain)) {
            if self.sort(sort)?.is_fun() {
                return Err(OxbzError::invalid_argument(
                    "function sorts are not allowed as domain or codomain",
                ));
            }
        }
        Ok(self.intern(SortKind::Function {
            domain: domain.iter().copied().collect(),
            codomain,
        }))
    }

    /// Does `id` involve a floating-point or rounding-mode sort anywhere
    #[must_use]
    pub fn mentions_fp(&self, id: SortId) -> bool {
        match self.get(id).map(|s| &s.kind) {
            Some(SortKind::FloatingPoint { .. } | SortKind::RoundingMode) => true,
            Some(SortKind::Array { index, element }) => {
                self.mentions_fp(*index) || self.mentions_fp(*element)
            }
            Some(SortKind::Function { domain, codomain }) => {
                domain.iter().any(|&d| self.mentions_fp(d)) || self.mentions_fp(*codomain)
            }
            Some(SortKind::BitVec(_)) | None => false,
        }
    }

    /// Number of distinct sorts created so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    /// Always false: the Boolean and rounding-mode sorts are preallocated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    /// SMT-LIB rendering of a sort
    #[must_use]
    pub fn display(&self, id: SortId) -> SortDisplay<'_> {
        SortDisplay { sorts: self, id }
    }
}

/// Helper returned by [`SortManager::display`]
pub struct SortDisplay<'a> {
    sorts: &'a SortManager,
    id: SortId,
}

impl fmt::Display for SortDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(sort) = self.sorts.get(self.id) else {
            return write!(f, "<foreign sort>");
        };
        match &sort.kind {
            SortKind::BitVec(1) => write!(f, "Bool"),
            SortKind::BitVec(width) => write!(f, "(_ BitVec {width})"),
            SortKind::FloatingPoint {
                exponent,
                significand,
            } => write!(f, "(_ FloatingPoint {exponent} {significand})"),
            SortKind::RoundingMode => write!(f, "RoundingMode"),
            SortKind::Array { index, element } => write!(
                f,
                "(Array {} {})",
                self.sorts.display(*index),
                self.sorts.display(*element)
            ),
            SortKind::Function { domain, codomain } => {
                write!(f, "(")?;
                for (i, d) in domain.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", self.sorts.display(*d))?;
                }
                write!(f, ") {}", self.sorts.display(*codomain))
            }
        }
    }
}
