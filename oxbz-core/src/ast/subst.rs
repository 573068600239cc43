//! Simultaneous, capture-avoiding substitution
//!
//! A [`Substitution`] maps constants or variables to replacement terms of the
//! same sort. All bindings are applied in one pass, so the result does not
//! depend on the order in which bindings were inserted, and a replacement is
//! never itself rewritten.
//!
//! Variables bound by a `lambda`, `forall` or `exists` shadow bindings for the
//! same variable inside the binder body. When a bound variable occurs free in
//! the replacement of a key that the body mentions, it is renamed to a fresh
//! variable first so the replacement is not captured. Binders no replacement
//! reaches are rebuilt unchanged, so equal inputs give equal terms.

use super::typecheck::bound_vars;
use super::{TermId, TermKind, TermManager};
use crate::error::{OxbzError, Result};
use crate::error_utils::sort_mismatch_between;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// A substitution mapping symbols to terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: FxHashMap<TermId, TermId>,
}

impl Substitution {
    /// Create an empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a substitution with initial capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a binding, returning the previous replacement of `key`
    pub fn insert(&mut self, key: TermId, value: TermId) -> Option<TermId> {
        self.bindings.insert(key, value)
    }

    /// Get a binding
    #[must_use]
    pub fn get(&self, key: TermId) -> Option<TermId> {
        self.bindings.get(&key).copied()
    }

    /// Check if a symbol is bound
    #[must_use]
    pub fn contains(&self, key: TermId) -> bool {
        self.bindings.contains_key(&key)
    }

    /// Get the number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the substitution is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings
    pub fn iter(&self) -> impl Iterator<Item = (TermId, TermId)> + '_ {
        self.bindings.iter().map(|(&k, &v)| (k, v))
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl FromIterator<(TermId, TermId)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (TermId, TermId)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl TermManager {
    /// Apply `subst` to `term`
    pub fn substitute(&mut self, term: TermId, subst: &Substitution) -> Result<TermId> {
        let mut out = self.substitute_terms(&[term], subst)?;
        Ok(out.remove(0))
    }

    /// Apply `subst` to each of `terms`, sharing work between them
    pub fn substitute_terms(
        &mut self,
        terms: &[TermId],
        subst: &Substitution,
    ) -> Result<Vec<TermId>> {
        for &t in terms {
            self.check(t)?;
        }
        self.validate_substitution(subst)?;
        if subst.is_empty() {
            return Ok(terms.to_vec());
        }
        let mut apply = Apply::default();
        terms
            .iter()
            .map(|&t| apply.visit(self, t, &subst.bindings))
            .collect()
    }

    fn validate_substitution(&self, subst: &Substitution) -> Result<()> {
        for (key, value) in subst.iter() {
            let key_term = self.term(key)?;
            if !key_term.is_const() && !key_term.is_var() {
                return Err(OxbzError::invalid_argument(
                    "substitution keys must be constants or variables",
                ));
            }
            let value_sort = self.sort_of(value)?;
            if key_term.sort != value_sort {
                return Err(sort_mismatch_between(&self.sorts, key_term.sort, value_sort));
            }
        }
        Ok(())
    }

    /// Variables occurring in `term` outside the scope of a binder for them
    #[must_use]
    pub fn free_vars(&self, term: TermId) -> FxHashSet<TermId> {
        let mut memo = FxHashMap::default();
        self.free_symbols_memo(term, false, &mut memo)
    }

    /// Free variables and constants of `term`
    fn free_symbols(&self, term: TermId) -> FxHashSet<TermId> {
        let mut memo = FxHashMap::default();
        self.free_symbols_memo(term, true, &mut memo)
    }

    fn free_symbols_memo(
        &self,
        term: TermId,
        consts: bool,
        memo: &mut FxHashMap<TermId, FxHashSet<TermId>>,
    ) -> FxHashSet<TermId> {
        if let Some(fv) = memo.get(&term) {
            return fv.clone();
        }
        let Some(t) = self.get(term) else {
            return FxHashSet::default();
        };
        let mut fv = FxHashSet::default();
        match &t.kind {
            TermKind::Var { .. } => {
                fv.insert(term);
            }
            TermKind::Const { .. } if consts => {
                fv.insert(term);
            }
            TermKind::App { args, .. } => {
                let bound = bound_vars(self, term);
                let children = &args[bound.len()..];
                for &child in children {
                    fv.extend(self.free_symbols_memo(child, consts, memo));
                }
                for v in bound {
                    fv.remove(v);
                }
            }
            TermKind::ConstArray(value) => {
                fv = self.free_symbols_memo(*value, consts, memo);
            }
            _ => {}
        }
        memo.insert(term, fv.clone());
        fv
    }
}

#[derive(Default)]
struct Apply {
    memo: FxHashMap<TermId, TermId>,
}

impl Apply {
    fn visit(
        &mut self,
        tm: &mut TermManager,
        term: TermId,
        map: &FxHashMap<TermId, TermId>,
    ) -> Result<TermId> {
        if let Some(&value) = map.get(&term) {
            return Ok(value);
        }
        if let Some(&done) = self.memo.get(&term) {
            return Ok(done);
        }
        let t = tm.term(term)?.clone();
        let result = match &t.kind {
            TermKind::ConstArray(value) => {
                let new_value = self.visit(tm, *value, map)?;
                if new_value == *value {
                    term
                } else {
                    tm.mk_const_array(t.sort, new_value)?
                }
            }
            TermKind::App {
                kind,
                args,
                indices,
            } if kind.is_binder() => {
                let (vars, body) = args.split_at(args.len() - 1);
                self.visit_binder(tm, term, *kind, vars, body[0], indices, map)?
            }
            TermKind::App {
                kind,
                args,
                indices,
            } => {
                let mut changed = false;
                let mut new_args: SmallVec<[TermId; 4]> = SmallVec::with_capacity(args.len());
                for &arg in args {
                    let new_arg = self.visit(tm, arg, map)?;
                    changed |= new_arg != arg;
                    new_args.push(new_arg);
                }
                if changed {
                    tm.mk_term(*kind, &new_args, indices)?
                } else {
                    term
                }
            }
            _ => term,
        };
        self.memo.insert(term, result);
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_binder(
        &mut self,
        tm: &mut TermManager,
        term: TermId,
        kind: super::Kind,
        vars: &[TermId],
        body: TermId,
        indices: &[u32],
        map: &FxHashMap<TermId, TermId>,
    ) -> Result<TermId> {
        let mut inner = map.clone();
        for v in vars {
            inner.remove(v);
        }
        if inner.is_empty() {
            return Ok(term);
        }
        // The memo is only valid for one binding map.
        let new_body = Apply::default().visit(tm, body, &inner)?;
        if new_body == body {
            return Ok(term);
        }
        let occurring = tm.free_symbols(body);
        let mut capturing = FxHashSet::default();
        for (key, &value) in &inner {
            if occurring.contains(key) {
                capturing.extend(tm.free_vars(value));
            }
        }
        let mut new_vars: SmallVec<[TermId; 4]> = SmallVec::with_capacity(vars.len() + 1);
        let mut renamed = false;
        for &v in vars {
            if capturing.contains(&v) {
                let sort = tm.sort_of(v)?;
                let name = tm.symbol(v).map(str::to_string);
                let fresh = tm.mk_var(sort, name.as_deref())?;
                tracing::trace!(var = v.index(), fresh = fresh.index(), "renamed bound variable");
                inner.insert(v, fresh);
                new_vars.push(fresh);
                renamed = true;
            } else {
                new_vars.push(v);
            }
        }
        let new_body = if renamed {
            Apply::default().visit(tm, body, &inner)?
        } else {
            new_body
        };
        new_vars.push(new_body);
        tm.mk_term(kind, &new_vars, indices)
    }
}
