//! Sort checking for operator applications
//!
//! [`result_sort`] validates operand count, operand sorts and static indices
//! for a [`Kind`] and computes the sort of the resulting application. It never
//! allocates terms; the only side effect is interning result sorts that do
//! not exist yet (function sorts of lambdas, widths produced by concat and
//! friends).

use super::{Kind, TermId, TermKind, TermManager};
use crate::error::{OxbzError, Result};
use crate::error_utils::{
    sort_mismatch, sort_mismatch_between, validate_arity, validate_index_count,
    validate_min_arity,
};
use crate::sort::{Sort, SortId};

/// Compute the sort of `kind` applied to `args` with `indices`
pub(super) fn result_sort(
    tm: &mut TermManager,
    kind: Kind,
    args: &[TermId],
    indices: &[u32],
) -> Result<SortId> {
    validate_index_count(kind, indices)?;
    let sorts: Vec<SortId> = args
        .iter()
        .map(|&a| tm.sort_of(a))
        .collect::<Result<_>>()?;
    let mut cx = Checker { tm, kind, sorts };

    match kind {
        Kind::Not => {
            validate_arity(kind, args, 1)?;
            cx.all_bool()
        }
        Kind::And | Kind::Or | Kind::Xor | Kind::Implies => {
            validate_min_arity(kind, args, 2)?;
            cx.all_bool()
        }
        Kind::Iff => {
            validate_arity(kind, args, 2)?;
            cx.all_bool()
        }
        Kind::Equal | Kind::Distinct => {
            validate_min_arity(kind, args, 2)?;
            cx.all_same()?;
            Ok(cx.bool_sort())
        }
        Kind::Ite => {
            validate_arity(kind, args, 3)?;
            cx.expect_bool(0)?;
            cx.same(1, 2)?;
            Ok(cx.sorts[1])
        }
        Kind::Apply => {
            validate_min_arity(kind, args, 2)?;
            let fun = cx.sort(0)?.clone();
            let (Some(domain), Some(codomain)) = (fun.fun_get_domain(), fun.fun_get_codomain())
            else {
                return Err(cx.mismatch_kind("function sort", 0));
            };
            if domain.len() != args.len() - 1 {
                return Err(OxbzError::ArityMismatch {
                    op: kind.name(),
                    expected: (domain.len() + 1).to_string(),
                    found: args.len(),
                });
            }
            for (i, &expected) in domain.iter().enumerate() {
                cx.expect_sort(i + 1, expected)?;
            }
            Ok(codomain)
        }
        Kind::Lambda | Kind::Forall | Kind::Exists => {
            validate_min_arity(kind, args, 2)?;
            let (vars, _) = args.split_at(args.len() - 1);
            for (i, var) in vars.iter().enumerate() {
                if !cx.tm.get(*var).is_some_and(|t| t.is_var()) {
                    return Err(OxbzError::invalid_argument(format!(
                        "operand {i} of '{}' must be a variable",
                        kind.name()
                    )));
                }
                if vars[..i].contains(var) {
                    return Err(OxbzError::invalid_argument(format!(
                        "variable bound twice by '{}'",
                        kind.name()
                    )));
                }
            }
            let body = args.len() - 1;
            if kind == Kind::Lambda {
                let domain = cx.sorts[..body].to_vec();
                let codomain = cx.sorts[body];
                cx.tm.sorts.function(&domain, codomain)
            } else {
                cx.expect_bool(body)?;
                Ok(cx.bool_sort())
            }
        }
        Kind::ArraySelect => {
            validate_arity(kind, args, 2)?;
            let (index, element) = cx.array_parts(0)?;
            cx.expect_sort(1, index)?;
            Ok(element)
        }
        Kind::ArrayStore => {
            validate_arity(kind, args, 3)?;
            let (index, element) = cx.array_parts(0)?;
            cx.expect_sort(1, index)?;
            cx.expect_sort(2, element)?;
            Ok(cx.sorts[0])
        }

        Kind::BvNot | Kind::BvNeg | Kind::BvInc | Kind::BvDec => {
            validate_arity(kind, args, 1)?;
            cx.bv_width(0)?;
            Ok(cx.sorts[0])
        }
        Kind::BvRedand | Kind::BvRedor | Kind::BvRedxor => {
            validate_arity(kind, args, 1)?;
            cx.bv_width(0)?;
            Ok(cx.bool_sort())
        }
        Kind::BvAdd | Kind::BvMul | Kind::BvAnd | Kind::BvOr | Kind::BvXor => {
            validate_min_arity(kind, args, 2)?;
            cx.all_same_bv()
        }
        Kind::BvSub
        | Kind::BvNand
        | Kind::BvNor
        | Kind::BvXnor
        | Kind::BvShl
        | Kind::BvShr
        | Kind::BvAshr
        | Kind::BvUdiv
        | Kind::BvUrem
        | Kind::BvSdiv
        | Kind::BvSrem
        | Kind::BvSmod
        | Kind::BvRol
        | Kind::BvRor => {
            validate_arity(kind, args, 2)?;
            cx.all_same_bv()
        }
        Kind::BvComp
        | Kind::BvUlt
        | Kind::BvUle
        | Kind::BvUgt
        | Kind::BvUge
        | Kind::BvSlt
        | Kind::BvSle
        | Kind::BvSgt
        | Kind::BvSge
        | Kind::BvUaddo
        | Kind::BvSaddo
        | Kind::BvUmulo
        | Kind::BvSmulo
        | Kind::BvUsubo
        | Kind::BvSsubo
        | Kind::BvSdivo => {
            validate_arity(kind, args, 2)?;
            cx.all_same_bv()?;
            Ok(cx.bool_sort())
        }
        Kind::BvConcat => {
            validate_min_arity(kind, args, 2)?;
            let mut total: u32 = 0;
            for i in 0..args.len() {
                let w = cx.bv_width(i)?;
                total = total
                    .checked_add(w)
                    .ok_or_else(|| OxbzError::invalid_argument("concat result width overflows"))?;
            }
            cx.tm.sorts.bitvec(total)
        }
        Kind::BvExtract => {
            validate_arity(kind, args, 1)?;
            let width = cx.bv_width(0)?;
            let (hi, lo) = (indices[0], indices[1]);
            if hi >= width {
                return Err(OxbzError::invalid_argument(format!(
                    "upper index {hi} of 'extract' must be less than the width {width}"
                )));
            }
            if lo > hi {
                return Err(OxbzError::invalid_argument(format!(
                    "upper index {hi} of 'extract' must not be less than the lower index {lo}"
                )));
            }
            cx.tm.sorts.bitvec(hi - lo + 1)
        }
        Kind::BvRepeat => {
            validate_arity(kind, args, 1)?;
            let width = cx.bv_width(0)?;
            let n = indices[0];
            if n == 0 {
                return Err(OxbzError::invalid_argument(
                    "'repeat' count must be greater than zero",
                ));
            }
            let total = width
                .checked_mul(n)
                .ok_or_else(|| OxbzError::invalid_argument("repeat result width overflows"))?;
            cx.tm.sorts.bitvec(total)
        }
        Kind::BvRoli | Kind::BvRori => {
            validate_arity(kind, args, 1)?;
            cx.bv_width(0)?;
            Ok(cx.sorts[0])
        }
        Kind::BvSignExtend | Kind::BvZeroExtend => {
            validate_arity(kind, args, 1)?;
            let width = cx.bv_width(0)?;
            let total = width.checked_add(indices[0]).ok_or_else(|| {
                OxbzError::invalid_argument("extension result width overflows")
            })?;
            cx.tm.sorts.bitvec(total)
        }

        Kind::FpAbs | Kind::FpNeg => {
            validate_arity(kind, args, 1)?;
            cx.expect_fp(0)?;
            Ok(cx.sorts[0])
        }
        Kind::FpAdd | Kind::FpSub | Kind::FpMul | Kind::FpDiv => {
            validate_arity(kind, args, 3)?;
            cx.rm_then_same_fp()
        }
        Kind::FpFma => {
            validate_arity(kind, args, 4)?;
            cx.rm_then_same_fp()
        }
        Kind::FpSqrt | Kind::FpRti => {
            validate_arity(kind, args, 2)?;
            cx.rm_then_same_fp()
        }
        Kind::FpRem | Kind::FpMin | Kind::FpMax => {
            validate_arity(kind, args, 2)?;
            cx.expect_fp(0)?;
            cx.all_same()?;
            Ok(cx.sorts[0])
        }
        Kind::FpEq | Kind::FpLeq | Kind::FpLt | Kind::FpGeq | Kind::FpGt => {
            validate_min_arity(kind, args, 2)?;
            cx.expect_fp(0)?;
            cx.all_same()?;
            Ok(cx.bool_sort())
        }
        Kind::FpIsInf
        | Kind::FpIsNan
        | Kind::FpIsNeg
        | Kind::FpIsNormal
        | Kind::FpIsPos
        | Kind::FpIsSubnormal
        | Kind::FpIsZero => {
            validate_arity(kind, args, 1)?;
            cx.expect_fp(0)?;
            Ok(cx.bool_sort())
        }
        Kind::FpFp => {
            validate_arity(kind, args, 3)?;
            if cx.bv_width(0)? != 1 {
                return Err(cx.mismatch_kind("(_ BitVec 1)", 0));
            }
            let exponent = cx.bv_width(1)?;
            let trailing = cx.bv_width(2)?;
            let significand = trailing.checked_add(1).ok_or_else(|| {
                OxbzError::invalid_argument("significand width of 'fp' overflows")
            })?;
            cx.tm.sorts.floating_point(exponent, significand)
        }
        Kind::FpToFpFromBv => {
            validate_arity(kind, args, 1)?;
            let width = cx.bv_width(0)?;
            let (e, s) = (indices[0], indices[1]);
            if u64::from(e) + u64::from(s) != u64::from(width) {
                return Err(OxbzError::invalid_argument(format!(
                    "size of bit-vector operand ({width}) does not match the floating-point format ({e} + {s})"
                )));
            }
            cx.tm.sorts.floating_point(e, s)
        }
        Kind::FpToFpFromFp => {
            validate_arity(kind, args, 2)?;
            cx.expect_rm(0)?;
            cx.expect_fp(1)?;
            cx.tm.sorts.floating_point(indices[0], indices[1])
        }
        Kind::FpToFpFromSbv | Kind::FpToFpFromUbv => {
            validate_arity(kind, args, 2)?;
            cx.expect_rm(0)?;
            cx.bv_width(1)?;
            cx.tm.sorts.floating_point(indices[0], indices[1])
        }
        Kind::FpToSbv | Kind::FpToUbv => {
            validate_arity(kind, args, 2)?;
            cx.expect_rm(0)?;
            cx.expect_fp(1)?;
            cx.tm.sorts.bitvec(indices[0])
        }
    }
}

struct Checker<'a> {
    tm: &'a mut TermManager,
    kind: Kind,
    sorts: Vec<SortId>,
}

impl Checker<'_> {
    fn bool_sort(&self) -> SortId {
        self.tm.sorts.bool_sort
    }

    fn sort(&self, i: usize) -> Result<&Sort> {
        self.tm.sorts.sort(self.sorts[i])
    }

    fn describe(&self, i: usize) -> String {
        self.tm.sorts.display(self.sorts[i]).to_string()
    }

    fn mismatch_kind(&self, expected: &str, i: usize) -> OxbzError {
        sort_mismatch(
            format!("{expected} for operand {i} of '{}'", self.kind.name()),
            self.describe(i),
        )
    }

    fn expect_sort(&self, i: usize, expected: SortId) -> Result<()> {
        if self.sorts[i] != expected {
            return Err(sort_mismatch_between(
                &self.tm.sorts,
                expected,
                self.sorts[i],
            ));
        }
        Ok(())
    }

    fn expect_bool(&self, i: usize) -> Result<()> {
        self.expect_sort(i, self.bool_sort())
    }

    fn all_bool(&self) -> Result<SortId> {
        for i in 0..self.sorts.len() {
            self.expect_bool(i)?;
        }
        Ok(self.bool_sort())
    }

    fn same(&self, i: usize, j: usize) -> Result<()> {
        self.expect_sort(j, self.sorts[i])
    }

    fn all_same(&self) -> Result<()> {
        for j in 1..self.sorts.len() {
            self.same(0, j)?;
        }
        Ok(())
    }

    fn bv_width(&self, i: usize) -> Result<u32> {
        self.sort(i)?
            .bv_get_size()
            .ok_or_else(|| self.mismatch_kind("bit-vector sort", i))
    }

    fn all_same_bv(&self) -> Result<SortId> {
        self.bv_width(0)?;
        self.all_same()?;
        Ok(self.sorts[0])
    }

    fn expect_fp(&self, i: usize) -> Result<()> {
        if !self.sort(i)?.is_fp() {
            return Err(self.mismatch_kind("floating-point sort", i));
        }
        Ok(())
    }

    fn expect_rm(&self, i: usize) -> Result<()> {
        if !self.sort(i)?.is_rm() {
            return Err(self.mismatch_kind("RoundingMode", i));
        }
        Ok(())
    }

    fn rm_then_same_fp(&self) -> Result<SortId> {
        self.expect_rm(0)?;
        self.expect_fp(1)?;
        for j in 2..self.sorts.len() {
            self.same(1, j)?;
        }
        Ok(self.sorts[1])
    }

    fn array_parts(&self, i: usize) -> Result<(SortId, SortId)> {
        let sort = self.sort(i)?;
        match (sort.array_get_index(), sort.array_get_element()) {
            (Some(index), Some(element)) => Ok((index, element)),
            _ => Err(self.mismatch_kind("array sort", i)),
        }
    }
}

/// Variables bound by a binder application
pub(super) fn bound_vars<'a>(tm: &'a TermManager, id: TermId) -> &'a [TermId] {
    match tm.get(id).map(|t| &t.kind) {
        Some(TermKind::App { kind, args, .. }) if kind.is_binder() => &args[..args.len() - 1],
        _ => &[],
    }
}
