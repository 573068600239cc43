//! Evaluation of terms under a partial model
//!
//! The evaluator replaces constants by the values a model assigns to them and
//! folds every operator whose operands became values. Operators that cannot be
//! folded are rebuilt over their evaluated operands, so the result of
//! [`Evaluator::eval`] is always a term of the same sort, ground when the
//! model covers every constant the input mentions.

use crate::bv::ops as bv;
use crate::fp::{convert, ops as fp};
use oxbz_core::ast::{Kind, Substitution, TermId, TermKind, TermManager};
use oxbz_core::error::Result;
use oxbz_core::sort::{SortId, SortKind};
use oxbz_core::value::{BvValue, FpFormat, FpValue, RoundingMode};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cmp::Ordering;
use tracing::trace;

/// Model-based term evaluator with a result cache
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    model: FxHashMap<TermId, TermId>,
    completion: bool,
    cache: FxHashMap<TermId, TermId>,
}

impl Evaluator {
    /// Evaluator over an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give unassigned constants a default value (zero, +0, RNE) instead of
    /// leaving them symbolic
    #[must_use]
    pub fn with_completion(mut self, completion: bool) -> Self {
        self.completion = completion;
        self
    }

    /// Assign `value` to the constant `constant`
    pub fn assign(&mut self, constant: TermId, value: TermId) {
        self.model.insert(constant, value);
        self.cache.clear();
    }

    /// Number of assigned constants
    #[must_use]
    pub fn len(&self) -> usize {
        self.model.len()
    }

    /// No constant is assigned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Evaluate `term` under the current model
    pub fn eval(&mut self, tm: &mut TermManager, term: TermId) -> Result<TermId> {
        if let Some(&cached) = self.cache.get(&term) {
            return Ok(cached);
        }
        if let Some(&value) = self.model.get(&term) {
            self.cache.insert(term, value);
            return Ok(value);
        }

        let t = tm.term(term)?.clone();
        let result = match &t.kind {
            TermKind::BvValue(_)
            | TermKind::FpValue(_)
            | TermKind::RmValue(_)
            | TermKind::Var { .. } => term,
            TermKind::Const { .. } => {
                if self.completion {
                    let value = default_value(tm, t.sort)?;
                    trace!(?term, "completing unassigned constant");
                    value
                } else {
                    term
                }
            }
            TermKind::ConstArray(fill) => {
                let new_fill = self.eval(tm, *fill)?;
                if new_fill == *fill {
                    term
                } else {
                    tm.mk_const_array(t.sort, new_fill)?
                }
            }
            TermKind::App {
                kind,
                args,
                indices,
            } => {
                let mut new_args: SmallVec<[TermId; 4]> = SmallVec::with_capacity(args.len());
                for &arg in args {
                    new_args.push(self.eval(tm, arg)?);
                }
                match self.fold(tm, *kind, &new_args, indices)? {
                    Some(folded) => folded,
                    None if new_args[..] == args[..] => term,
                    None => tm.mk_term(*kind, &new_args, indices)?,
                }
            }
        };

        self.cache.insert(term, result);
        Ok(result)
    }

    fn fold(
        &mut self,
        tm: &mut TermManager,
        kind: Kind,
        args: &[TermId],
        indices: &[u32],
    ) -> Result<Option<TermId>> {
        if kind.is_fp() {
            return fold_fp(tm, kind, args, indices);
        }
        match kind {
            Kind::Not | Kind::And | Kind::Or | Kind::Xor | Kind::Implies | Kind::Iff => {
                Ok(fold_bool(tm, kind, args))
            }
            Kind::Equal => {
                if args.windows(2).all(|w| w[0] == w[1]) {
                    return Ok(Some(tm.mk_bool(true)));
                }
                if all_values(tm, args) {
                    return Ok(Some(tm.mk_bool(false)));
                }
                Ok(None)
            }
            Kind::Distinct => {
                for (i, a) in args.iter().enumerate() {
                    if args[i + 1..].contains(a) {
                        return Ok(Some(tm.mk_bool(false)));
                    }
                }
                if all_values(tm, args) {
                    return Ok(Some(tm.mk_bool(true)));
                }
                Ok(None)
            }
            Kind::Ite => {
                if args[1] == args[2] {
                    return Ok(Some(args[1]));
                }
                Ok(as_bool(tm, args[0]).map(|c| if c { args[1] } else { args[2] }))
            }
            Kind::Apply => self.beta_reduce(tm, args),
            Kind::ArraySelect => select(tm, args[0], args[1]),
            Kind::ArrayStore | Kind::Lambda | Kind::Forall | Kind::Exists => Ok(None),
            _ => fold_bv(tm, kind, args, indices),
        }
    }

    fn beta_reduce(&mut self, tm: &mut TermManager, args: &[TermId]) -> Result<Option<TermId>> {
        let fun = tm.term(args[0])?;
        if fun.app_kind() != Some(Kind::Lambda) {
            return Ok(None);
        }
        let children: SmallVec<[TermId; 4]> = SmallVec::from_slice(fun.children());
        let (vars, body) = children.split_at(children.len() - 1);
        let subst: Substitution = vars.iter().copied().zip(args[1..].iter().copied()).collect();
        let body = body[0];
        let reduced = tm.substitute(body, &subst)?;
        self.eval(tm, reduced).map(Some)
    }
}

/// Default value of a sort: zero, +0, RNE, a constant array of the element
/// default, or a constant function
pub fn default_value(tm: &mut TermManager, sort: SortId) -> Result<TermId> {
    let kind = tm.sorts.sort(sort)?.kind.clone();
    match kind {
        SortKind::BitVec(width) => tm.mk_bv_value(BvValue::zero(width)),
        SortKind::FloatingPoint {
            exponent,
            significand,
        } => tm.mk_fp_value(FpValue::pos_zero(FpFormat::new(exponent, significand))),
        SortKind::RoundingMode => Ok(tm.mk_rm_value(RoundingMode::Rne)),
        SortKind::Array { element, .. } => {
            let fill = default_value(tm, element)?;
            tm.mk_const_array(sort, fill)
        }
        SortKind::Function { domain, codomain } => {
            let mut args: SmallVec<[TermId; 4]> = SmallVec::with_capacity(domain.len() + 1);
            for &d in &domain {
                args.push(tm.mk_var(d, None)?);
            }
            args.push(default_value(tm, codomain)?);
            tm.mk_term(Kind::Lambda, &args, &[])
        }
    }
}

fn all_values(tm: &TermManager, args: &[TermId]) -> bool {
    args.iter().all(|&a| tm.get(a).is_some_and(|t| t.is_value()))
}

fn as_bool(tm: &TermManager, id: TermId) -> Option<bool> {
    tm.get(id)?.bv_value()?.as_bool()
}

fn bv_value(tm: &TermManager, id: TermId) -> Option<BvValue> {
    tm.get(id)?.bv_value().cloned()
}

fn fp_value(tm: &TermManager, id: TermId) -> Option<FpValue> {
    tm.get(id)?.fp_value().cloned()
}

fn rm_value(tm: &TermManager, id: TermId) -> Option<RoundingMode> {
    tm.get(id)?.rm_value()
}

fn fold_bool(tm: &mut TermManager, kind: Kind, args: &[TermId]) -> Option<TermId> {
    let values: Vec<Option<bool>> = args.iter().map(|&a| as_bool(tm, a)).collect();
    let result = match kind {
        Kind::And if values.contains(&Some(false)) => Some(false),
        Kind::Or if values.contains(&Some(true)) => Some(true),
        Kind::Implies if values[0] == Some(false) => Some(true),
        Kind::Implies if values.last() == Some(&Some(true)) => Some(true),
        _ => {
            let all: Option<Vec<bool>> = values.into_iter().collect();
            let all = all?;
            match kind {
                Kind::Not => Some(!all[0]),
                Kind::And => Some(all.iter().all(|&b| b)),
                Kind::Or => Some(all.iter().any(|&b| b)),
                Kind::Xor => Some(all.iter().fold(false, |acc, &b| acc ^ b)),
                Kind::Implies => Some(fold_implies_tail(&all)),
                Kind::Iff => Some(all[0] == all[1]),
                _ => None,
            }
        }
    }?;
    Some(tm.mk_bool(result))
}

/// `a => (b => (... => z))`
fn fold_implies_tail(values: &[bool]) -> bool {
    match values {
        [] => true,
        [last] => *last,
        [first, rest @ ..] => !first || fold_implies_tail(rest),
    }
}

/// Follow `store`/const-array chains while the read index is decidable
fn select(tm: &mut TermManager, array: TermId, index: TermId) -> Result<Option<TermId>> {
    let index_is_value = tm.term(index)?.is_value();
    let mut current = array;
    loop {
        let t = tm.term(current)?;
        match &t.kind {
            TermKind::ConstArray(fill) => return Ok(Some(*fill)),
            TermKind::App {
                kind: Kind::ArrayStore,
                args,
                ..
            } => {
                let (inner, stored_at, stored) = (args[0], args[1], args[2]);
                if stored_at == index {
                    return Ok(Some(stored));
                }
                let stored_is_value = tm.term(stored_at)?.is_value();
                if !(index_is_value && stored_is_value) {
                    break;
                }
                current = inner;
            }
            _ => break,
        }
    }
    if current == array {
        return Ok(None);
    }
    tm.mk_term(Kind::ArraySelect, &[current, index], &[]).map(Some)
}

fn fold_bv(
    tm: &mut TermManager,
    kind: Kind,
    args: &[TermId],
    indices: &[u32],
) -> Result<Option<TermId>> {
    let values: Option<Vec<BvValue>> = args.iter().map(|&a| bv_value(tm, a)).collect();
    let Some(v) = values else {
        return Ok(None);
    };
    let nary = |f: fn(&BvValue, &BvValue) -> BvValue| {
        v[1..].iter().fold(v[0].clone(), |acc, x| f(&acc, x))
    };
    let value = match kind {
        Kind::BvNot => bv::not(&v[0]),
        Kind::BvNeg => bv::neg(&v[0]),
        Kind::BvInc => bv::inc(&v[0]),
        Kind::BvDec => bv::dec(&v[0]),
        Kind::BvRedand => BvValue::from_bool(bv::redand(&v[0])),
        Kind::BvRedor => BvValue::from_bool(bv::redor(&v[0])),
        Kind::BvRedxor => BvValue::from_bool(bv::redxor(&v[0])),
        Kind::BvAdd => nary(bv::add),
        Kind::BvMul => nary(bv::mul),
        Kind::BvAnd => nary(bv::and),
        Kind::BvOr => nary(bv::or),
        Kind::BvXor => nary(bv::xor),
        Kind::BvConcat => nary(bv::concat),
        Kind::BvSub => bv::sub(&v[0], &v[1]),
        Kind::BvNand => bv::nand(&v[0], &v[1]),
        Kind::BvNor => bv::nor(&v[0], &v[1]),
        Kind::BvXnor => bv::xnor(&v[0], &v[1]),
        Kind::BvShl => bv::shl(&v[0], &v[1]),
        Kind::BvShr => bv::lshr(&v[0], &v[1]),
        Kind::BvAshr => bv::ashr(&v[0], &v[1]),
        Kind::BvUdiv => bv::udiv(&v[0], &v[1]),
        Kind::BvUrem => bv::urem(&v[0], &v[1]),
        Kind::BvSdiv => bv::sdiv(&v[0], &v[1]),
        Kind::BvSrem => bv::srem(&v[0], &v[1]),
        Kind::BvSmod => bv::smod(&v[0], &v[1]),
        Kind::BvRol => bv::rol(&v[0], &v[1]),
        Kind::BvRor => bv::ror(&v[0], &v[1]),
        Kind::BvComp => BvValue::from_bool(v[0] == v[1]),
        Kind::BvUlt => BvValue::from_bool(bv::ucmp(&v[0], &v[1]) == Ordering::Less),
        Kind::BvUle => BvValue::from_bool(bv::ucmp(&v[0], &v[1]) != Ordering::Greater),
        Kind::BvUgt => BvValue::from_bool(bv::ucmp(&v[0], &v[1]) == Ordering::Greater),
        Kind::BvUge => BvValue::from_bool(bv::ucmp(&v[0], &v[1]) != Ordering::Less),
        Kind::BvSlt => BvValue::from_bool(bv::scmp(&v[0], &v[1]) == Ordering::Less),
        Kind::BvSle => BvValue::from_bool(bv::scmp(&v[0], &v[1]) != Ordering::Greater),
        Kind::BvSgt => BvValue::from_bool(bv::scmp(&v[0], &v[1]) == Ordering::Greater),
        Kind::BvSge => BvValue::from_bool(bv::scmp(&v[0], &v[1]) != Ordering::Less),
        Kind::BvUaddo => BvValue::from_bool(bv::uaddo(&v[0], &v[1])),
        Kind::BvSaddo => BvValue::from_bool(bv::saddo(&v[0], &v[1])),
        Kind::BvUmulo => BvValue::from_bool(bv::umulo(&v[0], &v[1])),
        Kind::BvSmulo => BvValue::from_bool(bv::smulo(&v[0], &v[1])),
        Kind::BvUsubo => BvValue::from_bool(bv::usubo(&v[0], &v[1])),
        Kind::BvSsubo => BvValue::from_bool(bv::ssubo(&v[0], &v[1])),
        Kind::BvSdivo => BvValue::from_bool(bv::sdivo(&v[0], &v[1])),
        Kind::BvExtract => bv::extract(&v[0], indices[0], indices[1]),
        Kind::BvRepeat => bv::repeat(&v[0], indices[0]),
        Kind::BvRoli => bv::roli(&v[0], indices[0]),
        Kind::BvRori => bv::rori(&v[0], indices[0]),
        Kind::BvSignExtend => bv::sign_extend(&v[0], indices[0]),
        Kind::BvZeroExtend => bv::zero_extend(&v[0], indices[0]),
        _ => return Ok(None),
    };
    tm.mk_bv_value(value).map(Some)
}

fn fp_chain(v: &[FpValue], holds: fn(&FpValue, &FpValue) -> bool) -> bool {
    v.windows(2).all(|w| holds(&w[0], &w[1]))
}

fn fold_fp(
    tm: &mut TermManager,
    kind: Kind,
    args: &[TermId],
    indices: &[u32],
) -> Result<Option<TermId>> {
    let format = |i: usize| FpFormat::new(indices[i], indices[i + 1]);
    match kind {
        Kind::FpFp => {
            let (Some(sign), Some(exp), Some(sig)) = (
                bv_value(tm, args[0]),
                bv_value(tm, args[1]),
                bv_value(tm, args[2]),
            ) else {
                return Ok(None);
            };
            let format = FpFormat::new(exp.width(), sig.width() + 1);
            let value = FpValue::new(format, sign.bit(0), exp.bits().clone(), sig.bits().clone());
            return tm.mk_fp_value(value).map(Some);
        }
        Kind::FpToFpFromBv => {
            let Some(bits) = bv_value(tm, args[0]) else {
                return Ok(None);
            };
            return tm.mk_fp_value(convert::from_bits(format(0), bits.bits())).map(Some);
        }
        Kind::FpToFpFromSbv | Kind::FpToFpFromUbv => {
            let (Some(rm), Some(bits)) = (rm_value(tm, args[0]), bv_value(tm, args[1])) else {
                return Ok(None);
            };
            let value = if kind == Kind::FpToFpFromSbv {
                fp::from_sbv(rm, &bits, format(0))
            } else {
                fp::from_ubv(rm, &bits, format(0))
            };
            return tm.mk_fp_value(value).map(Some);
        }
        _ => {}
    }

    let rounded = matches!(
        kind,
        Kind::FpAdd
            | Kind::FpSub
            | Kind::FpMul
            | Kind::FpDiv
            | Kind::FpFma
            | Kind::FpSqrt
            | Kind::FpRti
            | Kind::FpToFpFromFp
            | Kind::FpToSbv
            | Kind::FpToUbv
    );
    let (rm, operands) = if rounded {
        let Some(rm) = rm_value(tm, args[0]) else {
            return Ok(None);
        };
        (rm, &args[1..])
    } else {
        (RoundingMode::Rne, args)
    };
    let values: Option<Vec<FpValue>> = operands.iter().map(|&a| fp_value(tm, a)).collect();
    let Some(v) = values else {
        return Ok(None);
    };

    let predicate = match kind {
        Kind::FpEq => Some(fp_chain(&v, fp::eq)),
        Kind::FpLeq => Some(fp_chain(&v, fp::leq)),
        Kind::FpLt => Some(fp_chain(&v, fp::lt)),
        Kind::FpGeq => Some(fp_chain(&v, |a, b| fp::leq(b, a))),
        Kind::FpGt => Some(fp_chain(&v, |a, b| fp::lt(b, a))),
        Kind::FpIsInf => Some(v[0].is_infinite()),
        Kind::FpIsNan => Some(v[0].is_nan()),
        Kind::FpIsNeg => Some(fp::is_negative(&v[0])),
        Kind::FpIsPos => Some(fp::is_positive(&v[0])),
        Kind::FpIsNormal => Some(v[0].is_normal()),
        Kind::FpIsSubnormal => Some(v[0].is_subnormal()),
        Kind::FpIsZero => Some(v[0].is_zero()),
        _ => None,
    };
    if let Some(b) = predicate {
        return Ok(Some(tm.mk_bool(b)));
    }

    let bits = match kind {
        Kind::FpToSbv => fp::to_sbv(rm, &v[0], indices[0]),
        Kind::FpToUbv => fp::to_ubv(rm, &v[0], indices[0]),
        _ => None,
    };
    if matches!(kind, Kind::FpToSbv | Kind::FpToUbv) {
        return match bits {
            Some(value) => tm.mk_bv_value(value).map(Some),
            None => Ok(None),
        };
    }

    let value = match kind {
        Kind::FpAbs => Some(fp::abs(&v[0])),
        Kind::FpNeg => Some(fp::neg(&v[0])),
        Kind::FpAdd => Some(fp::add(rm, &v[0], &v[1])),
        Kind::FpSub => Some(fp::sub(rm, &v[0], &v[1])),
        Kind::FpMul => Some(fp::mul(rm, &v[0], &v[1])),
        Kind::FpDiv => Some(fp::div(rm, &v[0], &v[1])),
        Kind::FpFma => Some(fp::fma(rm, &v[0], &v[1], &v[2])),
        Kind::FpSqrt => fp::sqrt(rm, &v[0]),
        Kind::FpRti => Some(fp::round_to_integral(rm, &v[0])),
        Kind::FpRem => Some(fp::rem(&v[0], &v[1])),
        Kind::FpMin => fp::min(&v[0], &v[1]),
        Kind::FpMax => fp::max(&v[0], &v[1]),
        Kind::FpToFpFromFp => Some(fp::to_fp(rm, &v[0], format(0))),
        _ => None,
    };
    match value {
        Some(value) => tm.mk_fp_value(value).map(Some),
        None => Ok(None),
    }
}
