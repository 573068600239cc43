//! SMT-LIB rendering of terms

use super::{Kind, TermId, TermKind, TermManager};
use std::fmt;

/// Helper returned by [`TermManager::display`]
pub struct TermDisplay<'a> {
    tm: &'a TermManager,
    id: TermId,
}

impl<'a> TermDisplay<'a> {
    pub(super) fn new(tm: &'a TermManager, id: TermId) -> Self {
        Self { tm, id }
    }

    fn write_term(&self, f: &mut fmt::Formatter<'_>, id: TermId) -> fmt::Result {
        let Some(term) = self.tm.get(id) else {
            return write!(f, "<foreign term>");
        };
        match &term.kind {
            TermKind::Const { .. } => self.write_symbol(f, id, 'c'),
            TermKind::Var { .. } => self.write_symbol(f, id, 'v'),
            TermKind::BvValue(v) => write!(f, "{v}"),
            TermKind::FpValue(v) => write!(f, "{v}"),
            TermKind::RmValue(rm) => write!(f, "{rm}"),
            TermKind::ConstArray(value) => {
                write!(f, "((as const {}) ", self.tm.sorts.display(term.sort))?;
                self.write_term(f, *value)?;
                write!(f, ")")
            }
            TermKind::App {
                kind,
                args,
                indices,
            } => {
                write!(f, "(")?;
                if kind.is_binder() {
                    let (vars, body) = args.split_at(args.len() - 1);
                    write!(f, "{kind} (")?;
                    for (i, &v) in vars.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "(")?;
                        self.write_symbol(f, v, 'v')?;
                        let sort = self.tm.get(v).map(|t| t.sort);
                        match sort {
                            Some(sort) => write!(f, " {})", self.tm.sorts.display(sort))?,
                            None => write!(f, ")")?,
                        }
                    }
                    write!(f, ") ")?;
                    self.write_term(f, body[0])?;
                    return write!(f, ")");
                }
                let mut operands = args.as_slice();
                if *kind == Kind::Apply {
                    self.write_term(f, operands[0])?;
                    operands = &operands[1..];
                } else if indices.is_empty() {
                    write!(f, "{kind}")?;
                } else {
                    write!(f, "(_ {kind}")?;
                    for i in indices {
                        write!(f, " {i}")?;
                    }
                    write!(f, ")")?;
                }
                for &arg in operands {
                    write!(f, " ")?;
                    self.write_term(f, arg)?;
                }
                write!(f, ")")
            }
        }
    }

    fn write_symbol(&self, f: &mut fmt::Formatter<'_>, id: TermId, prefix: char) -> fmt::Result {
        match self.tm.symbol(id) {
            Some(name) if is_simple_symbol(name) => write!(f, "{name}"),
            Some(name) => write!(f, "|{name}|"),
            None => write!(f, "_{prefix}{}", id.index()),
        }
    }
}

fn is_simple_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let allowed = |c: char| c.is_ascii_alphanumeric() || "~!@$%^&*_-+=<>.?/".contains(c);
    !first.is_ascii_digit() && allowed(first) && chars.all(allowed)
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_term(f, self.id)
    }
}
