//! Assignment reasons (spec.md §3 "Assigned record", §9 "tagged unions
//! over type punning"): explicit variants rather than a packed sentinel
//! word, since the source's bit-packing is a performance artifact and not
//! part of the semantics.

use crate::{cdb::ClauseRef, types::Lit};

/// Why a variable holds its current value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssignReason {
    /// Chosen by the decision heuristic, not forced.
    Decision,
    /// Forced by a binary clause `(¬other ∨ ℓ)`; `other` is the literal
    /// whose falsification produced this one.
    Binary(Lit),
    /// Forced by propagation of a clause of size ≥ 3.
    Clause(ClauseRef),
}

impl AssignReason {
    #[inline]
    pub fn is_decision(&self) -> bool {
        matches!(self, AssignReason::Decision)
    }

    #[inline]
    pub fn clause_ref(&self) -> Option<ClauseRef> {
        match *self {
            AssignReason::Clause(cref) => Some(cref),
            _ => None,
        }
    }
}
