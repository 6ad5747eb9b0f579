use std::fmt;

use crate::cdb::ClauseRef;

/// A conflicting clause discovered during propagation (spec.md §4.5): the
/// synthetic two-literal form for a falsified binary clause, or a
/// reference into the arena for anything larger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conflict {
    Binary(crate::types::Lit, crate::types::Lit),
    Clause(ClauseRef),
}

/// Return type of unit propagation (spec.md §4.5, §7): `Ok(())` on a fully
/// propagated trail, `Err` carrying the conflicting clause.
pub type PropagationResult = Result<(), Conflict>;

/// Internal errors reported by the core (spec.md §7).
#[derive(Debug, Eq, PartialEq)]
pub enum SolverError {
    /// A clause reduced to empty while being added or derived.
    EmptyClause,
    /// A literal referred to a variable outside `[0, N)`.
    InvalidLiteral,
    /// Arena or metadata growth failed.
    OutOfMemory,
    /// The formula was found unsatisfiable during ingestion, before search.
    Inconsistent,
    /// A conflict was detected at the root decision level.
    RootLevelConflict(Conflict),
    /// An internal invariant was violated; indicates a solver bug.
    SolverBug(&'static str),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for SolverError {}

/// Returned by routines whose only failure mode is root-level
/// inconsistency (spec.md §7: "rejected ... not at solve time" is the
/// `Config` counterpart of this for configuration errors).
pub type MaybeInconsistent = Result<(), SolverError>;
