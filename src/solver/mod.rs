//! The top-level solver aggregate (spec.md §2, §5, §6): owns the arena,
//! trail, watches, heuristics, restart controller, and mode switcher
//! exclusively for its lifetime, matching spec.md §9's "global mutable
//! state ... one solver per solve" design and the teacher's own
//! single-owning-`Solver`-struct layout.

mod analyze;
mod mode;
mod reduce;
mod restart;
mod search;

pub use mode::ModeSwitcher;
pub use restart::RestartController;
pub use search::SolveResult;

use crate::{
    assign::{propagate, AssignReason, AssignStack},
    cdb::ClauseDb,
    config::Config,
    error::{MaybeInconsistent, SolverError},
    heuristics::{Heuristics, Mode},
    stats::Stats,
    types::{CnfDescription, Lit},
};

/// A host-polled predicate checked at loop boundaries (spec.md §5): when it
/// returns `true`, `solve()` returns `Unknown` instead of running to
/// exhaustion.
pub type Terminate = Box<dyn FnMut() -> bool>;

pub struct Solver {
    assign: AssignStack,
    cdb: ClauseDb,
    heuristics: Heuristics,
    restart: RestartController,
    mode_switcher: ModeSwitcher,
    config: Config,
    stats: Stats,
    ticks: u64,
    inconsistent: bool,
    terminate: Option<Terminate>,
}

impl Solver {
    /// Construct a solver sized for `desc`. Rejects an invalid `config`
    /// up front via [`Config::validate`] (spec.md §7: "rejected at
    /// option-set time, not at solve time"), rather than storing it
    /// unchecked.
    pub fn new(desc: &CnfDescription, config: Config) -> Result<Self, SolverError> {
        let config = config.validate()?;
        let num_vars = desc.num_of_variables;
        let seed = 0xa7ec_1e57u64;
        Ok(Solver {
            assign: AssignStack::new(num_vars),
            cdb: ClauseDb::new(num_vars, config.reduceint),
            heuristics: Heuristics::new(num_vars, &config, seed),
            restart: RestartController::new(config.restartint),
            mode_switcher: ModeSwitcher::new(Mode::Stable),
            config,
            stats: Stats::default(),
            ticks: 0,
            inconsistent: false,
            terminate: None,
        })
    }

    /// Grow every owned structure to accommodate variables up to (but not
    /// including) `num_vars`, for hosts that add variables incrementally.
    pub fn grow_to(&mut self, num_vars: usize) {
        self.assign.grow_to(num_vars);
        self.cdb.grow_to(num_vars);
        self.heuristics.grow_to(num_vars, &self.config);
    }

    pub fn set_terminate(&mut self, terminate: Terminate) {
        self.terminate = Some(terminate);
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    /// Current truth value of `lit`, or `None` if unassigned.
    pub fn value(&self, lit: Lit) -> Option<bool> {
        match self.assign.value(lit) {
            v if v > 0 => Some(true),
            v if v < 0 => Some(false),
            _ => None,
        }
    }

    /// Ingest one input clause (spec.md §6 "Ingestion"). Tautologies are
    /// silently discarded; unit clauses unit-propagate immediately; an
    /// empty clause, or a clause falsified outright by the current
    /// root-level assignment, sets the `inconsistent` flag rather than
    /// returning an error (the error return is reserved for malformed
    /// input).
    pub fn add_clause(&mut self, mut lits: Vec<Lit>) -> MaybeInconsistent {
        for &l in &lits {
            if l.var().index() >= self.assign.num_vars() {
                return Err(SolverError::InvalidLiteral);
            }
        }

        lits.sort_unstable();
        lits.dedup();
        if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
            return Ok(()); // tautology: ℓ and ¬ℓ both present
        }
        if lits.is_empty() {
            self.inconsistent = true;
            return Ok(());
        }
        if lits.len() == 1 {
            return self.ingest_unit(lits[0]);
        }

        // Prefer watching a true literal, then unassigned ones, pushing
        // falsified literals to the back — otherwise a clause added after
        // its own watched literals were already assigned false would
        // violate the two-watched-literal invariant on arrival.
        lits.sort_by_key(|&l| match self.assign.value(l) {
            1 => 0,
            0 => 1,
            _ => 2,
        });
        if self.assign.value(lits[0]) < 0 {
            self.inconsistent = true;
            return Ok(());
        }
        if self.assign.value(lits[1]) < 0 && self.assign.value(lits[0]) == 0 {
            let forced = lits[0];
            self.assign.assign_forced(forced, AssignReason::Decision);
            if propagate(&mut self.assign, &mut self.cdb, &mut self.ticks).is_err() {
                self.inconsistent = true;
            }
        }
        self.cdb.register_clause(lits, false, 0);
        Ok(())
    }

    fn ingest_unit(&mut self, lit: Lit) -> MaybeInconsistent {
        match self.assign.value(lit) {
            v if v > 0 => {}
            v if v < 0 => self.inconsistent = true,
            _ => {
                self.assign.assign_forced(lit, AssignReason::Decision);
                if propagate(&mut self.assign, &mut self.cdb, &mut self.ticks).is_err() {
                    self.inconsistent = true;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn add_clause_rejects_out_of_range_literal() {
        let desc = CnfDescription { num_of_variables: 1, num_of_clauses: 1 };
        let mut solver = Solver::new(&desc, Config::default()).unwrap();
        assert_eq!(solver.add_clause(vec![l(5)]), Err(SolverError::InvalidLiteral));
    }

    #[test]
    fn tautology_is_discarded_without_marking_inconsistent() {
        let desc = CnfDescription { num_of_variables: 2, num_of_clauses: 1 };
        let mut solver = Solver::new(&desc, Config::default()).unwrap();
        solver.add_clause(vec![l(1), l(-1)]).unwrap();
        assert!(!solver.is_inconsistent());
    }

    #[test]
    fn conflicting_units_mark_inconsistent() {
        let desc = CnfDescription { num_of_variables: 1, num_of_clauses: 2 };
        let mut solver = Solver::new(&desc, Config::default()).unwrap();
        solver.add_clause(vec![l(1)]).unwrap();
        solver.add_clause(vec![l(-1)]).unwrap();
        assert!(solver.is_inconsistent());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let desc = CnfDescription { num_of_variables: 1, num_of_clauses: 1 };
        let mut config = Config::default();
        config.restartmargin = -1.0;
        assert!(Solver::new(&desc, config).is_err());
    }
}
