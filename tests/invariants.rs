//! Property tests over the externally observable contract (spec.md §8):
//! model verification is the only round-trip law reachable through the
//! public API (`Solver` doesn't expose the arena/watches/trail directly,
//! so the white-box invariants 1–8 are covered by unit tests alongside the
//! modules they describe).

use proptest::prelude::*;
use satkernel::{CnfDescription, Config, Lit, SolveResult, Solver};

fn build_solver(num_vars: usize, clauses: &[Vec<i32>]) -> Solver {
    let desc = CnfDescription {
        num_of_variables: num_vars,
        num_of_clauses: clauses.len(),
    };
    let mut solver = Solver::new(&desc, Config::default()).unwrap();
    for c in clauses {
        solver
            .add_clause(c.iter().map(|&x| Lit::from(x)).collect())
            .unwrap();
    }
    solver
}

/// A nonzero literal over `num_vars` variables, in `[-num_vars, -1] ∪ [1, num_vars]`.
fn literal_strategy(num_vars: i32) -> impl Strategy<Value = i32> {
    (1..=num_vars).prop_flat_map(move |v| prop_oneof![Just(v), Just(-v)])
}

fn clause_strategy(num_vars: i32) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(literal_strategy(num_vars), 1..=3)
}

proptest! {
    /// Model verification (spec.md §8 round-trip law): for every SAT
    /// return, every input clause has at least one literal assigned true.
    #[test]
    fn sat_result_satisfies_every_input_clause(
        clauses in prop::collection::vec(clause_strategy(6), 1..12)
    ) {
        let mut solver = build_solver(6, &clauses);
        if solver.solve() == SolveResult::Sat {
            for c in &clauses {
                let satisfied = c.iter().any(|&x| solver.value(Lit::from(x)) == Some(true));
                prop_assert!(satisfied, "clause {:?} not satisfied by model", c);
            }
        }
    }

    /// Solving the same formula twice from scratch is deterministic.
    #[test]
    fn solve_is_deterministic(
        clauses in prop::collection::vec(clause_strategy(8), 1..16)
    ) {
        let first = build_solver(8, &clauses).solve();
        let second = build_solver(8, &clauses).solve();
        prop_assert_eq!(first, second);
    }
}
