//! First-UIP conflict analysis (spec.md §4.6): resolve the conflict clause
//! against trail reasons, walking backward at the conflict level until
//! exactly one conflict-level literal remains, then minimize the result.

use crate::{
    assign::{AssignReason, AssignStack},
    cdb::ClauseDb,
    error::Conflict,
    heuristics::Heuristics,
    types::{DecisionLevel, Lit, VarFlag},
};

pub struct Analysis {
    /// The learned clause, UIP literal first.
    pub learned: Vec<Lit>,
    /// Second-highest level among learned literals, or 0 if unit.
    pub backjump_level: DecisionLevel,
    pub glue: u32,
}

fn conflict_literals(conflict: Conflict, cdb: &ClauseDb) -> Vec<Lit> {
    match conflict {
        Conflict::Binary(a, b) => vec![a, b],
        Conflict::Clause(cref) => cdb.arena.get(cref).lits.clone(),
    }
}

fn reason_literals(reason: AssignReason, cdb: &ClauseDb, exclude: Lit) -> Vec<Lit> {
    match reason {
        AssignReason::Decision => Vec::new(),
        AssignReason::Binary(other) => vec![other],
        AssignReason::Clause(cref) => cdb
            .arena
            .get(cref)
            .lits
            .iter()
            .copied()
            .filter(|&l| l != exclude)
            .collect(),
    }
}

/// Run first-UIP analysis on `conflict`. Bumps both decision structures
/// (spec.md §4.10: heap and queue are kept live in both modes) for every
/// analyzed variable and the `used` counter of every reason clause
/// traversed, then decays (spec.md §4.6). Returns `None` if the conflict
/// is already at level 0 (the instance is UNSAT).
pub fn analyze(conflict: Conflict, assign: &mut AssignStack, cdb: &mut ClauseDb, heuristics: &mut Heuristics) -> Option<Analysis> {
    let conflict_level = assign.decision_level();
    if conflict_level == 0 {
        return None;
    }

    let mut learned: Vec<Lit> = vec![Lit::from(0u32)]; // placeholder for the UIP, filled at the end
    let mut counter = 0usize;

    let mut process = |lit: Lit, assign: &mut AssignStack, counter: &mut usize, learned: &mut Vec<Lit>, heuristics: &mut Heuristics| {
        let var = lit.var();
        if assign.flags_of(var).contains(VarFlag::ANALYZED) {
            return;
        }
        if assign.level_of(var) == 0 {
            return;
        }
        assign.set_flags_of(var, assign.flags_of(var) | VarFlag::ANALYZED);
        heuristics.vsids.bump(var);
        heuristics.queue.bump(var);
        if assign.level_of(var) == conflict_level {
            *counter += 1;
        } else {
            learned.push(lit);
        }
    };

    for lit in conflict_literals(conflict, cdb) {
        process(lit, assign, &mut counter, &mut learned, heuristics);
    }
    if let Conflict::Clause(cref) = conflict {
        cdb.arena.get_mut(cref).bump_used();
    }

    let mut trail_idx = assign.trail_len();
    let uip_lit;
    loop {
        loop {
            trail_idx -= 1;
            if assign.flags_of(assign.trail()[trail_idx].var()).contains(VarFlag::ANALYZED) {
                break;
            }
        }
        let lit = assign.trail()[trail_idx];
        counter -= 1;
        if counter == 0 {
            uip_lit = lit;
            break;
        }
        let reason = assign.reason_of(lit.var());
        if let AssignReason::Clause(cref) = reason {
            cdb.arena.get_mut(cref).bump_used();
        }
        for other in reason_literals(reason, cdb, lit) {
            process(other, assign, &mut counter, &mut learned, heuristics);
        }
    }
    learned[0] = !uip_lit;

    minimize(&mut learned, assign, cdb);

    let backjump_level = learned[1..]
        .iter()
        .map(|l| assign.level_of(l.var()))
        .max()
        .unwrap_or(0);

    cdb.lbd_temp.grow_to(conflict_level as usize);
    let glue = cdb.lbd_temp.compute(learned.iter().map(|l| assign.level_of(l.var())));

    heuristics.vsids.decay_all();

    for lit in &learned {
        assign.set_flags_of(lit.var(), VarFlag::empty());
    }

    Some(Analysis {
        learned,
        backjump_level,
        glue,
    })
}

/// Recursive minimization (spec.md §4.6): drop a non-UIP literal if every
/// other literal of its reason clause is itself subsumed by the learned
/// set (transitively), memoized via `REMOVABLE`/`POISONED`.
fn minimize(learned: &mut Vec<Lit>, assign: &mut AssignStack, cdb: &ClauseDb) {
    let mut kept = vec![learned[0]];
    for &lit in &learned[1..] {
        let reason = assign.reason_of(lit.var());
        let redundant = match reason {
            AssignReason::Decision => false,
            AssignReason::Binary(other) => lit_redundant(other, assign, cdb),
            AssignReason::Clause(cref) => cdb
                .arena
                .get(cref)
                .lits
                .iter()
                .copied()
                .filter(|&l| l != lit)
                .all(|other| lit_redundant(other, assign, cdb)),
        };
        if !redundant {
            kept.push(lit);
        }
    }
    *learned = kept;
}

fn lit_redundant(lit: Lit, assign: &mut AssignStack, cdb: &ClauseDb) -> bool {
    let var = lit.var();
    if assign.level_of(var) == 0 || assign.flags_of(var).contains(VarFlag::ANALYZED) {
        return true;
    }
    let flags = assign.flags_of(var);
    if flags.contains(VarFlag::REMOVABLE) {
        return true;
    }
    if flags.contains(VarFlag::POISONED) {
        return false;
    }
    let ok = match assign.reason_of(var) {
        AssignReason::Decision => false,
        AssignReason::Binary(other) => lit_redundant(other, assign, cdb),
        AssignReason::Clause(cref) => cdb
            .arena
            .get(cref)
            .lits
            .iter()
            .copied()
            .filter(|&l| l != lit)
            .all(|other| lit_redundant(other, assign, cdb)),
    };
    let mark = if ok { VarFlag::REMOVABLE } else { VarFlag::POISONED };
    assign.set_flags_of(var, assign.flags_of(var) | mark);
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cdb::ClauseDb, config::Config, heuristics::Heuristics};

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn learns_unit_clause_from_two_decisions_and_a_binary_conflict() {
        let mut assign = AssignStack::new(8);
        let mut cdb = ClauseDb::new(8, 300);
        cdb.register_clause(vec![l(1), l(2)], false, 0);
        let config = Config::default();
        let mut heuristics = Heuristics::new(8, &config, 1);

        assign.assign_decision(!l(1));
        assign.assign_decision(!l(2));
        let result = analyze(Conflict::Binary(!l(1), l(2)), &mut assign, &mut cdb, &mut heuristics);
        let analysis = result.expect("conflict above level 0");
        assert_eq!(analysis.backjump_level, 0);
        assert_eq!(analysis.learned.len(), 1);
    }
}
