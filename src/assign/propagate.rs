//! Unit propagation over watched literals (spec.md §4.5): the hottest loop
//! in the whole core. Follows the per-literal scan in the spec almost
//! line for line; the "output cursor" rewind described there becomes an
//! explicit read/write index pair over the same `Vec`, since Rust doesn't
//! let us alias a raw pointer into the list being walked.

use super::{reason::AssignReason, trail::AssignStack};
use crate::{
    cdb::{ClauseDb, ClauseFlag, Watch},
    error::{Conflict, PropagationResult},
    types::Lit,
};

/// Advance through every trail literal not yet propagated, applying unit
/// propagation until the trail is exhausted or a conflict is found.
/// `ticks` accrues one unit per watch visited and one more per clause body
/// actually inspected (spec.md §4.5 "Tick accounting"), for the host's
/// scheduling budget.
pub fn propagate(assign: &mut AssignStack, cdb: &mut ClauseDb, ticks: &mut u64) -> PropagationResult {
    while assign.propagated < assign.trail_len() {
        let lit = assign.trail()[assign.propagated];
        assign.propagated += 1;
        let not_lit = !lit;

        let conflict = scan_literal(assign, cdb, not_lit, ticks);
        cdb.watches.drain_delayed();
        if let Some(c) = conflict {
            return Err(c);
        }
    }
    Ok(())
}

fn scan_literal(
    assign: &mut AssignStack,
    cdb: &mut ClauseDb,
    not_lit: Lit,
    ticks: &mut u64,
) -> Option<Conflict> {
    let list_len = cdb.watches.list(not_lit).len();
    let mut read = 0usize;
    let mut write = 0usize;
    let mut conflict = None;

    while read < list_len {
        let w = cdb.watches.list(not_lit)[read];
        read += 1;
        *ticks += 1;

        match w {
            Watch::Binary { blocking } => {
                let blocking_value = assign.value(blocking);
                if blocking_value > 0 {
                    cdb.watches.list_mut(not_lit)[write] = w;
                    write += 1;
                } else if blocking_value < 0 {
                    cdb.watches.list_mut(not_lit)[write] = w;
                    write += 1;
                    conflict = Some(Conflict::Binary(not_lit, blocking));
                    break;
                } else {
                    assign.assign_forced(blocking, AssignReason::Binary(not_lit));
                    cdb.watches.list_mut(not_lit)[write] = w;
                    write += 1;
                }
            }
            Watch::Large { blocking, cref } => {
                if cdb.arena.get(cref).is(ClauseFlag::GARBAGE) {
                    continue;
                }
                *ticks += 1;
                if assign.value(blocking) > 0 {
                    cdb.watches.list_mut(not_lit)[write] = w;
                    write += 1;
                    continue;
                }

                let (other, size) = {
                    let clause = cdb.arena.get(cref);
                    let other = Lit::from(usize::from(clause[0]) ^ usize::from(clause[1]) ^ usize::from(not_lit));
                    (other, clause.len())
                };

                if assign.value(other) > 0 {
                    cdb.watches.list_mut(not_lit)[write] = Watch::Large { blocking: other, cref };
                    write += 1;
                    continue;
                }

                let found = find_replacement(assign, cdb, cref, size);
                match found {
                    Some(r_idx) => {
                        let r = {
                            let clause = cdb.arena.get_mut(cref);
                            clause.searched = r_idx;
                            let r = clause[r_idx];
                            clause[0] = other;
                            clause[1] = r;
                            clause[r_idx] = not_lit;
                            r
                        };
                        cdb.watches.delay_append(r, Watch::Large { blocking: other, cref });
                        // dropped from watches[not_lit]: do not copy to output.
                    }
                    None if assign.value(other) < 0 => {
                        cdb.watches.list_mut(not_lit)[write] = Watch::Large { blocking: other, cref };
                        write += 1;
                        conflict = Some(Conflict::Clause(cref));
                        break;
                    }
                    None => {
                        assign.assign_forced(other, AssignReason::Clause(cref));
                        cdb.watches.list_mut(not_lit)[write] = Watch::Large { blocking: other, cref };
                        write += 1;
                    }
                }
            }
        }
    }

    // On conflict the scan stopped early; the unread tail is still valid
    // and must be preserved rather than dropped.
    while read < list_len {
        let w = cdb.watches.list(not_lit)[read];
        cdb.watches.list_mut(not_lit)[write] = w;
        read += 1;
        write += 1;
    }
    cdb.watches.list_mut(not_lit).truncate(write);
    conflict
}

/// Scan `lits[2..size]` for the first literal with `value >= 0`, starting
/// at `clause.searched` and wrapping to index 2 (spec.md §4.5). Ternary
/// clauses (`size == 3`) degenerate to a single check of `lits[2]`.
fn find_replacement(assign: &AssignStack, cdb: &ClauseDb, cref: crate::cdb::ClauseRef, size: usize) -> Option<usize> {
    if size == 3 {
        let clause = cdb.arena.get(cref);
        return (assign.value(clause[2]) >= 0).then_some(2);
    }
    let clause = cdb.arena.get(cref);
    let start = clause.searched.max(2).min(size - 1);
    for idx in (start..size).chain(2..start) {
        if assign.value(clause[idx]) >= 0 {
            return Some(idx);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdb::ClauseDb;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn binary_clause_forces_partner() {
        let mut assign = AssignStack::new(8);
        let mut cdb = ClauseDb::new(8, 300);
        cdb.register_clause(vec![l(1), l(2)], false, 0);
        assign.assign_decision(!l(1));
        let mut ticks = 0;
        propagate(&mut assign, &mut cdb, &mut ticks).unwrap();
        assert_eq!(assign.value(l(2)), 1);
    }

    #[test]
    fn binary_clause_detects_conflict() {
        let mut assign = AssignStack::new(8);
        let mut cdb = ClauseDb::new(8, 300);
        cdb.register_clause(vec![l(1), l(2)], false, 0);
        assign.assign_decision(!l(1));
        assign.assign_decision(!l(2));
        let mut ticks = 0;
        let result = propagate(&mut assign, &mut cdb, &mut ticks);
        assert!(result.is_err());
    }

    #[test]
    fn large_clause_forces_last_literal() {
        let mut assign = AssignStack::new(8);
        let mut cdb = ClauseDb::new(8, 300);
        cdb.register_clause(vec![l(1), l(2), l(3)], false, 0);
        assign.assign_decision(!l(1));
        let mut ticks = 0;
        propagate(&mut assign, &mut cdb, &mut ticks).unwrap();
        assign.assign_decision(!l(2));
        propagate(&mut assign, &mut cdb, &mut ticks).unwrap();
        assert_eq!(assign.value(l(3)), 1);
    }

    #[test]
    fn large_clause_replaces_watch_on_non_false_literal() {
        let mut assign = AssignStack::new(8);
        let mut cdb = ClauseDb::new(8, 300);
        cdb.register_clause(vec![l(1), l(2), l(3)], false, 0);
        assign.assign_decision(!l(1));
        let mut ticks = 0;
        propagate(&mut assign, &mut cdb, &mut ticks).unwrap();
        // watch should have moved off lit 1 onto lit 3 (the replacement),
        // so lit 2 remains unassigned rather than forced.
        assert_eq!(assign.value(l(2)), 0);
        assert_eq!(cdb.watches.list(!l(3)).len(), 1);
    }
}
