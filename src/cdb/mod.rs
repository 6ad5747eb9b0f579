//! Clause database: arena, watches, and binary implication index bundled
//! behind one registration/removal API, plus the reduction bookkeeping
//! spec.md §4.9 threads through repeated calls (`first_reducible`, the
//! next-reduction conflict budget, and a reduction counter).

mod arena;
mod binindex;
mod lbd;
mod watch;

pub use arena::{Arena, Clause, ClauseFlag, ClauseRef, MAX_USED};
pub use binindex::BinaryImplicationIndex;
pub use lbd::LbdTemp;
pub use watch::{Watch, WatchLists};

use crate::{assign::AssignReason, types::Lit};

/// Arena + watches + binary index + LBD scratch, as one unit (spec.md §2:
/// "they share one arena ... and one set of fast-path invariants").
#[derive(Clone, Debug, Default)]
pub struct ClauseDb {
    pub arena: Arena,
    pub watches: WatchLists,
    pub bin_index: BinaryImplicationIndex,
    pub lbd_temp: LbdTemp,
    first_reducible: Option<ClauseRef>,
    pub reductions: usize,
    pub next_reduce_conflicts: usize,
}

impl ClauseDb {
    pub fn new(num_vars: usize, reduceint: usize) -> Self {
        let num_literals = 2 * num_vars;
        ClauseDb {
            arena: Arena::new(),
            watches: WatchLists::new(num_literals),
            bin_index: BinaryImplicationIndex::new(num_literals),
            lbd_temp: LbdTemp::new(num_vars),
            first_reducible: None,
            reductions: 0,
            next_reduce_conflicts: reduceint,
        }
    }

    pub fn grow_to(&mut self, num_vars: usize) {
        let num_literals = 2 * num_vars;
        self.watches.grow_to(num_literals);
        self.bin_index.grow_to(num_literals);
        self.lbd_temp.grow_to(num_vars);
    }

    pub fn first_reducible(&self) -> Option<ClauseRef> {
        self.first_reducible
    }

    pub fn set_first_reducible(&mut self, cref: Option<ClauseRef>) {
        self.first_reducible = cref;
    }

    /// Register a clause of size ≥ 2 (spec.md §4.1, §4.3, §4.4). Binary
    /// clauses are never stored in the arena: they live only in the
    /// watches and the binary implication index, mirroring the teacher's
    /// `add_clause` split between `registered_bins` and the arena-backed
    /// path. Returns the new `ClauseRef`, or `None` for a binary clause.
    pub fn register_clause(&mut self, lits: Vec<Lit>, redundant: bool, glue: u32) -> Option<ClauseRef> {
        debug_assert!(lits.len() >= 2, "clause size must be >= 2");
        if lits.len() == 2 {
            let (a, b) = (lits[0], lits[1]);
            self.watches.push_binary(a, b);
            self.watches.push_binary(b, a);
            self.bin_index.add(a, b);
            None
        } else {
            let (a, b) = (lits[0], lits[1]);
            let cref = self.arena.alloc(lits, redundant, glue);
            self.watches.push_large(a, cref, b);
            self.watches.push_large(b, cref, a);
            Some(cref)
        }
    }

    /// Remove a binary clause `(a ∨ b)` from watches and the binary index,
    /// outside of arena compaction (binary clauses have no arena entry).
    pub fn remove_binary(&mut self, a: Lit, b: Lit) {
        self.watches.remove_binary(a, b);
        self.watches.remove_binary(b, a);
        self.bin_index.remove(a, b);
    }

    /// Mark a clause garbage; it stays readable (spec.md §4.1 invariant)
    /// until the next [`ClauseDb::compact`].
    pub fn mark_garbage(&mut self, cref: ClauseRef) {
        self.arena.mark_garbage(cref);
    }

    /// Drop every large-clause watch pointing at a now-garbage clause, and
    /// compact the arena, rewriting `first_reducible` and every reason in
    /// `reasons` in the same sweep (spec.md §9: "a single compaction
    /// routine that is the only permitted rewriter").
    pub fn compact(&mut self, reasons: &mut [AssignReason]) {
        let num_literals = self.watches.len();
        for ord in 0..num_literals {
            let lit = Lit::from(ord as u32);
            self.watches.list_mut(lit).retain(|w| match w.cref() {
                Some(cref) => !self.arena.get(cref).is(ClauseFlag::GARBAGE),
                None => true,
            });
        }
        let mapping = self.arena.compact();
        for ord in 0..num_literals {
            let lit = Lit::from(ord as u32);
            for w in self.watches.list_mut(lit).iter_mut() {
                if let Watch::Large { cref, blocking } = *w {
                    if let Some(new_ref) = mapping[cref.index()] {
                        *w = Watch::Large { cref: new_ref, blocking };
                    }
                }
            }
        }
        if let Some(cref) = self.first_reducible {
            self.first_reducible = mapping[cref.index()];
        }
        for reason in reasons.iter_mut() {
            if let AssignReason::Clause(cref) = *reason {
                if let Some(new_ref) = mapping[cref.index()] {
                    *reason = AssignReason::Clause(new_ref);
                }
            }
        }
    }
}
