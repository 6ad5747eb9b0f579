//! Contiguous clause storage (spec.md §4.1). Clauses live in a single
//! growable `Vec<Clause>`; a [`ClauseRef`] is an integer offset into it, not
//! a pointer — the disciplined index-over-pointer design spec.md §9 asks
//! for, grounded directly on the teacher's `ClauseId { ordinal: u32 }`
//! indexing into `ClauseDB::clause: Vec<Clause>`.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::types::Lit;

/// A clause saturates its `used` counter at this bound (spec.md §3).
pub const MAX_USED: u8 = 255;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ClauseFlag: u8 {
        const REDUNDANT = 0b0000_0001;
        const GARBAGE   = 0b0000_0010;
        const REASON    = 0b0000_0100;
        const KEEP      = 0b0000_1000;
    }
}

/// A reference to a clause in the arena: a plain integer offset, valid
/// until the next [`Arena::compact`] (spec.md §3).
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClauseRef {
    ordinal: u32,
}

impl fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "C{}", self.ordinal)
    }
}

impl fmt::Debug for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "C{}", self.ordinal)
    }
}

impl ClauseRef {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.ordinal as usize
    }

    #[inline]
    fn from_index(i: usize) -> Self {
        ClauseRef { ordinal: i as u32 }
    }
}

/// A clause record: header fields plus its literal array (spec.md §3).
#[derive(Clone, Debug)]
pub struct Clause {
    pub lits: Vec<Lit>,
    /// Literal Block Distance, a.k.a. glue: number of distinct decision
    /// levels among the clause's literals at the time it was learned.
    pub glue: u32,
    /// Saturating usage counter, decremented each reduction round and
    /// bumped each time the clause participates in conflict analysis.
    pub used: u8,
    pub flags: ClauseFlag,
    /// Cached hot position for the watched-literal replacement scan
    /// (spec.md §4.5): the scan resumes from here instead of from `lits[2]`.
    pub searched: usize,
}

impl Clause {
    fn new(lits: Vec<Lit>, redundant: bool, glue: u32) -> Self {
        debug_assert!(lits.len() >= 2, "clause size must be >= 2");
        let mut flags = ClauseFlag::empty();
        if redundant {
            flags.insert(ClauseFlag::REDUNDANT);
        }
        Clause {
            lits,
            glue,
            used: 0,
            flags,
            searched: 2,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    #[inline]
    pub fn is(&self, f: ClauseFlag) -> bool {
        self.flags.contains(f)
    }

    #[inline]
    pub fn set(&mut self, f: ClauseFlag, on: bool) {
        self.flags.set(f, on);
    }

    /// Bump the usage counter, saturating at [`MAX_USED`] (spec.md §3).
    #[inline]
    pub fn bump_used(&mut self) {
        if self.used < MAX_USED {
            self.used += 1;
        }
    }

    /// Decrement with saturation at zero (spec.md §4.9 step 2).
    #[inline]
    pub fn decay_used(&mut self) {
        self.used = self.used.saturating_sub(1);
    }
}

impl Index<usize> for Clause {
    type Output = Lit;
    #[inline]
    fn index(&self, i: usize) -> &Lit {
        &self.lits[i]
    }
}

impl IndexMut<usize> for Clause {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Lit {
        &mut self.lits[i]
    }
}

/// The clause arena: a bump-allocated `Vec<Clause>` with compaction
/// (spec.md §4.1).
#[derive(Clone, Debug, Default)]
pub struct Arena {
    clauses: Vec<Clause>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { clauses: Vec::new() }
    }

    /// Allocate a new clause record, returning its reference.
    pub fn alloc(&mut self, lits: Vec<Lit>, redundant: bool, glue: u32) -> ClauseRef {
        self.clauses.push(Clause::new(lits, redundant, glue));
        ClauseRef::from_index(self.clauses.len() - 1)
    }

    #[inline]
    pub fn get(&self, cref: ClauseRef) -> &Clause {
        #[cfg(feature = "boundary_check")]
        assert!(cref.index() < self.clauses.len(), "ClauseRef {cref} out of bounds (arena len {})", self.clauses.len());
        &self.clauses[cref.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, cref: ClauseRef) -> &mut Clause {
        #[cfg(feature = "boundary_check")]
        assert!(cref.index() < self.clauses.len(), "ClauseRef {cref} out of bounds (arena len {})", self.clauses.len());
        &mut self.clauses[cref.index()]
    }

    pub fn mark_garbage(&mut self, cref: ClauseRef) {
        self.get_mut(cref).set(ClauseFlag::GARBAGE, true);
    }

    /// The reference immediately after `cref`, or `None` past the end.
    /// Used by the reducer to walk the arena in allocation order starting
    /// from `first_reducible` (spec.md §4.9).
    pub fn next_clause(&self, cref: ClauseRef) -> Option<ClauseRef> {
        let next = cref.index() + 1;
        (next < self.clauses.len()).then(|| ClauseRef::from_index(next))
    }

    pub fn first(&self) -> Option<ClauseRef> {
        (!self.clauses.is_empty()).then(|| ClauseRef::from_index(0))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter_refs(&self) -> impl Iterator<Item = ClauseRef> + '_ {
        (0..self.clauses.len()).map(ClauseRef::from_index)
    }

    /// Copy live (non-garbage) clauses to a fresh backing vector, in order,
    /// and return the mapping from old to new reference. Callers must use
    /// the mapping to rewrite every external reference (watches, reasons,
    /// `first_reducible`) in one sweep (spec.md §4.1, §9: "a single
    /// compaction routine that is the only permitted rewriter").
    pub fn compact(&mut self) -> Vec<Option<ClauseRef>> {
        let mut mapping = vec![None; self.clauses.len()];
        let mut fresh = Vec::with_capacity(self.clauses.len());
        for (old_idx, clause) in self.clauses.drain(..).enumerate() {
            if clause.is(ClauseFlag::GARBAGE) {
                continue;
            }
            mapping[old_idx] = Some(ClauseRef::from_index(fresh.len()));
            fresh.push(clause);
        }
        self.clauses = fresh;
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn alloc_then_get_round_trips() {
        let mut arena = Arena::new();
        let r = arena.alloc(vec![l(1), l(2), l(3)], false, 0);
        assert_eq!(arena.get(r).len(), 3);
    }

    #[test]
    fn compact_drops_garbage_and_remaps() {
        let mut arena = Arena::new();
        let r0 = arena.alloc(vec![l(1), l(2)], false, 0);
        let r1 = arena.alloc(vec![l(3), l(4)], true, 1);
        let r2 = arena.alloc(vec![l(5), l(6)], true, 1);
        arena.mark_garbage(r1);
        let mapping = arena.compact();
        assert_eq!(mapping[r0.index()], Some(ClauseRef::from_index(0)));
        assert_eq!(mapping[r1.index()], None);
        assert_eq!(mapping[r2.index()], Some(ClauseRef::from_index(1)));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn next_clause_walks_in_order() {
        let mut arena = Arena::new();
        let r0 = arena.alloc(vec![l(1), l(2)], false, 0);
        let r1 = arena.alloc(vec![l(3), l(4)], false, 0);
        assert_eq!(arena.next_clause(r0), Some(r1));
        assert_eq!(arena.next_clause(r1), None);
    }
}
