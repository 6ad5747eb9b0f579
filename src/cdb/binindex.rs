//! Binary implication index (spec.md §4.4): for each literal `ℓ`, a flat
//! list of literals `m` such that a binary clause `(ℓ ∨ m)` exists — i.e.
//! falsifying `ℓ` forces `m` true. This denormalizes the binary watches
//! (which fire on exactly the same event, per spec.md §4.5's
//! `watches[not_lit]` scan) for O(1)-per-entry iteration without a
//! per-watch type check in the hottest of hot loops; it is a fast path
//! only — correctness never depends on it (spec.md §4.4, invariant 6 in
//! §8: `bin_index[ℓ]` and the binary watches of `ℓ` are pointwise equal).
//!
//! Construction follows `examples/original_source/binindex.c`: a counting
//! pass sizes each literal's bucket, then a fill pass populates it. The
//! source shadows a cursor variable with the list's `entries` pointer
//! during the fill pass and never reads it back (spec.md §9); only the
//! running counts matter, so we skip reproducing the dead cursor.

use crate::types::Lit;

#[derive(Clone, Debug, Default)]
pub struct BinaryImplicationIndex {
    forced_by: Vec<Vec<Lit>>,
}

impl BinaryImplicationIndex {
    pub fn new(num_literals: usize) -> Self {
        BinaryImplicationIndex {
            forced_by: vec![Vec::new(); num_literals],
        }
    }

    pub fn grow_to(&mut self, num_literals: usize) {
        if self.forced_by.len() < num_literals {
            self.forced_by.resize(num_literals, Vec::new());
        }
    }

    /// Rebuild from scratch given every binary clause `(a ∨ b)` currently
    /// registered in watches. Two passes, as in the source: count then fill.
    pub fn rebuild<I>(&mut self, num_literals: usize, binary_clauses: I)
    where
        I: Iterator<Item = (Lit, Lit)> + Clone,
    {
        let mut counts = vec![0usize; num_literals];
        for (a, b) in binary_clauses.clone() {
            counts[usize::from(a)] += 1;
            counts[usize::from(b)] += 1;
        }
        self.forced_by = counts.into_iter().map(Vec::with_capacity).collect();
        for (a, b) in binary_clauses {
            self.forced_by[a].push(b);
            self.forced_by[b].push(a);
        }
    }

    /// Record that the binary clause `(a ∨ b)` exists: falsifying `a`
    /// forces `b`, and falsifying `b` forces `a`.
    pub fn add(&mut self, a: Lit, b: Lit) {
        self.forced_by[a].push(b);
        self.forced_by[b].push(a);
    }

    /// Remove one occurrence of the binary clause `(a ∨ b)`, if present.
    pub fn remove(&mut self, a: Lit, b: Lit) {
        if let Some(pos) = self.forced_by[a].iter().position(|&m| m == b) {
            self.forced_by[a].swap_remove(pos);
        }
        if let Some(pos) = self.forced_by[b].iter().position(|&m| m == a) {
            self.forced_by[b].swap_remove(pos);
        }
    }

    pub fn contains(&self, a: Lit, b: Lit) -> bool {
        self.forced_by[a].contains(&b)
    }

    /// Literals forced true when `falsified` is assigned false. Called
    /// with the same `not_lit` key used to index watches (spec.md §4.5).
    #[inline]
    pub fn consequents(&self, falsified: Lit) -> &[Lit] {
        &self.forced_by[falsified]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn add_then_consequents_forces_partner() {
        // clause (1 ∨ 2): falsifying 1 forces 2, falsifying 2 forces 1.
        let mut idx = BinaryImplicationIndex::new(8);
        idx.add(l(1), l(2));
        assert!(idx.consequents(l(1)).contains(&l(2)));
        assert!(idx.consequents(l(2)).contains(&l(1)));
    }

    #[test]
    fn remove_drops_exactly_one_occurrence() {
        let mut idx = BinaryImplicationIndex::new(8);
        idx.add(l(1), l(2));
        assert!(idx.contains(l(1), l(2)));
        idx.remove(l(1), l(2));
        assert!(!idx.contains(l(1), l(2)));
    }

    #[test]
    fn rebuild_matches_incremental_adds() {
        let mut incremental = BinaryImplicationIndex::new(8);
        incremental.add(l(1), l(2));
        incremental.add(l(-1), l(3));
        let mut rebuilt = BinaryImplicationIndex::new(8);
        rebuilt.rebuild(8, vec![(l(1), l(2)), (l(-1), l(3))].into_iter());
        for lit_i in 0..8 {
            let lit = Lit::from(lit_i as usize);
            let mut a = incremental.consequents(lit).to_vec();
            let mut b = rebuilt.consequents(lit).to_vec();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }
}
