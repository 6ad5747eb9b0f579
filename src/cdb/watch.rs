//! Two-literal watch lists (spec.md §4.3).
//!
//! A binary clause's watch is a single blocking literal (the partner);
//! a large clause's watch additionally carries a [`ClauseRef`]. Kept as an
//! explicit tagged enum (spec.md §9: "tagged unions over type punning")
//! rather than a packed word, since nothing here profiles hot enough to
//! need it.

use super::arena::ClauseRef;
use crate::types::Lit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    /// `blocking` is the other literal of a binary clause `(¬watched ∨ blocking)`.
    Binary { blocking: Lit },
    /// `blocking` is a literal cached next to the watch; if it is true the
    /// clause is known satisfied without reading the clause body
    /// (spec.md glossary: "Blocking literal").
    Large { blocking: Lit, cref: ClauseRef },
}

impl Watch {
    #[inline]
    pub fn blocking(&self) -> Lit {
        match *self {
            Watch::Binary { blocking } | Watch::Large { blocking, .. } => blocking,
        }
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Watch::Binary { .. })
    }

    #[inline]
    pub fn cref(&self) -> Option<ClauseRef> {
        match *self {
            Watch::Large { cref, .. } => Some(cref),
            Watch::Binary { .. } => None,
        }
    }
}

/// Per-literal watch lists, plus the delayed-watch scratch buffer
/// (spec.md §4.3): when a large-clause watch moves from `ℓ` to a new
/// literal `m` mid-scan, the move is queued here rather than mutating
/// `watches[m]` directly, since `m`'s list might be the one currently being
/// walked.
#[derive(Clone, Debug, Default)]
pub struct WatchLists {
    lists: Vec<Vec<Watch>>,
    delayed: Vec<(Lit, Watch)>,
}

impl WatchLists {
    pub fn new(num_literals: usize) -> Self {
        WatchLists {
            lists: vec![Vec::new(); num_literals],
            delayed: Vec::new(),
        }
    }

    pub fn grow_to(&mut self, num_literals: usize) {
        if self.lists.len() < num_literals {
            self.lists.resize(num_literals, Vec::new());
        }
    }

    /// Number of literal slots (`2 * num_vars`) the lists are sized for.
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[inline]
    pub fn push_binary(&mut self, lit: Lit, other: Lit) {
        self.lists[lit].push(Watch::Binary { blocking: other });
    }

    #[inline]
    pub fn push_large(&mut self, lit: Lit, cref: ClauseRef, blocking: Lit) {
        self.lists[lit].push(Watch::Large { blocking, cref });
    }

    #[inline]
    pub fn list(&self, lit: Lit) -> &[Watch] {
        &self.lists[lit]
    }

    #[inline]
    pub fn list_mut(&mut self, lit: Lit) -> &mut Vec<Watch> {
        &mut self.lists[lit]
    }

    /// Queue a watch move to `lit`'s list, to be applied after the current
    /// scan completes via [`WatchLists::drain_delayed`].
    #[inline]
    pub fn delay_append(&mut self, lit: Lit, watch: Watch) {
        self.delayed.push((lit, watch));
    }

    /// Apply every queued watch move. Must be called once the scan that
    /// produced them has finished walking its own list.
    pub fn drain_delayed(&mut self) {
        for (lit, watch) in self.delayed.drain(..) {
            self.lists[lit].push(watch);
        }
    }

    /// Remove every watch referencing `cref` from both literals it used to
    /// watch. Used when a clause is deleted outside of compaction (e.g. a
    /// clause shrunk by vivification) to keep invariant 1 (spec.md §8).
    pub fn remove_large(&mut self, a: Lit, b: Lit, cref: ClauseRef) {
        for lit in [a, b] {
            self.lists[lit].retain(|w| w.cref() != Some(cref));
        }
    }

    pub fn remove_binary(&mut self, a: Lit, b: Lit) {
        self.lists[a].retain(|w| !(w.is_binary() && w.blocking() == b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdb::arena::{Arena, ClauseFlag};

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn binary_watch_round_trips() {
        let mut wl = WatchLists::new(8);
        wl.push_binary(l(1), l(2));
        assert_eq!(wl.list(l(1)).len(), 1);
        assert!(wl.list(l(1))[0].is_binary());
        assert_eq!(wl.list(l(1))[0].blocking(), l(2));
    }

    #[test]
    fn delayed_watches_apply_after_drain() {
        let mut arena = Arena::new();
        let _ = ClauseFlag::empty();
        let cref = arena.alloc(vec![l(1), l(2), l(3)], false, 0);
        let mut wl = WatchLists::new(8);
        wl.delay_append(l(3), Watch::Large { blocking: l(1), cref });
        assert_eq!(wl.list(l(3)).len(), 0);
        wl.drain_delayed();
        assert_eq!(wl.list(l(3)).len(), 1);
    }
}
