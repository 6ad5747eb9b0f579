//! Glue (Literal Block Distance) computation (spec.md §4.6, glossary
//! "Glue / LBD"): the number of distinct decision levels among a clause's
//! literals. Grounded on the teacher's `cdb` LBD routine, which reuses a
//! per-level stamp buffer across calls instead of allocating a fresh set
//! each time — the buffer is owned by the clause database and threaded
//! through every computation in the search loop.

use crate::types::DecisionLevel;

/// Reusable scratch space for [`LbdTemp::compute`], indexed by decision
/// level. A monotone `key` stands in for "cleared": a slot is considered
/// stamped only if it equals the current `key`, so clearing the whole
/// buffer between calls is never necessary.
#[derive(Clone, Debug, Default)]
pub struct LbdTemp {
    stamp: Vec<u32>,
    key: u32,
}

impl LbdTemp {
    pub fn new(num_levels: usize) -> Self {
        LbdTemp {
            stamp: vec![0; num_levels + 1],
            key: 0,
        }
    }

    pub fn grow_to(&mut self, num_levels: usize) {
        if self.stamp.len() < num_levels + 1 {
            self.stamp.resize(num_levels + 1, 0);
        }
    }

    /// Count the distinct levels among `levels`. Grows the scratch buffer
    /// to accommodate `levels` first; callers that already know the
    /// current maximum level may call [`LbdTemp::grow_to`] once up front
    /// to skip a redundant length check per call.
    pub fn compute<I>(&mut self, levels: I) -> u32
    where
        I: IntoIterator<Item = DecisionLevel>,
    {
        self.key = self.key.wrapping_add(1);
        let key = self.key;
        let mut count = 0u32;
        for level in levels {
            let idx = level as usize;
            if idx >= self.stamp.len() {
                self.stamp.resize(idx + 1, 0);
            }
            if self.stamp[idx] != key {
                self.stamp[idx] = key;
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_levels_only() {
        let mut temp = LbdTemp::new(16);
        let glue = temp.compute([3, 1, 3, 1, 5, 0]);
        assert_eq!(glue, 4);
    }

    #[test]
    fn reused_across_calls_without_cross_contamination() {
        let mut temp = LbdTemp::new(16);
        assert_eq!(temp.compute([1, 2, 3]), 3);
        assert_eq!(temp.compute([1, 1, 1]), 1);
        assert_eq!(temp.compute([4, 5]), 2);
    }
}
