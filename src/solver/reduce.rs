//! Learned-clause reducer (spec.md §4.9). Tier cutoffs, candidate
//! selection, and the rank-based sort are grounded on
//! `examples/original_source/reduce.c`'s two-tier protection scheme;
//! the interpolated fraction formula (`f = high - (high-low)/log10(reductions+9)`)
//! is lifted directly from spec.md §4.9 step 4, which already matches the
//! source's own comment deriving it.

use crate::{
    assign::AssignReason,
    cdb::{ClauseDb, ClauseFlag},
};

/// Per-reduction glue cutoffs separating protected tiers (spec.md §4.9
/// step 1). `tier1` protects the lowest-glue, most reused clauses;
/// `tier2` is a looser band protecting clauses that are still frequently
/// used even if not as tight.
pub struct TierCutoffs {
    pub tier1: u32,
    pub tier2: u32,
}

pub fn tier_cutoffs(reducelow: usize, reducehigh: usize) -> TierCutoffs {
    TierCutoffs {
        tier1: reducelow as u32,
        tier2: reducehigh as u32,
    }
}

/// Run one reduction pass. `reasons` lets every currently-assigned
/// variable's reason clause be protected for the duration of the pass
/// (spec.md §4.9 invariant: "reason clauses ... are never collected").
/// Returns how many clauses were marked garbage per tier.
pub fn reduce(db: &mut ClauseDb, reasons: &[AssignReason], reducelow: usize, reducehigh: usize, reductions: usize) -> [usize; 3] {
    let cutoffs = tier_cutoffs(reducelow, reducehigh);

    for reason in reasons {
        if let AssignReason::Clause(cref) = *reason {
            db.arena.get_mut(cref).set(ClauseFlag::KEEP, true);
        }
    }

    let mut candidates = Vec::new();
    let mut first_reducible = None;
    let mut cursor = db.first_reducible().or_else(|| db.arena.first());
    while let Some(cref) = cursor {
        let next = db.arena.next_clause(cref);
        let clause = db.arena.get_mut(cref);
        if clause.is(ClauseFlag::REDUNDANT) && !clause.is(ClauseFlag::GARBAGE) && first_reducible.is_none() {
            first_reducible = Some(cref);
        }
        let is_candidate = clause.is(ClauseFlag::REDUNDANT) && !clause.is(ClauseFlag::GARBAGE) && !clause.is(ClauseFlag::KEEP);
        if is_candidate {
            clause.decay_used();
            let protected = (clause.glue <= cutoffs.tier1 && clause.used > 0)
                || (clause.glue <= cutoffs.tier2 && clause.used as u32 >= crate::cdb::MAX_USED as u32 - 1);
            if !protected {
                candidates.push(cref);
            }
        }
        cursor = next;
    }

    // rank = (!size, !glue): larger size / larger glue sort first as least
    // useful (spec.md §4.9 step 3); emulated directly on the tuple rather
    // than the source's packed 64-bit key, since nothing here is hot
    // enough to need the bit trick.
    candidates.sort_by_key(|&cref| {
        let clause = db.arena.get(cref);
        (std::cmp::Reverse(clause.len()), std::cmp::Reverse(clause.glue))
    });

    let high = reducehigh as f64 / 10.0;
    let low = reducelow as f64 / 10.0;
    let fraction = high - (high - low) / (reductions as f64 + 9.0).log10();
    let num_to_collect = ((candidates.len() as f64) * fraction).round() as usize;

    let mut collected_per_tier = [0usize; 3];
    for &cref in candidates.iter().take(num_to_collect) {
        let clause = db.arena.get_mut(cref);
        let tier = if clause.glue <= cutoffs.tier1 {
            0
        } else if clause.glue <= cutoffs.tier2 {
            1
        } else {
            2
        };
        clause.set(ClauseFlag::GARBAGE, true);
        collected_per_tier[tier] += 1;
    }

    for reason in reasons {
        if let AssignReason::Clause(cref) = *reason {
            db.arena.get_mut(cref).set(ClauseFlag::KEEP, false);
        }
    }

    // Mirrors `collect_reducibles` (reduce.c): the cursor advances only to
    // the first surviving redundant clause seen this round, not past the
    // whole scan — otherwise every clause kept this round would never be
    // reconsidered by a later reduction.
    db.set_first_reducible(first_reducible);

    collected_per_tier
}

/// Next conflict count at which to trigger reduction again (spec.md §4.9
/// step 6): grows with the square root of how many reductions have
/// happened. `reducefactor` only enters the non-adaptive formula
/// (spec.md's literal `CONFLICTS + base_delta · sqrt(reductions)` has no
/// such term); `adaptive_reduce_delta` (reduce.c:164-236) only folds its
/// factor into the scale when the adaptive branch is taken, so we gate
/// it on `adaptive_scale.is_some()` to match.
pub fn next_reduce_conflicts(conflicts: usize, base_delta: usize, reductions: usize, reducefactor: f64, adaptive_scale: Option<f64>) -> usize {
    let growth = (reductions as f64 + 1.0).sqrt();
    let scale = match adaptive_scale {
        Some(s) => (reducefactor * s).clamp(0.5, 2.0),
        None => 1.0,
    };
    conflicts + ((base_delta as f64) * growth * scale).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lit;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn reason_clauses_survive_reduction() {
        let mut db = ClauseDb::new(8, 300);
        let cref = db.register_clause(vec![l(1), l(2), l(3)], true, 5).unwrap();
        db.arena.get_mut(cref).used = 0;
        let reasons = vec![AssignReason::Clause(cref)];
        let collected = reduce(&mut db, &reasons, 2, 6, 1);
        assert_eq!(collected, [0, 0, 0]);
        assert!(!db.arena.get(cref).is(ClauseFlag::GARBAGE));
    }

    #[test]
    fn low_glue_high_use_clause_is_protected() {
        let mut db = ClauseDb::new(8, 300);
        let cref = db.register_clause(vec![l(1), l(2), l(3)], true, 1).unwrap();
        db.arena.get_mut(cref).used = 5;
        let collected = reduce(&mut db, &[], 2, 6, 1);
        assert_eq!(collected, [0, 0, 0]);
    }

    #[test]
    fn next_reduce_conflicts_grows_with_reductions() {
        let a = next_reduce_conflicts(100, 300, 1, 1.0, None);
        let b = next_reduce_conflicts(100, 300, 10, 1.0, None);
        assert!(b > a);
    }
}
