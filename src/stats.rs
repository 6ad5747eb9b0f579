//! Write-only statistics counters (spec.md §6 "Statistics"). The core only
//! increments these; formatting/reporting is a host concern, matching the
//! teacher's own separation between solver state and its CLI-facing
//! progress printer.

/// Breakdown of which oracle produced a decision literal/phase (spec.md §4.7).
#[derive(Clone, Debug, Default)]
pub struct DecisionStats {
    pub random: usize,
    pub score: usize,
    pub queue: usize,
    pub warming: usize,
    pub initial: usize,
    pub target: usize,
    pub saved: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub conflicts: usize,
    pub decisions: DecisionStats,
    pub restarts: usize,
    pub reductions: usize,
    /// learned clauses deleted, tallied per reduction tier (0, 1, 2).
    pub clauses_reduced_per_tier: [usize; 3],
    pub reused_levels: usize,
    pub propagations: usize,
}

impl Stats {
    pub fn total_decisions(&self) -> usize {
        let d = &self.decisions;
        d.random + d.score + d.queue + d.warming + d.initial + d.target + d.saved
    }
}
