//! Phase memory (spec.md §3 "Phase memory", §4.7): per-variable saved
//! phase (last assigned) and target phase (best-depth phase seen in
//! stable mode).

use crate::types::Var;

#[derive(Clone, Debug)]
pub struct PhaseMemory {
    saved: Vec<bool>,
    #[cfg(feature = "best_phases_tracking")]
    target: Vec<bool>,
    #[cfg(feature = "best_phases_tracking")]
    has_target: Vec<bool>,
    #[cfg(feature = "best_phases_tracking")]
    best_trail_len: usize,
}

impl PhaseMemory {
    pub fn new(num_vars: usize, initial_phase: bool) -> Self {
        PhaseMemory {
            saved: vec![initial_phase; num_vars],
            #[cfg(feature = "best_phases_tracking")]
            target: vec![initial_phase; num_vars],
            #[cfg(feature = "best_phases_tracking")]
            has_target: vec![false; num_vars],
            #[cfg(feature = "best_phases_tracking")]
            best_trail_len: 0,
        }
    }

    pub fn grow_to(&mut self, num_vars: usize, initial_phase: bool) {
        if self.saved.len() < num_vars {
            self.saved.resize(num_vars, initial_phase);
            #[cfg(feature = "best_phases_tracking")]
            {
                self.target.resize(num_vars, initial_phase);
                self.has_target.resize(num_vars, false);
            }
        }
    }

    #[inline]
    pub fn saved(&self, var: Var) -> bool {
        self.saved[var.index()]
    }

    #[inline]
    pub fn set_saved(&mut self, var: Var, phase: bool) {
        self.saved[var.index()] = phase;
    }

    #[inline]
    #[cfg(feature = "best_phases_tracking")]
    pub fn target(&self, var: Var) -> Option<bool> {
        self.has_target[var.index()].then(|| self.target[var.index()])
    }

    /// Record the current assignment as the new best-depth target, if the
    /// current trail is deeper than any previously seen (spec.md §4.7,
    /// `best_phases_tracking` feature).
    #[cfg(feature = "best_phases_tracking")]
    pub fn maybe_update_target<F>(&mut self, trail_len: usize, mut value_of: F)
    where
        F: FnMut(Var) -> Option<bool>,
    {
        if trail_len <= self.best_trail_len {
            return;
        }
        self.best_trail_len = trail_len;
        for v in 0..self.target.len() {
            if let Some(phase) = value_of(Var::from(v)) {
                self.target[v] = phase;
                self.has_target[v] = true;
            }
        }
    }
}
