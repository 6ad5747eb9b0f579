//! Decision heuristics: the VSIDS heap (stable mode), the stamped queue
//! (focused mode), phase memory, and random decision bursts (spec.md §3,
//! §4.7). Exactly one of heap/queue is consulted per decision, selected by
//! the current [`Mode`].

mod phase;
mod queue;
mod random;
mod vsids;

pub use phase::PhaseMemory;
pub use queue::Queue;
pub use random::RandomBursts;
pub use vsids::VsidsHeap;

#[cfg(feature = "rephase")]
use crate::config::TargetPhaseMode;
use crate::{
    assign::AssignStack,
    config::Config,
    stats::DecisionStats,
    types::{Lit, Var},
};

/// Search mode, mirrored here (rather than imported from `solver::mode`)
/// so this module never depends on the solver layer above it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Stable,
    Focused,
}

pub struct Heuristics {
    pub vsids: VsidsHeap,
    pub queue: Queue,
    pub phase: PhaseMemory,
    pub random: RandomBursts,
    /// Flips on every other mode switch; used by the switch-parity phase
    /// oracle (spec.md §4.7).
    switch_parity: bool,
    initial_phase: bool,
}

impl Heuristics {
    pub fn new(num_vars: usize, config: &Config, seed: u64) -> Self {
        Heuristics {
            vsids: VsidsHeap::new(num_vars, 0.95),
            queue: Queue::new(num_vars),
            phase: PhaseMemory::new(num_vars, config.forcephase),
            random: RandomBursts::new(seed, config.randeclength),
            switch_parity: false,
            initial_phase: config.forcephase,
        }
    }

    pub fn grow_to(&mut self, num_vars: usize, config: &Config) {
        self.vsids.grow_to(num_vars);
        self.queue.grow_to(num_vars);
        self.phase.grow_to(num_vars, config.forcephase);
    }

    pub fn toggle_switch_parity(&mut self) {
        self.switch_parity = !self.switch_parity;
    }

    pub fn on_unassign(&mut self, var: Var) {
        self.vsids.insert(var);
        self.queue.on_unassign(var);
    }

    pub fn on_assign(&mut self, var: Var) {
        self.vsids.remove(var);
    }

    /// Pick the next decision variable for the current mode, without
    /// choosing a phase yet (spec.md §4.7).
    pub fn select_variable(&mut self, mode: Mode, assign: &AssignStack) -> Option<Var> {
        match mode {
            Mode::Stable => self.vsids.next_unassigned(|v| assign.is_assigned(v)),
            Mode::Focused => self.queue.next_decision(|v| assign.is_assigned(v)),
        }
    }

    /// Choose a phase for `var`, trying forcing oracles in the order
    /// spec.md §4.7 lists, and record which oracle won in `stats`.
    pub fn select_phase(&mut self, mode: Mode, var: Var, config: &Config, stats: &mut DecisionStats) -> bool {
        if mode == Mode::Focused && self.switch_parity {
            stats.initial += 1;
            return self.initial_phase;
        }
        #[cfg(feature = "rephase")]
        {
            let target_enabled = match config.target {
                TargetPhaseMode::Off => false,
                TargetPhaseMode::StableOnly => mode == Mode::Stable,
                TargetPhaseMode::Always => true,
            };
            if target_enabled {
                if let Some(phase) = self.phase.target(var) {
                    stats.target += 1;
                    return phase;
                }
            }
        }
        if config.phasesaving {
            stats.saved += 1;
            return self.phase.saved(var);
        }
        stats.initial += 1;
        self.initial_phase
    }

    /// Decide a full literal: select a variable (or a random one, if a
    /// burst is active), then its phase, bumping the matching decision
    /// counter (spec.md §6 "Statistics").
    pub fn decide(&mut self, mode: Mode, assign: &AssignStack, config: &Config, stats: &mut DecisionStats) -> Option<Lit> {
        if config.randec && self.random.take() {
            let num_vars = assign.num_vars();
            for _ in 0..num_vars {
                let candidate = Var::from(self.random.pick_index(num_vars));
                if !assign.is_assigned(candidate) {
                    stats.random += 1;
                    let phase = self.random.pick_phase();
                    return Some(Lit::new(candidate, !phase));
                }
            }
        }
        let var = self.select_variable(mode, assign)?;
        match mode {
            Mode::Stable => stats.score += 1,
            Mode::Focused => stats.queue += 1,
        }
        let phase = self.select_phase(mode, var, config, stats);
        Some(Lit::new(var, !phase))
    }
}
