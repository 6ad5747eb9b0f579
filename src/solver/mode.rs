//! Stable/focused mode switcher (spec.md §4.10). Alternates on a
//! conflict-count schedule. Both decision structures (VSIDS heap and the
//! stamped queue) and both restart mechanisms (glue EMA and Luby counter)
//! are kept live regardless of which mode is active — see
//! `heuristics::Heuristics::on_assign`/`on_unassign`, which update the heap
//! and queue unconditionally — so a switch needs no save/restore step of
//! its own, just flipping which one gets consulted.

use crate::heuristics::{Heuristics, Mode};

pub struct ModeSwitcher {
    mode: Mode,
    last_switch_conflicts: usize,
}

impl ModeSwitcher {
    pub fn new(initial: Mode) -> Self {
        ModeSwitcher {
            mode: initial,
            last_switch_conflicts: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flip mode if `conflicts` have elapsed since the last switch,
    /// toggling the switch-parity phase oracle to match (spec.md §4.7,
    /// §4.10). Returns whether a switch happened.
    pub fn maybe_switch(&mut self, conflicts: usize, mode_switch_conflicts: usize, heuristics: &mut Heuristics) -> bool {
        if conflicts.saturating_sub(self.last_switch_conflicts) < mode_switch_conflicts {
            return false;
        }
        self.mode = match self.mode {
            Mode::Stable => Mode::Focused,
            Mode::Focused => Mode::Stable,
        };
        self.last_switch_conflicts = conflicts;
        heuristics.toggle_switch_parity();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn switches_after_the_configured_conflict_budget() {
        let config = Config::default();
        let mut heuristics = Heuristics::new(8, &config, 1);
        let mut switcher = ModeSwitcher::new(Mode::Stable);
        assert!(!switcher.maybe_switch(999, 1000, &mut heuristics));
        assert_eq!(switcher.mode(), Mode::Stable);
        assert!(switcher.maybe_switch(1000, 1000, &mut heuristics));
        assert_eq!(switcher.mode(), Mode::Focused);
    }

    #[test]
    fn alternates_every_switch() {
        let config = Config::default();
        let mut heuristics = Heuristics::new(8, &config, 1);
        let mut switcher = ModeSwitcher::new(Mode::Stable);
        switcher.maybe_switch(1000, 1000, &mut heuristics);
        switcher.maybe_switch(2000, 1000, &mut heuristics);
        assert_eq!(switcher.mode(), Mode::Stable);
    }
}
