//! Trail, per-level frames, and the value vector (spec.md §4.2), grounded
//! on the teacher's `AssignStack`: one struct owns the trail, the values,
//! and the per-variable metadata, matching spec.md §9's single-owning-
//! aggregate design rather than splitting them across free-floating
//! globals.

use super::{reason::AssignReason, vardata::VarData};
use crate::types::{DecisionLevel, Lit, Var, VarFlag};

/// A decision level's segment of the trail: where it begins and which
/// literal (if any — level 0 has none) was decided to open it.
#[derive(Clone, Copy, Debug)]
struct Frame {
    decision: Option<Lit>,
    trail_begin: usize,
}

#[derive(Clone, Debug)]
pub struct AssignStack {
    /// Tri-state value per literal ordinal: `-1` false, `0` unassigned,
    /// `+1` true. Invariant: `values[lit] == -values[neg(lit)]`.
    values: Vec<i8>,
    var_data: Vec<VarData>,
    trail: Vec<Lit>,
    frames: Vec<Frame>,
    /// Index of the next trail position propagation has not yet consumed.
    pub propagated: usize,
}

impl AssignStack {
    pub fn new(num_vars: usize) -> Self {
        AssignStack {
            values: vec![0; 2 * num_vars],
            var_data: vec![VarData::default(); num_vars],
            trail: Vec::with_capacity(num_vars),
            frames: vec![Frame {
                decision: None,
                trail_begin: 0,
            }],
            propagated: 0,
        }
    }

    pub fn grow_to(&mut self, num_vars: usize) {
        if self.var_data.len() < num_vars {
            self.values.resize(2 * num_vars, 0);
            self.var_data.resize(num_vars, VarData::default());
        }
    }

    pub fn num_vars(&self) -> usize {
        self.var_data.len()
    }

    #[inline]
    pub fn value(&self, lit: Lit) -> i8 {
        self.values[lit]
    }

    #[inline]
    pub fn is_assigned(&self, var: Var) -> bool {
        self.values[Lit::new(var, false)] != 0
    }

    #[inline]
    fn set_value_pair(&mut self, lit: Lit, v: i8) {
        self.values[lit] = v;
        self.values[!lit] = -v;
    }

    #[inline]
    pub fn decision_level(&self) -> DecisionLevel {
        (self.frames.len() - 1) as DecisionLevel
    }

    #[inline]
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    #[inline]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    #[inline]
    pub fn level_of(&self, var: Var) -> DecisionLevel {
        self.var_data[var.index()].level
    }

    #[inline]
    pub fn reason_of(&self, var: Var) -> AssignReason {
        self.var_data[var.index()].reason
    }

    #[inline]
    pub fn trail_pos_of(&self, var: Var) -> usize {
        self.var_data[var.index()].trail_pos
    }

    #[inline]
    pub fn flags_of(&self, var: Var) -> VarFlag {
        self.var_data[var.index()].flags
    }

    #[inline]
    pub fn set_flags_of(&mut self, var: Var, flags: VarFlag) {
        self.var_data[var.index()].flags = flags;
    }

    /// Overwrite a variable's recorded reason, e.g. after [`crate::cdb::ClauseDb::compact`]
    /// remaps a `Clause` reason's reference.
    #[inline]
    pub fn set_reason(&mut self, var: Var, reason: AssignReason) {
        self.var_data[var.index()].reason = reason;
    }

    /// Decision-level frame begun at the start of level 0 (root
    /// propagation, no decision literal attached).
    pub fn decision_at(&self, level: DecisionLevel) -> Option<Lit> {
        self.frames.get(level as usize).and_then(|f| f.decision)
    }

    pub fn trail_begin(&self, level: DecisionLevel) -> usize {
        self.frames[level as usize].trail_begin
    }

    /// Push a decision literal, opening a new frame (spec.md §4.2).
    pub fn assign_decision(&mut self, lit: Lit) {
        debug_assert_eq!(self.value(lit), 0);
        self.frames.push(Frame {
            decision: Some(lit),
            trail_begin: self.trail.len(),
        });
        let level = self.decision_level();
        self.set_value_pair(lit, 1);
        self.var_data[lit.var().index()] = VarData {
            level,
            trail_pos: self.trail.len(),
            reason: AssignReason::Decision,
            flags: VarFlag::empty(),
        };
        self.trail.push(lit);
    }

    /// Push a forced literal into the current level's segment (spec.md §4.2).
    pub fn assign_forced(&mut self, lit: Lit, reason: AssignReason) {
        debug_assert_eq!(self.value(lit), 0);
        let level = self.decision_level();
        self.set_value_pair(lit, 1);
        self.var_data[lit.var().index()] = VarData {
            level,
            trail_pos: self.trail.len(),
            reason,
            flags: VarFlag::empty(),
        };
        self.trail.push(lit);
    }

    /// Unassign every literal above `level`, popping frames down to it.
    /// `on_unassign` is invoked once per popped literal, in trail order
    /// (top to bottom), so callers can save phases and requeue the
    /// heuristic's decision structures without this module depending on
    /// them (spec.md §4.2).
    pub fn backtrack_to<F>(&mut self, level: DecisionLevel, mut on_unassign: F)
    where
        F: FnMut(Lit),
    {
        while self.decision_level() > level {
            let frame = self.frames.pop().expect("frame stack underflow");
            while self.trail.len() > frame.trail_begin {
                let lit = self.trail.pop().expect("trail underflow");
                self.set_value_pair(lit, 0);
                self.var_data[lit.var().index()].flags = VarFlag::empty();
                on_unassign(lit);
            }
        }
        self.propagated = self.propagated.min(self.trail.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn decision_then_forced_share_level() {
        let mut a = AssignStack::new(8);
        a.assign_decision(l(1));
        a.assign_forced(l(2), AssignReason::Binary(!l(1)));
        assert_eq!(a.decision_level(), 1);
        assert_eq!(a.level_of(l(2).var()), 1);
        assert_eq!(a.trail_len(), 2);
    }

    #[test]
    fn backtrack_unassigns_and_pops_frames() {
        let mut a = AssignStack::new(8);
        a.assign_decision(l(1));
        a.assign_decision(l(2));
        a.assign_forced(l(3), AssignReason::Binary(!l(2)));
        let mut unassigned = Vec::new();
        a.backtrack_to(1, |lit| unassigned.push(lit));
        assert_eq!(a.decision_level(), 1);
        assert_eq!(a.trail_len(), 1);
        assert_eq!(unassigned, vec![l(3), l(2)]);
        assert_eq!(a.value(l(2)), 0);
        assert_eq!(a.value(l(1)), 1);
    }

    #[test]
    fn value_invariant_holds() {
        let mut a = AssignStack::new(8);
        a.assign_decision(l(1));
        assert_eq!(a.value(l(1)), -a.value(!l(1)));
    }
}
