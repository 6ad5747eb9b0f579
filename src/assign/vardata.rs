//! Per-variable assignment metadata (spec.md §3 "Assigned record").

use super::reason::AssignReason;
use crate::types::{DecisionLevel, VarFlag};

#[derive(Clone, Copy, Debug)]
pub struct VarData {
    pub level: DecisionLevel,
    pub trail_pos: usize,
    pub reason: AssignReason,
    pub flags: VarFlag,
}

impl Default for VarData {
    fn default() -> Self {
        VarData {
            level: 0,
            trail_pos: 0,
            reason: AssignReason::Decision,
            flags: VarFlag::empty(),
        }
    }
}
