//! Building blocks shared across the solver: literals, variables, flags,
//! exponential moving averages, and the Luby sequence.

mod cnf;
mod ema;
mod flags;
mod lit;
mod luby;
mod var;

pub use self::{cnf::*, ema::*, flags::*, lit::*, luby::*, var::*};

/// A decision level. Level `0` holds root-level (unconditional) assignments.
pub type DecisionLevel = u32;
