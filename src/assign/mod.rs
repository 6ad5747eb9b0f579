//! Trail, values, per-variable metadata, and unit propagation (spec.md
//! §3 "Assigned record", §4.2, §4.5).

mod propagate;
mod reason;
mod trail;
mod vardata;

pub use propagate::propagate;
pub use reason::AssignReason;
pub use trail::AssignStack;
pub use vardata::VarData;
