//! Activity tracking: wellness state, breaks, and the tick-driven engine.

pub mod breaks;
pub mod engine;
pub mod score;
pub mod state;

pub use breaks::{BreakKind, BreakRecord};
pub use engine::{ActivityEngine, SNAPSHOT_KEY};
pub use score::compute_wellness_score;
pub use state::{ActivitySnapshot, ActivityState};
