use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::breaks::BreakKind;

/// Every state change in the system produces an Event.
/// The shell polls for events; nothing in the core pushes to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StepsRecorded {
        steps: u32,
        step_count: u64,
        at: DateTime<Utc>,
    },
    /// A periodic tick was applied to the activity state.
    TickCompleted {
        idle_minutes: i64,
        sedentary_hours: f64,
        focus_hours: f64,
        wellness_score: u8,
        at: DateTime<Utc>,
    },
    BreakStarted {
        break_id: String,
        kind: BreakKind,
        planned_duration_min: u32,
        at: DateTime<Utc>,
    },
    BreakCompleted {
        break_id: String,
        kind: BreakKind,
        mood_after: u8,
        breaks_taken: usize,
        at: DateTime<Utc>,
    },
    StressUpdated {
        stress_level: u8,
        at: DateTime<Utc>,
    },
    ActivityReset {
        at: DateTime<Utc>,
    },
    /// A persisted snapshot was hydrated at startup.
    SnapshotLoaded {
        step_count: u64,
        wellness_score: u8,
        at: DateTime<Utc>,
    },
}
