//! In-memory activity state and its persisted snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::breaks::BreakRecord;

/// Process-lifetime wellness state owned by the activity engine.
///
/// All mutation goes through engine operations; nothing else writes these
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityState {
    /// Steps today; monotonically increasing, reset externally.
    pub step_count: u64,
    /// Instant of the last motion sample above the activity threshold.
    pub last_activity: DateTime<Utc>,
    /// Accumulated sedentary hours.
    pub sedentary_hours: f64,
    /// Accumulated focus hours since the last completed break.
    pub focus_hours: f64,
    /// Self-reported stress, 0-10.
    pub stress_level: u8,
    /// Derived 0-100 metric, recomputed every tick.
    pub wellness_score: u8,
    /// Completed breaks, append-only, completion order.
    pub breaks: Vec<BreakRecord>,
    /// At most one in-flight break.
    pub current_break: Option<BreakRecord>,
}

impl ActivityState {
    /// Fresh state with the documented defaults.
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            step_count: 0,
            last_activity: now,
            sedentary_hours: 0.0,
            focus_hours: 0.0,
            stress_level: 0,
            wellness_score: 75,
            breaks: Vec::new(),
            current_break: None,
        }
    }
}

impl Default for ActivityState {
    fn default() -> Self {
        Self::new_at(Utc::now())
    }
}

/// Persisted form of [`ActivityState`].
///
/// `current_break` is deliberately excluded: an in-flight break does not
/// survive a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub step_count: u64,
    pub last_activity: DateTime<Utc>,
    pub sedentary_hours: f64,
    pub focus_hours: f64,
    pub stress_level: u8,
    pub wellness_score: u8,
    #[serde(default)]
    pub breaks: Vec<BreakRecord>,
}

impl From<&ActivityState> for ActivitySnapshot {
    fn from(state: &ActivityState) -> Self {
        Self {
            step_count: state.step_count,
            last_activity: state.last_activity,
            sedentary_hours: state.sedentary_hours,
            focus_hours: state.focus_hours,
            stress_level: state.stress_level,
            wellness_score: state.wellness_score,
            breaks: state.breaks.clone(),
        }
    }
}

impl ActivitySnapshot {
    /// Apply this snapshot onto `state`, leaving `current_break` untouched.
    pub fn apply_to(self, state: &mut ActivityState) {
        state.step_count = self.step_count;
        state.last_activity = self.last_activity;
        state.sedentary_hours = self.sedentary_hours;
        state.focus_hours = self.focus_hours;
        state.stress_level = self.stress_level;
        state.wellness_score = self.wellness_score;
        state.breaks = self.breaks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::breaks::{BreakKind, BreakRecord};

    #[test]
    fn defaults_match_first_run() {
        let state = ActivityState::default();
        assert_eq!(state.wellness_score, 75);
        assert_eq!(state.step_count, 0);
        assert_eq!(state.stress_level, 0);
        assert!(state.breaks.is_empty());
        assert!(state.current_break.is_none());
    }

    #[test]
    fn snapshot_excludes_current_break() {
        let now = Utc::now();
        let mut state = ActivityState::new_at(now);
        state.step_count = 1200;
        state.current_break = Some(BreakRecord::start(BreakKind::Walk, 10, now));

        let snapshot = ActivitySnapshot::from(&state);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("current_break"));

        let mut restored = ActivityState::new_at(now);
        serde_json::from_str::<ActivitySnapshot>(&json)
            .unwrap()
            .apply_to(&mut restored);
        assert_eq!(restored.step_count, 1200);
        assert!(restored.current_break.is_none());
    }
}
