//! Activity engine implementation.
//!
//! The engine is a wall-clock-based aggregation loop. It does not own
//! threads or timers - the caller drives it: sensor events go in through
//! `on_motion_sample`/`on_step_delta`, and `tick()` must be invoked once per
//! configured period (60 s by default) even when no sensor events occur.
//!
//! ## Event turns
//!
//! Every operation mutates state synchronously within its turn; only
//! persistence touches the outside world, and all of it is routed through a
//! sequenced [`WriteQueue`] so overlapping writers cannot clobber a newer
//! snapshot.

use chrono::{DateTime, Utc};

use super::breaks::{BreakKind, BreakRecord};
use super::score::compute_wellness_score;
use super::state::{ActivitySnapshot, ActivityState};
use crate::config::EngineConfig;
use crate::error::{CoreError, ValidationError};
use crate::events::Event;
use crate::sensors::{MotionSample, SensorEvent};
use crate::store::{BlobStore, WriteQueue};

/// Blob-store key for the persisted snapshot.
pub const SNAPSHOT_KEY: &str = "@devwell_activity";

/// Core activity engine.
///
/// Owns the [`ActivityState`] singleton; all mutation happens through the
/// methods below. Commands with a wall-clock dependency have an `*_at` twin
/// taking an explicit `now` so tests control time.
pub struct ActivityEngine {
    state: ActivityState,
    config: EngineConfig,
    writer: WriteQueue,
}

impl ActivityEngine {
    pub fn new(store: Box<dyn BlobStore>, config: EngineConfig) -> Self {
        Self {
            state: ActivityState::default(),
            config,
            writer: WriteQueue::new(store),
        }
    }

    pub fn with_defaults(store: Box<dyn BlobStore>) -> Self {
        Self::new(store, EngineConfig::default())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &ActivityState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Minutes since the last qualifying motion.
    pub fn idle_minutes_at(&self, now: DateTime<Utc>) -> i64 {
        (now - self.state.last_activity).num_minutes()
    }

    // ── Sensor callbacks ─────────────────────────────────────────────

    /// Record one accelerometer sample. Called at sensor frequency (>= 1 Hz),
    /// so it does nothing beyond a compare and a timestamp store.
    pub fn on_motion_sample(&mut self, sample: MotionSample) {
        self.on_motion_sample_at(sample, Utc::now());
    }

    pub fn on_motion_sample_at(&mut self, sample: MotionSample, now: DateTime<Utc>) {
        if sample.magnitude() > self.config.motion_threshold_g {
            self.state.last_activity = now;
        }
    }

    /// Add a pedometer delta to today's step count.
    pub fn on_step_delta(&mut self, steps: u32) -> Event {
        self.on_step_delta_at(steps, Utc::now())
    }

    pub fn on_step_delta_at(&mut self, steps: u32, now: DateTime<Utc>) -> Event {
        self.state.step_count += u64::from(steps);
        Event::StepsRecorded {
            steps,
            step_count: self.state.step_count,
            at: now,
        }
    }

    /// Feed a batch of drained sensor events.
    pub fn process_sensor_events(&mut self, events: &[SensorEvent]) {
        self.process_sensor_events_at(events, Utc::now());
    }

    pub fn process_sensor_events_at(&mut self, events: &[SensorEvent], now: DateTime<Utc>) {
        for event in events {
            match *event {
                SensorEvent::Motion(sample) => self.on_motion_sample_at(sample, now),
                SensorEvent::Steps(steps) => {
                    self.on_step_delta_at(steps, now);
                }
            }
        }
    }

    // ── Periodic tick ────────────────────────────────────────────────

    /// Apply one tick. Call once per `config.tick_period_secs`.
    ///
    /// Accrues sedentary time when idle past the threshold, always accrues
    /// focus time, recomputes the wellness score, and persists a snapshot.
    /// Never raises: persistence failures are logged and the engine carries
    /// on with in-memory state.
    pub fn tick(&mut self) -> Event {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Event {
        let idle_minutes = self.idle_minutes_at(now);
        if idle_minutes > self.config.idle_threshold_min {
            self.state.sedentary_hours += self.config.tick_increment_hours;
        }
        self.state.focus_hours += self.config.tick_increment_hours;
        self.recompute_score();
        self.persist_or_warn();

        Event::TickCompleted {
            idle_minutes,
            sedentary_hours: self.state.sedentary_hours,
            focus_hours: self.state.focus_hours,
            wellness_score: self.state.wellness_score,
            at: now,
        }
    }

    // ── Break lifecycle ──────────────────────────────────────────────

    /// Start a break. Rejected while another break is in flight; the caller
    /// must complete the active one first.
    pub fn start_break(
        &mut self,
        kind: BreakKind,
        duration_min: Option<u32>,
    ) -> Result<Event, CoreError> {
        self.start_break_at(kind, duration_min, Utc::now())
    }

    pub fn start_break_at(
        &mut self,
        kind: BreakKind,
        duration_min: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Event, CoreError> {
        if let Some(active) = &self.state.current_break {
            return Err(ValidationError::BreakInProgress(active.id.clone()).into());
        }
        let planned = duration_min.unwrap_or_else(|| kind.default_duration_min());
        let record = BreakRecord::start(kind, planned, now);
        let event = Event::BreakStarted {
            break_id: record.id.clone(),
            kind,
            planned_duration_min: planned,
            at: now,
        };
        self.state.current_break = Some(record);
        Ok(event)
    }

    /// Complete the in-flight break.
    ///
    /// Fails when no break is active or `break_id` does not match; state is
    /// untouched in both cases. `mood` is clamped into 1..=10. On success the
    /// record moves append-only into `breaks`, focus hours reset, and a
    /// snapshot is persisted.
    pub fn complete_break(&mut self, break_id: &str, mood: u8) -> Result<Event, CoreError> {
        self.complete_break_at(break_id, mood, Utc::now())
    }

    pub fn complete_break_at(
        &mut self,
        break_id: &str,
        mood: u8,
        now: DateTime<Utc>,
    ) -> Result<Event, CoreError> {
        let mut record = self
            .state
            .current_break
            .take()
            .ok_or(ValidationError::NoActiveBreak)?;
        if record.id != break_id {
            let expected = record.id.clone();
            self.state.current_break = Some(record);
            return Err(ValidationError::BreakIdMismatch {
                expected,
                got: break_id.to_string(),
            }
            .into());
        }

        let mood_after = mood.clamp(1, 10);
        record.end_time = Some(now);
        record.completed = true;
        record.mood_after = Some(mood_after);

        let event = Event::BreakCompleted {
            break_id: record.id.clone(),
            kind: record.kind,
            mood_after,
            breaks_taken: self.state.breaks.len() + 1,
            at: now,
        };

        self.state.breaks.push(record);
        self.state.focus_hours = 0.0;
        self.persist_or_warn();
        Ok(event)
    }

    /// Restore an in-flight break (shell-layer continuation across process
    /// restarts; the core never persists `current_break` itself).
    pub fn resume_break(&mut self, record: BreakRecord) -> Result<(), CoreError> {
        if let Some(active) = &self.state.current_break {
            return Err(ValidationError::BreakInProgress(active.id.clone()).into());
        }
        self.state.current_break = Some(record);
        Ok(())
    }

    // ── User commands ────────────────────────────────────────────────

    /// Set the self-reported stress level, clamped into 0..=10.
    pub fn update_stress_level(&mut self, level: u8) -> Event {
        self.update_stress_level_at(level, Utc::now())
    }

    pub fn update_stress_level_at(&mut self, level: u8, now: DateTime<Utc>) -> Event {
        self.state.stress_level = level.min(10);
        self.persist_or_warn();
        Event::StressUpdated {
            stress_level: self.state.stress_level,
            at: now,
        }
    }

    /// Zero the focus and sedentary accumulators and mark activity now.
    /// Leaves steps, breaks, and the score alone; the score catches up on
    /// the next tick.
    pub fn reset_activity(&mut self) -> Event {
        self.reset_activity_at(Utc::now())
    }

    pub fn reset_activity_at(&mut self, now: DateTime<Utc>) -> Event {
        self.state.focus_hours = 0.0;
        self.state.sedentary_hours = 0.0;
        self.state.last_activity = now;
        Event::ActivityReset { at: now }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Persist a snapshot (everything except `current_break`).
    pub fn save_snapshot(&mut self) -> Result<(), CoreError> {
        let snapshot = ActivitySnapshot::from(&self.state);
        let json = serde_json::to_string(&snapshot)?;
        self.writer.submit(SNAPSHOT_KEY, &json)?;
        Ok(())
    }

    /// Hydrate from the persisted snapshot, if one exists.
    ///
    /// Missing snapshots are the expected first-run condition; parse or
    /// store failures are logged and the engine keeps its defaults. Never
    /// raises.
    pub fn load_snapshot(&mut self) -> Option<Event> {
        self.load_snapshot_at(Utc::now())
    }

    pub fn load_snapshot_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let raw = match self.writer.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("could not read activity snapshot, using defaults: {e}");
                return None;
            }
        };
        match serde_json::from_str::<ActivitySnapshot>(&raw) {
            Ok(snapshot) => {
                snapshot.apply_to(&mut self.state);
                Some(Event::SnapshotLoaded {
                    step_count: self.state.step_count,
                    wellness_score: self.state.wellness_score,
                    at: now,
                })
            }
            Err(e) => {
                log::warn!("corrupt activity snapshot, using defaults: {e}");
                None
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn recompute_score(&mut self) {
        self.state.wellness_score = compute_wellness_score(
            self.state.step_count,
            self.state.sedentary_hours,
            self.state.stress_level,
            self.state.breaks.len(),
        );
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.save_snapshot() {
            log::warn!("failed to persist activity snapshot: {e}");
        }
    }
}
