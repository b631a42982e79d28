//! End-to-end exercise of the activity engine: sensor replay, ticks, break
//! lifecycle, and snapshot persistence across engine instances.

use chrono::{Duration, Utc};
use devwell_core::{
    ActivityEngine, BreakKind, Event, FileBlobStore, MotionSample, ReplaySource, SensorSource,
};

#[test]
fn simulated_hour_with_break_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBlobStore::new(dir.path().to_path_buf());
    let mut engine = ActivityEngine::with_defaults(Box::new(store));
    assert!(engine.load_snapshot().is_none(), "fresh store has no snapshot");

    let t0 = Utc::now();
    let mut sensors = ReplaySource::new();

    // First half hour: the developer walks around a bit, then sits still.
    sensors.push_steps(800);
    sensors.push_motion(MotionSample::new(0.9, 0.8, 0.9)); // ~1.5 g, active
    engine.process_sensor_events_at(&sensors.poll(), t0);

    for minute in 1..=30 {
        engine.tick_at(t0 + Duration::minutes(minute));
    }

    // Active for the first 2 minutes after the motion sample, sedentary for
    // the remaining 28 ticks.
    let sedentary = engine.state().sedentary_hours;
    assert!((sedentary - 28.0 / 60.0).abs() < 1e-9, "got {sedentary}");
    assert!((engine.state().focus_hours - 30.0 / 60.0).abs() < 1e-9);

    // Break time.
    let started = engine
        .start_break_at(BreakKind::Walk, None, t0 + Duration::minutes(31))
        .unwrap();
    let break_id = match started {
        Event::BreakStarted { break_id, .. } => break_id,
        other => panic!("expected BreakStarted, got {other:?}"),
    };
    engine
        .complete_break_at(&break_id, 9, t0 + Duration::minutes(41))
        .unwrap();

    assert_eq!(engine.state().breaks.len(), 1);
    assert_eq!(engine.state().focus_hours, 0.0);
    engine.tick_at(t0 + Duration::minutes(42));
    let score_before_restart = engine.state().wellness_score;

    // Simulate a process restart over the same data directory.
    let store = FileBlobStore::new(dir.path().to_path_buf());
    let mut restarted = ActivityEngine::with_defaults(Box::new(store));
    assert!(restarted.load_snapshot().is_some());

    assert_eq!(restarted.state().step_count, 800);
    assert_eq!(restarted.state().breaks.len(), 1);
    assert_eq!(restarted.state().wellness_score, score_before_restart);
    assert!(restarted.state().current_break.is_none());
}

#[test]
fn in_flight_break_does_not_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine =
        ActivityEngine::with_defaults(Box::new(FileBlobStore::new(dir.path().to_path_buf())));

    engine.start_break(BreakKind::Coffee, Some(15)).unwrap();
    engine.save_snapshot().unwrap();

    let mut restarted =
        ActivityEngine::with_defaults(Box::new(FileBlobStore::new(dir.path().to_path_buf())));
    restarted.load_snapshot();
    assert!(restarted.state().current_break.is_none());
    assert!(restarted.state().breaks.is_empty());
}

#[test]
fn persistence_failures_do_not_stop_the_tick() {
    // A store rooted at an unwritable path: ticks still mutate memory.
    let store = FileBlobStore::new("/proc/devwell-nonexistent".into());
    let mut engine = ActivityEngine::with_defaults(Box::new(store));

    let t0 = Utc::now();
    engine.tick_at(t0 + Duration::minutes(5));
    assert!((engine.state().focus_hours - 1.0 / 60.0).abs() < 1e-12);
}
