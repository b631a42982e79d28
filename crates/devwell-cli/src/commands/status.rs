use chrono::Utc;
use devwell_core::Config;
use serde_json::json;

use crate::common;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = common::open_engine(&config)?;
    let state = engine.state();

    let current_break = state.current_break.as_ref().map(|b| {
        json!({
            "id": b.id,
            "kind": b.kind,
            "planned_duration_min": b.planned_duration_min,
            "start_time": b.start_time,
        })
    });

    let summary = json!({
        "wellness_score": state.wellness_score,
        "step_count": state.step_count,
        "sedentary_hours": state.sedentary_hours,
        "focus_hours": state.focus_hours,
        "stress_level": state.stress_level,
        "breaks_taken": state.breaks.len(),
        "idle_minutes": engine.idle_minutes_at(Utc::now()),
        "current_break": current_break,
        "signed_in": common::load_identity()?.map(|i| i.email),
    });
    common::print_json(&summary)
}
