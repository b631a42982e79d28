//! Wellness score computation.

/// Compute the 0-100 wellness score.
///
/// `75 + min(steps/100, 30) - min(sedentary_hours*5, 20) - stress*2
/// + breaks_taken*3`, clamped to [0, 100] and rounded to nearest.
/// Pure function of its inputs.
pub fn compute_wellness_score(
    step_count: u64,
    sedentary_hours: f64,
    stress_level: u8,
    breaks_taken: usize,
) -> u8 {
    let steps_score = (step_count as f64 / 100.0).min(30.0);
    let sedentary_penalty = (sedentary_hours * 5.0).min(20.0);
    let stress_penalty = f64::from(stress_level) * 2.0;
    let break_bonus = breaks_taken as f64 * 3.0;

    let raw = 75.0 + steps_score - sedentary_penalty - stress_penalty + break_bonus;
    raw.clamp(0.0, 100.0).round() as u8
}
