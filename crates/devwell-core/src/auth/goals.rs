//! Wellness goals collected during onboarding.

use serde::{Deserialize, Serialize};

/// Preferences gathered by the onboarding flow and stored on the user's
/// remote profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessGoals {
    pub developer_type: String,
    pub experience: String,
    pub work_style: String,
    pub daily_step_goal: u32,
    pub pain_points: Vec<String>,
    pub break_preference: String,
    pub work_start_time: String,
    pub work_end_time: String,
    pub work_days: Vec<String>,
}

impl Default for WellnessGoals {
    fn default() -> Self {
        Self {
            developer_type: "full_stack".to_string(),
            experience: "3_5_years".to_string(),
            work_style: "hybrid".to_string(),
            daily_step_goal: 8000,
            pain_points: vec!["sedentary".to_string(), "eye_strain".to_string()],
            break_preference: "medium".to_string(),
            work_start_time: "9 AM".to_string(),
            work_end_time: "5 PM".to_string(),
            work_days: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_as_json() {
        let goals = WellnessGoals::default();
        let json = serde_json::to_string(&goals).unwrap();
        let parsed: WellnessGoals = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, goals);
        assert_eq!(parsed.daily_step_goal, 8000);
    }
}
