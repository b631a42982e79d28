//! Break kinds and records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The built-in break catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    QuickStretch,
    Walk,
    Hydrate,
    EyeRest,
    Meditation,
    Coffee,
    Social,
}

impl BreakKind {
    pub const ALL: [BreakKind; 7] = [
        BreakKind::QuickStretch,
        BreakKind::Walk,
        BreakKind::Hydrate,
        BreakKind::EyeRest,
        BreakKind::Meditation,
        BreakKind::Coffee,
        BreakKind::Social,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BreakKind::QuickStretch => "Quick Stretch",
            BreakKind::Walk => "Take a Walk",
            BreakKind::Hydrate => "Hydration Break",
            BreakKind::EyeRest => "Eye Rest",
            BreakKind::Meditation => "Quick Meditation",
            BreakKind::Coffee => "Coffee Break",
            BreakKind::Social => "Social Break",
        }
    }

    /// Suggested duration when the caller does not pick one.
    pub fn default_duration_min(&self) -> u32 {
        match self {
            BreakKind::QuickStretch => 5,
            BreakKind::Walk => 10,
            BreakKind::Hydrate => 2,
            BreakKind::EyeRest => 3,
            BreakKind::Meditation => 5,
            BreakKind::Coffee => 15,
            BreakKind::Social => 15,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BreakKind::QuickStretch => "A quick stretching session to release tension",
            BreakKind::Walk => "Get some fresh air with a short walk",
            BreakKind::Hydrate => "Grab a glass of water and hydrate",
            BreakKind::EyeRest => "Rest your eyes with the 20-20-20 rule",
            BreakKind::Meditation => "Clear your mind with a short meditation",
            BreakKind::Coffee => "Enjoy a cup of coffee or tea",
            BreakKind::Social => "Chat with a colleague or friend",
        }
    }
}

impl std::str::FromStr for BreakKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick_stretch" => Ok(BreakKind::QuickStretch),
            "walk" => Ok(BreakKind::Walk),
            "hydrate" => Ok(BreakKind::Hydrate),
            "eye_rest" => Ok(BreakKind::EyeRest),
            "meditation" => Ok(BreakKind::Meditation),
            "coffee" => Ok(BreakKind::Coffee),
            "social" => Ok(BreakKind::Social),
            other => Err(format!("unknown break kind: {other}")),
        }
    }
}

/// One break session, in flight or completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakRecord {
    /// Unique id assigned at start.
    pub id: String,
    pub kind: BreakKind,
    pub planned_duration_min: u32,
    pub start_time: DateTime<Utc>,
    /// Absent until completed.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Mood rating 1-10, absent until completed.
    #[serde(default)]
    pub mood_after: Option<u8>,
}

impl BreakRecord {
    pub fn start(kind: BreakKind, planned_duration_min: u32, at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            planned_duration_min,
            start_time: at,
            end_time: None,
            completed: false,
            mood_after: None,
        }
    }

    /// Actual duration in whole minutes, once completed.
    pub fn actual_duration_min(&self) -> Option<i64> {
        self.end_time.map(|end| (end - self.start_time).num_minutes())
    }
}
