use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content of a single training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetail {
    pub warmup: String,
    pub main: Vec<String>,
    pub cooldown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// 1-based training day
    pub day: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub session: SessionDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGuidance {
    pub protein_g_per_day: Option<u32>,
    pub plate_method: Vec<String>,
    pub notes: String,
}

/// Final output of the plan pipeline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub workouts: Vec<WorkoutSession>,
    pub nutrition: NutritionGuidance,
    pub explanation: String,
}

/// An automatic safety adjustment applied to a profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Warning(String);

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted plan record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlan {
    pub id: i64,
    pub profile_id: i64,
    pub created_at: DateTime<Utc>,
    pub plan: Plan,
    pub warnings: Vec<Warning>,
}
