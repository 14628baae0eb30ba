use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One day's adherence record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LogEntry {
    pub date: NaiveDate,

    #[serde(default)]
    pub workout_done: bool,

    #[serde(default)]
    #[validate(range(min = 0, max = 200000, message = "Steps must be between 0 and 200000"))]
    pub steps: Option<i64>,

    #[serde(default)]
    #[validate(range(min = 30.0, max = 250.0, message = "Weight must be between 30 and 250 kg"))]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,
}
