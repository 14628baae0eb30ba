use serde::{Deserialize, Serialize};

/// Weekly adherence review. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Fraction of logged days with a workout, rounded to 2 decimals
    pub adherence: f64,
    pub summary: String,
    pub next_week_adjustment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_notes: Option<String>,
}
