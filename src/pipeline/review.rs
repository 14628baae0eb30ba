use std::sync::Arc;
use tracing::{debug_span, info, Instrument};

use super::context::{ReviewIntake, Scored};
use super::PipelineError;
use crate::models::{LogEntry, Review};
use crate::services::{NarrativeGenerator, ProviderError};

/// How many of the most recent logs the coach narrative sees
pub const RECENT_LOG_WINDOW: usize = 14;

const STRONG_ADHERENCE: f64 = 0.85;
const DECENT_ADHERENCE: f64 = 0.60;

const REVIEW_SYSTEM_PROMPT: &str = "You are a fitness coach writing a weekly reflection. \
Be specific, non-judgmental, and actionable. No medical advice. \
Don't invent facts not present in logs/review.";

/// Deterministic adherence scoring
pub fn score_adherence(intake: ReviewIntake) -> Scored {
    let logs = intake.logs;

    if logs.is_empty() {
        return Scored {
            logs,
            review: Review {
                adherence: 0.0,
                summary: "No logs yet. Log a few days to get feedback.".to_string(),
                next_week_adjustment: "Keep it simple: schedule 2–3 sessions and walk daily."
                    .to_string(),
                coach_notes: None,
            },
        };
    }

    let done = logs.iter().filter(|entry| entry.workout_done).count();
    let adherence = done as f64 / logs.len() as f64;

    // Buckets use the unrounded ratio
    let (summary, adjustment) = if adherence >= STRONG_ADHERENCE {
        (
            "Strong consistency. Add a small progression next week.",
            "Add +1 set to two exercises OR +2 reps per set.",
        )
    } else if adherence >= DECENT_ADHERENCE {
        (
            "Decent consistency. Keep the plan and reduce friction.",
            "Pre-plan workout slots and keep sessions short and repeatable.",
        )
    } else {
        (
            "Low consistency. The plan likely didn't fit your week.",
            "Reduce complexity: fewer exercises and shorter sessions.",
        )
    };

    Scored {
        logs,
        review: Review {
            adherence: round_to_hundredths(adherence),
            summary: summary.to_string(),
            next_week_adjustment: adjustment.to_string(),
            coach_notes: None,
        },
    }
}

/// Attach coach notes written from the review and the recent logs
pub async fn narrate_review(
    stage: Scored,
    narrator: &dyn NarrativeGenerator,
) -> Result<Review, PipelineError> {
    let user = review_prompt(&stage)?;
    let notes = narrator.generate(REVIEW_SYSTEM_PROMPT, &user).await?;
    if notes.trim().is_empty() {
        return Err(ProviderError::EmptyResponse.into());
    }

    let mut review = stage.review;
    review.coach_notes = Some(notes);
    Ok(review)
}

/// The last [`RECENT_LOG_WINDOW`] entries, still oldest first
pub fn recent_logs(logs: &[LogEntry]) -> &[LogEntry] {
    &logs[logs.len().saturating_sub(RECENT_LOG_WINDOW)..]
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn review_prompt(stage: &Scored) -> Result<String, serde_json::Error> {
    let review = serde_json::to_string_pretty(&stage.review)?;
    let logs = serde_json::to_string_pretty(recent_logs(&stage.logs))?;

    Ok(format!(
        "Deterministic review:
{review}

Logs:
{logs}

Write:
- 3 observations based only on logs
- 2 likely friction points (if unclear, say 'possibly')
- 3 small changes for next week
- a 1–2 sentence motivational closer
"
    ))
}

/// `score_adherence → narrate_review`
#[derive(Clone)]
pub struct ReviewPipeline {
    narrator: Arc<dyn NarrativeGenerator>,
}

impl ReviewPipeline {
    pub const STEPS: [&'static str; 2] = ["score_adherence", "narrate_review"];

    pub fn new(narrator: Arc<dyn NarrativeGenerator>) -> Self {
        Self { narrator }
    }

    pub async fn invoke(&self, logs: Vec<LogEntry>) -> Result<Review, PipelineError> {
        info!(logs = logs.len(), "Running review pipeline");

        let intake = ReviewIntake { logs };
        let scored =
            debug_span!("step", name = "score_adherence").in_scope(|| score_adherence(intake));

        narrate_review(scored, self.narrator.as_ref())
            .instrument(debug_span!("step", name = "narrate_review"))
            .await
    }
}
