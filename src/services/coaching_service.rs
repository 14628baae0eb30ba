use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::errors::{CoachError, CoachResult};
use crate::models::{self, LogEntry, Plan, Profile, Review, StoredPlan, Warning};
use crate::pipeline::{PlanPipeline, ReviewPipeline};
use crate::services::{NarrativeGenerator, StorageService, DEFAULT_LOG_LIMIT};

/// Result of a plan request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    /// The profile after safety adjustments
    pub profile: Profile,
    pub plan: Plan,
    pub warnings: Vec<Warning>,
}

/// Runs the pipelines and handles persistence around them
#[derive(Clone)]
pub struct CoachingService {
    storage: StorageService,
    plan_pipeline: PlanPipeline,
    review_pipeline: ReviewPipeline,
}

impl CoachingService {
    pub fn new(storage: StorageService, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            storage,
            plan_pipeline: PlanPipeline::new(narrator.clone()),
            review_pipeline: ReviewPipeline::new(narrator),
        }
    }

    /// Validate, run the plan pipeline, then persist the clamped profile and the plan.
    /// Nothing is written if the pipeline fails.
    pub async fn create_plan(&self, profile: Profile) -> CoachResult<PlanResponse> {
        profile.validate()?;

        let outcome = self.plan_pipeline.invoke(profile).await?;

        let profile_id = self.storage.upsert_profile(&outcome.profile).await?;
        let plan_id = self
            .storage
            .save_plan(profile_id, &outcome.plan, &outcome.warnings)
            .await?;

        info!(
            profile = %outcome.profile.name,
            plan_id,
            warnings = outcome.warnings.len(),
            "Plan created"
        );

        Ok(PlanResponse {
            profile: outcome.profile,
            plan: outcome.plan,
            warnings: outcome.warnings,
        })
    }

    pub async fn latest_plan(&self, profile_name: &str) -> CoachResult<StoredPlan> {
        validate_profile_name(profile_name)?;

        let plan = match self.storage.find_profile_id(profile_name).await? {
            Some(profile_id) => self.storage.latest_plan(profile_id).await?,
            None => None,
        };
        plan.ok_or_else(|| CoachError::NotFound(format!("Plan for '{profile_name}'")))
    }

    pub async fn log_day(&self, profile_name: &str, entry: LogEntry) -> CoachResult<i64> {
        validate_profile_name(profile_name)?;
        entry.validate()?;

        let profile_id = self.storage.ensure_profile(profile_name).await?;
        let log_id = self.storage.add_log(profile_id, &entry).await?;

        info!(profile = profile_name, log_id, date = %entry.date, "Logged day");
        Ok(log_id)
    }

    /// Review the most recent logs. Narrative sees the last 14 of at most 60.
    pub async fn weekly_review(&self, profile_name: &str) -> CoachResult<Review> {
        validate_profile_name(profile_name)?;

        let profile_id = self.storage.ensure_profile(profile_name).await?;
        let logs = self.storage.get_logs(profile_id, DEFAULT_LOG_LIMIT).await?;
        let review = self.review_pipeline.invoke(logs).await?;

        info!(profile = profile_name, adherence = review.adherence, "Review computed");
        Ok(review)
    }
}

fn validate_profile_name(name: &str) -> CoachResult<()> {
    models::validate_profile_name(name)
        .map_err(|_| CoachError::Validation("profile_name cannot be empty".to_string()))
}
