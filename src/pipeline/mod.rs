//! Plan and review pipelines.
//!
//! Both pipelines are fixed, linear sequences of named steps. Each step takes
//! the previous stage record by value and returns the next one, so a step can
//! only run once every field it reads has been produced:
//!
//! - plan: `normalize → safety_clamp → generate_workouts → generate_nutrition → narrate_plan`
//! - review: `score_adherence → narrate_review`
//!
//! The narrative steps call an injected [`NarrativeGenerator`]. A failure
//! there fails the whole invocation; no partial stage is returned.
//!
//! [`NarrativeGenerator`]: crate::services::NarrativeGenerator

pub mod context;
pub mod plan;
pub mod review;

pub use context::*;
pub use plan::PlanPipeline;
pub use review::ReviewPipeline;

use thiserror::Error;

use crate::services::ProviderError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to serialize narrative input: {0}")]
    Serialization(#[from] serde_json::Error),
}
