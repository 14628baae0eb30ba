// Stage records threaded through the pipelines, in execution order

use crate::models::{LogEntry, NutritionGuidance, Plan, Profile, Review, WorkoutSession, Warning};

/// Input to the plan pipeline: an already validated profile
#[derive(Debug, Clone)]
pub struct PlanIntake {
    pub profile: Profile,
}

/// After `normalize`
#[derive(Debug, Clone)]
pub struct Normalized {
    pub profile: Profile,
    pub warnings: Vec<Warning>,
}

/// After `safety_clamp`: at most 6 days, beginners at most 90 minutes
#[derive(Debug, Clone)]
pub struct Clamped {
    pub profile: Profile,
    pub warnings: Vec<Warning>,
}

/// After `generate_workouts`
#[derive(Debug, Clone)]
pub struct Scheduled {
    pub profile: Profile,
    pub warnings: Vec<Warning>,
    pub workouts: Vec<WorkoutSession>,
}

/// After `generate_nutrition`
#[derive(Debug, Clone)]
pub struct Fueled {
    pub profile: Profile,
    pub warnings: Vec<Warning>,
    pub workouts: Vec<WorkoutSession>,
    pub nutrition: NutritionGuidance,
}

/// Output of the plan pipeline
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub profile: Profile,
    pub warnings: Vec<Warning>,
    pub plan: Plan,
}

/// Input to the review pipeline, oldest entry first
#[derive(Debug, Clone, Default)]
pub struct ReviewIntake {
    pub logs: Vec<LogEntry>,
}

/// After `score_adherence`; `review.coach_notes` is still empty
#[derive(Debug, Clone)]
pub struct Scored {
    pub logs: Vec<LogEntry>,
    pub review: Review,
}
