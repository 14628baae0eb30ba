use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, debug_span, info, warn, Instrument};

use super::context::{Clamped, Fueled, Normalized, PlanIntake, PlanOutcome, Scheduled};
use super::PipelineError;
use crate::models::{
    Equipment, Goal, Level, NutritionGuidance, Plan, Profile, SessionDetail, Warning,
    WorkoutSession,
};
use crate::services::{NarrativeGenerator, ProviderError};

pub const DAYS_CAPPED_WARNING: &str = "Capped training days to 6 for recovery.";
pub const BEGINNER_MINUTES_CAPPED_WARNING: &str = "Beginner sessions capped at 90 minutes.";

const MAX_DAYS_PER_WEEK: u32 = 6;
const BEGINNER_MAX_SESSION_MINUTES: u32 = 90;
const PROTEIN_G_PER_KG: f64 = 1.6;

const PLATE_METHOD: [&str; 4] = [
    "1/2 plate: vegetables/salad",
    "1/4 plate: protein",
    "1/4 plate: carbs",
    "Add healthy fats in small amounts",
];
const NUTRITION_NOTES: &str =
    "Not medical advice. Focus on consistency: protein + fiber + sleep + steps.";

const PLAN_SYSTEM_PROMPT: &str = "You are a practical fitness coach. Be concise and encouraging. \
No medical advice. Do not invent user details.";

/// Ensure the warnings list exists. Never fails.
pub fn normalize(intake: PlanIntake) -> Normalized {
    Normalized {
        profile: intake.profile,
        warnings: Vec::new(),
    }
}

/// Cap training volume. Rules run independently, days first.
pub fn safety_clamp(stage: Normalized) -> Clamped {
    let Normalized {
        mut profile,
        mut warnings,
    } = stage;

    if profile.days_per_week > MAX_DAYS_PER_WEEK {
        warn!(
            profile = %profile.name,
            requested = profile.days_per_week,
            "Capping training days"
        );
        profile.days_per_week = MAX_DAYS_PER_WEEK;
        warnings.push(Warning::new(DAYS_CAPPED_WARNING));
    }

    if profile.level == Level::Beginner && profile.session_minutes > BEGINNER_MAX_SESSION_MINUTES {
        warn!(
            profile = %profile.name,
            requested = profile.session_minutes,
            "Capping beginner session length"
        );
        profile.session_minutes = BEGINNER_MAX_SESSION_MINUTES;
        warnings.push(Warning::new(BEGINNER_MINUTES_CAPPED_WARNING));
    }

    Clamped { profile, warnings }
}

/// One templated session per training day, numbered from 1
pub fn generate_workouts(stage: Clamped) -> Scheduled {
    let Clamped { profile, warnings } = stage;

    let workouts = (1..=profile.days_per_week)
        .map(|day| WorkoutSession {
            day,
            title: session_title(profile.goal, day).to_string(),
            duration_minutes: profile.session_minutes,
            session: template_session(profile.goal, profile.equipment, profile.level),
        })
        .collect();

    Scheduled {
        profile,
        warnings,
        workouts,
    }
}

pub fn generate_nutrition(stage: Scheduled) -> Fueled {
    let Scheduled {
        profile,
        warnings,
        workouts,
    } = stage;

    let nutrition = NutritionGuidance {
        protein_g_per_day: profile.weight_kg.map(daily_protein_grams),
        plate_method: PLATE_METHOD.iter().map(|line| line.to_string()).collect(),
        notes: NUTRITION_NOTES.to_string(),
    };

    Fueled {
        profile,
        warnings,
        workouts,
        nutrition,
    }
}

/// Ask the narrator to explain the plan. Its text is stored verbatim.
pub async fn narrate_plan(
    stage: Fueled,
    narrator: &dyn NarrativeGenerator,
) -> Result<PlanOutcome, PipelineError> {
    let user = plan_prompt(&stage)?;
    let explanation = narrator.generate(PLAN_SYSTEM_PROMPT, &user).await?;
    if explanation.trim().is_empty() {
        return Err(ProviderError::EmptyResponse.into());
    }

    let Fueled {
        profile,
        warnings,
        workouts,
        nutrition,
    } = stage;

    Ok(PlanOutcome {
        profile,
        warnings,
        plan: Plan {
            workouts,
            nutrition,
            explanation,
        },
    })
}

fn session_title(goal: Goal, day: u32) -> &'static str {
    match goal {
        Goal::ImproveStamina => "Cardio + mobility",
        _ if day % 2 == 1 => "Full body strength",
        _ => "Strength + conditioning",
    }
}

fn template_session(goal: Goal, equipment: Equipment, level: Level) -> SessionDetail {
    if goal == Goal::ImproveStamina {
        return SessionDetail {
            warmup: "5 min easy cardio".to_string(),
            main: vec![
                "20–30 min steady cardio (zone 2)".to_string(),
                "5–10 min mobility".to_string(),
            ],
            cooldown: "5 min walk + breathing".to_string(),
        };
    }

    let exercises: &[&str] = match equipment {
        Equipment::Bodyweight => &["Squats", "Push-ups", "Glute bridge", "Plank"],
        Equipment::Dumbbells => &["Goblet squat", "Dumbbell press", "One-arm row", "RDL", "Plank"],
        Equipment::Gym => &[
            "Leg press or squat",
            "Bench press",
            "Lat pulldown/row",
            "RDL",
            "Core",
        ],
    };

    let sets = match level {
        Level::Beginner => "2–3 sets",
        Level::Intermediate => "3–4 sets",
    };
    let reps = "8–12 reps";

    SessionDetail {
        warmup: "5–8 min mobility + light cardio".to_string(),
        main: exercises
            .iter()
            .map(|exercise| format!("{exercise}: {sets} x {reps}"))
            .collect(),
        cooldown: "5 min stretch".to_string(),
    }
}

fn daily_protein_grams(weight_kg: f64) -> u32 {
    (PROTEIN_G_PER_KG * weight_kg).round() as u32
}

#[derive(Serialize)]
struct PlanSoFar<'a> {
    workouts: &'a [WorkoutSession],
    nutrition: &'a NutritionGuidance,
}

fn plan_prompt(stage: &Fueled) -> Result<String, serde_json::Error> {
    let profile = &stage.profile;
    let weight = profile
        .weight_kg
        .map(|w| w.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let preferences = serde_json::to_string(&profile.preferences)?;
    let warnings = serde_json::to_string(&stage.warnings)?;
    let plan = serde_json::to_string_pretty(&PlanSoFar {
        workouts: &stage.workouts,
        nutrition: &stage.nutrition,
    })?;

    Ok(format!(
        "User profile:
- goal: {goal}
- level: {level}
- days_per_week: {days}
- session_minutes: {minutes}
- equipment: {equipment}
- weight_kg: {weight}
- preferences: {preferences}

Safety warnings: {warnings}

Plan:
{plan}

Write:
1) 5 bullet points explaining why this plan fits this user.
2) 3 personalization tips aligned with equipment and time.
3) One fallback rule for missed sessions.

Keep it realistic.
",
        goal = profile.goal,
        level = profile.level,
        days = profile.days_per_week,
        minutes = profile.session_minutes,
        equipment = profile.equipment,
    ))
}

/// `normalize → safety_clamp → generate_workouts → generate_nutrition → narrate_plan`
#[derive(Clone)]
pub struct PlanPipeline {
    narrator: Arc<dyn NarrativeGenerator>,
}

impl PlanPipeline {
    pub const STEPS: [&'static str; 5] = [
        "normalize",
        "safety_clamp",
        "generate_workouts",
        "generate_nutrition",
        "narrate_plan",
    ];

    pub fn new(narrator: Arc<dyn NarrativeGenerator>) -> Self {
        Self { narrator }
    }

    /// Run every step in order. Fails as a whole if any step fails.
    pub async fn invoke(&self, profile: Profile) -> Result<PlanOutcome, PipelineError> {
        info!(profile = %profile.name, "Running plan pipeline");

        let intake = PlanIntake { profile };
        let normalized = debug_span!("step", name = "normalize").in_scope(|| normalize(intake));
        let clamped =
            debug_span!("step", name = "safety_clamp").in_scope(|| safety_clamp(normalized));
        let scheduled =
            debug_span!("step", name = "generate_workouts").in_scope(|| generate_workouts(clamped));
        let fueled = debug_span!("step", name = "generate_nutrition")
            .in_scope(|| generate_nutrition(scheduled));
        debug!(
            workouts = fueled.workouts.len(),
            warnings = fueled.warnings.len(),
            "Deterministic plan steps complete"
        );

        narrate_plan(fueled, self.narrator.as_ref())
            .instrument(debug_span!("step", name = "narrate_plan"))
            .await
    }
}
