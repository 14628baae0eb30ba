use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError};

/// What the user is training for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[serde(alias = "lose_fat")]
    ReduceWeight,
    BuildMuscle,
    ImproveStamina,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::ReduceWeight => "reduce_weight",
            Goal::BuildMuscle => "build_muscle",
            Goal::ImproveStamina => "improve_stamina",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Gym,
    Dumbbells,
    Bodyweight,
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Gym => "gym",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Bodyweight => "bodyweight",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's training parameters. Unique by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[serde(default = "default_profile_name")]
    #[validate(custom(function = "validate_profile_name"))]
    pub name: String,

    pub goal: Goal,

    #[serde(default)]
    pub level: Level,

    #[validate(range(min = 1, max = 7, message = "Days per week must be between 1 and 7"))]
    pub days_per_week: u32,

    #[validate(range(min = 15, max = 180, message = "Session minutes must be between 15 and 180"))]
    pub session_minutes: u32,

    pub equipment: Equipment,

    #[serde(default)]
    #[validate(range(min = 30.0, max = 250.0, message = "Weight must be between 30 and 250 kg"))]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

fn default_profile_name() -> String {
    "User".to_string()
}

/// Profile names are the storage key and must contain something besides whitespace
pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("blank_name");
        error.message = Some("Name cannot be empty".into());
        return Err(error);
    }
    Ok(())
}

impl Profile {
    /// Placeholder profile for users who log days before requesting a plan
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            goal: Goal::ReduceWeight,
            level: Level::Beginner,
            days_per_week: 3,
            session_minutes: 45,
            equipment: Equipment::Bodyweight,
            weight_kg: None,
            preferences: BTreeMap::new(),
        }
    }
}
