#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_coach::config::run_migrations;
use fitness_coach::models::*;
use fitness_coach::services::{NarrativeGenerator, ProviderError};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Single-connection in-memory database with migrations applied
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Always fails like a provider without credentials
pub struct FailingNarrativeGenerator;

#[async_trait]
impl NarrativeGenerator for FailingNarrativeGenerator {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, ProviderError> {
        Err(ProviderError::MissingCredentials)
    }
}

pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            goal: Goal::BuildMuscle,
            level: Level::Beginner,
            days_per_week: 7,
            session_minutes: 100,
            equipment: Equipment::Dumbbells,
            weight_kg: Some(80.0),
            preferences: BTreeMap::from([("time".to_string(), "mornings".to_string())]),
        }
    }

    /// Consecutive daily logs starting 2024-01-01
    pub fn logs(pattern: &[bool]) -> Vec<LogEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        pattern
            .iter()
            .enumerate()
            .map(|(i, done)| LogEntry {
                date: start + chrono::Duration::days(i as i64),
                workout_done: *done,
                steps: Some(6000 + i as i64 * 100),
                weight_kg: None,
                notes: Some(format!("day {}", i + 1)),
            })
            .collect()
    }
}
