use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::errors::CoachResult;
use crate::models::{LogEntry, Plan, Profile, StoredPlan, Warning};

/// Most recent log entries loaded for a review
pub const DEFAULT_LOG_LIMIT: i64 = 60;

#[derive(Debug, FromRow)]
struct LogRow {
    date: NaiveDate,
    workout_done: bool,
    steps: Option<i64>,
    weight_kg: Option<f64>,
    notes: Option<String>,
}

impl From<LogRow> for LogEntry {
    fn from(row: LogRow) -> Self {
        LogEntry {
            date: row.date,
            workout_done: row.workout_done,
            steps: row.steps,
            weight_kg: row.weight_kg,
            notes: row.notes,
        }
    }
}

#[derive(Debug, FromRow)]
struct PlanRow {
    id: i64,
    profile_id: i64,
    created_at: DateTime<Utc>,
    plan_json: String,
    warnings_json: String,
}

/// Durable profiles, plans and logs
#[derive(Clone)]
pub struct StorageService {
    db: SqlitePool,
}

impl StorageService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert or replace the profile with this name; last write wins
    pub async fn upsert_profile(&self, profile: &Profile) -> CoachResult<i64> {
        let data_json = serde_json::to_string(profile)?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO profiles (name, data_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (name) DO UPDATE
            SET data_json = excluded.data_json,
                updated_at = excluded.updated_at
            RETURNING id
            "#,
        )
        .bind(&profile.name)
        .bind(data_json)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        debug!(profile = %profile.name, profile_id = id, "Upserted profile");
        Ok(id)
    }

    /// Id of the named profile, creating a placeholder if none exists.
    /// An existing profile is left untouched.
    pub async fn ensure_profile(&self, name: &str) -> CoachResult<i64> {
        let data_json = serde_json::to_string(&Profile::placeholder(name))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (name, data_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(data_json)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM profiles WHERE name = ?")
            .bind(name)
            .fetch_one(&self.db)
            .await?;

        Ok(id)
    }

    pub async fn find_profile_id(&self, name: &str) -> CoachResult<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM profiles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.db)
            .await?;

        Ok(id)
    }

    pub async fn get_profile(&self, name: &str) -> CoachResult<Option<Profile>> {
        let data_json =
            sqlx::query_scalar::<_, String>("SELECT data_json FROM profiles WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.db)
                .await?;

        match data_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Append a plan record. Earlier plans are never overwritten.
    pub async fn save_plan(
        &self,
        profile_id: i64,
        plan: &Plan,
        warnings: &[Warning],
    ) -> CoachResult<i64> {
        let plan_json = serde_json::to_string(plan)?;
        let warnings_json = serde_json::to_string(warnings)?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO plans (profile_id, created_at, plan_json, warnings_json)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(profile_id)
        .bind(Utc::now())
        .bind(plan_json)
        .bind(warnings_json)
        .fetch_one(&self.db)
        .await?;

        debug!(profile_id, plan_id = id, "Saved plan");
        Ok(id)
    }

    pub async fn latest_plan(&self, profile_id: i64) -> CoachResult<Option<StoredPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, profile_id, created_at, plan_json, warnings_json
            FROM plans
            WHERE profile_id = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredPlan {
            id: row.id,
            profile_id: row.profile_id,
            created_at: row.created_at,
            plan: serde_json::from_str(&row.plan_json)?,
            warnings: serde_json::from_str(&row.warnings_json)?,
        }))
    }

    pub async fn add_log(&self, profile_id: i64, entry: &LogEntry) -> CoachResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO logs (profile_id, date, workout_done, steps, weight_kg, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(profile_id)
        .bind(entry.date)
        .bind(entry.workout_done)
        .bind(entry.steps)
        .bind(entry.weight_kg)
        .bind(&entry.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// The most recent `limit` logs, returned oldest first
    pub async fn get_logs(&self, profile_id: i64, limit: i64) -> CoachResult<Vec<LogEntry>> {
        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT date, workout_done, steps, weight_kg, notes
            FROM (
                SELECT id, date, workout_done, steps, weight_kg, notes
                FROM logs
                WHERE profile_id = ?
                ORDER BY date DESC, id DESC
                LIMIT ?
            )
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(profile_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(LogEntry::from).collect())
    }
}
