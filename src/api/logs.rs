use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use super::{AppState, ProfileQuery};
use crate::errors::{CoachError, CoachResult};
use crate::models::LogEntry;

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub status: &'static str,
    pub log_id: i64,
}

pub async fn log_day(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProfileQuery>, CoachError>,
    WithRejection(Json(entry), _): WithRejection<Json<LogEntry>, CoachError>,
) -> CoachResult<Json<LogResponse>> {
    let log_id = state
        .coaching_service
        .log_day(&query.profile_name, entry)
        .await?;

    Ok(Json(LogResponse {
        status: "ok",
        log_id,
    }))
}
