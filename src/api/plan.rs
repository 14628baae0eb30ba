use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_extra::extract::WithRejection;

use super::{AppState, ProfileQuery};
use crate::errors::{CoachError, CoachResult};
use crate::models::{Profile, StoredPlan};
use crate::services::PlanResponse;

/// Build a plan for the submitted profile
pub async fn create_plan(
    State(state): State<AppState>,
    WithRejection(Json(profile), _): WithRejection<Json<Profile>, CoachError>,
) -> CoachResult<Json<PlanResponse>> {
    let response = state.coaching_service.create_plan(profile).await?;
    Ok(Json(response))
}

/// Most recently stored plan for a profile
pub async fn get_latest_plan(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProfileQuery>, CoachError>,
) -> CoachResult<Json<StoredPlan>> {
    let plan = state
        .coaching_service
        .latest_plan(&query.profile_name)
        .await?;
    Ok(Json(plan))
}
