use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_extra::extract::WithRejection;

use super::{AppState, ProfileQuery};
use crate::errors::{CoachError, CoachResult};
use crate::models::Review;

pub async fn weekly_review(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProfileQuery>, CoachError>,
) -> CoachResult<Json<Review>> {
    let review = state
        .coaching_service
        .weekly_review(&query.profile_name)
        .await?;
    Ok(Json(review))
}
