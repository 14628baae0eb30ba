use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health::{health_check, root};
use super::logs::log_day;
use super::plan::{create_plan, get_latest_plan};
use super::review::weekly_review;
use super::AppState;
use crate::services::CoachingService;

pub fn create_routes(coaching_service: CoachingService) -> Router {
    let state = AppState { coaching_service };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/plan", post(create_plan).get(get_latest_plan))
        .route("/log", post(log_day))
        .route("/review", get(weekly_review))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
