// API routes and handlers

pub mod health;
pub mod logs;
pub mod plan;
pub mod review;
pub mod routes;

use serde::Deserialize;

use crate::services::CoachingService;

#[derive(Clone)]
pub struct AppState {
    pub coaching_service: CoachingService,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub profile_name: String,
}
