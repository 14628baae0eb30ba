//! Fitness coaching backend: turns a profile into a weekly workout and
//! nutrition plan, and a history of daily logs into an adherence review.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod services;
