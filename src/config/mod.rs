pub mod app;
pub mod database;

pub use app::{AppConfig, NarrativeConfig, NarrativeProvider};
pub use database::{run_migrations, DatabaseConfig};
