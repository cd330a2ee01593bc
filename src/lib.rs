//! Workout log statistics
//!
//! Read-only analytics over a workout store: exercise frequency rankings,
//! personal records, per-session progression series, and a tiered
//! 52-week activity grid. Results are plain data for the UI to render.

pub mod activity;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod range;
pub mod series;
pub mod stats;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use config::StatsConfig;
pub use engine::{Dashboard, StatsEngine};
pub use error::StatsError;
pub use range::TimeRange;
pub use store::{MemorySessionLog, SessionLog, SqliteSessionLog, WorkoutFilter};

/// Open the engine on the configured store
pub async fn open() -> Result<StatsEngine<SqliteSessionLog>, StatsError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = StatsConfig::from_env()?;
  logging::init_logging(&config.log_filter);

  let pool = db::connect(&config).await?;
  Ok(StatsEngine::new(SqliteSessionLog::new(pool)))
}
