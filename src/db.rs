use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::StatsConfig;
use crate::error::StatsError;

pub type DbPool = SqlitePool;

/// Open a read-only connection pool on the workout store.
/// The store owns its schema and migrations; nothing here writes.
pub async fn connect(config: &StatsConfig) -> Result<DbPool, StatsError> {
  let options = SqliteConnectOptions::from_str(&config.database_url)?.read_only(true);

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect_with(options)
    .await?;

  tracing::info!(
    database_url = %config.database_url,
    max_connections = config.max_connections,
    "Workout store opened read-only"
  );

  Ok(pool)
}
