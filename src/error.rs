//! Error types for the statistics layer
//!
//! "No data" is never an error here. Queries return `None` or an empty list
//! for that; `StatsError` only carries store failures and bad configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum StatsError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Invalid configuration: {0}")]
  Config(String),
}

// Convert sqlx::Error to StatsError
impl From<sqlx::Error> for StatsError {
  fn from(e: sqlx::Error) -> Self {
    StatsError::Database(e.to_string())
  }
}
