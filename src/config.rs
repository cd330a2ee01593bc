//! Runtime configuration for the statistics layer
//!
//! Values come from the process environment; `lift_log::open` loads an
//! optional `.env` file first.

use std::env;

use crate::error::StatsError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DATABASE_URL_VAR: &str = "LIFT_LOG_DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "LIFT_LOG_MAX_CONNECTIONS";
const LOG_FILTER_VAR: &str = "LIFT_LOG_LOG";

const DEFAULT_DATABASE_URL: &str = "sqlite://lift-log.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct StatsConfig {
  pub database_url: String,
  pub max_connections: u32,
  pub log_filter: String,
}

impl Default for StatsConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl StatsConfig {
  pub fn from_env() -> Result<Self, StatsError> {
    let max_connections = match env::var(MAX_CONNECTIONS_VAR) {
      Ok(raw) => parse_max_connections(&raw)?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    Ok(Self {
      database_url: env::var(DATABASE_URL_VAR).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
      max_connections,
      log_filter: env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
    })
  }
}

fn parse_max_connections(raw: &str) -> Result<u32, StatsError> {
  match raw.trim().parse::<u32>() {
    Ok(n) if n > 0 => Ok(n),
    _ => Err(StatsError::Config(format!(
      "{} must be a positive integer, got '{}'",
      MAX_CONNECTIONS_VAR, raw
    ))),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
