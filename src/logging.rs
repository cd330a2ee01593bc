//! Tracing setup for host applications embedding the statistics layer

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `filter` (EnvFilter syntax).
/// Returns false when a global subscriber was already installed.
pub fn init_logging(filter: &str) -> bool {
  let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(true)
    .try_init()
    .is_ok()
}
