//! Trailing time windows offered by the stats screens

use serde::{Deserialize, Serialize};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
  Week,
  Month,
  ThreeMonths,
  SixMonths,
  Year,
  #[default]
  AllTime,
}

impl TimeRange {
  pub fn days(&self) -> Option<i64> {
    match self {
      Self::Week => Some(7),
      Self::Month => Some(30),
      Self::ThreeMonths => Some(90),
      Self::SixMonths => Some(180),
      Self::Year => Some(365),
      Self::AllTime => None,
    }
  }

  /// Lower bound for queries evaluated at `now_ms`; `None` for all time
  pub fn since(&self, now_ms: i64) -> Option<i64> {
    self.days().map(|d| now_ms - d * DAY_MS)
  }
}

impl std::fmt::Display for TimeRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Week => write!(f, "week"),
      Self::Month => write!(f, "month"),
      Self::ThreeMonths => write!(f, "three_months"),
      Self::SixMonths => write!(f, "six_months"),
      Self::Year => write!(f, "year"),
      Self::AllTime => write!(f, "all_time"),
    }
  }
}

impl std::str::FromStr for TimeRange {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "week" => Ok(Self::Week),
      "month" => Ok(Self::Month),
      "three_months" => Ok(Self::ThreeMonths),
      "six_months" => Ok(Self::SixMonths),
      "year" => Ok(Self::Year),
      "all_time" => Ok(Self::AllTime),
      _ => Err(format!("Unknown time range: {}", s)),
    }
  }
}
