//! Year activity grid types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Intensity bucket for a day with logged duration, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityTier {
  Lowest,
  Low,
  Medium,
  High,
  Highest,
}

impl IntensityTier {
  pub const ALL: [IntensityTier; 5] = [
    IntensityTier::Lowest,
    IntensityTier::Low,
    IntensityTier::Medium,
    IntensityTier::High,
    IntensityTier::Highest,
  ];

  /// 0 (lowest) through 4 (highest)
  pub fn level(&self) -> u8 {
    match self {
      IntensityTier::Lowest => 0,
      IntensityTier::Low => 1,
      IntensityTier::Medium => 2,
      IntensityTier::High => 3,
      IntensityTier::Highest => 4,
    }
  }

  pub fn from_level(level: u8) -> Option<Self> {
    Self::ALL.get(level as usize).copied()
  }

  /// Cell opacity used by the heatmap. These values are pinned by visual tests.
  pub fn opacity(&self) -> f64 {
    match self {
      IntensityTier::Lowest => 0.40,
      IntensityTier::Low => 0.55,
      IntensityTier::Medium => 0.70,
      IntensityTier::High => 0.85,
      IntensityTier::Highest => 1.00,
    }
  }
}

/// One grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayIntensity {
  pub date: NaiveDate,
  pub is_future: bool,
  /// At least one session was logged this day, with or without duration
  pub has_session: bool,
  /// Summed session duration in seconds (0 when none was recorded)
  pub duration_seconds: i64,
  pub tier: Option<IntensityTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
  /// Week column the label is anchored at
  pub column: usize,
  pub year: i32,
  pub month: u32,
  /// Short month name, e.g. "Jan"
  pub label: String,
}

/// Distribution figures for the non-future part of the window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityStats {
  /// Days with duration > 0
  pub active_days: usize,
  /// Days with any session, including ones without a duration
  pub logged_days: usize,
  pub total_seconds: i64,
  pub median_seconds: Option<f64>,
  pub p95_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearActivity {
  /// 52 week columns, Monday first, 7 days each
  pub weeks: Vec<Vec<DayIntensity>>,
  pub month_labels: Vec<MonthLabel>,
  pub stats: ActivityStats,
}

impl YearActivity {
  pub fn days(&self) -> impl Iterator<Item = &DayIntensity> {
    self.weeks.iter().flatten()
  }

  pub fn day(&self, date: NaiveDate) -> Option<&DayIntensity> {
    self.days().find(|d| d.date == date)
  }
}
