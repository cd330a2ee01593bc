//! Year activity grid
//!
//! Buckets the last 52 weeks of session days into five intensity tiers by
//! total logged duration. Tier boundaries come from the median and the 95th
//! percentile of the window's non-zero daily durations, so one very long day
//! does not flatten everything else.
//!
//! `year_activity` is a pure function of a per-day total map and "today";
//! the engine handles reading sessions and resolving local days.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone};

use crate::models::{
  ActivityStats, DayIntensity, IntensityTier, MonthLabel, SessionDuration, YearActivity,
};

/// ---------------------------------------------------------------------------
/// Grid Constants
/// ---------------------------------------------------------------------------

pub const WEEKS: usize = 52;
pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_DAYS: usize = WEEKS * DAYS_PER_WEEK;

/// ---------------------------------------------------------------------------
/// Window
/// ---------------------------------------------------------------------------

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First cell of the grid: the Monday 51 weeks before the current week's Monday
pub fn grid_start(today: NaiveDate) -> NaiveDate {
  week_start(today) - Duration::weeks(WEEKS as i64 - 1)
}

/// Last cell of the grid: the Sunday closing the current week
pub fn grid_end(today: NaiveDate) -> NaiveDate {
  grid_start(today) + Duration::days(GRID_DAYS as i64 - 1)
}

/// Epoch ms of the first instant of local `date`. When midnight falls in a
/// DST gap that is the transition itself, where the clock jumps past 00:00.
pub fn local_midnight_ms<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
  let naive = date.and_time(NaiveTime::MIN);
  match tz.from_local_datetime(&naive).earliest() {
    Some(dt) => dt.timestamp_millis(),
    None => {
      // Read midnight on the pre-gap clock; that instant is where the gap opens
      let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
      (naive - Duration::seconds(before.local_minus_utc() as i64))
        .and_utc()
        .timestamp_millis()
    }
  }
}

/// ---------------------------------------------------------------------------
/// Per-Day Totals
/// ---------------------------------------------------------------------------

/// Sessions logged on one calendar day. A day with sessions but no usable
/// duration keeps `sessions > 0` and `duration_seconds == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyTotal {
  pub sessions: u32,
  pub duration_seconds: i64,
}

/// Group sessions by local calendar day in `tz`, summing positive durations
pub fn daily_totals<Tz: TimeZone>(
  sessions: &[SessionDuration],
  tz: &Tz,
) -> BTreeMap<NaiveDate, DailyTotal> {
  let mut totals: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

  for session in sessions {
    let Some(utc) = DateTime::from_timestamp_millis(session.date) else {
      tracing::warn!(date = session.date, "Skipping session with out-of-range date");
      continue;
    };
    let day = utc.with_timezone(tz).date_naive();

    let total = totals.entry(day).or_default();
    total.sessions += 1;
    if let Some(d) = session.duration.filter(|d| *d > 0) {
      total.duration_seconds += d;
    }
  }

  totals
}

/// ---------------------------------------------------------------------------
/// Distribution and Tiers
/// ---------------------------------------------------------------------------

/// Median and 95th-percentile ceiling of the window's positive durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierScale {
  pub median: f64,
  pub p95: f64,
}

impl TierScale {
  /// `None` when there are no positive durations
  pub fn from_durations(durations: &[i64]) -> Option<Self> {
    let mut sorted: Vec<i64> = durations.iter().copied().filter(|d| *d > 0).collect();
    if sorted.is_empty() {
      return None;
    }
    sorted.sort_unstable();

    Some(Self {
      median: median(&sorted),
      p95: p95_ceiling(&sorted),
    })
  }

  /// Tier for a day's total duration; `None` for days without positive duration.
  /// A flat distribution (p95 not above the median) puts every day in the top tier.
  pub fn tier(&self, duration: f64) -> Option<IntensityTier> {
    if duration <= 0.0 {
      return None;
    }
    if self.median <= 0.0 || self.p95 <= 0.0 || self.p95 <= self.median {
      return Some(IntensityTier::Highest);
    }

    let mid_below = self.median / 2.0;
    let mid_above = self.median + (self.p95 - self.median) / 2.0;

    let tier = match duration {
      d if d >= self.p95 => IntensityTier::Highest,
      d if d >= mid_above => IntensityTier::High,
      d if d >= self.median => IntensityTier::Medium,
      d if d >= mid_below => IntensityTier::Low,
      _ => IntensityTier::Lowest,
    };
    Some(tier)
  }
}

fn median(sorted: &[i64]) -> f64 {
  let n = sorted.len();
  if n % 2 == 1 {
    sorted[n / 2] as f64
  } else {
    (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
  }
}

/// Value at index ceil(0.95 * n) - 1, clamped to the last index
fn p95_ceiling(sorted: &[i64]) -> f64 {
  let n = sorted.len();
  // ceil(95n / 100) in integer arithmetic
  let rank = (95 * n + 99) / 100;
  let idx = rank.saturating_sub(1).min(n - 1);
  sorted[idx] as f64
}

/// ---------------------------------------------------------------------------
/// Grid
/// ---------------------------------------------------------------------------

/// Build the 52x7 grid ending with the week that contains `today`.
/// Days after `today` are marked future and ignored, even if `totals` has them.
pub fn year_activity(totals: &BTreeMap<NaiveDate, DailyTotal>, today: NaiveDate) -> YearActivity {
  let start = grid_start(today);

  let past: Vec<(&NaiveDate, &DailyTotal)> = totals.range(start..=today).collect();
  let durations: Vec<i64> = past.iter().map(|(_, t)| t.duration_seconds).collect();
  let scale = TierScale::from_durations(&durations);

  let stats = ActivityStats {
    active_days: durations.iter().filter(|d| **d > 0).count(),
    logged_days: past.iter().filter(|(_, t)| t.sessions > 0).count(),
    total_seconds: durations.iter().filter(|d| **d > 0).sum(),
    median_seconds: scale.map(|s| s.median),
    p95_seconds: scale.map(|s| s.p95),
  };

  let weeks: Vec<Vec<DayIntensity>> = (0..WEEKS)
    .map(|week| {
      (0..DAYS_PER_WEEK)
        .map(|weekday| {
          let date = start + Duration::days((week * DAYS_PER_WEEK + weekday) as i64);
          build_day(date, today, totals, scale.as_ref())
        })
        .collect()
    })
    .collect();

  let month_labels = month_labels(&weeks);

  tracing::debug!(
    start = %start,
    today = %today,
    active_days = stats.active_days,
    median = ?stats.median_seconds,
    p95 = ?stats.p95_seconds,
    "Computed year activity grid"
  );

  YearActivity {
    weeks,
    month_labels,
    stats,
  }
}

fn build_day(
  date: NaiveDate,
  today: NaiveDate,
  totals: &BTreeMap<NaiveDate, DailyTotal>,
  scale: Option<&TierScale>,
) -> DayIntensity {
  if date > today {
    return DayIntensity {
      date,
      is_future: true,
      has_session: false,
      duration_seconds: 0,
      tier: None,
    };
  }

  let total = totals.get(&date).copied().unwrap_or_default();
  let tier = scale.and_then(|s| s.tier(total.duration_seconds as f64));

  DayIntensity {
    date,
    is_future: false,
    has_session: total.sessions > 0,
    duration_seconds: total.duration_seconds,
    tier,
  }
}

/// One label per month, anchored at the first column whose Monday falls in it
fn month_labels(weeks: &[Vec<DayIntensity>]) -> Vec<MonthLabel> {
  let mut labels: Vec<MonthLabel> = Vec::new();

  for (column, week) in weeks.iter().enumerate() {
    let Some(first) = week.first() else { continue };
    let (year, month) = (first.date.year(), first.date.month());

    let seen = labels
      .iter()
      .any(|l| l.year == year && l.month == month);
    if !seen {
      labels.push(MonthLabel {
        column,
        year,
        month,
        label: first.date.format("%b").to_string(),
      });
    }
  }

  labels
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
