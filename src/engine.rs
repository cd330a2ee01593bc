//! Query surface for the presentation layer
//!
//! `StatsEngine` owns a `SessionLog` and answers each question with one
//! independent read followed by pure aggregation (`stats`, `activity`).
//! Store failures propagate unchanged; missing data is `None` or empty.

use chrono::{DateTime, Duration, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::activity;
use crate::error::StatsError;
use crate::models::{
  ExerciseFrequency, ExerciseHighestLift, ExerciseHighestVolume, ExercisePersonalRecords,
  HighestVolumeSet, HighestWeightSet, TimeSeriesPoint, WorkoutLog, YearActivity,
};
use crate::stats;
use crate::store::{SessionLog, WorkoutFilter};

/// Headline aggregates for a stats screen, fetched concurrently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub most_frequent_exercise: Option<ExerciseFrequency>,
  pub highest_volume_set: Option<HighestVolumeSet>,
  pub highest_weight_set: Option<HighestWeightSet>,
  pub top_exercises: Vec<ExerciseFrequency>,
}

pub struct StatsEngine<L> {
  log: L,
}

impl<L: SessionLog> StatsEngine<L> {
  pub fn new(log: L) -> Self {
    Self { log }
  }

  async fn sessions(&self, since: Option<i64>) -> Result<Vec<WorkoutLog>, StatsError> {
    self.log.workouts(&WorkoutFilter::sessions(since)).await
  }
}

/// ---------------------------------------------------------------------------
/// Whole-Log Aggregates
/// ---------------------------------------------------------------------------

impl<L: SessionLog> StatsEngine<L> {
  pub async fn most_frequent_exercise(
    &self,
    since: Option<i64>,
  ) -> Result<Option<ExerciseFrequency>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::most_frequent_exercise(&logs, since))
  }

  pub async fn highest_volume_set(&self, since: Option<i64>) -> Result<Option<HighestVolumeSet>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::highest_volume_set(&logs, since))
  }

  pub async fn highest_weight_set(&self, since: Option<i64>) -> Result<Option<HighestWeightSet>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::highest_weight_set(&logs, since))
  }

  pub async fn performed_exercise_names(&self, since: Option<i64>) -> Result<Vec<String>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::performed_exercise_names(&logs, since))
  }

  pub async fn top_exercises_by_frequency(
    &self,
    since: Option<i64>,
  ) -> Result<Vec<ExerciseFrequency>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_frequencies(&logs, since))
  }

  pub async fn dashboard(&self, since: Option<i64>) -> Result<Dashboard, StatsError> {
    let (most_frequent_exercise, highest_volume_set, highest_weight_set, top_exercises) = tokio::try_join!(
      self.most_frequent_exercise(since),
      self.highest_volume_set(since),
      self.highest_weight_set(since),
      self.top_exercises_by_frequency(since),
    )?;

    Ok(Dashboard {
      most_frequent_exercise,
      highest_volume_set,
      highest_weight_set,
      top_exercises,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Per-Exercise Records and Series
/// ---------------------------------------------------------------------------

impl<L: SessionLog> StatsEngine<L> {
  pub async fn exercise_highest_lift(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Option<ExerciseHighestLift>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_highest_lift(&logs, exercise_name, since))
  }

  pub async fn exercise_highest_volume_set(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Option<ExerciseHighestVolume>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_highest_volume_set(&logs, exercise_name, since))
  }

  pub async fn exercise_personal_records(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Option<ExercisePersonalRecords>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_personal_records(&logs, exercise_name, since))
  }

  pub async fn weight_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::weight_over_time(&logs, exercise_name, since))
  }

  pub async fn exercise_volume_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_volume_over_time(&logs, exercise_name, since))
  }

  pub async fn exercise_reps_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_reps_over_time(&logs, exercise_name, since))
  }

  pub async fn exercise_sets_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_sets_over_time(&logs, exercise_name, since))
  }

  pub async fn exercise_distance_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_distance_over_time(&logs, exercise_name, since))
  }

  pub async fn exercise_cardio_duration_over_time(
    &self,
    exercise_name: &str,
    since: Option<i64>,
  ) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::exercise_cardio_duration_over_time(&logs, exercise_name, since))
  }
}

/// ---------------------------------------------------------------------------
/// Overview Series
/// ---------------------------------------------------------------------------

impl<L: SessionLog> StatsEngine<L> {
  pub async fn overview_duration(&self, since: Option<i64>) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::overview_duration(&logs, since))
  }

  pub async fn overview_total_volume(&self, since: Option<i64>) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::overview_total_volume(&logs, since))
  }

  pub async fn overview_total_reps(&self, since: Option<i64>) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::overview_total_reps(&logs, since))
  }

  pub async fn overview_total_sets(&self, since: Option<i64>) -> Result<Vec<TimeSeriesPoint>, StatsError> {
    let logs = self.sessions(since).await?;
    Ok(stats::overview_total_sets(&logs, since))
  }
}

/// ---------------------------------------------------------------------------
/// Year Activity
/// ---------------------------------------------------------------------------

impl<L: SessionLog> StatsEngine<L> {
  /// Activity grid for the current local date
  pub async fn year_activity(&self) -> Result<YearActivity, StatsError> {
    self.year_activity_at(Local::now()).await
  }

  /// Activity grid as seen at `now`, with day boundaries in `now`'s time zone
  pub async fn year_activity_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<YearActivity, StatsError> {
    let tz = now.timezone();
    let today = now.date_naive();

    let from = activity::local_midnight_ms(activity::grid_start(today), &tz);
    let until = activity::local_midnight_ms(today + Duration::days(1), &tz);

    let sessions = self.log.session_durations(from, until).await?;
    let totals = activity::daily_totals(&sessions, &tz);

    Ok(activity::year_activity(&totals, today))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
