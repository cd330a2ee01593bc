//! Aggregate rows and time-series points produced by the query engine

use serde::{Deserialize, Serialize};

/// Exercise ranked by the number of distinct sessions it appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
  pub exercise_name: String,
  pub workout_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestVolumeSet {
  pub exercise_name: String,
  pub reps: i64,
  pub weight: f64,
  pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestWeightSet {
  pub exercise_name: String,
  pub weight: f64,
  pub reps: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHighestLift {
  pub weight: f64,
  pub reps: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHighestVolume {
  pub reps: i64,
  pub weight: f64,
  pub volume: f64,
}

/// Personal records for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePersonalRecords {
  pub exercise_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub highest_lift: Option<ExerciseHighestLift>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub highest_volume: Option<ExerciseHighestVolume>,
}

/// One chart point per session. `date` is the workout's epoch ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
  pub workout_id: i64,
  pub date: i64,
  pub value: f64,
}
