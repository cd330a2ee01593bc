use serde::{Deserialize, Serialize};

/// Workout row. `date`, `created_at` and `updated_at` are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub name: String,
  pub date: i64,
  pub duration: Option<i64>,
  pub notes: Option<String>,
  pub is_template: bool,
  pub created_at: i64,
  pub updated_at: i64,
}

/// Exercise row. `exercise_name` is the aggregation key, compared exactly
/// (case and whitespace included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
  pub id: i64,
  pub workout_id: i64,
  pub exercise_name: String,
  pub order_index: i64,
  /// Stored mode string (`time`, `distance`, `time_distance`); not interpreted here
  pub cardio_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSet {
  pub id: i64,
  pub exercise_id: i64,
  pub set_number: i64,
  pub reps: i64,
  pub weight: f64,
  /// Seconds, cardio only
  pub duration: Option<i64>,
  pub distance: Option<f64>,
  pub is_completed: bool,
}

impl WorkoutSet {
  pub fn volume(&self) -> f64 {
    self.reps as f64 * self.weight
  }
}

/// Date and duration of one session, as read for the activity grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionDuration {
  pub date: i64,
  pub duration: Option<i64>,
}

/// ---------------------------------------------------------------------------
/// Nested log shape handed to the aggregation layer
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
  pub exercise: Exercise,
  pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
  pub workout: Workout,
  pub exercises: Vec<ExerciseLog>,
}

impl WorkoutLog {
  /// A logged session, as opposed to a template
  pub fn is_session(&self) -> bool {
    !self.workout.is_template
  }

  /// Session dated at or after `since` (no bound when `None`)
  pub fn in_window(&self, since: Option<i64>) -> bool {
    self.is_session() && since.map_or(true, |t| self.workout.date >= t)
  }
}
