//! Read access to the workout store
//!
//! The statistics layer never writes. Everything it needs goes through
//! `SessionLog`, so the engine can run against SQLite or an in-memory log.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::db::DbPool;
use crate::error::StatsError;
use crate::models::{Exercise, ExerciseLog, SessionDuration, Workout, WorkoutLog, WorkoutSet};

/// Which workouts a read should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkoutFilter {
  pub include_templates: bool,
  /// Inclusive lower bound on workout date (epoch ms)
  pub since: Option<i64>,
}

impl WorkoutFilter {
  /// Logged sessions only, optionally bounded below
  pub fn sessions(since: Option<i64>) -> Self {
    Self {
      include_templates: false,
      since,
    }
  }

  pub fn matches(&self, workout: &Workout) -> bool {
    (self.include_templates || !workout.is_template) && self.since.map_or(true, |t| workout.date >= t)
  }
}

#[async_trait]
pub trait SessionLog: Send + Sync {
  /// Workouts with their exercises and sets, ascending by date then id.
  /// Exercises follow `order_index`, sets follow `set_number`.
  async fn workouts(&self, filter: &WorkoutFilter) -> Result<Vec<WorkoutLog>, StatsError>;

  /// Non-template sessions dated in `[from, until)` (epoch ms)
  async fn session_durations(&self, from: i64, until: i64) -> Result<Vec<SessionDuration>, StatsError>;
}

/// ---------------------------------------------------------------------------
/// SQLite
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteSessionLog {
  pool: DbPool,
}

impl SqliteSessionLog {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SessionLog for SqliteSessionLog {
  async fn workouts(&self, filter: &WorkoutFilter) -> Result<Vec<WorkoutLog>, StatsError> {
    let workouts = sqlx::query_as::<_, Workout>(
      r#"
      SELECT id, name, date, duration, notes, is_template, created_at, updated_at
      FROM workouts
      WHERE (?1 OR is_template = 0)
        AND (?2 IS NULL OR date >= ?2)
      ORDER BY date, id
      "#,
    )
    .bind(filter.include_templates)
    .bind(filter.since)
    .fetch_all(&self.pool)
    .await?;

    if workouts.is_empty() {
      return Ok(Vec::new());
    }

    let exercises = sqlx::query_as::<_, Exercise>(
      r#"
      SELECT e.id, e.workout_id, e.exercise_name, e.order_index, e.cardio_mode
      FROM exercises e
      JOIN workouts w ON w.id = e.workout_id
      WHERE (?1 OR w.is_template = 0)
        AND (?2 IS NULL OR w.date >= ?2)
      ORDER BY e.workout_id, e.order_index, e.id
      "#,
    )
    .bind(filter.include_templates)
    .bind(filter.since)
    .fetch_all(&self.pool)
    .await?;

    let sets = sqlx::query_as::<_, WorkoutSet>(
      r#"
      SELECT s.id, s.exercise_id, s.set_number, s.reps, s.weight,
             s.duration, s.distance, s.is_completed
      FROM sets s
      JOIN exercises e ON e.id = s.exercise_id
      JOIN workouts w ON w.id = e.workout_id
      WHERE (?1 OR w.is_template = 0)
        AND (?2 IS NULL OR w.date >= ?2)
      ORDER BY s.exercise_id, s.set_number, s.id
      "#,
    )
    .bind(filter.include_templates)
    .bind(filter.since)
    .fetch_all(&self.pool)
    .await?;

    tracing::debug!(
      workouts = workouts.len(),
      exercises = exercises.len(),
      sets = sets.len(),
      since = ?filter.since,
      "Loaded workout log"
    );

    Ok(assemble(workouts, exercises, sets))
  }

  async fn session_durations(&self, from: i64, until: i64) -> Result<Vec<SessionDuration>, StatsError> {
    let rows = sqlx::query_as::<_, SessionDuration>(
      r#"
      SELECT date, duration
      FROM workouts
      WHERE is_template = 0 AND date >= ?1 AND date < ?2
      ORDER BY date
      "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(&self.pool)
    .await?;

    tracing::debug!(sessions = rows.len(), from, until, "Loaded session durations");

    Ok(rows)
  }
}

/// Nest flat rows. Input rows must already be in output order.
fn assemble(workouts: Vec<Workout>, exercises: Vec<Exercise>, sets: Vec<WorkoutSet>) -> Vec<WorkoutLog> {
  let mut sets_by_exercise: HashMap<i64, Vec<WorkoutSet>> = HashMap::new();
  for set in sets {
    sets_by_exercise.entry(set.exercise_id).or_default().push(set);
  }

  let mut exercises_by_workout: HashMap<i64, Vec<ExerciseLog>> = HashMap::new();
  for exercise in exercises {
    let sets = sets_by_exercise.remove(&exercise.id).unwrap_or_default();
    exercises_by_workout
      .entry(exercise.workout_id)
      .or_default()
      .push(ExerciseLog { exercise, sets });
  }

  workouts
    .into_iter()
    .map(|workout| {
      let exercises = exercises_by_workout.remove(&workout.id).unwrap_or_default();
      WorkoutLog { workout, exercises }
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// In-Memory
/// ---------------------------------------------------------------------------

/// Session log held in memory, filtered the same way as the SQLite reader
#[derive(Debug, Clone, Default)]
pub struct MemorySessionLog {
  logs: Vec<WorkoutLog>,
}

impl MemorySessionLog {
  pub fn new(mut logs: Vec<WorkoutLog>) -> Self {
    logs.sort_by_key(|l| (l.workout.date, l.workout.id));
    for log in &mut logs {
      log.exercises.sort_by_key(|e| (e.exercise.order_index, e.exercise.id));
      for exercise in &mut log.exercises {
        exercise.sets.sort_by_key(|s| (s.set_number, s.id));
      }
    }
    Self { logs }
  }
}

#[async_trait]
impl SessionLog for MemorySessionLog {
  async fn workouts(&self, filter: &WorkoutFilter) -> Result<Vec<WorkoutLog>, StatsError> {
    Ok(
      self
        .logs
        .iter()
        .filter(|l| filter.matches(&l.workout))
        .cloned()
        .collect(),
    )
  }

  async fn session_durations(&self, from: i64, until: i64) -> Result<Vec<SessionDuration>, StatsError> {
    Ok(
      self
        .logs
        .iter()
        .filter(|l| !l.workout.is_template && l.workout.date >= from && l.workout.date < until)
        .map(|l| SessionDuration {
          date: l.workout.date,
          duration: l.workout.duration,
        })
        .collect(),
    )
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
