//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Workout log builders
//! - Seeding helpers
//! - Helper assertions

use sqlx::SqlitePool;

use crate::models::{Exercise, ExerciseLog, Workout, WorkoutLog, WorkoutSet};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert workout logs with their explicit ids
pub async fn seed_logs(pool: &SqlitePool, logs: &[WorkoutLog]) {
  for log in logs {
    let w = &log.workout;
    sqlx::query(
      r#"
      INSERT INTO workouts (id, name, date, duration, notes, is_template, created_at, updated_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
      "#,
    )
    .bind(w.id)
    .bind(&w.name)
    .bind(w.date)
    .bind(w.duration)
    .bind(&w.notes)
    .bind(w.is_template)
    .bind(w.created_at)
    .bind(w.updated_at)
    .execute(pool)
    .await
    .expect("Failed to insert test workout");

    for entry in &log.exercises {
      let e = &entry.exercise;
      sqlx::query(
        r#"
        INSERT INTO exercises (id, workout_id, exercise_name, order_index, cardio_mode)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
      )
      .bind(e.id)
      .bind(e.workout_id)
      .bind(&e.exercise_name)
      .bind(e.order_index)
      .bind(&e.cardio_mode)
      .execute(pool)
      .await
      .expect("Failed to insert test exercise");

      for s in &entry.sets {
        sqlx::query(
          r#"
          INSERT INTO sets (id, exercise_id, set_number, reps, weight, duration, distance, is_completed)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
          "#,
        )
        .bind(s.id)
        .bind(s.exercise_id)
        .bind(s.set_number)
        .bind(s.reps)
        .bind(s.weight)
        .bind(s.duration)
        .bind(s.distance)
        .bind(s.is_completed)
        .execute(pool)
        .await
        .expect("Failed to insert test set");
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Log Builders
/// ---------------------------------------------------------------------------

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Epoch ms at the start of day `n` after the epoch
pub fn day(n: i64) -> i64 {
  n * DAY_MS
}

/// Completed strength set
pub fn set(reps: i64, weight: f64) -> WorkoutSet {
  WorkoutSet {
    id: 0,
    exercise_id: 0,
    set_number: 0,
    reps,
    weight,
    duration: None,
    distance: None,
    is_completed: true,
  }
}

pub fn incomplete_set(reps: i64, weight: f64) -> WorkoutSet {
  WorkoutSet {
    is_completed: false,
    ..set(reps, weight)
  }
}

/// Completed cardio set: duration in seconds, distance in meters
pub fn cardio_set(duration: i64, distance: f64) -> WorkoutSet {
  WorkoutSet {
    duration: Some(duration),
    distance: Some(distance),
    ..set(0, 0.0)
  }
}

/// Exercise with its sets; ids are filled in by `session`/`template`
pub fn exercise(name: &str, sets: Vec<WorkoutSet>) -> ExerciseLog {
  ExerciseLog {
    exercise: Exercise {
      id: 0,
      workout_id: 0,
      exercise_name: name.to_string(),
      order_index: 0,
      cardio_mode: None,
    },
    sets,
  }
}

/// Logged session. Exercise ids are `id * 100 + position`, set ids
/// `exercise_id * 100 + position`.
pub fn session(id: i64, date: i64, duration: Option<i64>, exercises: Vec<ExerciseLog>) -> WorkoutLog {
  build_log(id, date, duration, false, exercises)
}

/// Template dated at the epoch
pub fn template(id: i64, exercises: Vec<ExerciseLog>) -> WorkoutLog {
  build_log(id, 0, None, true, exercises)
}

fn build_log(
  id: i64,
  date: i64,
  duration: Option<i64>,
  is_template: bool,
  exercises: Vec<ExerciseLog>,
) -> WorkoutLog {
  let exercises = exercises
    .into_iter()
    .enumerate()
    .map(|(i, mut entry)| {
      let exercise_id = id * 100 + i as i64;
      entry.exercise.id = exercise_id;
      entry.exercise.workout_id = id;
      entry.exercise.order_index = i as i64;
      for (j, s) in entry.sets.iter_mut().enumerate() {
        s.id = exercise_id * 100 + j as i64;
        s.exercise_id = exercise_id;
        s.set_number = j as i64 + 1;
      }
      entry
    })
    .collect();

  WorkoutLog {
    workout: Workout {
      id,
      name: if is_template { format!("Template {}", id) } else { format!("Workout {}", id) },
      date,
      duration,
      notes: None,
      is_template,
      created_at: date,
      updated_at: date,
    },
    exercises,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('workouts', 'exercises', 'sets')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 3, "Expected 3 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_logs_inserts_nested_rows() {
    let pool = setup_test_db().await;

    let logs = vec![
      session(1, day(1), Some(1800), vec![exercise("Squat", vec![set(5, 100.0), set(5, 100.0)])]),
      template(2, vec![exercise("Row", vec![set(10, 50.0)])]),
    ];
    seed_logs(&pool, &logs).await;

    let counts: (i64, i64, i64) = sqlx::query_as(
      "SELECT (SELECT COUNT(*) FROM workouts), (SELECT COUNT(*) FROM exercises), (SELECT COUNT(*) FROM sets)"
    )
    .fetch_one(&pool)
    .await
    .expect("Failed to count rows");

    assert_eq!(counts, (2, 2, 3));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_builders_assign_ids() {
    let log = session(7, day(3), None, vec![
      exercise("Squat", vec![set(5, 100.0)]),
      exercise("Row", vec![set(8, 60.0), set(8, 60.0)]),
    ]);

    assert_eq!(log.exercises[1].exercise.id, 701);
    assert_eq!(log.exercises[1].exercise.workout_id, 7);
    assert_eq!(log.exercises[1].sets[1].id, 70101);
    assert_eq!(log.exercises[1].sets[1].set_number, 2);
    assert!(!template(8, vec![]).is_session());
  }

  #[test]
  fn test_volume_helper_precision() {
    let s = set(3, 33.3);
    assert_approx_eq!(s.volume(), 99.9, 1e-9);
  }
}
