//! Deterministic aggregation over the workout log
//!
//! Every function here is pure: it takes materialized workout logs plus an
//! optional `since` bound (epoch ms, inclusive) and returns plain rows or
//! chart points. The shared rules:
//! - templates never count, whatever their sets contain
//! - only completed sets count, and each metric additionally drops sets
//!   whose relevant value is zero (see `SetFilter`)
//! - time series carry one point per session, ascending by date
//!
//! Readers may pre-filter in the store, but these rules are re-applied here
//! so results do not depend on how the logs were fetched.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{
  Exercise, ExerciseFrequency, ExerciseHighestLift, ExerciseHighestVolume,
  ExercisePersonalRecords, HighestVolumeSet, HighestWeightSet, TimeSeriesPoint, Workout,
  WorkoutLog, WorkoutSet,
};

/// ---------------------------------------------------------------------------
/// Set Qualification
/// ---------------------------------------------------------------------------

/// Which completed sets a metric looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFilter {
  /// Any completed set (frequency, set counts)
  Completed,
  /// weight > 0 (max-weight queries)
  Weighted,
  /// reps > 0 (rep totals)
  Reps,
  /// weight > 0 and reps > 0 (volume queries)
  Volume,
  /// distance > 0 (cardio)
  Distance,
  /// duration > 0 (cardio)
  Duration,
}

impl SetFilter {
  pub fn accepts(&self, set: &WorkoutSet) -> bool {
    if !set.is_completed {
      return false;
    }

    match self {
      SetFilter::Completed => true,
      SetFilter::Weighted => set.weight > 0.0,
      SetFilter::Reps => set.reps > 0,
      SetFilter::Volume => set.weight > 0.0 && set.reps > 0,
      SetFilter::Distance => set.distance.map_or(false, |d| d > 0.0),
      SetFilter::Duration => set.duration.map_or(false, |d| d > 0),
    }
  }
}

/// A qualifying set together with its exercise and workout
#[derive(Debug, Clone, Copy)]
struct SetRef<'a> {
  workout: &'a Workout,
  exercise: &'a Exercise,
  set: &'a WorkoutSet,
}

fn qualifying_sets<'a>(
  logs: &'a [WorkoutLog],
  since: Option<i64>,
  filter: SetFilter,
  exercise_name: Option<&'a str>,
) -> impl Iterator<Item = SetRef<'a>> + 'a {
  logs
    .iter()
    .filter(move |log| log.in_window(since))
    .flat_map(move |log| {
      log
        .exercises
        .iter()
        .filter(move |e| exercise_name.map_or(true, |name| e.exercise.exercise_name == name))
        .flat_map(move |e| {
          e.sets
            .iter()
            .filter(move |s| filter.accepts(s))
            .map(move |set| SetRef {
              workout: &log.workout,
              exercise: &e.exercise,
              set,
            })
        })
    })
}

/// First set holding the maximum of `key`. Ties keep the earliest set in log order.
fn first_max<'a>(
  sets: impl Iterator<Item = SetRef<'a>>,
  key: impl Fn(&WorkoutSet) -> f64,
) -> Option<SetRef<'a>> {
  sets.fold(None, |best: Option<SetRef<'a>>, candidate| match best {
    Some(b) if key(b.set) >= key(candidate.set) => Some(b),
    _ => Some(candidate),
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduce {
  Sum,
  Max,
}

fn per_workout_series<'a>(
  sets: impl Iterator<Item = SetRef<'a>>,
  reduce: Reduce,
  value: impl Fn(&WorkoutSet) -> f64,
) -> Vec<TimeSeriesPoint> {
  // Keyed by (date, workout id): one entry per workout, already in date order
  let mut by_workout: BTreeMap<(i64, i64), f64> = BTreeMap::new();

  for r in sets {
    let v = value(r.set);
    by_workout
      .entry((r.workout.date, r.workout.id))
      .and_modify(|acc| match reduce {
        Reduce::Sum => *acc += v,
        Reduce::Max => *acc = acc.max(v),
      })
      .or_insert(v);
  }

  by_workout
    .into_iter()
    .map(|((date, workout_id), value)| TimeSeriesPoint {
      workout_id,
      date,
      value,
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Frequency
/// ---------------------------------------------------------------------------

/// Exercises ranked by distinct session count, descending, name ascending on ties
pub fn exercise_frequencies(logs: &[WorkoutLog], since: Option<i64>) -> Vec<ExerciseFrequency> {
  let mut workouts_by_name: HashMap<&str, HashSet<i64>> = HashMap::new();

  for r in qualifying_sets(logs, since, SetFilter::Completed, None) {
    workouts_by_name
      .entry(r.exercise.exercise_name.as_str())
      .or_default()
      .insert(r.workout.id);
  }

  let mut ranking: Vec<ExerciseFrequency> = workouts_by_name
    .into_iter()
    .map(|(name, workout_ids)| ExerciseFrequency {
      exercise_name: name.to_string(),
      workout_count: workout_ids.len() as i64,
    })
    .collect();

  ranking.sort_by(|a, b| {
    b.workout_count
      .cmp(&a.workout_count)
      .then_with(|| a.exercise_name.cmp(&b.exercise_name))
  });

  ranking
}

pub fn most_frequent_exercise(logs: &[WorkoutLog], since: Option<i64>) -> Option<ExerciseFrequency> {
  exercise_frequencies(logs, since).into_iter().next()
}

/// Exercise names for a picker, most frequent first
pub fn performed_exercise_names(logs: &[WorkoutLog], since: Option<i64>) -> Vec<String> {
  exercise_frequencies(logs, since)
    .into_iter()
    .map(|f| f.exercise_name)
    .collect()
}

/// ---------------------------------------------------------------------------
/// Best Sets
/// ---------------------------------------------------------------------------

pub fn highest_volume_set(logs: &[WorkoutLog], since: Option<i64>) -> Option<HighestVolumeSet> {
  first_max(qualifying_sets(logs, since, SetFilter::Volume, None), WorkoutSet::volume).map(|r| {
    HighestVolumeSet {
      exercise_name: r.exercise.exercise_name.clone(),
      reps: r.set.reps,
      weight: r.set.weight,
      volume: r.set.volume(),
    }
  })
}

pub fn highest_weight_set(logs: &[WorkoutLog], since: Option<i64>) -> Option<HighestWeightSet> {
  first_max(qualifying_sets(logs, since, SetFilter::Weighted, None), |s| s.weight).map(|r| {
    HighestWeightSet {
      exercise_name: r.exercise.exercise_name.clone(),
      weight: r.set.weight,
      reps: r.set.reps,
    }
  })
}

pub fn exercise_highest_lift(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Option<ExerciseHighestLift> {
  first_max(
    qualifying_sets(logs, since, SetFilter::Weighted, Some(exercise_name)),
    |s| s.weight,
  )
  .map(|r| ExerciseHighestLift {
    weight: r.set.weight,
    reps: r.set.reps,
  })
}

pub fn exercise_highest_volume_set(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Option<ExerciseHighestVolume> {
  first_max(
    qualifying_sets(logs, since, SetFilter::Volume, Some(exercise_name)),
    WorkoutSet::volume,
  )
  .map(|r| ExerciseHighestVolume {
    reps: r.set.reps,
    weight: r.set.weight,
    volume: r.set.volume(),
  })
}

pub fn exercise_personal_records(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Option<ExercisePersonalRecords> {
  let highest_lift = exercise_highest_lift(logs, exercise_name, since);
  let highest_volume = exercise_highest_volume_set(logs, exercise_name, since);

  if highest_lift.is_none() && highest_volume.is_none() {
    return None;
  }

  Some(ExercisePersonalRecords {
    exercise_name: exercise_name.to_string(),
    highest_lift,
    highest_volume,
  })
}

/// ---------------------------------------------------------------------------
/// Per-Exercise Series
/// ---------------------------------------------------------------------------

/// Heaviest qualifying set per session
pub fn weight_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Weighted, Some(exercise_name)),
    Reduce::Max,
    |s| s.weight,
  )
}

pub fn exercise_volume_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Volume, Some(exercise_name)),
    Reduce::Sum,
    WorkoutSet::volume,
  )
}

pub fn exercise_reps_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Reps, Some(exercise_name)),
    Reduce::Sum,
    |s| s.reps as f64,
  )
}

pub fn exercise_sets_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Completed, Some(exercise_name)),
    Reduce::Sum,
    |_| 1.0,
  )
}

pub fn exercise_distance_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Distance, Some(exercise_name)),
    Reduce::Sum,
    |s| s.distance.unwrap_or(0.0),
  )
}

/// Summed set duration (seconds) per session
pub fn exercise_cardio_duration_over_time(
  logs: &[WorkoutLog],
  exercise_name: &str,
  since: Option<i64>,
) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Duration, Some(exercise_name)),
    Reduce::Sum,
    |s| s.duration.unwrap_or(0) as f64,
  )
}

/// ---------------------------------------------------------------------------
/// Overview Series (all exercises)
/// ---------------------------------------------------------------------------

/// Session duration in seconds, from the workout itself rather than its sets
pub fn overview_duration(logs: &[WorkoutLog], since: Option<i64>) -> Vec<TimeSeriesPoint> {
  let mut points: Vec<TimeSeriesPoint> = logs
    .iter()
    .filter(|log| log.in_window(since))
    .filter_map(|log| match log.workout.duration {
      Some(d) if d > 0 => Some(TimeSeriesPoint {
        workout_id: log.workout.id,
        date: log.workout.date,
        value: d as f64,
      }),
      _ => None,
    })
    .collect();

  points.sort_by_key(|p| (p.date, p.workout_id));
  points.dedup_by_key(|p| p.workout_id);
  points
}

pub fn overview_total_volume(logs: &[WorkoutLog], since: Option<i64>) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Volume, None),
    Reduce::Sum,
    WorkoutSet::volume,
  )
}

pub fn overview_total_reps(logs: &[WorkoutLog], since: Option<i64>) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Reps, None),
    Reduce::Sum,
    |s| s.reps as f64,
  )
}

pub fn overview_total_sets(logs: &[WorkoutLog], since: Option<i64>) -> Vec<TimeSeriesPoint> {
  per_workout_series(
    qualifying_sets(logs, since, SetFilter::Completed, None),
    Reduce::Sum,
    |_| 1.0,
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
