pub mod activity;
pub mod stats;
pub mod workout;

pub use activity::{ActivityStats, DayIntensity, IntensityTier, MonthLabel, YearActivity};
pub use stats::{
  ExerciseFrequency, ExerciseHighestLift, ExerciseHighestVolume, ExercisePersonalRecords,
  HighestVolumeSet, HighestWeightSet, TimeSeriesPoint,
};
pub use workout::{Exercise, ExerciseLog, SessionDuration, Workout, WorkoutLog, WorkoutSet};
