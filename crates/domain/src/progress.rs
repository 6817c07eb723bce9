use std::collections::BTreeMap;

use log::debug;

use crate::{ExerciseCatalog, MuscleGroup, ProgressSettings, Property, WorkoutLog};

pub const MAX_PROGRESS: f32 = 100.0;

/// Progress per muscle group in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupProgress(BTreeMap<MuscleGroup, f32>);

impl MuscleGroupProgress {
    /// Muscle groups missing in `values` start at zero.
    pub fn new(
        values: impl IntoIterator<Item = (MuscleGroup, f32)>,
    ) -> Result<Self, ProgressError> {
        let mut progress = Self::default();
        for (muscle_group, value) in values {
            if !(0.0..=MAX_PROGRESS).contains(&value) {
                return Err(ProgressError::OutOfRange(muscle_group, value));
            }
            progress.0.insert(muscle_group, value);
        }
        Ok(progress)
    }

    #[must_use]
    pub fn get(&self, muscle_group: MuscleGroup) -> f32 {
        self.0.get(&muscle_group).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, f32)> {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    #[must_use]
    pub fn overall(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let groups = MuscleGroup::iter().len() as f32;
        MuscleGroup::iter().map(|m| self.get(*m)).sum::<f32>() / groups
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = (self.overall() / 10.0).floor() as u32;
        level + 1
    }

    fn increase(&mut self, muscle_group: MuscleGroup, gain: f32) {
        let value = self.0.entry(muscle_group).or_default();
        *value = (*value + gain).min(MAX_PROGRESS);
    }
}

impl Default for MuscleGroupProgress {
    fn default() -> Self {
        Self(MuscleGroup::iter().map(|m| (*m, 0.0)).collect())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgressError {
    #[error("Progress of {0} must be in the range 0 to 100 ({1})")]
    OutOfRange(MuscleGroup, f32),
}

/// Training volume per muscle group. Exercises missing in the catalog are ignored.
#[must_use]
pub fn volume_per_muscle_group(
    log: &WorkoutLog,
    catalog: &ExerciseCatalog,
) -> BTreeMap<MuscleGroup, f32> {
    let mut result: BTreeMap<MuscleGroup, f32> = BTreeMap::new();
    for entry in &log.entries {
        match catalog.muscle_group(entry.exercise_id()) {
            Ok(muscle_group) => *result.entry(muscle_group).or_default() += entry.volume(),
            Err(err) => debug!("ignoring volume of workout log {:?}: {err}", log.id),
        }
    }
    result
}

/// Fold the volume of a completed workout into the progress using the default settings.
#[must_use]
pub fn apply_workout(
    log: &WorkoutLog,
    catalog: &ExerciseCatalog,
    current: &MuscleGroupProgress,
) -> MuscleGroupProgress {
    apply_workout_with(log, catalog, current, &ProgressSettings::default())
}

/// Each muscle group trained in the workout gains `min(max_gain_per_workout, volume /
/// volume_per_point)` points, capped at 100. Untrained groups remain unchanged.
#[must_use]
pub fn apply_workout_with(
    log: &WorkoutLog,
    catalog: &ExerciseCatalog,
    current: &MuscleGroupProgress,
    settings: &ProgressSettings,
) -> MuscleGroupProgress {
    let mut progress = current.clone();
    for (muscle_group, volume) in volume_per_muscle_group(log, catalog) {
        if volume > 0.0 {
            progress.increase(muscle_group, settings.gain(volume));
        }
    }
    progress
}
