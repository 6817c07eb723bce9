use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    ExerciseCatalog, ExerciseID, Gender, MuscleGroupProgress, ProgressSettings, StrengthError,
    StrengthRank, StrengthStandards, WorkoutLog, WorkoutSet, apply_workout_with,
};

/// Immutable state of the user's progress.
///
/// Personal bests and strength ranks can only be changed together, so a rank always
/// belongs to the current personal best of its exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressSnapshot {
    muscle_groups: MuscleGroupProgress,
    personal_bests: BTreeMap<ExerciseID, WorkoutSet>,
    strength_ranks: BTreeMap<ExerciseID, StrengthRank>,
}

impl ProgressSnapshot {
    /// Rebuild a snapshot from stored values. Ranks are derived again from the personal bests.
    ///
    /// Personal bests of exercises missing in the catalog are dropped. Without a gender the
    /// personal bests are kept unranked, and `rerank` assigns their ranks once it is known.
    pub fn restore(
        muscle_groups: MuscleGroupProgress,
        personal_bests: impl IntoIterator<Item = WorkoutSet>,
        catalog: &ExerciseCatalog,
        standards: &StrengthStandards,
        gender: Option<Gender>,
    ) -> (Self, Vec<StrengthError>) {
        let mut snapshot = Self {
            muscle_groups,
            ..Self::default()
        };
        let mut skipped = vec![];
        for set in personal_bests {
            let exercise_id = set.exercise_id();
            if catalog.get(exercise_id).is_none() {
                skipped.push(StrengthError::skipped(
                    exercise_id.clone(),
                    StrengthError::UnknownExercise(exercise_id.clone()),
                ));
                continue;
            }
            if snapshot
                .personal_bests
                .get(exercise_id)
                .is_none_or(|personal_best| set.one_rep_max() > personal_best.one_rep_max())
            {
                snapshot.personal_bests.insert(exercise_id.clone(), set);
            }
        }
        skipped.extend(snapshot.rerank(standards, gender));
        (snapshot, skipped)
    }

    /// Snapshot with all ranks derived again from the personal bests, e.g. after the gender
    /// of the user changed.
    ///
    /// Ranked exercises remain unranked if no gender is given.
    #[must_use]
    pub fn with_ranks(
        &self,
        standards: &StrengthStandards,
        gender: Option<Gender>,
    ) -> (Self, Vec<StrengthError>) {
        let mut snapshot = self.clone();
        let skipped = snapshot.rerank(standards, gender);
        (snapshot, skipped)
    }

    #[must_use]
    pub fn muscle_groups(&self) -> &MuscleGroupProgress {
        &self.muscle_groups
    }

    #[must_use]
    pub fn personal_best(&self, exercise_id: &ExerciseID) -> Option<&WorkoutSet> {
        self.personal_bests.get(exercise_id)
    }

    pub fn personal_bests(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.personal_bests.values()
    }

    #[must_use]
    pub fn rank(&self, exercise_id: &ExerciseID) -> Option<StrengthRank> {
        self.strength_ranks.get(exercise_id).copied()
    }

    /// Rank of the exercise, E if it has not been ranked yet.
    #[must_use]
    pub fn rank_or_default(&self, exercise_id: &ExerciseID) -> StrengthRank {
        self.rank(exercise_id).unwrap_or(StrengthRank::E)
    }

    pub fn strength_ranks(&self) -> impl Iterator<Item = (&ExerciseID, StrengthRank)> {
        self.strength_ranks.iter().map(|(id, rank)| (id, *rank))
    }

    /// Snapshot after applying a completed workout.
    ///
    /// Muscle group progress is always updated. Personal best updates that fail are skipped
    /// for the affected exercise only and returned as `PartialUpdateSkipped`.
    #[must_use]
    pub fn with_workout(
        &self,
        log: &WorkoutLog,
        catalog: &ExerciseCatalog,
        standards: &StrengthStandards,
        settings: &ProgressSettings,
        gender: Option<Gender>,
    ) -> (Self, Vec<StrengthError>) {
        let mut snapshot = Self {
            muscle_groups: apply_workout_with(log, catalog, &self.muscle_groups, settings),
            personal_bests: self.personal_bests.clone(),
            strength_ranks: self.strength_ranks.clone(),
        };
        let mut skipped = vec![];
        for entry in &log.entries {
            if let Some(set) = entry.best_set() {
                if let Err(err) = snapshot.consider(set, catalog, standards, gender) {
                    skipped.push(StrengthError::skipped(entry.exercise_id().clone(), err));
                }
            }
        }
        (snapshot, skipped)
    }

    fn rerank(
        &mut self,
        standards: &StrengthStandards,
        gender: Option<Gender>,
    ) -> Vec<StrengthError> {
        let mut skipped = vec![];
        self.strength_ranks.clear();
        for (exercise_id, personal_best) in &self.personal_bests {
            if !standards.contains(exercise_id) {
                continue;
            }
            match gender
                .ok_or(StrengthError::MissingGender)
                .and_then(|g| standards.classify(exercise_id, personal_best.one_rep_max(), g))
            {
                Ok(rank) => {
                    self.strength_ranks.insert(exercise_id.clone(), rank);
                }
                Err(err) => skipped.push(StrengthError::skipped(exercise_id.clone(), err)),
            }
        }
        skipped
    }

    fn consider(
        &mut self,
        set: &WorkoutSet,
        catalog: &ExerciseCatalog,
        standards: &StrengthStandards,
        gender: Option<Gender>,
    ) -> Result<bool, StrengthError> {
        let exercise_id = set.exercise_id();

        if catalog.get(exercise_id).is_none() {
            return Err(StrengthError::UnknownExercise(exercise_id.clone()));
        }

        if let Some(personal_best) = self.personal_bests.get(exercise_id) {
            if set.one_rep_max() <= personal_best.one_rep_max() {
                return Ok(false);
            }
        }

        let rank = if standards.contains(exercise_id) {
            let gender = gender.ok_or(StrengthError::MissingGender)?;
            Some(standards.classify(exercise_id, set.one_rep_max(), gender)?)
        } else {
            None
        };

        debug!(
            "new personal best of {exercise_id}: {:.1} kg",
            set.one_rep_max()
        );

        self.personal_bests.insert(exercise_id.clone(), set.clone());
        match rank {
            Some(rank) => self.strength_ranks.insert(exercise_id.clone(), rank),
            None => self.strength_ranks.remove(exercise_id),
        };

        Ok(true)
    }
}

/// Owner of the current progress snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStore {
    snapshot: ProgressSnapshot,
    standards: StrengthStandards,
    settings: ProgressSettings,
}

impl ProgressStore {
    #[must_use]
    pub fn new(standards: StrengthStandards, settings: ProgressSettings) -> Self {
        Self::with_snapshot(ProgressSnapshot::default(), standards, settings)
    }

    #[must_use]
    pub fn with_snapshot(
        snapshot: ProgressSnapshot,
        standards: StrengthStandards,
        settings: ProgressSettings,
    ) -> Self {
        Self {
            snapshot,
            standards,
            settings,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn standards(&self) -> &StrengthStandards {
        &self.standards
    }

    #[must_use]
    pub fn settings(&self) -> &ProgressSettings {
        &self.settings
    }

    /// Apply a completed workout and replace the snapshot in one step.
    pub fn apply_workout(
        &mut self,
        log: &WorkoutLog,
        catalog: &ExerciseCatalog,
        gender: Option<Gender>,
    ) -> Vec<StrengthError> {
        let (snapshot, skipped) =
            self.snapshot
                .with_workout(log, catalog, &self.standards, &self.settings, gender);
        for err in &skipped {
            warn!("{err}");
        }
        self.snapshot = snapshot;
        skipped
    }

    /// Check a single set for a new personal best.
    pub fn record_set(
        &mut self,
        set: &WorkoutSet,
        catalog: &ExerciseCatalog,
        gender: Option<Gender>,
    ) -> Result<bool, StrengthError> {
        let mut snapshot = self.snapshot.clone();
        match snapshot.consider(set, catalog, &self.standards, gender) {
            Ok(updated) => {
                if updated {
                    self.snapshot = snapshot;
                }
                Ok(updated)
            }
            Err(err) => {
                let err = StrengthError::skipped(set.exercise_id().clone(), err);
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Derive all ranks again for the given gender.
    pub fn rerank(&mut self, gender: Option<Gender>) -> Vec<StrengthError> {
        let (snapshot, skipped) = self.snapshot.with_ranks(&self.standards, gender);
        for err in &skipped {
            warn!("{err}");
        }
        self.snapshot = snapshot;
        skipped
    }

    pub fn reset(&mut self) {
        self.snapshot = ProgressSnapshot::default();
    }
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(StrengthStandards::default(), ProgressSettings::default())
    }
}
