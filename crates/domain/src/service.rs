use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error, info};

use crate::{
    ExerciseCatalog, ExerciseID, Gender, ProfileUpdate, ProgressSnapshot, ProgressStore, Reps,
    StrengthError, StrengthRank, User, UserError, Weight, WeightUnit, WorkoutEntry, WorkoutError,
    WorkoutJournal, WorkoutLog, WorkoutLogID, WorkoutSet, format_weight,
};

/// Application state of a single user.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tracker {
    catalog: ExerciseCatalog,
    journal: WorkoutJournal,
    user: Option<User>,
    store: ProgressStore,
}

/// Result of adding a set to a workout log.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSet {
    pub set: WorkoutSet,
    /// Whether the set is a new personal best, or why the check was skipped.
    pub personal_best: Result<bool, StrengthError>,
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::NotFound(_) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl Tracker {
    #[must_use]
    pub fn new(catalog: ExerciseCatalog, store: ProgressStore) -> Self {
        Self {
            catalog,
            journal: WorkoutJournal::default(),
            user: None,
            store,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ExerciseCatalog {
        &mut self.catalog
    }

    #[must_use]
    pub fn journal(&self) -> &WorkoutJournal {
        &self.journal
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressSnapshot {
        self.store.snapshot()
    }

    /// Set the current user. Ranks are derived again if the gender differs from the one
    /// used so far.
    pub fn log_in(&mut self, user: User) -> Vec<StrengthError> {
        info!("logged in as {}", user.name);
        let previous_gender = self.gender();
        let gender = user.gender;
        self.user = Some(user);
        self.rerank_on_gender_change(previous_gender, gender)
    }

    pub fn update_profile(
        &mut self,
        update: ProfileUpdate,
    ) -> Result<Vec<StrengthError>, UserError> {
        let user = self.user.as_mut().ok_or(UserError::NotLoggedIn)?;
        let previous_gender = user.gender;
        user.update(update);
        let gender = user.gender;
        debug!("updated profile of {}", user.name);
        Ok(self.rerank_on_gender_change(Some(previous_gender), gender))
    }

    /// Forget the user and reset the progress.
    pub fn log_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("logged out {}", user.name);
        }
        self.store.reset();
    }

    /// Add a completed workout to the journal and fold it into the progress.
    ///
    /// Personal best updates that had to be skipped are returned, the workout itself is
    /// always saved.
    pub fn save_workout(
        &mut self,
        date: NaiveDate,
        entries: Vec<WorkoutEntry>,
        notes: Option<String>,
    ) -> (WorkoutLogID, Vec<StrengthError>) {
        let gender = self.gender();
        let log = self.journal.add_log(date, entries, notes);
        let skipped = self.store.apply_workout(log, &self.catalog, gender);
        info!(
            "saved workout {:?} on {date} ({} sets, {:.0} kg volume)",
            log.id,
            log.num_sets(),
            log.volume()
        );
        (log.id, skipped)
    }

    pub fn add_set(
        &mut self,
        log_id: WorkoutLogID,
        exercise_id: &ExerciseID,
        weight: Weight,
        reps: Reps,
        timestamp: NaiveDateTime,
    ) -> Result<RecordedSet, WorkoutError> {
        let set = log_on_error!(
            self.journal
                .add_set(log_id, exercise_id, weight, reps, timestamp),
            WorkoutError,
            "add",
            "set"
        )?;
        let gender = self.gender();
        let personal_best = self.store.record_set(&set, &self.catalog, gender);
        Ok(RecordedSet { set, personal_best })
    }

    pub fn update_notes(
        &mut self,
        log_id: WorkoutLogID,
        notes: Option<String>,
    ) -> Result<&WorkoutLog, WorkoutError> {
        log_on_error!(
            self.journal.update_notes(log_id, notes),
            WorkoutError,
            "update",
            "workout notes"
        )
    }

    /// Remove a workout from the journal. The progress gained by it is kept.
    pub fn delete_workout(&mut self, log_id: WorkoutLogID) -> Result<WorkoutLog, WorkoutError> {
        let log = log_on_error!(
            self.journal.delete_log(log_id),
            WorkoutError,
            "delete",
            "workout"
        )?;
        info!("deleted workout {log_id:?} on {}", log.date);
        Ok(log)
    }

    #[must_use]
    pub fn recent_workouts(&self) -> Vec<&WorkoutLog> {
        self.journal.recent(WorkoutJournal::DEFAULT_RECENT_LIMIT)
    }

    #[must_use]
    pub fn rank(&self, exercise_id: &ExerciseID) -> StrengthRank {
        self.progress().rank_or_default(exercise_id)
    }

    /// Next rank of the exercise and the one-rep-max required to reach it.
    pub fn next_rank_target(
        &self,
        exercise_id: &ExerciseID,
    ) -> Result<Option<(StrengthRank, f32)>, StrengthError> {
        let gender = self.gender().ok_or(StrengthError::MissingGender)?;
        let standards = self.store.standards();
        match self.progress().personal_best(exercise_id) {
            Some(set) => standards.next_rank_target(exercise_id, set.one_rep_max(), gender),
            None => Ok(standards
                .thresholds(exercise_id, gender)?
                .get(StrengthRank::D)
                .map(|t| (StrengthRank::D, t))),
        }
    }

    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.user
            .as_ref()
            .map(|u| u.weight_unit)
            .unwrap_or_default()
    }

    /// Format a weight given in kg in the unit preferred by the user.
    #[must_use]
    pub fn format_weight(&self, kg: f32) -> String {
        format_weight(kg, self.weight_unit())
    }

    fn gender(&self) -> Option<Gender> {
        self.user.as_ref().map(|u| u.gender)
    }

    fn rerank_on_gender_change(
        &mut self,
        previous: Option<Gender>,
        gender: Gender,
    ) -> Vec<StrengthError> {
        if previous == Some(gender) {
            return vec![];
        }
        info!("deriving strength ranks for gender {gender}");
        self.store.rerank(Some(gender))
    }
}
