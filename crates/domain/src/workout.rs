use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::{ExerciseID, InputError, Reps, Weight, WorkoutError, estimate, volume};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    id: WorkoutSetID,
    exercise_id: ExerciseID,
    weight: Weight,
    reps: Reps,
    timestamp: NaiveDateTime,
    one_rep_max: f32,
}

impl WorkoutSet {
    /// The one-rep-max is derived here and cannot be changed afterwards.
    pub fn new(
        id: WorkoutSetID,
        exercise_id: ExerciseID,
        weight: Weight,
        reps: Reps,
        timestamp: NaiveDateTime,
    ) -> Result<Self, InputError> {
        let one_rep_max = estimate(weight.into(), reps.into())?;
        Ok(Self {
            id,
            exercise_id,
            weight,
            reps,
            timestamp,
            one_rep_max,
        })
    }

    #[must_use]
    pub fn id(&self) -> WorkoutSetID {
        self.id
    }

    #[must_use]
    pub fn exercise_id(&self) -> &ExerciseID {
        &self.exercise_id
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn reps(&self) -> Reps {
        self.reps
    }

    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[must_use]
    pub fn one_rep_max(&self) -> f32 {
        self.one_rep_max
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        volume(self.weight, self.reps)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSetID(Uuid);

impl WorkoutSetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutSetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    exercise_id: ExerciseID,
    sets: Vec<WorkoutSet>,
}

impl WorkoutEntry {
    /// All sets must belong to the exercise of the entry.
    pub fn new(exercise_id: ExerciseID, sets: Vec<WorkoutSet>) -> Result<Self, WorkoutError> {
        if let Some(set) = sets.iter().find(|s| s.exercise_id != exercise_id) {
            return Err(WorkoutError::MismatchedSet {
                entry: exercise_id,
                set: set.exercise_id.clone(),
            });
        }

        Ok(Self { exercise_id, sets })
    }

    #[must_use]
    pub fn exercise_id(&self) -> &ExerciseID {
        &self.exercise_id
    }

    #[must_use]
    pub fn sets(&self) -> &[WorkoutSet] {
        &self.sets
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }

    /// Set with the highest one-rep-max, the earliest one on ties.
    #[must_use]
    pub fn best_set(&self) -> Option<&WorkoutSet> {
        self.sets.iter().reduce(|best, set| {
            if set.one_rep_max > best.one_rep_max {
                set
            } else {
                best
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub date: NaiveDate,
    pub entries: Vec<WorkoutEntry>,
    pub notes: Option<String>,
}

impl WorkoutLog {
    #[must_use]
    pub fn exercises(&self) -> BTreeSet<ExerciseID> {
        self.entries
            .iter()
            .map(|e| e.exercise_id.clone())
            .collect::<BTreeSet<_>>()
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.entries.iter().map(WorkoutEntry::volume).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.entries.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutJournal {
    logs: Vec<WorkoutLog>,
}

impl WorkoutJournal {
    pub const DEFAULT_RECENT_LIMIT: usize = 5;

    pub fn add_log(
        &mut self,
        date: NaiveDate,
        entries: Vec<WorkoutEntry>,
        notes: Option<String>,
    ) -> &WorkoutLog {
        let log = WorkoutLog {
            id: Uuid::new_v4().into(),
            date,
            entries,
            notes,
        };
        debug!("added workout log {:?} on {date}", log.id);
        self.logs.push(log);
        &self.logs[self.logs.len() - 1]
    }

    /// Append a set to the entry of the given exercise, creating the entry if necessary.
    pub fn add_set(
        &mut self,
        log_id: WorkoutLogID,
        exercise_id: &ExerciseID,
        weight: Weight,
        reps: Reps,
        timestamp: NaiveDateTime,
    ) -> Result<WorkoutSet, WorkoutError> {
        let log = self.get_mut(log_id)?;
        let set = WorkoutSet::new(
            Uuid::new_v4().into(),
            exercise_id.clone(),
            weight,
            reps,
            timestamp,
        )?;
        if let Some(entry) = log
            .entries
            .iter_mut()
            .find(|e| e.exercise_id == *exercise_id)
        {
            entry.sets.push(set.clone());
        } else {
            log.entries.push(WorkoutEntry {
                exercise_id: exercise_id.clone(),
                sets: vec![set.clone()],
            });
        }
        Ok(set)
    }

    pub fn update_notes(
        &mut self,
        log_id: WorkoutLogID,
        notes: Option<String>,
    ) -> Result<&WorkoutLog, WorkoutError> {
        let log = self.get_mut(log_id)?;
        log.notes = notes;
        Ok(log)
    }

    pub fn delete_log(&mut self, log_id: WorkoutLogID) -> Result<WorkoutLog, WorkoutError> {
        let idx = self
            .logs
            .iter()
            .position(|l| l.id == log_id)
            .ok_or(WorkoutError::NotFound(log_id))?;
        Ok(self.logs.remove(idx))
    }

    #[must_use]
    pub fn get(&self, log_id: WorkoutLogID) -> Option<&WorkoutLog> {
        self.logs.iter().find(|l| l.id == log_id)
    }

    /// Most recent logs first, logs of the same day in the order they were added.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&WorkoutLog> {
        let mut logs = self.logs.iter().collect::<Vec<_>>();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs.truncate(limit);
        logs
    }

    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &WorkoutLog> {
        self.logs.iter().filter(move |l| l.date == date)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkoutLog> {
        self.logs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    fn get_mut(&mut self, log_id: WorkoutLogID) -> Result<&mut WorkoutLog, WorkoutError> {
        self.logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .ok_or(WorkoutError::NotFound(log_id))
    }
}
