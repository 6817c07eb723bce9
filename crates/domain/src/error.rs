use crate::{ChallengeID, ExerciseID, PostID, UserID, WorkoutLogID};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Weight must be a positive number ({0} kg)")]
    NonPositiveWeight(f32),
    #[error("Reps must be a positive integer")]
    NonPositiveReps,
    #[error("Reps must be 36 or fewer ({0} > 36)")]
    TooManyReps(u32),
    #[error("Weight is too large to estimate a one-rep-max ({0} kg)")]
    WeightOutOfRange(f32),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StrengthError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("unknown exercise \"{0}\"")]
    UnknownExercise(ExerciseID),
    #[error("gender of user unknown")]
    MissingGender,
    #[error("skipped personal best of \"{exercise_id}\": {reason}")]
    PartialUpdateSkipped {
        exercise_id: ExerciseID,
        reason: Box<StrengthError>,
    },
}

impl StrengthError {
    #[must_use]
    pub fn skipped(exercise_id: ExerciseID, reason: StrengthError) -> Self {
        StrengthError::PartialUpdateSkipped {
            exercise_id,
            reason: Box::new(reason),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WorkoutError {
    #[error("workout log {0:?} not found")]
    NotFound(WorkoutLogID),
    #[error("set of \"{set}\" does not belong to the entry of \"{entry}\"")]
    MismatchedSet { entry: ExerciseID, set: ExerciseID },
    #[error(transparent)]
    InvalidSet(#[from] StrengthError),
}

impl From<InputError> for WorkoutError {
    fn from(value: InputError) -> Self {
        WorkoutError::InvalidSet(StrengthError::InvalidInput(value))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UserError {
    #[error("no user logged in")]
    NotLoggedIn,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChallengeError {
    #[error("challenge {0:?} not found")]
    NotFound(ChallengeID),
    #[error("user {0:?} already takes part in the challenge")]
    AlreadyJoined(UserID),
    #[error("user {0:?} does not take part in the challenge")]
    NotParticipant(UserID),
    #[error("End date must not be before start date")]
    InvalidPeriod,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SocialError {
    #[error("post {0:?} not found")]
    NotFound(PostID),
    #[error("Content must not be empty")]
    EmptyContent,
}
