use std::collections::BTreeMap;

use log::debug;

use crate::{Exercise, ExerciseID, Mechanic, MuscleGroup, Name, NameError, StrengthError};

#[derive(Clone)]
struct BaseExercise {
    id: &'static str,
    name: &'static str,
    muscle_group: MuscleGroup,
    mechanic: Mechanic,
}

const EXERCISES: [BaseExercise; 20] = [
    // Chest
    BaseExercise {
        id: "bench-press",
        name: "Bench Press",
        muscle_group: MuscleGroup::Chest,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "incline-bench-press",
        name: "Incline Bench Press",
        muscle_group: MuscleGroup::Chest,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "dumbbell-fly",
        name: "Dumbbell Fly",
        muscle_group: MuscleGroup::Chest,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "push-up",
        name: "Push-up",
        muscle_group: MuscleGroup::Chest,
        mechanic: Mechanic::Compound,
    },
    // Back
    BaseExercise {
        id: "deadlift",
        name: "Deadlift",
        muscle_group: MuscleGroup::Back,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "pull-up",
        name: "Pull-up",
        muscle_group: MuscleGroup::Back,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "barbell-row",
        name: "Barbell Row",
        muscle_group: MuscleGroup::Back,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "lat-pulldown",
        name: "Lat Pulldown",
        muscle_group: MuscleGroup::Back,
        mechanic: Mechanic::Isolation,
    },
    // Legs
    BaseExercise {
        id: "squat",
        name: "Squat",
        muscle_group: MuscleGroup::Legs,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "leg-press",
        name: "Leg Press",
        muscle_group: MuscleGroup::Legs,
        mechanic: Mechanic::Compound,
    },
    BaseExercise {
        id: "leg-extension",
        name: "Leg Extension",
        muscle_group: MuscleGroup::Legs,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "leg-curl",
        name: "Leg Curl",
        muscle_group: MuscleGroup::Legs,
        mechanic: Mechanic::Isolation,
    },
    // Arms
    BaseExercise {
        id: "bicep-curl",
        name: "Bicep Curl",
        muscle_group: MuscleGroup::Arms,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "tricep-extension",
        name: "Tricep Extension",
        muscle_group: MuscleGroup::Arms,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "hammer-curl",
        name: "Hammer Curl",
        muscle_group: MuscleGroup::Arms,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "skull-crusher",
        name: "Skull Crusher",
        muscle_group: MuscleGroup::Arms,
        mechanic: Mechanic::Isolation,
    },
    // Core
    BaseExercise {
        id: "plank",
        name: "Plank",
        muscle_group: MuscleGroup::Core,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "russian-twist",
        name: "Russian Twist",
        muscle_group: MuscleGroup::Core,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "hanging-leg-raise",
        name: "Hanging Leg Raise",
        muscle_group: MuscleGroup::Core,
        mechanic: Mechanic::Isolation,
    },
    BaseExercise {
        id: "ab-wheel",
        name: "Ab Wheel",
        muscle_group: MuscleGroup::Core,
        mechanic: Mechanic::Isolation,
    },
];

impl From<&BaseExercise> for Exercise {
    fn from(value: &BaseExercise) -> Self {
        Exercise {
            id: ExerciseID::from_static(value.id),
            name: Name::from_static(value.name),
            muscle_group: value.muscle_group,
            mechanic: value.mechanic,
        }
    }
}

/// Read-only lookup of exercises by ID, extended only by adding user-defined exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCatalog {
    exercises: BTreeMap<ExerciseID, Exercise>,
}

impl ExerciseCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            exercises: BTreeMap::new(),
        }
    }

    pub fn add_exercise(
        &mut self,
        name: &str,
        muscle_group: MuscleGroup,
        mechanic: Mechanic,
    ) -> Result<&Exercise, NameError> {
        let exercise = Exercise {
            id: ExerciseID::generate(),
            name: Name::new(name)?,
            muscle_group,
            mechanic,
        };
        debug!("added exercise {} ({})", exercise.name, exercise.id);
        Ok(self
            .exercises
            .entry(exercise.id.clone())
            .or_insert(exercise))
    }

    #[must_use]
    pub fn get(&self, id: &ExerciseID) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    pub fn muscle_group(&self, id: &ExerciseID) -> Result<MuscleGroup, StrengthError> {
        self.get(id)
            .map(|e| e.muscle_group)
            .ok_or_else(|| StrengthError::UnknownExercise(id.clone()))
    }

    pub fn by_muscle_group(&self, muscle_group: MuscleGroup) -> impl Iterator<Item = &Exercise> {
        self.exercises
            .values()
            .filter(move |e| e.muscle_group == muscle_group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self {
            exercises: EXERCISES
                .iter()
                .map(Exercise::from)
                .map(|e| (e.id.clone(), e))
                .collect(),
        }
    }
}

impl FromIterator<Exercise> for ExerciseCatalog {
    fn from_iter<T: IntoIterator<Item = Exercise>>(iter: T) -> Self {
        Self {
            exercises: iter.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }
}
