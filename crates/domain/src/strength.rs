use std::{collections::BTreeMap, fmt, slice::Iter, sync::LazyLock};

use crate::{ExerciseID, Gender, InputError, Property, Sex, StrengthError};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum StrengthRank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl StrengthRank {
    #[must_use]
    pub fn next(self) -> Option<StrengthRank> {
        match self {
            StrengthRank::E => Some(StrengthRank::D),
            StrengthRank::D => Some(StrengthRank::C),
            StrengthRank::C => Some(StrengthRank::B),
            StrengthRank::B => Some(StrengthRank::A),
            StrengthRank::A => Some(StrengthRank::S),
            StrengthRank::S => None,
        }
    }
}

impl Property for StrengthRank {
    fn iter() -> Iter<'static, StrengthRank> {
        static RANKS: [StrengthRank; 6] = [
            StrengthRank::E,
            StrengthRank::D,
            StrengthRank::C,
            StrengthRank::B,
            StrengthRank::A,
            StrengthRank::S,
        ];
        RANKS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            StrengthRank::E => "E",
            StrengthRank::D => "D",
            StrengthRank::C => "C",
            StrengthRank::B => "B",
            StrengthRank::A => "A",
            StrengthRank::S => "S",
        }
    }
}

impl fmt::Display for StrengthRank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Minimum one-rep-max in kg for the ranks D, C, B, A and S.
///
/// E has no threshold, every one-rep-max below D is ranked E.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds([f32; 5]);

impl Thresholds {
    pub fn new(thresholds: [f32; 5]) -> Result<Self, ThresholdsError> {
        if let Some(t) = thresholds.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(ThresholdsError::NonPositive(*t));
        }

        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ThresholdsError::NotAscending);
        }

        Ok(Self(thresholds))
    }

    const fn from_ascending(thresholds: [f32; 5]) -> Self {
        Self(thresholds)
    }

    #[must_use]
    pub fn get(&self, rank: StrengthRank) -> Option<f32> {
        match rank {
            StrengthRank::E => None,
            StrengthRank::D => Some(self.0[0]),
            StrengthRank::C => Some(self.0[1]),
            StrengthRank::B => Some(self.0[2]),
            StrengthRank::A => Some(self.0[3]),
            StrengthRank::S => Some(self.0[4]),
        }
    }

    /// Highest rank whose threshold is reached.
    #[must_use]
    pub fn classify(&self, one_rep_max: f32) -> StrengthRank {
        StrengthRank::iter()
            .rev()
            .find(|rank| self.get(**rank).is_none_or(|t| t <= one_rep_max))
            .copied()
            .unwrap_or(StrengthRank::E)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ThresholdsError {
    #[error("Thresholds must be positive ({0})")]
    NonPositive(f32),
    #[error("Thresholds must be strictly ascending from D to S")]
    NotAscending,
}

const DEFAULT_STANDARDS: [(&str, Sex, Thresholds); 6] = [
    (
        "squat",
        Sex::Male,
        Thresholds::from_ascending([140.0, 160.0, 180.0, 200.0, 220.0]),
    ),
    (
        "squat",
        Sex::Female,
        Thresholds::from_ascending([75.0, 90.0, 105.0, 120.0, 135.0]),
    ),
    (
        "bench-press",
        Sex::Male,
        Thresholds::from_ascending([100.0, 120.0, 140.0, 160.0, 180.0]),
    ),
    (
        "bench-press",
        Sex::Female,
        Thresholds::from_ascending([50.0, 60.0, 70.0, 80.0, 90.0]),
    ),
    (
        "deadlift",
        Sex::Male,
        Thresholds::from_ascending([160.0, 180.0, 200.0, 220.0, 240.0]),
    ),
    (
        "deadlift",
        Sex::Female,
        Thresholds::from_ascending([100.0, 120.0, 140.0, 160.0, 180.0]),
    ),
];

static STANDARDS: LazyLock<StrengthStandards> = LazyLock::new(StrengthStandards::default);

/// Classify a one-rep-max using the default strength standards.
pub fn classify(
    exercise_id: &ExerciseID,
    one_rep_max: f32,
    gender: Gender,
) -> Result<StrengthRank, StrengthError> {
    STANDARDS.classify(exercise_id, one_rep_max, gender)
}

/// Strength standards per exercise and sex.
///
/// Exercises without standards cannot be ranked. There is no fallback to the standards of
/// another exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthStandards {
    standards: BTreeMap<ExerciseID, BTreeMap<Sex, Thresholds>>,
}

impl StrengthStandards {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            standards: BTreeMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        exercise_id: ExerciseID,
        sex: Sex,
        thresholds: Thresholds,
    ) -> Option<Thresholds> {
        self.standards
            .entry(exercise_id)
            .or_default()
            .insert(sex, thresholds)
    }

    #[must_use]
    pub fn contains(&self, exercise_id: &ExerciseID) -> bool {
        self.standards.contains_key(exercise_id)
    }

    pub fn thresholds(
        &self,
        exercise_id: &ExerciseID,
        gender: Gender,
    ) -> Result<&Thresholds, StrengthError> {
        self.standards
            .get(exercise_id)
            .and_then(|s| s.get(&gender.standards_sex()))
            .ok_or_else(|| StrengthError::UnknownExercise(exercise_id.clone()))
    }

    pub fn classify(
        &self,
        exercise_id: &ExerciseID,
        one_rep_max: f32,
        gender: Gender,
    ) -> Result<StrengthRank, StrengthError> {
        if !one_rep_max.is_finite() || one_rep_max <= 0.0 {
            return Err(InputError::NonPositiveWeight(one_rep_max).into());
        }

        Ok(self
            .thresholds(exercise_id, gender)?
            .classify(one_rep_max))
    }

    /// Next rank above the current one and the one-rep-max required to reach it.
    pub fn next_rank_target(
        &self,
        exercise_id: &ExerciseID,
        one_rep_max: f32,
        gender: Gender,
    ) -> Result<Option<(StrengthRank, f32)>, StrengthError> {
        let rank = self.classify(exercise_id, one_rep_max, gender)?;
        let thresholds = self.thresholds(exercise_id, gender)?;
        Ok(rank
            .next()
            .and_then(|next| thresholds.get(next).map(|t| (next, t))))
    }
}

impl Default for StrengthStandards {
    fn default() -> Self {
        let mut standards = Self::empty();
        for (exercise_id, sex, thresholds) in DEFAULT_STANDARDS {
            standards.insert(ExerciseID::from_static(exercise_id), sex, thresholds);
        }
        standards
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn id(id: &str) -> ExerciseID {
        ExerciseID::new(id).unwrap()
    }

    #[rstest]
    #[case("bench-press", 99.9, Gender::Male, StrengthRank::E)]
    #[case("bench-press", 100.0, Gender::Male, StrengthRank::D)]
    #[case("bench-press", 119.9, Gender::Male, StrengthRank::D)]
    #[case("bench-press", 120.0, Gender::Male, StrengthRank::C)]
    #[case("bench-press", 139.9, Gender::Male, StrengthRank::C)]
    #[case("bench-press", 140.0, Gender::Male, StrengthRank::B)]
    #[case("bench-press", 160.0, Gender::Male, StrengthRank::A)]
    #[case("bench-press", 180.0, Gender::Male, StrengthRank::S)]
    #[case("bench-press", 250.0, Gender::Male, StrengthRank::S)]
    #[case("bench-press", 120.0, Gender::Female, StrengthRank::S)]
    #[case("bench-press", 65.0, Gender::Female, StrengthRank::C)]
    #[case("bench-press", 120.0, Gender::Other, StrengthRank::C)]
    #[case("squat", 160.0, Gender::Male, StrengthRank::C)]
    #[case("squat", 74.9, Gender::Female, StrengthRank::E)]
    #[case("squat", 135.0, Gender::Female, StrengthRank::S)]
    #[case("deadlift", 200.0, Gender::Male, StrengthRank::B)]
    #[case("deadlift", 200.0, Gender::Other, StrengthRank::B)]
    #[case("deadlift", 100.0, Gender::Female, StrengthRank::D)]
    fn test_classify(
        #[case] exercise_id: &str,
        #[case] one_rep_max: f32,
        #[case] gender: Gender,
        #[case] expected: StrengthRank,
    ) {
        assert_eq!(classify(&id(exercise_id), one_rep_max, gender), Ok(expected));
    }

    #[test]
    fn test_classify_unknown_exercise() {
        assert_eq!(
            classify(&id("bicep-curl"), 50.0, Gender::Male),
            Err(StrengthError::UnknownExercise(id("bicep-curl")))
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    fn test_classify_invalid_one_rep_max(#[case] one_rep_max: f32) {
        assert_eq!(
            classify(&id("squat"), one_rep_max, Gender::Male),
            Err(StrengthError::InvalidInput(InputError::NonPositiveWeight(
                one_rep_max
            )))
        );
    }

    #[rstest]
    #[case(Gender::Male)]
    #[case(Gender::Female)]
    #[case(Gender::Other)]
    fn test_classify_is_monotonic(#[case] gender: Gender) {
        for exercise_id in ["squat", "bench-press", "deadlift"] {
            let mut previous = StrengthRank::E;
            for kg in 1..=300 {
                #[allow(clippy::cast_precision_loss)]
                let rank = classify(&id(exercise_id), kg as f32, gender).unwrap();
                assert!(rank >= previous, "{exercise_id} {kg} kg");
                previous = rank;
            }
            assert_eq!(previous, StrengthRank::S);
        }
    }

    #[test]
    fn test_default_standards_are_valid() {
        for (exercise_id, _, thresholds) in DEFAULT_STANDARDS {
            assert!(ExerciseID::new(exercise_id).is_ok());
            assert_eq!(Thresholds::new(thresholds.0), Ok(thresholds));
        }
    }

    #[rstest]
    #[case([100.0, 120.0, 140.0, 160.0, 180.0], Ok(Thresholds([100.0, 120.0, 140.0, 160.0, 180.0])))]
    #[case([100.0, 120.0, 120.0, 160.0, 180.0], Err(ThresholdsError::NotAscending))]
    #[case([100.0, 90.0, 140.0, 160.0, 180.0], Err(ThresholdsError::NotAscending))]
    #[case([0.0, 120.0, 140.0, 160.0, 180.0], Err(ThresholdsError::NonPositive(0.0)))]
    fn test_thresholds_new(
        #[case] thresholds: [f32; 5],
        #[case] expected: Result<Thresholds, ThresholdsError>,
    ) {
        assert_eq!(Thresholds::new(thresholds), expected);
    }

    #[test]
    fn test_thresholds_get() {
        let thresholds = Thresholds::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(
            StrengthRank::iter()
                .map(|r| thresholds.get(*r))
                .collect::<Vec<_>>(),
            vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        );
    }

    #[test]
    fn test_custom_standards() {
        let mut standards = StrengthStandards::empty();
        assert!(!standards.contains(&id("bicep-curl")));
        assert_eq!(
            standards.insert(
                id("bicep-curl"),
                Sex::Male,
                Thresholds::new([30.0, 40.0, 50.0, 60.0, 70.0]).unwrap()
            ),
            None
        );
        assert!(standards.contains(&id("bicep-curl")));
        assert_eq!(
            standards.classify(&id("bicep-curl"), 45.0, Gender::Other),
            Ok(StrengthRank::C)
        );
        assert_eq!(
            standards.classify(&id("bicep-curl"), 45.0, Gender::Female),
            Err(StrengthError::UnknownExercise(id("bicep-curl")))
        );
    }

    #[rstest]
    #[case(90.0, Some((StrengthRank::D, 100.0)))]
    #[case(120.0, Some((StrengthRank::B, 140.0)))]
    #[case(175.0, Some((StrengthRank::S, 180.0)))]
    #[case(180.0, None)]
    fn test_next_rank_target(#[case] one_rep_max: f32, #[case] expected: Option<(StrengthRank, f32)>) {
        assert_eq!(
            StrengthStandards::default().next_rank_target(
                &id("bench-press"),
                one_rep_max,
                Gender::Male
            ),
            Ok(expected)
        );
    }

    #[rstest]
    #[case(StrengthRank::E, Some(StrengthRank::D))]
    #[case(StrengthRank::A, Some(StrengthRank::S))]
    #[case(StrengthRank::S, None)]
    fn test_strength_rank_next(#[case] rank: StrengthRank, #[case] expected: Option<StrengthRank>) {
        assert_eq!(rank.next(), expected);
    }

    #[test]
    fn test_strength_rank_order_and_display() {
        assert_eq!(
            StrengthRank::iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["E", "D", "C", "B", "A", "S"]
        );
        assert!(StrengthRank::E < StrengthRank::S);
    }
}
