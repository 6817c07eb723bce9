use std::fmt;

use derive_more::{Display, Into};

use crate::InputError;

pub const MAX_ESTIMATION_REPS: u32 = 36;

/// Estimate the one-repetition maximum using the Brzycki formula.
///
/// A single repetition is returned unchanged. The formula diverges at 37 reps, so only 1 to 36
/// reps are accepted.
pub fn estimate(weight: f32, reps: u32) -> Result<f32, InputError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(InputError::NonPositiveWeight(weight));
    }

    let one_rep_max = match reps {
        0 => return Err(InputError::NonPositiveReps),
        1 => weight,
        r if r > MAX_ESTIMATION_REPS => return Err(InputError::TooManyReps(r)),
        #[allow(clippy::cast_precision_loss)]
        r => weight * 36.0 / (37.0 - r as f32),
    };

    if !one_rep_max.is_finite() {
        return Err(InputError::WeightOutOfRange(weight));
    }

    Ok(one_rep_max)
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(kg: f32) -> Result<Self, InputError> {
        if !kg.is_finite() || kg <= 0.0 {
            return Err(InputError::NonPositiveWeight(kg));
        }

        Ok(Self(kg))
    }

    #[must_use]
    pub fn format(self, unit: WeightUnit) -> String {
        format_weight(self.0, unit)
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, InputError> {
        if value == 0 {
            return Err(InputError::NonPositiveReps);
        }

        Ok(Self(value))
    }
}

#[must_use]
pub fn volume(weight: Weight, reps: Reps) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let reps = reps.0 as f32;
    weight.0 * reps
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    #[default]
    Kilogram,
    Pound,
}

impl WeightUnit {
    pub const POUNDS_PER_KILOGRAM: f32 = 2.204_62;
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WeightUnit::Kilogram => "kg",
                WeightUnit::Pound => "lb",
            }
        )
    }
}

#[must_use]
pub fn format_weight(kg: f32, unit: WeightUnit) -> String {
    match unit {
        WeightUnit::Kilogram => format!("{kg:.1} {unit}"),
        WeightUnit::Pound => format!("{:.1} {unit}", kg * WeightUnit::POUNDS_PER_KILOGRAM),
    }
}
