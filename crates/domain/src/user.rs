use std::fmt;

use derive_more::Deref;
use uuid::Uuid;

use crate::{Name, WeightUnit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub gender: Gender,
    pub weight_unit: WeightUnit,
}

impl User {
    /// Apply the changed fields of a profile update.
    pub fn update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(weight_unit) = update.weight_unit {
            self.weight_unit = weight_unit;
        }
    }
}

/// Changes to a user profile. Fields set to `None` remain unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<Name>,
    pub gender: Option<Gender>,
    pub weight_unit: Option<WeightUnit>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    /// Sex whose strength standards apply to this gender.
    ///
    /// There are no separate standards for `Other`, the male table is used instead.
    #[must_use]
    pub fn standards_sex(self) -> Sex {
        match self {
            Gender::Female => Sex::Female,
            Gender::Male | Gender::Other => Sex::Male,
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value {
            "female" => Gender::Female,
            "male" => Gender::Male,
            _ => Gender::Other,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Gender::Female => "female",
                Gender::Male => "male",
                Gender::Other => "other",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sex::Female => "female",
                Sex::Male => "male",
            }
        )
    }
}
