#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod challenge;
mod error;
mod exercise;
mod name;
mod progress;
mod service;
mod settings;
mod social;
mod store;
mod strength;
mod training;
mod user;
mod workout;

use std::slice::Iter;

pub use catalog::*;
pub use challenge::*;
pub use error::*;
pub use exercise::*;
pub use name::*;
pub use progress::*;
pub use service::*;
pub use settings::*;
pub use social::*;
pub use store::*;
pub use strength::*;
pub use training::*;
pub use user::*;
pub use workout::*;

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
