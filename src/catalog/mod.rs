//! Exercise catalog: model, data access and filtering

pub mod filter;
pub mod model;
pub mod provider;

pub use filter::{ExerciseFilter, ExerciseView};
pub use model::{
    Category, Difficulty, Example, Exercise, ExerciseId, ExerciseKind, ExerciseStats, TestCase,
};
pub use provider::{Catalog, DataProvider};
