//! flexquest - gamified Flexbox, Grid and React Native exercises
//!
//! Exercises award XP through a score calculator (proportional credit,
//! time bonus, retry penalty). XP drives levels and rank tiers, and
//! exercises unlock once their prerequisites are completed.

pub mod catalog;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod scoring;

pub use catalog::{Catalog, DataProvider, Exercise, ExerciseFilter};
pub use config::Config;
pub use error::QuestError;
pub use progress::{LevelInfo, Rank, compute_level, is_unlocked};
pub use scoring::{ExerciseSession, compute_score};
