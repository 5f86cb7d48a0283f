//! Progression model: levels, rank tiers, unlocking, profiles and standings

pub mod leaderboard;
pub mod level;
pub mod profile;
pub mod unlock;

pub use leaderboard::{LeaderboardEntry, Standing, standings};
pub use level::{LevelCalculator, LevelInfo, POINTS_PER_LEVEL, Rank, compute_level};
pub use profile::{Badge, UserProgress};
pub use unlock::{check_unlock, is_unlocked, missing_prerequisites};
