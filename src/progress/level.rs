//! XP to level mapping and rank tiers

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Default XP needed to advance one level
pub const POINTS_PER_LEVEL: u64 = 1000;

const DEFAULT_LEVEL_SIZE: NonZeroU64 = NonZeroU64::new(POINTS_PER_LEVEL).unwrap();

/// Level derived from cumulative XP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Current level, starting at 1
    pub level: u64,
    /// XP earned inside the current level
    pub current_level_xp: u64,
    /// Progress through the current level (0-100, exclusive of 100)
    pub progress_percent: f64,
    /// XP still needed to reach the next level
    pub xp_to_next_level: u64,
}

/// Maps cumulative XP onto fixed-size levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCalculator {
    points_per_level: NonZeroU64,
}

impl Default for LevelCalculator {
    fn default() -> Self {
        Self { points_per_level: DEFAULT_LEVEL_SIZE }
    }
}

impl LevelCalculator {
    /// Create a calculator with a custom level size
    pub fn new(points_per_level: NonZeroU64) -> Self {
        Self { points_per_level }
    }

    /// XP needed per level
    pub fn points_per_level(&self) -> u64 {
        self.points_per_level.get()
    }

    /// Compute level information for the given total XP
    pub fn compute(&self, total_xp: u64) -> LevelInfo {
        let per_level = self.points_per_level.get();
        let current_level_xp = total_xp % per_level;

        LevelInfo {
            level: (total_xp / per_level).saturating_add(1),
            current_level_xp,
            // Multiply first so round numbers stay exact (150 / 1000 -> 15.0)
            progress_percent: (current_level_xp as f64 * 100.0) / per_level as f64,
            xp_to_next_level: per_level - current_level_xp,
        }
    }
}

/// Compute level information using the default 1000 XP per level
pub fn compute_level(total_xp: u64) -> LevelInfo {
    LevelCalculator::default().compute(total_xp)
}

/// Named rank tier derived from cumulative XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
    Legend,
}

/// Minimum XP for each tier, highest first
const RANK_THRESHOLDS: [(u64, Rank); 5] = [
    (10_000, Rank::Legend),
    (5_000, Rank::Master),
    (2_500, Rank::Expert),
    (1_000, Rank::Advanced),
    (500, Rank::Intermediate),
];

impl Rank {
    /// Classify total XP. Thresholds are checked from highest to lowest.
    pub fn for_xp(total_xp: u64) -> Self {
        RANK_THRESHOLDS
            .iter()
            .find(|(min, _)| total_xp >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::Beginner)
    }

    /// Minimum XP required for this tier
    pub fn min_xp(&self) -> u64 {
        RANK_THRESHOLDS.iter().find(|(_, rank)| rank == self).map(|(min, _)| *min).unwrap_or(0)
    }

    /// The tier above this one, if any
    pub fn next(&self) -> Option<Rank> {
        RANK_THRESHOLDS.iter().rev().map(|(_, rank)| *rank).find(|rank| rank > self)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Beginner => "Beginner",
            Rank::Intermediate => "Intermediate",
            Rank::Advanced => "Advanced",
            Rank::Expert => "Expert",
            Rank::Master => "Master",
            Rank::Legend => "Legend",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
