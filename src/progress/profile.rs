//! Learner profile
//!
//! Profiles are reference data for now; nothing here is written back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::level::{LevelCalculator, LevelInfo, Rank};
use crate::catalog::ExerciseId;

/// An achievement badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub earned: bool,
}

/// A learner's accumulated progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Display name
    pub name: String,

    /// Cumulative XP
    pub total_xp: u64,

    /// Ids of completed exercises
    #[serde(default)]
    pub completed: HashSet<ExerciseId>,

    /// Consecutive active days
    #[serde(default)]
    pub streak: u32,

    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl UserProgress {
    /// Level information for this learner
    pub fn level(&self, calculator: &LevelCalculator) -> LevelInfo {
        calculator.compute(self.total_xp)
    }

    /// Rank tier for this learner
    pub fn rank(&self) -> Rank {
        Rank::for_xp(self.total_xp)
    }

    /// Whether an exercise has been completed
    pub fn has_completed(&self, exercise_id: ExerciseId) -> bool {
        self.completed.contains(&exercise_id)
    }

    /// Badges earned so far
    pub fn earned_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|b| b.earned)
    }

    /// Add XP for a finished exercise and mark it completed
    ///
    /// Returns true if this moved the learner to a higher level.
    pub fn record_completion(
        &mut self,
        exercise_id: ExerciseId,
        xp: u32,
        calculator: &LevelCalculator,
    ) -> bool {
        let before = calculator.compute(self.total_xp).level;
        self.total_xp = self.total_xp.saturating_add(u64::from(xp));
        self.completed.insert(exercise_id);
        calculator.compute(self.total_xp).level > before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner(xp: u64) -> UserProgress {
        UserProgress { name: "You".into(), total_xp: xp, ..Default::default() }
    }

    #[test]
    fn derives_level_and_rank() {
        let user = learner(2150);
        assert_eq!(user.level(&LevelCalculator::default()).level, 3);
        assert_eq!(user.rank(), Rank::Advanced);
    }

    #[test]
    fn record_completion_reports_level_up() {
        let calc = LevelCalculator::default();
        let mut user = learner(950);

        assert!(user.record_completion(1001, 60, &calc));
        assert_eq!(user.total_xp, 1010);
        assert!(user.has_completed(1001));

        assert!(!user.record_completion(1002, 10, &calc));
    }

    #[test]
    fn earned_badges_filters() {
        let mut user = learner(0);
        let badge = |id, name: &str, earned| Badge {
            id,
            name: name.into(),
            icon: "🏆".into(),
            earned,
        };
        user.badges.push(badge(1, "Flex Master", true));
        user.badges.push(badge(2, "Expo Legend", false));

        let earned: Vec<_> = user.earned_badges().map(|b| b.name.as_str()).collect();
        assert_eq!(earned, vec!["Flex Master"]);
    }

    #[test]
    fn profile_deserializes_with_defaults() {
        let json = r#"{"name":"You","total_xp":350}"#;
        let user: UserProgress = serde_json::from_str(json).unwrap();
        assert!(user.completed.is_empty());
        assert_eq!(user.streak, 0);
    }
}
