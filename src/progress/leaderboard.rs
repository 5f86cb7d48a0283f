//! Leaderboard standings

use serde::{Deserialize, Serialize};

use super::level::{LevelCalculator, Rank};

/// A leaderboard participant as stored in the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub total_xp: u64,
    #[serde(default)]
    pub exercises_completed: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_current_user: bool,
}

/// A ranked row with derived level and tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing<'a> {
    /// 1-based position
    pub position: usize,
    pub level: u64,
    pub rank: Rank,
    pub entry: &'a LeaderboardEntry,
}

/// Sort entries by XP (highest first, ties by name) and derive level and rank
pub fn standings<'a>(
    entries: &'a [LeaderboardEntry],
    calculator: &LevelCalculator,
) -> Vec<Standing<'a>> {
    let mut sorted: Vec<&LeaderboardEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.total_xp.cmp(&a.total_xp).then_with(|| a.name.cmp(&b.name)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| Standing {
            position: idx + 1,
            level: calculator.compute(entry.total_xp).level,
            rank: Rank::for_xp(entry.total_xp),
            entry,
        })
        .collect()
}

/// Position of the current user, if they appear on the board
pub fn current_user_position(standings: &[Standing<'_>]) -> Option<usize> {
    standings.iter().find(|s| s.entry.is_current_user).map(|s| s.position)
}
