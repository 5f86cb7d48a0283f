//! Data access for exercises, the leaderboard and the current learner
//!
//! Everything is held in memory. `DataProvider` is the seam where real
//! storage can be substituted without touching the scoring code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{Exercise, ExerciseId};
use crate::error::QuestError;
use crate::progress::{LeaderboardEntry, UserProgress};

/// Catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Read access to reference data
pub trait DataProvider {
    /// Fetch an exercise by id
    fn exercise(&self, id: ExerciseId) -> Option<&Exercise>;

    /// All exercises in catalog order
    fn exercises(&self) -> &[Exercise];

    /// Leaderboard entries as stored (unsorted)
    fn leaderboard(&self) -> &[LeaderboardEntry];

    /// The learner using the app
    fn current_user(&self) -> &UserProgress;
}

/// In-memory catalog parsed from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,

    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,

    #[serde(default)]
    pub user: UserProgress,
}

impl Catalog {
    /// Parse the embedded catalog
    pub fn builtin() -> Result<Self, QuestError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self, QuestError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        tracing::debug!(
            exercises = catalog.exercises.len(),
            leaderboard = catalog.leaderboard.len(),
            "Parsed catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn from_path(path: &Path) -> Result<Self, QuestError> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        tracing::info!("Loaded {} exercises from {}", catalog.exercises.len(), path.display());
        Ok(catalog)
    }

    /// Build a catalog holding only exercises
    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self { exercises, ..Default::default() }
    }

    /// Find an exercise by title (case-insensitive partial match)
    pub fn find_by_title(&self, query: &str) -> Option<&Exercise> {
        let query_lower = query.to_lowercase();
        self.exercises.iter().find(|e| e.title.to_lowercase().contains(&query_lower))
    }

    /// Look an exercise up by numeric id, or by title if the text is not a number
    pub fn resolve(&self, reference: &str) -> Result<&Exercise, QuestError> {
        let reference = reference.trim();
        match reference.parse::<ExerciseId>() {
            Ok(id) => self.exercise(id).ok_or(QuestError::ExerciseNotFound(id)),
            Err(_) => self
                .find_by_title(reference)
                .ok_or_else(|| QuestError::NoExerciseMatching(reference.to_string())),
        }
    }

    /// The first exercise after `id` in catalog order
    pub fn next_after(&self, id: ExerciseId) -> Option<&Exercise> {
        let idx = self.exercises.iter().position(|e| e.id == id)?;
        self.exercises.get(idx + 1)
    }
}

impl DataProvider for Catalog {
    fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    fn current_user(&self) -> &UserProgress {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Difficulty};
    use crate::progress::is_unlocked;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.exercises.is_empty());
        assert!(!catalog.leaderboard.is_empty());
        assert!(catalog.exercise(1001).is_some());
    }

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = Catalog::builtin().unwrap();
        let mut ids: Vec<_> = catalog.exercises.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.exercises.len());
    }

    #[test]
    fn builtin_prerequisites_refer_to_known_exercises() {
        let catalog = Catalog::builtin().unwrap();
        for exercise in &catalog.exercises {
            for prereq in &exercise.prerequisites {
                assert!(
                    catalog.exercise(*prereq).is_some(),
                    "exercise {} has unknown prerequisite {}",
                    exercise.id,
                    prereq
                );
            }
        }
    }

    #[test]
    fn builtin_user_has_unlocked_second_flexbox_exercise() {
        let catalog = Catalog::builtin().unwrap();
        let navbar = catalog.exercise(1002).unwrap();
        assert!(is_unlocked(&navbar.prerequisites, &catalog.user.completed));
    }

    #[test]
    fn find_by_title_is_case_insensitive() {
        let catalog = Catalog::from_exercises(vec![Exercise::new(
            1,
            "Perfect Center",
            Difficulty::Beginner,
            Category::Flexbox,
            50,
        )]);

        assert!(catalog.find_by_title("perfect").is_some());
        assert!(catalog.find_by_title("grid").is_none());
    }

    #[test]
    fn resolve_accepts_ids_and_titles() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.resolve("1002").unwrap().id, 1002);
        assert_eq!(catalog.resolve(" flex wrap ").unwrap().id, 1104);
        assert!(matches!(catalog.resolve("42"), Err(QuestError::ExerciseNotFound(42))));
        assert!(matches!(
            catalog.resolve("tables"),
            Err(QuestError::NoExerciseMatching(text)) if text == "tables"
        ));
    }

    #[test]
    fn builtin_quizzes_have_a_listed_answer() {
        let catalog = Catalog::builtin().unwrap();
        let quizzes: Vec<_> = catalog.exercises.iter().filter(|e| e.is_quiz()).collect();
        assert_eq!(quizzes.len(), 6);
        for quiz in quizzes {
            let answer = quiz.answer.as_deref().unwrap();
            assert!(quiz.options.iter().any(|o| o == answer), "quiz {} answer unlisted", quiz.id);
            assert!(quiz.explanation.is_some());
        }
    }

    #[test]
    fn next_after_follows_catalog_order() {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new(10, "A", Difficulty::Beginner, Category::Flexbox, 50),
            Exercise::new(20, "B", Difficulty::Easy, Category::Grid, 100),
        ]);

        assert_eq!(catalog.next_after(10).map(|e| e.id), Some(20));
        assert!(catalog.next_after(20).is_none());
        assert!(catalog.next_after(99).is_none());
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{"exercises": [{
            "id": 1,
            "title": "T",
            "description": "D",
            "difficulty": "Hard",
            "category": "grid",
            "type": "visual",
            "points": 10
        }]}"#;
        file.write_all(json.as_bytes()).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.exercises().len(), 1);
        assert!(catalog.leaderboard().is_empty());
        assert_eq!(catalog.current_user().total_xp, 0);
    }

    #[test]
    fn from_json_reports_parse_errors() {
        assert!(matches!(Catalog::from_json("{"), Err(QuestError::CatalogParse(_))));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, QuestError::Io(_)));
    }
}
