//! Exercise model
//!
//! Exercises are immutable reference data. The `unlocked` and `completed`
//! flags record what the shipped data says; the effective state for a
//! given learner is derived from their completed set at listing time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuestError;

/// Numeric exercise identifier (e.g. 1001)
pub type ExerciseId = u32;

/// How hard an exercise is, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All difficulties in ascending order
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuestError::UnknownDifficulty(s.to_string()))
    }
}

/// Topic an exercise belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flexbox,
    Grid,
    Layouts,
    Responsive,
    Animations,
    Hooks,
    Navigation,
    State,
    Performance,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 9] = [
        Category::Flexbox,
        Category::Grid,
        Category::Layouts,
        Category::Responsive,
        Category::Animations,
        Category::Hooks,
        Category::Navigation,
        Category::State,
        Category::Performance,
    ];

    /// Identifier used in data files and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Flexbox => "flexbox",
            Category::Grid => "grid",
            Category::Layouts => "layouts",
            Category::Responsive => "responsive",
            Category::Animations => "animations",
            Category::Hooks => "hooks",
            Category::Navigation => "navigation",
            Category::State => "state",
            Category::Performance => "performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuestError::UnknownCategory(s.to_string()))
    }
}

/// Presentation style of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Code,
    Visual,
    Quiz,
    DragDrop,
    Challenge,
}

impl ExerciseKind {
    /// Identifier used in data files
    pub fn slug(&self) -> &'static str {
        match self {
            ExerciseKind::Code => "code",
            ExerciseKind::Visual => "visual",
            ExerciseKind::Quiz => "quiz",
            ExerciseKind::DragDrop => "drag-drop",
            ExerciseKind::Challenge => "challenge",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExerciseKind {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ExerciseKind::Code,
            ExerciseKind::Visual,
            ExerciseKind::Quiz,
            ExerciseKind::DragDrop,
            ExerciseKind::Challenge,
        ]
        .into_iter()
        .find(|k| k.slug().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| QuestError::UnknownKind(s.to_string()))
    }
}

/// A single check applied to a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Input fed to the submission (any JSON value)
    pub input: Value,
    /// Expected output (any JSON value)
    pub expected_output: Value,
    /// What the test checks
    pub description: String,
}

/// A worked example shown alongside an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub code: String,
    pub explanation: String,
}

/// Aggregate statistics shipped with some exercises
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStats {
    /// Best score achieved so far
    pub best_score: Option<u32>,
    /// Average completion time in seconds
    pub average_time: Option<f64>,
    /// Number of submissions
    pub submissions: Option<u32>,
    /// Share of successful submissions (0-100)
    pub success_rate: Option<f64>,
}

/// An exercise in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    /// Base point value
    pub points: u32,
    /// Time limit in minutes, if the exercise is timed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<f64>,
    /// Starter code handed to the learner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Exercises that must be completed first (absent means none)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<ExerciseId>,
    /// Choices offered by a quiz
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// The correct choice of a quiz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Shown once a quiz has been answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub stats: ExerciseStats,
}

impl Exercise {
    /// Create a minimal untimed exercise with no content
    pub fn new(
        id: ExerciseId,
        title: impl Into<String>,
        difficulty: Difficulty,
        category: Category,
        points: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            difficulty,
            category,
            kind: ExerciseKind::Code,
            points,
            time_limit: None,
            template: None,
            hints: Vec::new(),
            solution: String::new(),
            test_cases: Vec::new(),
            examples: Vec::new(),
            tags: Vec::new(),
            prerequisites: Vec::new(),
            options: Vec::new(),
            answer: None,
            explanation: None,
            unlocked: false,
            completed: false,
            stats: ExerciseStats::default(),
        }
    }

    /// Set the time limit in minutes
    pub fn with_time_limit(mut self, minutes: f64) -> Self {
        self.time_limit = Some(minutes);
        self
    }

    /// Set the prerequisite ids
    pub fn with_prerequisites(mut self, prerequisites: impl Into<Vec<ExerciseId>>) -> Self {
        self.prerequisites = prerequisites.into();
        self
    }

    /// Append a test case
    pub fn with_test_case(mut self, test_case: TestCase) -> Self {
        self.test_cases.push(test_case);
        self
    }

    /// Turn this into a multiple-choice quiz
    pub fn with_quiz(
        mut self,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: impl Into<String>,
    ) -> Self {
        self.kind = ExerciseKind::Quiz;
        self.options = options.into_iter().map(Into::into).collect();
        self.answer = Some(answer.into());
        self
    }

    /// Whether this exercise is answered by picking an option
    pub fn is_quiz(&self) -> bool {
        self.answer.is_some() && !self.options.is_empty()
    }

    /// Time limit converted to seconds
    pub fn time_limit_seconds(&self) -> Option<f64> {
        self.time_limit.map(|minutes| minutes * 60.0)
    }

    /// Case-insensitive match against title, description and tags
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn difficulty_is_ordered() {
        assert!(Difficulty::Beginner < Difficulty::Easy);
        assert!(Difficulty::Hard < Difficulty::Expert);
    }

    #[test]
    fn parse_difficulty_ignores_case() {
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn parse_category_and_kind() {
        assert_eq!("Grid".parse::<Category>().unwrap(), Category::Grid);
        assert_eq!("drag-drop".parse::<ExerciseKind>().unwrap(), ExerciseKind::DragDrop);
        assert!(matches!("css".parse::<Category>(), Err(QuestError::UnknownCategory(_))));
    }

    #[test]
    fn exercise_deserializes_without_optional_fields() {
        let json = r#"{
            "id": 7,
            "title": "Center",
            "description": "Center a box",
            "difficulty": "Beginner",
            "category": "flexbox",
            "type": "visual",
            "points": 50
        }"#;

        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.kind, ExerciseKind::Visual);
        assert!(exercise.prerequisites.is_empty());
        assert!(exercise.time_limit.is_none());
        assert!(exercise.stats.best_score.is_none());
    }

    #[test]
    fn exercise_deserializes_stats_and_test_cases() {
        let json = r#"{
            "id": 8,
            "title": "Navbar",
            "description": "",
            "difficulty": "Easy",
            "category": "flexbox",
            "type": "code",
            "points": 100,
            "time_limit": 10,
            "test_cases": [
                {
                    "input": {"screenWidth": 600},
                    "expected_output": "stacked",
                    "description": "mobile"
                }
            ],
            "prerequisites": [1001],
            "best_score": 90,
            "submissions": 3
        }"#;

        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.time_limit_seconds(), Some(600.0));
        assert_eq!(exercise.test_cases[0].input, json!({"screenWidth": 600}));
        assert_eq!(exercise.prerequisites, vec![1001]);
        assert_eq!(exercise.stats.best_score, Some(90));
        assert_eq!(exercise.stats.submissions, Some(3));
    }

    #[test]
    fn quiz_fields_deserialize() {
        let json = r#"{
            "id": 1101,
            "title": "Flex Direction",
            "description": "Stack the items in a column",
            "difficulty": "Beginner",
            "category": "flexbox",
            "type": "quiz",
            "points": 25,
            "options": ["row", "column"],
            "answer": "column",
            "explanation": "column stacks the items vertically"
        }"#;

        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert!(exercise.is_quiz());
        assert_eq!(exercise.options, vec!["row", "column"]);
        assert_eq!(exercise.answer.as_deref(), Some("column"));
        assert!(exercise.template.is_none());
    }

    #[test]
    fn code_exercise_is_not_a_quiz() {
        let mut exercise = Exercise::new(2, "Navbar", Difficulty::Easy, Category::Flexbox, 100);
        exercise.template = Some(".navbar {}".into());
        assert!(!exercise.is_quiz());

        let quiz = exercise.with_quiz(["wrap", "nowrap"], "wrap");
        assert_eq!(quiz.kind, ExerciseKind::Quiz);
        assert!(quiz.is_quiz());
    }

    #[test]
    fn matches_query_checks_tags() {
        let mut exercise =
            Exercise::new(1, "Perfect Center", Difficulty::Beginner, Category::Flexbox, 50);
        exercise.tags.push("alignment".into());

        assert!(exercise.matches_query("center"));
        assert!(exercise.matches_query("ALIGN"));
        assert!(!exercise.matches_query("grid"));
    }
}
