//! Error types for the exercise catalog and submission workflow

use thiserror::Error;

use crate::catalog::ExerciseId;

/// Errors that can occur while loading exercises or running a submission
#[derive(Debug, Error)]
pub enum QuestError {
    /// No exercise with this id exists in the catalog
    #[error("Exercise {0} not found")]
    ExerciseNotFound(ExerciseId),

    /// No exercise title contains the search text
    #[error("No exercise matching '{0}'")]
    NoExerciseMatching(String),

    /// The exercise has no options to pick from
    #[error("Exercise {0} is not a quiz")]
    NotAQuiz(ExerciseId),

    /// The choice is neither an option nor a valid option number
    #[error("'{choice}' is not an option of exercise {exercise_id}")]
    UnknownOption { exercise_id: ExerciseId, choice: String },

    /// Category name did not match any known category
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    /// Difficulty name did not match any known difficulty
    #[error("Unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    /// Exercise kind did not match any known kind
    #[error("Unknown exercise kind '{0}'")]
    UnknownKind(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A test run was cancelled before it finished
    #[error("Test run cancelled")]
    Cancelled,

    /// Catalog JSON could not be parsed
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Reading a catalog file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuestError {
    /// Check if this error came from user input that can simply be corrected
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuestError::ExerciseNotFound(_)
                | QuestError::NoExerciseMatching(_)
                | QuestError::NotAQuiz(_)
                | QuestError::UnknownOption { .. }
                | QuestError::UnknownCategory(_)
                | QuestError::UnknownDifficulty(_)
                | QuestError::UnknownKind(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_id() {
        let err = QuestError::ExerciseNotFound(1001);
        assert_eq!(err.to_string(), "Exercise 1001 not found");
    }

    #[test]
    fn unknown_option_message() {
        let err = QuestError::UnknownOption { exercise_id: 1101, choice: "grid".into() };
        assert_eq!(err.to_string(), "'grid' is not an option of exercise 1101");
    }

    #[test]
    fn lookup_errors_are_user_errors() {
        assert!(QuestError::ExerciseNotFound(1).is_user_error());
        assert!(QuestError::UnknownCategory("css".into()).is_user_error());
        assert!(QuestError::NotAQuiz(1002).is_user_error());
        assert!(!QuestError::Cancelled.is_user_error());
        assert!(!QuestError::InvalidConfig("x".into()).is_user_error());
    }
}
