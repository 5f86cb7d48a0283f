//! Multiple-choice answers
//!
//! A quiz has one correct option. The learner may pick an option by its
//! text (case-insensitive) or by its 1-based position in the list.

use serde::Serialize;

use super::score::{ScoreCalculator, ScoreInput};
use crate::catalog::{Exercise, ExerciseId};
use crate::error::QuestError;

/// Result of answering a quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizVerdict {
    pub exercise_id: ExerciseId,
    /// The option the learner picked, as listed
    pub chosen: String,
    /// The correct option
    pub answer: String,
    pub correct: bool,
    pub explanation: Option<String>,
    /// XP awarded; the full point value for a correct answer, otherwise 0
    pub score: u32,
}

/// Find the listed option a choice refers to
fn resolve_option<'a>(exercise: &'a Exercise, choice: &str) -> Option<&'a str> {
    let choice = choice.trim();
    if let Some(option) = exercise.options.iter().find(|o| o.eq_ignore_ascii_case(choice)) {
        return Some(option);
    }
    let position: usize = choice.parse().ok()?;
    exercise.options.get(position.checked_sub(1)?).map(String::as_str)
}

/// Check a quiz answer and score it
pub fn check_answer(
    exercise: &Exercise,
    choice: &str,
    calculator: &ScoreCalculator,
) -> Result<QuizVerdict, QuestError> {
    let answer = match (&exercise.answer, exercise.options.is_empty()) {
        (Some(answer), false) => answer,
        _ => return Err(QuestError::NotAQuiz(exercise.id)),
    };
    let chosen = resolve_option(exercise, choice).ok_or_else(|| QuestError::UnknownOption {
        exercise_id: exercise.id,
        choice: choice.to_string(),
    })?;

    let correct = chosen == answer.as_str();
    let breakdown = calculator.compute(&ScoreInput {
        passed: u32::from(correct),
        total: 1,
        points: exercise.points,
        elapsed_seconds: 0.0,
        time_limit_minutes: None,
        attempts: 1,
    });

    tracing::debug!(exercise = exercise.id, chosen, correct, "Quiz answered");

    Ok(QuizVerdict {
        exercise_id: exercise.id,
        chosen: chosen.to_string(),
        answer: answer.clone(),
        correct,
        explanation: exercise.explanation.clone(),
        score: breakdown.total,
    })
}
