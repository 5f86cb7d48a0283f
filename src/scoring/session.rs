//! Submission workflow for a single exercise
//!
//! A session counts attempts, paces each run with a short artificial
//! delay, scores the outcome and signals completion when every test
//! passes. Cancelling a run discards its result.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::runner::{TestResult, TestRunner};
use super::score::{ScoreBreakdown, ScoreCalculator, ScoreInput};
use crate::catalog::{Exercise, ExerciseId};
use crate::error::QuestError;

/// Default pause before results are shown
pub const DEFAULT_RUN_DELAY: Duration = Duration::from_millis(1500);

/// Where the learner can go after completing an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowUp {
    /// Move on to the next exercise
    NextExercise(ExerciseId),
    /// Back to the exercise list
    ExerciseList,
    /// View the leaderboard
    Leaderboard,
}

/// Raised when a run passes every test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEvent {
    pub exercise_id: ExerciseId,
    pub score: u32,
    pub elapsed: Duration,
    pub attempts: u32,
    pub follow_ups: Vec<FollowUp>,
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub results: Vec<TestResult>,
    pub breakdown: ScoreBreakdown,
    pub attempt: u32,
    /// Present only when all tests passed
    pub completion: Option<CompletionEvent>,
}

impl SubmissionOutcome {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }
}

/// State of one learner working on one exercise
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    exercise: Exercise,
    calculator: ScoreCalculator,
    run_delay: Duration,
    attempts: u32,
    current_hint: usize,
    next_exercise: Option<ExerciseId>,
    last_outcome: Option<SubmissionOutcome>,
}

impl ExerciseSession {
    /// Start a session with the default calculator and delay
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            calculator: ScoreCalculator::default(),
            run_delay: DEFAULT_RUN_DELAY,
            attempts: 0,
            current_hint: 0,
            next_exercise: None,
            last_outcome: None,
        }
    }

    /// Use a custom score calculator
    pub fn with_calculator(mut self, calculator: ScoreCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Set the artificial delay before results are produced
    pub fn with_run_delay(mut self, delay: Duration) -> Self {
        self.run_delay = delay;
        self
    }

    /// Exercise offered as the follow-up on completion
    pub fn with_next_exercise(mut self, next: Option<ExerciseId>) -> Self {
        self.next_exercise = next;
        self
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Attempts started so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Run the tests for `code` after the configured delay
    ///
    /// The attempt is counted as soon as the run starts, so the first run
    /// scores as attempt 1. Returns `QuestError::Cancelled` if `cancel`
    /// fires before the delay elapses.
    pub async fn run_tests(
        &mut self,
        runner: &mut impl TestRunner,
        code: &str,
        elapsed: Duration,
        cancel: &CancellationToken,
    ) -> Result<SubmissionOutcome, QuestError> {
        self.attempts += 1;
        let attempt = self.attempts;
        tracing::info!(exercise = self.exercise.id, attempt, "Running tests");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(exercise = self.exercise.id, attempt, "Test run cancelled");
                return Err(QuestError::Cancelled);
            }
            _ = tokio::time::sleep(self.run_delay) => {}
        }

        let results = runner.run(&self.exercise, code);
        let outcome = self.score(results, elapsed, attempt);
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Score a set of results for the given attempt
    fn score(
        &self,
        results: Vec<TestResult>,
        elapsed: Duration,
        attempt: u32,
    ) -> SubmissionOutcome {
        let total = results.len() as u32;
        let passed = results.iter().filter(|r| r.passed).count() as u32;

        let breakdown = self.calculator.compute(&ScoreInput {
            passed,
            total,
            points: self.exercise.points,
            elapsed_seconds: elapsed.as_secs_f64(),
            time_limit_minutes: self.exercise.time_limit,
            attempts: attempt,
        });

        let completion = (passed == total).then(|| {
            tracing::info!(
                exercise = self.exercise.id,
                score = breakdown.total,
                attempt,
                "Exercise completed"
            );
            let mut follow_ups = Vec::with_capacity(2);
            follow_ups.push(
                self.next_exercise.map(FollowUp::NextExercise).unwrap_or(FollowUp::ExerciseList),
            );
            follow_ups.push(FollowUp::Leaderboard);

            CompletionEvent {
                exercise_id: self.exercise.id,
                score: breakdown.total,
                elapsed,
                attempts: attempt,
                follow_ups,
            }
        });

        SubmissionOutcome { results, breakdown, attempt, completion }
    }

    /// Hint currently shown, if the exercise has any
    pub fn current_hint(&self) -> Option<&str> {
        self.exercise.hints.get(self.current_hint).map(String::as_str)
    }

    /// Zero-based index of the current hint
    pub fn hint_index(&self) -> usize {
        self.current_hint
    }

    /// Advance to the next hint, stopping at the last one
    pub fn next_hint(&mut self) -> Option<&str> {
        let last = self.exercise.hints.len().saturating_sub(1);
        self.current_hint = (self.current_hint + 1).min(last);
        self.current_hint()
    }

    /// Go back one hint, stopping at the first one
    pub fn previous_hint(&mut self) -> Option<&str> {
        self.current_hint = self.current_hint.saturating_sub(1);
        self.current_hint()
    }
}

/// Format elapsed time as `m:ss`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
