//! Scoring of submissions
//!
//! Provides the score calculator, the test-runner boundary (with a
//! simulated stub), the per-exercise submission workflow and quiz answers.

pub mod quiz;
pub mod runner;
pub mod score;
pub mod session;

pub use quiz::{QuizVerdict, check_answer};
pub use runner::{DEFAULT_PASS_RATE, SimulatedRunner, TestResult, TestRunner};
pub use score::{ScoreBreakdown, ScoreCalculator, ScoreInput, compute_score};
pub use session::{CompletionEvent, ExerciseSession, FollowUp, SubmissionOutcome, format_elapsed};
