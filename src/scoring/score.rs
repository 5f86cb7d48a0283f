//! Score calculation for a submission attempt
//!
//! The award is proportional credit for passed tests, plus a bonus for
//! finishing well inside the time limit, minus a penalty per retry. The
//! combined value is clamped at zero before rounding.

use serde::{Deserialize, Serialize};

/// Default ceiling of the time bonus
pub const MAX_TIME_BONUS: f64 = 50.0;

/// Default XP deducted per retry
pub const ATTEMPT_PENALTY: u32 = 10;

/// Everything the calculator needs about one attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub passed: u32,
    pub total: u32,
    /// Base point value of the exercise
    pub points: u32,
    pub elapsed_seconds: f64,
    /// Time limit in minutes; `None` disables the time bonus
    pub time_limit_minutes: Option<f64>,
    /// 1 for the first attempt
    pub attempts: u32,
}

/// Components of an awarded score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub time_bonus: f64,
    pub attempt_penalty: f64,
    /// Final XP award, never negative
    pub total: u32,
}

/// Configurable score calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCalculator {
    pub max_time_bonus: f64,
    pub attempt_penalty: u32,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self { max_time_bonus: MAX_TIME_BONUS, attempt_penalty: ATTEMPT_PENALTY }
    }
}

impl ScoreCalculator {
    /// Proportional credit; zero when there are no test cases
    pub fn base_score(&self, input: &ScoreInput) -> f64 {
        if input.total == 0 {
            return 0.0;
        }
        let passed = input.passed.min(input.total);
        f64::from(passed) / f64::from(input.total) * f64::from(input.points)
    }

    /// Bonus for remaining time, scaled to `max_time_bonus`
    pub fn time_bonus(&self, input: &ScoreInput) -> f64 {
        let Some(limit_minutes) = input.time_limit_minutes else {
            return 0.0;
        };
        let limit_seconds = limit_minutes * 60.0;
        if limit_seconds.is_nan() || limit_seconds <= 0.0 {
            return 0.0;
        }
        let elapsed = input.elapsed_seconds.max(0.0);
        ((limit_seconds - elapsed) / limit_seconds).max(0.0) * self.max_time_bonus
    }

    /// Penalty for retries; the first attempt is free
    pub fn attempt_penalty(&self, input: &ScoreInput) -> f64 {
        f64::from(input.attempts.saturating_sub(1)) * f64::from(self.attempt_penalty)
    }

    /// Score an attempt
    pub fn compute(&self, input: &ScoreInput) -> ScoreBreakdown {
        let base_score = self.base_score(input);
        let time_bonus = self.time_bonus(input);
        let attempt_penalty = self.attempt_penalty(input);
        let total = (base_score + time_bonus - attempt_penalty).max(0.0).round() as u32;

        ScoreBreakdown { base_score, time_bonus, attempt_penalty, total }
    }
}

/// Score an attempt with the default bonus and penalty
pub fn compute_score(
    passed: u32,
    total: u32,
    points: u32,
    elapsed_seconds: f64,
    time_limit_minutes: Option<f64>,
    attempts: u32,
) -> u32 {
    let input = ScoreInput { passed, total, points, elapsed_seconds, time_limit_minutes, attempts };
    ScoreCalculator::default().compute(&input).total
}
