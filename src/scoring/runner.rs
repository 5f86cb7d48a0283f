//! Test execution boundary
//!
//! Nothing here executes submitted code. `SimulatedRunner` is a stub that
//! rolls a random pass/fail per test case; a sandboxed executor would
//! implement `TestRunner` in its place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Exercise;

/// Default chance that a simulated test passes
pub const DEFAULT_PASS_RATE: f64 = 0.7;

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub passed: bool,
    pub input: Value,
    pub expected: Value,
    /// Output produced by the submission
    pub actual: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Something that can check a submission against an exercise's test cases
pub trait TestRunner {
    /// Run every test case of `exercise` against `code`, in order
    fn run(&mut self, exercise: &Exercise, code: &str) -> Vec<TestResult>;
}

/// Stub runner: each test passes with probability `pass_rate`
#[derive(Debug, Clone)]
pub struct SimulatedRunner {
    rng: StdRng,
    pass_rate: f64,
}

impl SimulatedRunner {
    /// Runner seeded from OS entropy
    pub fn new(pass_rate: f64) -> Self {
        Self { rng: StdRng::from_entropy(), pass_rate: pass_rate.clamp(0.0, 1.0) }
    }

    /// Deterministic runner for reproducible runs
    pub fn seeded(pass_rate: f64, seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), pass_rate: pass_rate.clamp(0.0, 1.0) }
    }

    pub fn pass_rate(&self) -> f64 {
        self.pass_rate
    }
}

impl Default for SimulatedRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PASS_RATE)
    }
}

impl TestRunner for SimulatedRunner {
    fn run(&mut self, exercise: &Exercise, code: &str) -> Vec<TestResult> {
        tracing::debug!(
            exercise = exercise.id,
            code_len = code.len(),
            "Simulating {} test cases",
            exercise.test_cases.len()
        );

        exercise
            .test_cases
            .iter()
            .map(|case| {
                let passed = self.rng.r#gen::<f64>() < self.pass_rate;
                TestResult {
                    passed,
                    input: case.input.clone(),
                    expected: case.expected_output.clone(),
                    actual: if passed {
                        case.expected_output.clone()
                    } else {
                        Value::String("incorrect result".into())
                    },
                    error: (!passed).then(|| "incorrect logic or invalid syntax".to_string()),
                }
            })
            .collect()
    }
}
