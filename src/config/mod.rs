//! Configuration management for flexquest

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::QuestError;
use crate::progress::{LevelCalculator, POINTS_PER_LEVEL};
use crate::scoring::score::{ATTEMPT_PENALTY, MAX_TIME_BONUS};
use crate::scoring::{DEFAULT_PASS_RATE, ScoreCalculator, SimulatedRunner};

/// Scoring and progression constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// XP needed per level
    pub points_per_level: u64,

    /// Largest possible time bonus
    pub max_time_bonus: f64,

    /// XP deducted per retry
    pub attempt_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_level: POINTS_PER_LEVEL,
            max_time_bonus: MAX_TIME_BONUS,
            attempt_penalty: ATTEMPT_PENALTY,
        }
    }
}

/// Settings for the simulated test runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Chance that a simulated test passes (0.0-1.0)
    pub pass_rate: f64,

    /// Artificial pause before results, in milliseconds
    pub delay_ms: u64,

    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { pass_rate: DEFAULT_PASS_RATE, delay_ms: 1500, seed: None }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,

    pub runner: RunnerConfig,

    /// Replacement catalog file (the built-in catalog is used if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "flexquest")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<(), QuestError> {
        if self.scoring.points_per_level == 0 {
            return Err(QuestError::InvalidConfig("points_per_level must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.runner.pass_rate) {
            return Err(QuestError::InvalidConfig(format!(
                "pass_rate must be between 0 and 1, got {}",
                self.runner.pass_rate
            )));
        }
        if !self.scoring.max_time_bonus.is_finite() || self.scoring.max_time_bonus < 0.0 {
            return Err(QuestError::InvalidConfig("max_time_bonus must be non-negative".into()));
        }
        Ok(())
    }

    /// Level calculator for the configured level size
    pub fn level_calculator(&self) -> Result<LevelCalculator, QuestError> {
        NonZeroU64::new(self.scoring.points_per_level)
            .map(LevelCalculator::new)
            .ok_or_else(|| QuestError::InvalidConfig("points_per_level must be positive".into()))
    }

    /// Score calculator with the configured bonus and penalty
    pub fn score_calculator(&self) -> ScoreCalculator {
        ScoreCalculator {
            max_time_bonus: self.scoring.max_time_bonus,
            attempt_penalty: self.scoring.attempt_penalty,
        }
    }

    /// Simulated runner, seeded if a seed is configured
    pub fn simulated_runner(&self) -> SimulatedRunner {
        match self.runner.seed {
            Some(seed) => SimulatedRunner::seeded(self.runner.pass_rate, seed),
            None => SimulatedRunner::new(self.runner.pass_rate),
        }
    }

    /// Artificial delay before a run reports results
    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.runner.delay_ms)
    }

    /// Load the configured catalog, falling back to the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("Failed to load catalog from {:?}", path)),
            None => Catalog::builtin().context("Failed to parse built-in catalog"),
        }
    }
}
