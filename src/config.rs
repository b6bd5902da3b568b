//! Solver configuration.
//!
//! Every field has a default, so an empty JSON object (or `SolverConfig::default()`)
//! gives the reference behavior: automatic toggle strategy, unlimited branch and
//! bound, parallel batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling for the breadth-first toggle search. The visited map holds up to `2^n` masks.
pub const MAX_BFS_LIGHTS: usize = 32;

/// Hard ceiling for the null space enumerated by the elimination fallback.
pub const MAX_FREE_VARIABLES: usize = 40;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(String),
    #[error("`{field}` must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
}

/// How the toggle solver searches for the minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleStrategy {
    /// Breadth-first search up to `bfs_max_lights`, elimination beyond.
    #[default]
    Auto,
    BreadthFirst,
    Elimination,
}

/// Which solver the batch aggregator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    Toggle,
    Joltage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub toggle_strategy: ToggleStrategy,

    /// Largest light count `Auto` still hands to the breadth-first search.
    pub bfs_max_lights: usize,

    /// Largest null space dimension the elimination fallback will enumerate.
    pub max_free_variables: usize,

    /// Branch and bound node budget; `None` searches until optimal.
    pub node_limit: Option<u64>,

    /// Distance from an integer above which a relaxed value counts as fractional.
    pub integrality_tolerance: f64,

    /// Solve batch machines on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            toggle_strategy: ToggleStrategy::Auto,
            bfs_max_lights: 20,
            max_free_variables: 24,
            node_limit: None,
            integrality_tolerance: 1e-6,
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bfs_max_lights > MAX_BFS_LIGHTS {
            return Err(ConfigError::OutOfRange {
                field: "bfs_max_lights",
                value: self.bfs_max_lights as f64,
                min: 0.0,
                max: MAX_BFS_LIGHTS as f64,
            });
        }
        if self.max_free_variables > MAX_FREE_VARIABLES {
            return Err(ConfigError::OutOfRange {
                field: "max_free_variables",
                value: self.max_free_variables as f64,
                min: 0.0,
                max: MAX_FREE_VARIABLES as f64,
            });
        }
        // NaN fails both comparisons and lands here too.
        if !(self.integrality_tolerance > 0.0 && self.integrality_tolerance < 0.5) {
            return Err(ConfigError::OutOfRange {
                field: "integrality_tolerance",
                value: self.integrality_tolerance,
                min: 0.0,
                max: 0.5,
            });
        }
        Ok(())
    }

    pub fn with_strategy(mut self, strategy: ToggleStrategy) -> Self {
        self.toggle_strategy = strategy;
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
