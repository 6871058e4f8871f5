use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum optimal solution length of any 3x3 instance is 31,
/// so this bound never hides a shortest solution.
pub const DEPTH_LIMIT: usize = 50;
/// Lookahead of the adversarial searches in plies.
pub const LOOKAHEAD: usize = 6;

/// Tunable bounds of all strategies.
///
/// Parsed from JSON, missing fields fall back to their defaults:
/// `{"depth_limit": 40, "annealing": {"seed": 7}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Depth bound of the depth-first search.
    pub depth_limit: usize,
    /// Lookahead of minimax and alpha-beta.
    pub lookahead: usize,
    pub annealing: AnnealingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth_limit: DEPTH_LIMIT,
            lookahead: LOOKAHEAD,
            annealing: AnnealingConfig::default(),
        }
    }
}

/// Geometric cooling schedule of the simulated annealing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    /// Factor applied to the temperature after every iteration.
    pub cooling_rate: f64,
    /// The search stops once the temperature drops to this value.
    pub min_temperature: f64,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.9995,
            min_temperature: 0.001,
            max_iterations: 500_000,
            seed: 42,
        }
    }
}

impl FromStr for Config {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
