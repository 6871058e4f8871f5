//! # Path finding strategies
//!
//! All strategies share the transition model of [`Board`] and report a
//! [`SearchResult`]. Every run owns its frontier and bookkeeping, nothing is
//! shared between runs.

mod annealing;
pub use annealing::*;
mod astar;
pub use astar::*;
mod bfs;
pub use bfs::*;
mod dfs;
pub use dfs::*;
mod greedy;
pub use greedy::*;
mod idastar;
pub use idastar::*;

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::Config;
use crate::env::Direction;
use crate::heuristic::Heuristic;

/// Maps each discovered board to the board it was reached from.
pub type Predecessors = HashMap<Board, Board>;

/// Walks the predecessor links back from `goal` to `start`.
///
/// Returns `None` if the chain breaks or loops before reaching `start`.
pub fn reconstruct_path(preds: &Predecessors, start: Board, goal: Board) -> Option<Vec<Board>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *preds.get(&current)?;
        path.push(current);
        if path.len() > preds.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

/// Outcome of a single strategy run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub success: bool,
    /// Number of states the strategy expanded or evaluated.
    pub explored: usize,
    pub elapsed: Duration,
    /// Boards from start to goal, the start alone if it already is the goal.
    pub path: Option<Vec<Board>>,
    pub detail: Detail,
}

impl SearchResult {
    /// A run that reached the goal. A missing `path` still counts as failure.
    pub fn solved(explored: usize, elapsed: Duration, path: Option<Vec<Board>>) -> SearchResult {
        SearchResult {
            success: path.is_some(),
            explored,
            elapsed,
            path,
            detail: Detail::None,
        }
    }

    pub fn failed(explored: usize, elapsed: Duration) -> SearchResult {
        SearchResult {
            success: false,
            explored,
            elapsed,
            path: None,
            detail: Detail::None,
        }
    }

    pub fn with_detail(mut self, detail: Detail) -> SearchResult {
        self.detail = detail;
        self
    }

    /// Number of moves of the solution.
    pub fn len(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }

    /// Move names of the solution, empty if there is none.
    pub fn moves(&self) -> Vec<Direction> {
        self.path
            .as_deref()
            .unwrap_or_default()
            .windows(2)
            .filter_map(|w| w[0].action(w[1]))
            .collect()
    }
}

/// Strategy specific statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    #[default]
    None,
    IdaStar {
        iterations: usize,
        /// Threshold of every probe, starting with h(start).
        thresholds: Vec<u32>,
    },
    Annealing {
        final_temperature: f64,
        best_energy: u32,
        best: Board,
        accepted: usize,
        rejected: usize,
    },
}

/// The non adversarial strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Bfs,
    Dfs,
    Greedy,
    AStar,
    IdaStar,
    Annealing,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Greedy,
        Strategy::AStar,
        Strategy::IdaStar,
        Strategy::Annealing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "Breadth-First Search (BFS)",
            Strategy::Dfs => "Depth-First Search (DFS)",
            Strategy::Greedy => "Greedy Best-First Search",
            Strategy::AStar => "A* Search",
            Strategy::IdaStar => "Iterative Deepening A* (IDA*)",
            Strategy::Annealing => "Simulated Annealing",
        }
    }

    /// Whether the heuristic argument of [`Strategy::run`] has any effect.
    /// Simulated annealing always uses the manhattan distance as energy.
    pub fn takes_heuristic(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar | Strategy::IdaStar)
    }

    /// Short description of the parameters that shape this run.
    pub fn label(self, heuristic: Heuristic, config: &Config) -> String {
        match self {
            Strategy::Bfs => String::new(),
            Strategy::Dfs => format!("Depth Limit = {}", config.depth_limit),
            Strategy::Annealing => Heuristic::Manhattan.name().to_string(),
            _ => heuristic.name().to_string(),
        }
    }

    pub fn run(
        self,
        start: Board,
        goal: &Board,
        heuristic: Heuristic,
        config: &Config,
    ) -> SearchResult {
        match self {
            Strategy::Bfs => bfs(start, goal),
            Strategy::Dfs => dfs(start, goal, config.depth_limit),
            Strategy::Greedy => greedy(start, goal, heuristic),
            Strategy::AStar => a_star(start, goal, heuristic),
            Strategy::IdaStar => ida_star(start, goal, heuristic),
            Strategy::Annealing => simulated_annealing(start, goal, &config.annealing),
        }
    }
}
