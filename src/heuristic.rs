use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Estimate of the remaining number of moves to the goal.
///
/// Both variants are admissible and `Manhattan` dominates `Misplaced`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// h1: number of misplaced tiles
    Misplaced,
    /// h2: total manhattan distance
    #[default]
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Misplaced, Heuristic::Manhattan];

    pub fn eval(self, board: Board, goal: &Board) -> u32 {
        match self {
            Heuristic::Misplaced => board.misplaced(goal),
            Heuristic::Manhattan => board.manhattan(goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Misplaced => "h1 - Misplaced Tiles",
            Heuristic::Manhattan => "h2 - Manhattan Distance",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
