//! # Adversarial search
//!
//! The puzzle as a two player zero-sum game: MAX moves the blank towards the
//! goal, MIN moves it towards disorder. Both players share the transitions of
//! [`Board`], the utility of a board is its negated manhattan distance.

mod alphabeta;
pub use alphabeta::*;
mod minimax;
pub use minimax::*;

use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use crate::board::Board;
use crate::env::Direction;

/// Utility from the view of MAX, 0 at the goal.
pub fn utility(board: Board, goal: &Board) -> i32 {
    -(board.manhattan(goal) as i32)
}

/// Move selected for MAX at the root.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    /// Best first move and the board it leads to.
    /// `None` if the root itself is terminal.
    pub best: Option<(Direction, Board)>,
    /// Value of the best move, or the utility of a terminal root.
    pub value: i32,
    /// Number of evaluated game states.
    pub evaluations: usize,
    pub elapsed: Duration,
    /// Value of every root move in enumeration order.
    pub children: Vec<(Direction, i32)>,
}

/// Evaluates every root move with `evaluate` and picks the first one with the
/// highest value. The root is never subject to a cutoff.
///
/// `evaluate` receives the path from the root to the child (both included),
/// the remaining depth and the evaluation counter.
fn decide<F>(root: Board, goal: &Board, depth: usize, mut evaluate: F) -> Decision
where
    F: FnMut(&mut Vec<Board>, usize, &mut usize) -> i32,
{
    let timer = Instant::now();
    let mut evaluations = 0;

    if depth == 0 || root.is_goal(goal) {
        return Decision {
            best: None,
            value: utility(root, goal),
            evaluations: 1,
            elapsed: timer.elapsed(),
            children: Vec::new(),
        };
    }

    let mut path = vec![root];
    let mut best: Option<(Direction, Board, i32)> = None;
    let mut children = Vec::with_capacity(4);

    for (d, child) in root.neighbors() {
        path.push(child);
        let value = evaluate(&mut path, depth - 1, &mut evaluations);
        path.truncate(1);

        children.push((d, value));
        if best.map_or(true, |(_, _, v)| value > v) {
            best = Some((d, child, value));
        }
    }

    Decision {
        best: best.map(|(d, b, _)| (d, b)),
        value: best.map_or_else(|| utility(root, goal), |(_, _, v)| v),
        evaluations,
        elapsed: timer.elapsed(),
        children,
    }
}

/// Minimax and alpha-beta decisions for the same root and depth.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub depth: usize,
    pub minimax: Decision,
    pub alphabeta: Decision,
}

impl Comparison {
    pub fn run(root: Board, goal: &Board, depth: usize) -> Comparison {
        let minimax = minimax(root, goal, depth);
        let alphabeta = alphabeta(root, goal, depth);
        let comparison = Comparison {
            depth,
            minimax,
            alphabeta,
        };
        info!(
            "depth {}: minimax {} vs alpha-beta {} evaluations ({:.1}% saved)",
            depth,
            comparison.minimax.evaluations,
            comparison.alphabeta.evaluations,
            comparison.savings()
        );
        comparison
    }

    pub fn same_move(&self) -> bool {
        self.minimax.best == self.alphabeta.best
    }

    pub fn same_value(&self) -> bool {
        self.minimax.value == self.alphabeta.value
    }

    /// Percentage of minimax evaluations avoided by pruning.
    pub fn savings(&self) -> f64 {
        if self.minimax.evaluations == 0 {
            return 0.0;
        }
        (1.0 - self.alphabeta.evaluations as f64 / self.minimax.evaluations as f64) * 100.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::logging;
    use crate::search::test::{board, INSTANCES};

    #[test]
    fn utility_sign() {
        assert_eq!(utility(Board::GOAL, &Board::GOAL), 0);
        assert_eq!(utility(board("123 4B6 758"), &Board::GOAL), -2);
    }

    /// Pruning never changes the decision.
    #[test]
    fn pruning_is_lossless() {
        for (s, _) in INSTANCES.iter().chain(&[("867 254 3B1", 31), ("283 164 7B5", 0)]) {
            let root = board(s);
            for depth in 0..=6 {
                let c = Comparison::run(root, &Board::GOAL, depth);
                assert!(c.same_move(), "{s} depth {depth}");
                assert!(c.same_value(), "{s} depth {depth}");
                assert_eq!(c.minimax.children, c.alphabeta.children, "{s} depth {depth}");
                assert!(c.alphabeta.evaluations <= c.minimax.evaluations);
                assert!(c.savings() >= 0.0);
            }
        }
    }

    #[test]
    fn pruning_saves_work() {
        logging();
        let c = Comparison::run(board("867 254 3B1"), &Board::GOAL, 6);
        assert!(c.alphabeta.evaluations < c.minimax.evaluations);
        assert!(c.savings() > 0.0);
    }

    #[test]
    fn terminal_root() {
        for depth in [0, 3] {
            let c = Comparison::run(Board::GOAL, &Board::GOAL, depth);
            assert_eq!(c.minimax.best, None);
            assert_eq!(c.minimax.value, 0);
            assert_eq!(c.minimax.evaluations, 1);
            assert_eq!(c.alphabeta.evaluations, 1);
        }
        let d = minimax(board("123 4B6 758"), &Board::GOAL, 0);
        assert_eq!(d.best, None);
        assert_eq!(d.value, -2);
    }

    #[test]
    fn one_ply() {
        // with a single ply MAX simply picks the child of highest utility
        let root = board("123 456 7B8");
        let d = minimax(root, &Board::GOAL, 1);
        assert_eq!(d.best, Some((Direction::Right, Board::GOAL)));
        assert_eq!(d.value, 0);
        assert_eq!(d.evaluations, 3);
        assert_eq!(d.children.len(), 3);
    }
}
