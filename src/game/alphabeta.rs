use super::{decide, utility, Decision};
use crate::board::Board;

/// Alpha-Beta tree search.
///
/// @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning
/// - MAX moves first
/// - every root move is searched with the full window, so the decision and
///   value are always those of [`super::minimax`] for the same depth
pub fn alphabeta(root: Board, goal: &Board, depth: usize) -> Decision {
    decide(root, goal, depth, |path, depth, evaluations| {
        alphabeta_rec(path, depth, i32::MIN, i32::MAX, false, goal, evaluations)
    })
}

fn alphabeta_rec(
    path: &mut Vec<Board>,
    depth: usize,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    goal: &Board,
    evaluations: &mut usize,
) -> i32 {
    *evaluations += 1;

    let state = path[path.len() - 1];
    if depth == 0 || state.is_goal(goal) {
        return utility(state, goal);
    }

    let mut best: Option<i32> = None;
    for (_, next) in state.neighbors() {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        let val = alphabeta_rec(path, depth - 1, alpha, beta, !maximizing, goal, evaluations);
        path.pop();

        if maximizing {
            let b = best.map_or(val, |b| b.max(val));
            best = Some(b);
            alpha = alpha.max(b);
        } else {
            let b = best.map_or(val, |b| b.min(val));
            best = Some(b);
            beta = beta.min(b);
        }
        if beta <= alpha {
            break;
        }
    }
    best.unwrap_or_else(|| utility(state, goal))
}
