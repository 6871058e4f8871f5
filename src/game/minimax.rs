use super::{decide, utility, Decision};
use crate::board::Board;

/// Plain minimax with a lookahead of `depth` plies, MAX moves first.
///
/// Boards on the current path are skipped to avoid cycles. The value of a
/// board without any other child is its own utility.
pub fn minimax(root: Board, goal: &Board, depth: usize) -> Decision {
    decide(root, goal, depth, |path, depth, evaluations| {
        minimax_rec(path, depth, false, goal, evaluations)
    })
}

fn minimax_rec(
    path: &mut Vec<Board>,
    depth: usize,
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
        let val = minimax_rec(path, depth - 1, !maximizing, goal, evaluations);
        path.pop();

        best = Some(match best {
            None => val,
            Some(b) if maximizing => b.max(val),
            Some(b) => b.min(val),
        });
    }
    best.unwrap_or_else(|| utility(state, goal))
}
