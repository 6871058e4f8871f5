use std::collections::HashSet;
use std::time::Instant;

use log::debug;

use super::{reconstruct_path, Predecessors, SearchResult};
use crate::board::Board;

/// Depth-first search with an explicit stack, bounded to `depth_limit` moves.
///
/// Boards are marked visited when they are expanded. Stale stack entries of
/// already visited boards are skipped without being counted. Neighbors are
/// pushed in enumeration order, so the last one is expanded first.
///
/// The first goal found is returned, which is usually not the shortest one.
pub fn dfs(start: Board, goal: &Board, depth_limit: usize) -> SearchResult {
    let timer = Instant::now();

    let mut frontier = vec![(start, 0)];
    let mut visited = HashSet::new();
    let mut preds = Predecessors::new();
    let mut explored = 0;

    while let Some((current, depth)) = frontier.pop() {
        if !visited.insert(current) {
            continue;
        }
        explored += 1;

        if current.is_goal(goal) {
            let path = reconstruct_path(&preds, start, current);
            return SearchResult::solved(explored, timer.elapsed(), path);
        }

        if depth >= depth_limit {
            continue;
        }

        for (_, next) in current.neighbors() {
            if !visited.contains(&next) {
                preds.insert(next, current);
                frontier.push((next, depth + 1));
            }
        }
    }

    debug!(
        "dfs exhausted {} states within depth {}",
        explored, depth_limit
    );
    SearchResult::failed(explored, timer.elapsed())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::DEPTH_LIMIT;
    use crate::search::test::{assert_path, board, INSTANCES};

    #[test]
    fn dfs_respects_limit() {
        for (s, _) in INSTANCES {
            let start = board(s);
            let result = dfs(start, &Board::GOAL, DEPTH_LIMIT);
            if result.success {
                assert_path(&result, start, Board::GOAL);
                assert!(result.len().unwrap() <= DEPTH_LIMIT);
            }
        }
    }

    #[test]
    fn dfs_zero_limit() {
        let result = dfs(board("123 4B6 758"), &Board::GOAL, 0);
        assert!(!result.success);
        assert_eq!(result.explored, 1);

        let result = dfs(Board::GOAL, &Board::GOAL, 0);
        assert!(result.success);
        assert_eq!(result.len(), Some(0));
    }

    #[test]
    fn dfs_single_move() {
        // the goal is the last enumerated neighbor, which is expanded first
        let start = board("123 456 7B8");
        let result = dfs(start, &Board::GOAL, DEPTH_LIMIT);
        assert_path(&result, start, Board::GOAL);
        assert_eq!(result.len(), Some(1));
        assert_eq!(result.explored, 2);
    }

    #[test]
    fn dfs_unsolvable() {
        let result = dfs(board("213 456 78B"), &Board::GOAL, DEPTH_LIMIT);
        assert!(!result.success);
        assert!(result.explored <= 181_440);
    }
}
