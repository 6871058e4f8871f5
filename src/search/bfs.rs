use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use log::debug;

use super::{reconstruct_path, Predecessors, SearchResult};
use crate::board::Board;

/// Breadth-first search.
///
/// Boards are marked visited when they are inserted into the queue, so every
/// board enters the frontier at most once. With unit step costs the first
/// dequeued goal is reached by a shortest path.
pub fn bfs(start: Board, goal: &Board) -> SearchResult {
    let timer = Instant::now();

    let mut frontier = VecDeque::new();
    let mut visited = HashSet::new();
    let mut preds = Predecessors::new();
    let mut explored = 0;

    visited.insert(start);
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        explored += 1;

        if current.is_goal(goal) {
            let path = reconstruct_path(&preds, start, current);
            return SearchResult::solved(explored, timer.elapsed(), path);
        }

        for (_, next) in current.neighbors() {
            if visited.insert(next) {
                preds.insert(next, current);
                frontier.push_back(next);
            }
        }
    }

    debug!("bfs exhausted {} states", explored);
    SearchResult::failed(explored, timer.elapsed())
}
