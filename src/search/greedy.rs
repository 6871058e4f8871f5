use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use log::debug;

use super::{reconstruct_path, Predecessors, SearchResult};
use crate::board::Board;
use crate::heuristic::Heuristic;

/// Greedy best-first search ordered by the heuristic alone.
///
/// A board may be queued several times; duplicates are filtered when they are
/// popped and only the first pop of a board counts as explored.
/// The predecessor of a board is fixed by its first discovery.
/// Equal estimates are dequeued in insertion order.
pub fn greedy(start: Board, goal: &Board, heuristic: Heuristic) -> SearchResult {
    let timer = Instant::now();

    // min-heap over (h, insertion order)
    let mut frontier = BinaryHeap::new();
    let mut visited = HashSet::new();
    let mut preds = Predecessors::new();
    let mut explored = 0;
    let mut seq = 0u64;

    frontier.push(Reverse((heuristic.eval(start, goal), seq, start)));

    while let Some(Reverse((_, _, current))) = frontier.pop() {
        if !visited.insert(current) {
            continue;
        }
        explored += 1;

        if current.is_goal(goal) {
            let path = reconstruct_path(&preds, start, current);
            return SearchResult::solved(explored, timer.elapsed(), path);
        }

        for (_, next) in current.neighbors() {
            if visited.contains(&next) {
                continue;
            }
            preds.entry(next).or_insert(current);
            seq += 1;
            frontier.push(Reverse((heuristic.eval(next, goal), seq, next)));
        }
    }

    debug!("greedy exhausted {} states", explored);
    SearchResult::failed(explored, timer.elapsed())
}
