use std::time::Instant;

use log::debug;

use super::{Detail, SearchResult};
use crate::board::Board;
use crate::heuristic::Heuristic;

/// Outcome of one threshold bounded probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The goal was reached, the probe path ends with it.
    Found,
    /// Smallest f of all boards that exceeded the threshold.
    Bound(u32),
    /// No goal and no board beyond the threshold, the search space is empty.
    Exhausted,
}

impl Probe {
    fn merge(self, other: Probe) -> Probe {
        match (self, other) {
            (Probe::Found, _) | (_, Probe::Found) => Probe::Found,
            (Probe::Bound(a), Probe::Bound(b)) => Probe::Bound(a.min(b)),
            (Probe::Bound(a), Probe::Exhausted) | (Probe::Exhausted, Probe::Bound(a)) => {
                Probe::Bound(a)
            }
            (Probe::Exhausted, Probe::Exhausted) => Probe::Exhausted,
        }
    }
}

/// Iterative deepening A*.
///
/// Repeats depth-first probes bounded by f = g + h, raising the threshold to
/// the smallest exceeding f after every probe. Only the current path is kept
/// in memory and cycles are avoided along this path only.
///
/// Path-local cycle checks never exhaust the other parity half of the
/// boards, so unreachable goals are rejected up front without any probe.
pub fn ida_star(start: Board, goal: &Board, heuristic: Heuristic) -> SearchResult {
    let timer = Instant::now();

    if !start.is_solvable_to(goal) {
        debug!("ida* rejected {} -> {}, parity differs", start, goal);
        let detail = Detail::IdaStar {
            iterations: 0,
            thresholds: Vec::new(),
        };
        return SearchResult::failed(0, timer.elapsed()).with_detail(detail);
    }

    let mut explored = 0;
    let mut threshold = heuristic.eval(start, goal);
    let mut thresholds = vec![threshold];
    let mut path = vec![start];

    loop {
        match probe(&mut path, 0, threshold, goal, heuristic, &mut explored) {
            Probe::Found => {
                let detail = Detail::IdaStar {
                    iterations: thresholds.len(),
                    thresholds,
                };
                return SearchResult::solved(explored, timer.elapsed(), Some(path))
                    .with_detail(detail);
            }
            Probe::Bound(next) => {
                debug!(
                    "ida* iteration {}: threshold={} -> next={} (states so far: {})",
                    thresholds.len(),
                    threshold,
                    next,
                    explored
                );
                threshold = next;
                thresholds.push(next);
            }
            Probe::Exhausted => {
                let detail = Detail::IdaStar {
                    iterations: thresholds.len(),
                    thresholds,
                };
                return SearchResult::failed(explored, timer.elapsed()).with_detail(detail);
            }
        }
    }
}

/// Depth-first probe below the last board of `path`.
///
/// On `Found` the path is left ending with the goal, otherwise it is restored.
pub fn probe(
    path: &mut Vec<Board>,
    g: u32,
    threshold: u32,
    goal: &Board,
    heuristic: Heuristic,
    explored: &mut usize,
) -> Probe {
    let current = match path.last() {
        Some(&b) => b,
        None => return Probe::Exhausted,
    };

    let f = g + heuristic.eval(current, goal);
    if f > threshold {
        return Probe::Bound(f);
    }
    *explored += 1;

    if current.is_goal(goal) {
        return Probe::Found;
    }

    let mut result = Probe::Exhausted;
    for (_, next) in current.neighbors() {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        result = result.merge(probe(path, g + 1, threshold, goal, heuristic, explored));
        if result == Probe::Found {
            return result;
        }
        path.pop();
    }
    result
}
