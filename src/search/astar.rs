use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use log::debug;

use super::{reconstruct_path, Predecessors, SearchResult};
use crate::board::Board;
use crate::heuristic::Heuristic;

/// Frontier entry of the A* search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    f: u32,
    h: u32,
    /// Insertion order, resolves the remaining ties.
    seq: u64,
    g: u32,
    board: Board,
}

impl Ord for Node {
    /// Reversed so that the max-heap pops the lowest f, then the lowest h.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search over f = g + h.
///
/// A neighbor is (re)queued only if it strictly improves the best known cost
/// of its board. Outdated entries are still popped and counted, but they are
/// dropped without expansion.
pub fn a_star(start: Board, goal: &Board, heuristic: Heuristic) -> SearchResult {
    let timer = Instant::now();

    let mut frontier = BinaryHeap::new();
    let mut best_g: HashMap<Board, u32> = HashMap::new();
    let mut preds = Predecessors::new();
    let mut explored = 0;
    let mut seq = 0;

    let h = heuristic.eval(start, goal);
    best_g.insert(start, 0);
    frontier.push(Node {
        f: h,
        h,
        seq,
        g: 0,
        board: start,
    });

    while let Some(node) = frontier.pop() {
        explored += 1;

        if node.board.is_goal(goal) {
            let path = reconstruct_path(&preds, start, node.board);
            return SearchResult::solved(explored, timer.elapsed(), path);
        }

        if node.g > best_g.get(&node.board).copied().unwrap_or(u32::MAX) {
            continue;
        }

        let g = node.g + 1;
        for (_, next) in node.board.neighbors() {
            if best_g.get(&next).map_or(true, |&old| g < old) {
                best_g.insert(next, g);
                preds.insert(next, node.board);

                let h = heuristic.eval(next, goal);
                seq += 1;
                frontier.push(Node {
                    f: g + h,
                    h,
                    seq,
                    g,
                    board: next,
                });
            }
        }
    }

    debug!("a* exhausted {} states", explored);
    SearchResult::failed(explored, timer.elapsed())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::search::test::{assert_path, board};

    #[test]
    fn node_order() {
        let node = |f, h, seq| Node {
            f,
            h,
            seq,
            g: f - h,
            board: Board::GOAL,
        };
        let mut heap = BinaryHeap::new();
        heap.push(node(5, 3, 0));
        heap.push(node(4, 4, 1));
        heap.push(node(4, 2, 2));
        heap.push(node(4, 2, 3));
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|n| n.seq).collect();
        assert_eq!(order, [2, 3, 1, 0]);
    }

    #[test]
    fn a_star_two_moves() {
        let start = board("123 4B6 758");
        for heuristic in Heuristic::ALL {
            let result = a_star(start, &Board::GOAL, heuristic);
            assert_path(&result, start, Board::GOAL);
            assert_eq!(result.len(), Some(2));
            // start, the board after "Down" and the goal
            assert_eq!(result.explored, 3);
        }
    }

    #[test]
    fn a_star_dominance() {
        let start = board("B86 543 721");
        let h1 = a_star(start, &Board::GOAL, Heuristic::Misplaced);
        let h2 = a_star(start, &Board::GOAL, Heuristic::Manhattan);
        assert_eq!(h1.len(), Some(28));
        assert_eq!(h2.len(), Some(28));
        assert!(h2.explored < h1.explored);
    }

    #[test]
    fn a_star_unsolvable() {
        let result = a_star(board("213 456 78B"), &Board::GOAL, Heuristic::Manhattan);
        assert!(!result.success);
        assert!(result.explored >= 181_440);
    }
}
