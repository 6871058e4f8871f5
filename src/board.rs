use std::fmt;
use std::str::FromStr;

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::env::{Direction, Vec2D, CELLS};
use crate::error::ParseError;

/// One arrangement of the nine symbols, the blank is `0`.
///
/// Every cell is packed into 4 bits of a single integer, so boards are `Copy`
/// and can be compared and hashed by value without touching the heap.
/// Only validated permutations of `0..=8` are ever constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "[u8; 9]", try_from = "[u8; 9]")]
pub struct Board(u64);

impl Board {
    /// The sorted arrangement `1 2 3 / 4 5 6 / 7 8 B`.
    pub const GOAL: Board = Board::pack([1, 2, 3, 4, 5, 6, 7, 8, 0]);

    /// Creates a board after checking that `cells` is a permutation of `0..=8`.
    pub fn new(cells: [u8; CELLS]) -> Result<Board, ParseError> {
        let mut seen = [false; CELLS];
        for &c in &cells {
            let slot = seen.get_mut(c as usize).ok_or(ParseError::InvalidBoard)?;
            if *slot {
                return Err(ParseError::Duplicate(c));
            }
            *slot = true;
        }
        Ok(Board::pack(cells))
    }

    const fn pack(cells: [u8; CELLS]) -> Board {
        let mut packed = 0;
        let mut i = 0;
        while i < CELLS {
            packed |= (cells[i] as u64 & 0xf) << (4 * i);
            i += 1;
        }
        Board(packed)
    }

    /// Symbol at the row-major `index`.
    pub fn get(self, index: usize) -> u8 {
        debug_assert!(index < CELLS);
        ((self.0 >> (4 * index)) & 0xf) as u8
    }

    pub fn cells(self) -> [u8; CELLS] {
        let mut cells = [0; CELLS];
        for (i, c) in cells.iter_mut().enumerate() {
            *c = self.get(i);
        }
        cells
    }

    /// Row-major index of `tile`.
    pub fn position(self, tile: u8) -> usize {
        (0..CELLS).find(|&i| self.get(i) == tile).unwrap_or_default()
    }

    pub fn blank(self) -> usize {
        self.position(0)
    }

    fn swap(self, i: usize, j: usize) -> Board {
        let (a, b) = (self.get(i) as u64, self.get(j) as u64);
        let cleared = self.0 & !(0xf << (4 * i)) & !(0xf << (4 * j));
        Board(cleared | (b << (4 * i)) | (a << (4 * j)))
    }

    /// All boards reachable with a single move of the blank.
    /// They are always enumerated in the order Up, Down, Left, Right.
    pub fn neighbors(self) -> Neighbors {
        Neighbors::new(self)
    }

    /// Moves the blank in direction `d`, `None` if it would leave the board.
    pub fn apply(self, d: Direction) -> Option<Board> {
        let blank = self.blank();
        Vec2D::from_index(blank)
            .apply(d)
            .index()
            .map(|target| self.swap(blank, target))
    }

    pub fn is_goal(self, goal: &Board) -> bool {
        self == *goal
    }

    /// Direction of the blank that transforms `self` into `to`.
    /// Returns `None` if the boards are not adjacent.
    pub fn action(self, to: Board) -> Option<Direction> {
        let step = Vec2D::from_index(to.blank()) - Vec2D::from_index(self.blank());
        let d = Direction::try_from(step).ok()?;
        (self.apply(d) == Some(to)).then_some(d)
    }

    /// Number of non-blank tiles that are not on their goal cell (h1).
    pub fn misplaced(self, goal: &Board) -> u32 {
        (0..CELLS)
            .filter(|&i| self.get(i) != 0 && self.get(i) != goal.get(i))
            .count() as u32
    }

    /// Sum of the manhattan distances of all non-blank tiles to their goal
    /// cells (h2).
    pub fn manhattan(self, goal: &Board) -> u32 {
        let mut target = [Vec2D::default(); CELLS];
        for i in 0..CELLS {
            target[goal.get(i) as usize] = Vec2D::from_index(i);
        }
        (0..CELLS)
            .filter(|&i| self.get(i) != 0)
            .map(|i| (Vec2D::from_index(i) - target[self.get(i) as usize]).manhattan())
            .sum()
    }

    /// Number of tile pairs (blank excluded) in reversed row-major order.
    pub fn inversions(self) -> u32 {
        let tiles: Vec<u8> = self.cells().into_iter().filter(|&c| c != 0).collect();
        let mut count = 0;
        for (i, a) in tiles.iter().enumerate() {
            count += tiles[i + 1..].iter().filter(|&b| b < a).count() as u32;
        }
        count
    }

    /// On an odd sized board every move preserves the inversion parity,
    /// which splits the state space into two unconnected halves.
    pub fn is_solvable_to(self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::GOAL
    }
}

impl From<Board> for [u8; CELLS] {
    fn from(board: Board) -> Self {
        board.cells()
    }
}

impl TryFrom<[u8; CELLS]> for Board {
    type Error = ParseError;

    fn try_from(cells: [u8; CELLS]) -> Result<Self, Self::Error> {
        Board::new(cells)
    }
}

impl FromStr for Board {
    type Err = ParseError;

    /// Parses `"123;B46;758"`, `"1 2 3 4 0 6 7 5 8"` and similar forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, ';' | ',' | '/' | '|'))
            .collect();
        if symbols.is_empty() {
            return Err(ParseError::Empty);
        }
        if symbols.len() != CELLS {
            return Err(ParseError::Length(symbols.len()));
        }

        let mut cells = [0; CELLS];
        for (cell, &c) in cells.iter_mut().zip(&symbols) {
            *cell = match c {
                'B' | 'b' => 0,
                '0'..='8' => c as u8 - b'0',
                _ => return Err(ParseError::Symbol(c)),
            };
        }
        Board::new(cells)
    }
}

fn symbol(c: u8) -> char {
    if c == 0 {
        'B'
    } else {
        (b'0' + c) as char
    }
}

impl fmt::Display for Board {
    /// `1 2 3 / B 4 6 / 7 5 8`, or a 3x3 grid with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..CELLS {
            write!(f, "{}", symbol(self.get(i)))?;
            if f.alternate() {
                if i % 3 == 2 {
                    writeln!(f)?;
                } else {
                    write!(f, " ")?;
                }
            } else if i % 3 == 2 && i < CELLS - 1 {
                write!(f, " / ")?;
            } else if i < CELLS - 1 {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for y in 0..3 {
            write!(f, "  ")?;
            for x in 0..3 {
                let c = self.get(y * 3 + x);
                if c == 0 {
                    write!(f, "{} ", "B".bright_black())?;
                } else {
                    write!(f, "{} ", c)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// Iterator over all transitions of a board.
pub struct Neighbors {
    board: Board,
    blank: usize,
    dir: u8,
}

impl Neighbors {
    fn new(board: Board) -> Neighbors {
        Neighbors {
            board,
            blank: board.blank(),
            dir: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = (Direction, Board);

    fn next(&mut self) -> Option<Self::Item> {
        while self.dir < 4 {
            let d = Direction::from(self.dir);
            self.dir += 1;
            if let Some(target) = Vec2D::from_index(self.blank).apply(d).index() {
                return Some((d, self.board.swap(self.blank, target)));
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn board_pack() {
        let cells = [1, 2, 3, 4, 0, 6, 7, 5, 8];
        let b = Board::new(cells).unwrap();
        assert_eq!(b.cells(), cells);
        assert_eq!(b.blank(), 4);
        assert_eq!(b.position(5), 7);
        assert_eq!(Board::GOAL.cells(), [1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(Board::default(), Board::GOAL);
        assert_eq!(std::mem::size_of::<Board>(), 8);
    }

    #[test]
    fn board_validation() {
        assert_eq!(
            Board::new([1, 1, 3, 4, 0, 6, 7, 5, 8]),
            Err(ParseError::Duplicate(1))
        );
        assert_eq!(
            Board::new([1, 9, 3, 4, 0, 6, 7, 5, 8]),
            Err(ParseError::InvalidBoard)
        );
    }

    #[test]
    fn board_parse() {
        let expected = Board::new([1, 2, 3, 0, 4, 6, 7, 5, 8]).unwrap();
        assert_eq!(board("123;B46;758"), expected);
        assert_eq!(board("1 2 3 0 4 6 7 5 8"), expected);
        assert_eq!(board("1,2,3 / b,4,6 / 7,5,8"), expected);
        assert_eq!(board("123 456 78B"), Board::GOAL);

        assert_eq!("".parse::<Board>(), Err(ParseError::Empty));
        assert_eq!(" ; ".parse::<Board>(), Err(ParseError::Empty));
        assert_eq!("12345678".parse::<Board>(), Err(ParseError::Length(8)));
        assert_eq!("1234567890".parse::<Board>(), Err(ParseError::Length(10)));
        assert_eq!("12345678X".parse::<Board>(), Err(ParseError::Symbol('X')));
        assert_eq!("123456789".parse::<Board>(), Err(ParseError::Symbol('9')));
        assert_eq!("1234567B0".parse::<Board>(), Err(ParseError::Duplicate(0)));
    }

    #[test]
    fn board_display() {
        let b = board("123B46758");
        assert_eq!(b.to_string(), "1 2 3 / B 4 6 / 7 5 8");
        assert_eq!(format!("{b:#}"), "1 2 3\nB 4 6\n7 5 8\n");
    }

    #[test]
    fn board_serde() {
        let b = board("123B46758");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[1,2,3,0,4,6,7,5,8]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);
        assert!(serde_json::from_str::<Board>("[1,1,3,0,4,6,7,5,8]").is_err());
    }

    #[test]
    fn neighbor_counts() {
        // blank in a corner, on an edge and in the center
        for (s, count) in [
            ("B12345678", 2),
            ("12345678B", 2),
            ("1B2345678", 3),
            ("123B45678", 3),
            ("1234B5678", 4),
        ] {
            let b = board(s);
            let neighbors: Vec<_> = b.neighbors().collect();
            assert_eq!(neighbors.len(), count, "{s}");
            for (d, n) in neighbors {
                assert!(Board::new(n.cells()).is_ok());
                assert_eq!(b.apply(d), Some(n));
                assert_eq!(b.action(n), Some(d));
                let back = n.action(b).unwrap();
                assert_ne!(back, d);
                assert_eq!(n.apply(back), Some(b));
            }
        }
    }

    #[test]
    fn neighbor_order() {
        use Direction::*;
        let b = board("1234B5678");
        let dirs: Vec<_> = b.neighbors().map(|(d, _)| d).collect();
        assert_eq!(dirs, [Up, Down, Left, Right]);

        let (_, up) = b.neighbors().next().unwrap();
        assert_eq!(up, board("1B3425678"));
        assert_eq!(board("B12345678").apply(Up), None);
        assert_eq!(board("B12345678").apply(Left), None);
    }

    #[test]
    fn action_not_adjacent() {
        assert_eq!(Board::GOAL.action(Board::GOAL), None);
        assert_eq!(Board::GOAL.action(board("B12345678")), None);
        // the blank moved by one cell, but the tiles around it differ
        assert_eq!(Board::GOAL.action(board("213 45B 786")), None);
        assert_eq!(board("123 456 7B8").action(Board::GOAL), Some(Direction::Right));
    }

    #[test]
    fn heuristics() {
        let b = board("1234B6758");
        assert_eq!(b.misplaced(&Board::GOAL), 2);
        assert_eq!(b.manhattan(&Board::GOAL), 2);
        assert_eq!(Board::GOAL.misplaced(&Board::GOAL), 0);
        assert_eq!(Board::GOAL.manhattan(&Board::GOAL), 0);

        let b = board("876 543 21B");
        assert_eq!(b.misplaced(&Board::GOAL), 8);
        assert!(b.manhattan(&Board::GOAL) >= b.misplaced(&Board::GOAL));

        // relative to a non canonical goal
        let goal = board("B12345678");
        assert_eq!(goal.manhattan(&goal), 0);
        assert_eq!(Board::GOAL.misplaced(&goal), 8);
    }

    #[test]
    fn solvability() {
        assert!(Board::GOAL.is_solvable_to(&Board::GOAL));
        assert!(board("1234B6758").is_solvable_to(&Board::GOAL));
        // swapping two tiles flips the parity
        assert!(!board("21345678B").is_solvable_to(&Board::GOAL));
        assert_eq!(board("21345678B").inversions(), 1);
    }
}
