use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::board::Board;
use crate::error::{InputError, ParseError};

/// Start and goal configuration of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub start: Board,
    pub goal: Board,
}

impl Instance {
    /// Parses the input text.
    ///
    /// The first line holds the start configuration. An optional second line
    /// holds the goal, a missing or blank line falls back to [`Board::GOAL`].
    /// Further lines are ignored.
    pub fn parse(text: &str) -> Result<Instance, InputError> {
        let mut lines = text.lines();

        let start = match lines.next() {
            Some(line) => line
                .parse()
                .map_err(|source| InputError::Parse { line: 1, source })?,
            None => {
                return Err(InputError::Parse {
                    line: 1,
                    source: ParseError::Empty,
                })
            }
        };

        let goal = match lines.next() {
            Some(line) if !line.trim().is_empty() => line
                .parse()
                .map_err(|source| InputError::Parse { line: 2, source })?,
            _ => Board::GOAL,
        };

        Ok(Instance { start, goal })
    }

    pub fn load(path: &Path) -> Result<Instance, InputError> {
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Instance::parse(&text)
    }

    pub fn is_solvable(&self) -> bool {
        self.start.is_solvable_to(&self.goal)
    }
}

impl FromStr for Instance {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instance::parse(s)
    }
}
