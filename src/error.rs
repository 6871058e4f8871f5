use thiserror::Error;

/// Malformed board or input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input, expected a start configuration")]
    Empty,

    #[error("expected 9 symbols but found {0}")]
    Length(usize),

    #[error("invalid symbol {0:?}, expected 1-8 and 'B' or '0' for the blank")]
    Symbol(char),

    #[error("symbol {0} occurs more than once")]
    Duplicate(u8),

    #[error("not a permutation of 0-8")]
    InvalidBoard,
}

/// Errors of the command line front end.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },
}
