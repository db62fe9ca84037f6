use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile {tile:?} at {pos:?}")]
    InvalidTile { tile: char, pos: (usize, usize) },

    #[error("key {key:?} appears at both {first:?} and {second:?}")]
    DuplicateKey {
        key: char,
        first: (usize, usize),
        second: (usize, usize),
    },

    #[error("cannot split entrance: {0}")]
    CannotSplit(&'static str),

    #[error("popped state with cost {popped} below its recorded best {best}")]
    InvariantViolation { popped: usize, best: usize },
}
