//! Errors that may be encountered when reading a grid from a string

/// An invalid cell entry encountered during parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvalidEntry {
    /// Flat row-major cell number, `0..size²`
    pub cell: u16,
    /// The parsed invalid char
    pub ch: char,
}

/// A structure representing an error caused when parsing a grid in the
/// line format
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum LineParseError {
    /// Character that is neither a cell value valid for this grid size
    /// nor one of the placeholders `.`, `_`, `0`
    InvalidEntry(InvalidEntry),
    /// Number of cells supplied is not N² for a supported grid size N.
    /// Contains the number of cells found.
    UnsupportedLength(usize),
}

use std::fmt;

impl fmt::Display for LineParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        use self::LineParseError as Error;

        match *self {
            Error::InvalidEntry(InvalidEntry { cell, ch }) => {
                write!(f, "cell {} contains invalid character '{}'", cell, ch)
            }
            Error::UnsupportedLength(cells) => write!(
                f,
                "{} cells do not form a square grid of a supported size",
                cells
            ),
        }
    }
}

impl std::error::Error for LineParseError {}
