use crate::board::{Cell, Value};
use crate::errors::FromValuesError;
use crate::helper::{value_from_char, value_to_char};
use crate::layout::Layout;
use crate::parse_errors::{InvalidEntry, LineParseError};
use crate::solver::Solver;
use std::fmt;

/// A grid of size N in the external flat representation: N² values in
/// row-major order, each in `0..=N`, 0 for a blank cell.
///
/// A `Grid` is input and output of the solver. Construction validates the
/// external data; filling cells during a solve happens exclusively through
/// propagation on the solver's own board state, never by writing into a
/// `Grid`.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct Grid {
    pub(crate) size: u8,
    pub(crate) values: Vec<u8>,
}

impl Grid {
    /// Creates a grid from a flat value sequence.
    ///
    /// `values` must be `size²` long with every entry in `0..=size`;
    /// `size` must be a supported perfect square. Violations are reported
    /// as errors before any solving begins, never coerced.
    ///
    /// ```
    /// use anydoku::Grid;
    ///
    /// let grid = Grid::from_values(4, vec![1, 0, 0, 0, 0, 0, 0, 2, 0, 0, 2, 0, 0, 1, 0, 0]);
    /// assert!(grid.is_ok());
    /// ```
    pub fn from_values(size: u8, values: Vec<u8>) -> Result<Grid, FromValuesError> {
        // reuse the layout check so unsupported sizes fail identically
        // on both entry paths
        Layout::new(size)?;

        let expected = size as usize * size as usize;
        if values.len() != expected {
            return Err(FromValuesError::WrongLength {
                expected,
                found: values.len(),
            });
        }
        if let Some((cell, &value)) = values.iter().enumerate().find(|&(_, &v)| v > size) {
            return Err(FromValuesError::ValueOutOfRange {
                cell: cell as u16,
                value,
                size,
            });
        }
        Ok(Grid { size, values })
    }

    /// Creates a grid from a line of one character per cell: `1`-`9` and
    /// `a`-`g` for values, `.`, `_` or `0` for blanks. Anything after the
    /// first whitespace is treated as a comment.
    ///
    /// The grid size is inferred from the number of cells; lines of 16,
    /// 81 and 256 cells are accepted. Larger sizes exceed the one
    /// character per cell encoding and can only be built with
    /// [`Grid::from_values`].
    pub fn from_str_line(s: &str) -> Result<Grid, LineParseError> {
        let line = s.split_whitespace().next().unwrap_or("");
        let n_chars = line.chars().count();
        let size: u8 = match n_chars {
            16 => 4,
            81 => 9,
            256 => 16,
            _ => return Err(LineParseError::UnsupportedLength(n_chars)),
        };

        let mut values = Vec::with_capacity(n_chars);
        for (cell, ch) in line.chars().enumerate() {
            let value = match ch {
                '.' | '_' | '0' => 0,
                ch => value_from_char(ch)
                    .filter(|&value| value <= size)
                    .ok_or(LineParseError::InvalidEntry(InvalidEntry {
                        cell: cell as u16,
                        ch,
                    }))?,
            };
            values.push(value);
        }
        Ok(Grid { size, values })
    }

    /// Writes the grid in the line format read by [`Grid::from_str_line`],
    /// with `.` for blank cells.
    ///
    /// # Panics
    /// Panics for sizes above 16, which have no single-character encoding.
    pub fn to_str_line(&self) -> String {
        assert!(self.size <= 16, "line format covers sizes up to 16");
        self.values
            .iter()
            .map(|&value| match value {
                0 => '.',
                value => value_to_char(value),
            })
            .collect()
    }

    /// The grid size N.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// The flat row-major value sequence, 0 for blanks.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Consumes the grid and returns the flat value sequence.
    pub fn into_values(self) -> Vec<u8> {
        self.values
    }

    /// Returns an iterator over the cells, going from left to right, top
    /// to bottom. Blanks yield `None`.
    pub fn iter(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        self.values.iter().map(|&value| match value {
            0 => None,
            value => Some(Value::new(value)),
        })
    }

    /// The number of filled-in cells.
    pub fn n_givens(&self) -> usize {
        self.values.iter().filter(|&&value| value != 0).count()
    }

    /// Checks whether the grid is completely filled and every row, column
    /// and box contains each value exactly once.
    pub fn is_solved(&self) -> bool {
        if self.values.iter().any(|&value| value == 0) {
            return false;
        }
        let layout = self.layout();
        for unit in layout.units() {
            let mut seen = 0u32;
            for &cell in unit {
                seen |= 1 << (self.values[cell.as_index()] - 1);
            }
            if seen.count_ones() != self.size as u32 {
                return false;
            }
        }
        true
    }

    /// Finds a solution. If multiple solutions exist, the search stops at
    /// the first one. Returns `None` if no solution exists.
    ///
    /// This is a convenience method that rebuilds the unit and peer
    /// tables on every call; use a [`Solver`] to solve several grids of
    /// one size.
    pub fn solve_one(&self) -> Option<Grid> {
        Solver::new(self.layout()).solve_one(self)
    }

    /// Finds the solution iff it is unique. Returns `None` when the grid
    /// has no solution or more than one.
    pub fn solve_unique(&self) -> Option<Grid> {
        Solver::new(self.layout()).solve_unique(self)
    }

    /// Finds up to `limit` solutions in search order. An unsolvable grid
    /// yields an empty vector.
    pub fn solve_at_most(&self, limit: usize) -> Vec<Grid> {
        Solver::new(self.layout()).solve_at_most(self, limit)
    }

    pub(crate) fn value_at(&self, cell: Cell) -> Option<Value> {
        Value::new_checked(self.values[cell.as_index()], self.size)
    }

    pub(crate) fn layout(&self) -> Layout {
        Layout::new(self.size).expect("grid sizes are validated at construction")
    }
}

impl fmt::Display for Grid {
    /// Formats the grid as a block: one row per line, `_` for blanks,
    /// boxes separated by `|` columns and `+` rules.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size as usize;
        let b = self.layout().box_size() as usize;
        let width = if self.size > 9 { 2 } else { 1 };

        let hline = vec!["-".repeat(b * (width + 1) - 1); b].join("-+-");
        for row in 0..n {
            if row > 0 && row % b == 0 {
                writeln!(f, "{}", hline)?;
            }
            for col in 0..n {
                if col > 0 {
                    write!(f, "{}", if col % b == 0 { " | " } else { " " })?;
                }
                match self.values[row * n + col] {
                    0 => write!(f, "{:>width$}", '_', width = width)?,
                    value => write!(f, "{:>width$}", value, width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Grid;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct RawGrid {
        size: u8,
        values: Vec<u8>,
    }

    impl Serialize for Grid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            RawGrid {
                size: self.size,
                values: self.values.clone(),
            }
            .serialize(serializer)
        }
    }

    // deserialization funnels through `from_values` so malformed data is
    // rejected with the same errors as any other input
    impl<'de> Deserialize<'de> for Grid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Grid, D::Error> {
            let raw = RawGrid::deserialize(deserializer)?;
            Grid::from_values(raw.size, raw.values).map_err(D::Error::custom)
        }
    }
}
