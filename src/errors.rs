//! Errors reported for malformed input and exhausted search budgets

#[cfg(doc)]
use crate::{Grid, Layout, Solver};

/// Error for [`Layout::new`]
///
/// Grid sizes must be perfect squares so that the box dimension B = √N is an
/// integer. The bitset backing candidate sets limits N to 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("grid size {0} is not a supported perfect square (1, 4, 9, 16 or 25)")]
pub struct InvalidSizeError(pub u8);

/// Error for [`Grid::from_values`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FromValuesError {
    /// The requested grid size is not usable
    #[error(transparent)]
    InvalidSize(#[from] InvalidSizeError),
    /// The value sequence is not size² long
    #[error("value sequence should have length {expected}, found {found}")]
    WrongLength {
        /// size², the number of cells the grid needs
        expected: usize,
        /// length of the sequence that was passed
        found: usize,
    },
    /// A cell holds a value outside `0..=size`
    #[error("cell {cell} holds {value}, outside the valid range 0..={size}")]
    ValueOutOfRange {
        /// Flat row-major cell index
        cell: u16,
        /// The offending value
        value: u8,
        /// Grid size the value was checked against
        size: u8,
    },
}

/// Error for the `_bounded` solve methods of [`Solver`]
///
/// Returned when the guess budget ran out before the search finished.
/// The unbounded methods never produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search aborted after exhausting the budget of {0} guesses")]
pub struct GuessLimitReached(pub u64);
