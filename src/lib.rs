#![warn(missing_docs)]
//! A generic-size sudoku solver library
//!
//! ## Overview
//!
//! anydoku solves square sudoku grids of any size N whose box dimension
//! B = √N is an integer. The catalog of common variants covers 4×4, 9×9
//! and 16×16 grids; other sizes work through [`Layout::new`] directly.
//!
//! A puzzle enters as a [`Grid`]: N² values in row-major order with 0 for
//! blank cells, built from a flat sequence or parsed from a line of text.
//! The solver propagates the givens, then searches with backtracking where
//! propagation stalls. The result is either a completely filled grid or
//! "no solution" — never a partial fill.
//!
//! ## Example
//!
//! ```
//! use anydoku::{Grid, Solver, Variant};
//!
//! let grid_line = "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..";
//!
//! // Grids can be created from one-character-per-cell lines or directly
//! // from flat value sequences.
//! let grid = Grid::from_str_line(grid_line).unwrap();
//! // Grid::from_values(9, some_values_vec);
//!
//! let solver = Solver::new(Variant::NineByNine.layout());
//! if let Some(solution) = solver.solve_one(&grid) {
//!     println!("{}", solution);
//!     println!("{}", solution.to_str_line());
//!
//!     let cell_values: Vec<u8> = solution.into_values();
//! }
//! ```

mod bitset;
mod board;
mod helper;
mod layout;
mod solver;

pub mod errors;
pub mod parse_errors;

pub use crate::bitset::CandidateSet;
pub use crate::board::{Cell, CellState, Grid, Value};
pub use crate::layout::{Layout, Variant};
pub use crate::solver::Solver;
