//! Types for cells, values and grids of a generic-size sudoku board
mod cell_state;
mod grid;
mod positions;
mod value;

pub use self::{cell_state::CellState, grid::Grid, positions::Cell, value::Value};
