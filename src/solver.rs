//! Constraint propagation and backtracking search
//!
//! Solving happens on a board of [`CellState`]s: each cell is either fixed
//! to a value or holds the set of values still open to it.
//!
//! Fixing a cell removes its value from the candidate sets of all peers.
//! A peer left with a single candidate is fixed in turn, so one assignment
//! can cascade through large parts of the board. The cascade runs off a
//! work queue of pending assignments instead of recursing, which keeps the
//! call stack flat no matter how long the chain gets.
//!
//! Propagation alone is deliberately weak: it knows nothing about hidden
//! singles or any higher technique. Whenever it stalls, the search clones
//! the board and tries each candidate of the cell with the fewest
//! remaining candidates, backtracking on contradiction. Search guarantees
//! completeness; propagation is only a pruning accelerant.

use crate::bitset::CandidateSet;
use crate::board::{Cell, CellState, Grid, Value};
use crate::errors::GuessLimitReached;
use crate::helper::Unsolvable;
use crate::layout::Layout;

/// Solves grids of one size, reusing the unit and peer tables across
/// calls.
///
/// ```
/// use anydoku::{Grid, Layout, Solver};
///
/// let solver = Solver::new(Layout::new(9).unwrap());
/// let grid = Grid::from_str_line(
///     "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..",
/// )
/// .unwrap();
///
/// let solution = solver.solve_one(&grid).unwrap();
/// assert!(solution.is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    layout: Layout,
}

impl Solver {
    /// Creates a solver for all grids of the layout's size.
    pub fn new(layout: Layout) -> Solver {
        Solver { layout }
    }

    /// The layout this solver was built with.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Finds a solution. If multiple solutions exist, the search stops at
    /// the first one. Returns `None` if no solution exists.
    ///
    /// # Panics
    /// Panics if the grid's size does not match the layout.
    pub fn solve_one(&self, grid: &Grid) -> Option<Grid> {
        self.solve_at_most(grid, 1).into_iter().next()
    }

    /// Finds the solution iff it is unique. Returns `None` when the grid
    /// has no solution or more than one.
    ///
    /// # Panics
    /// Panics if the grid's size does not match the layout.
    pub fn solve_unique(&self, grid: &Grid) -> Option<Grid> {
        let mut solutions = self.solve_at_most(grid, 2);
        if solutions.len() == 1 {
            solutions.pop()
        } else {
            None
        }
    }

    /// Finds up to `limit` solutions in search order: branch cells by
    /// fewest candidates first (lowest index on ties), branch values in
    /// ascending order. An unsolvable grid yields an empty vector.
    ///
    /// # Panics
    /// Panics if the grid's size does not match the layout.
    pub fn solve_at_most(&self, grid: &Grid, limit: usize) -> Vec<Grid> {
        self.solve_at_most_bounded(grid, limit, u64::max_value())
            .expect("unlimited guess budget")
    }

    /// Like [`Solver::solve_one`], but gives up once the search has
    /// spent `max_guesses` branch attempts.
    ///
    /// A budget of 0 still solves any grid that yields to propagation
    /// alone; the seed propagation costs no guesses.
    ///
    /// # Panics
    /// Panics if the grid's size does not match the layout.
    pub fn solve_one_bounded(
        &self,
        grid: &Grid,
        max_guesses: u64,
    ) -> Result<Option<Grid>, GuessLimitReached> {
        Ok(self
            .solve_at_most_bounded(grid, 1, max_guesses)?
            .into_iter()
            .next())
    }

    /// Like [`Solver::solve_at_most`], but gives up once the search has
    /// spent `max_guesses` branch attempts. Every attempted value of a
    /// branch cell costs one guess; propagation is free.
    ///
    /// # Panics
    /// Panics if the grid's size does not match the layout.
    pub fn solve_at_most_bounded(
        &self,
        grid: &Grid,
        limit: usize,
        max_guesses: u64,
    ) -> Result<Vec<Grid>, GuessLimitReached> {
        assert_eq!(
            grid.size(),
            self.layout.size(),
            "grid size does not match the solver's layout",
        );

        let mut solutions = Vec::new();
        if limit == 0 {
            return Ok(solutions);
        }
        // contradictory givens surface here, as "no solution"
        let board = match Board::from_grid(&self.layout, grid) {
            Ok(board) => board,
            Err(Unsolvable) => return Ok(solutions),
        };
        let mut guesses = 0;
        board.search(&mut solutions, limit, &mut guesses, max_guesses)?;
        Ok(solutions)
    }
}

// Per-attempt solver state. The layout is shared by reference; cloning a
// board for a search branch copies only the cell states.
#[derive(Debug, Clone)]
struct Board<'a> {
    layout: &'a Layout,
    cells: Vec<CellState>,
    n_solved: usize,
}

impl<'a> Board<'a> {
    fn blank(layout: &'a Layout) -> Board<'a> {
        Board {
            layout,
            cells: vec![CellState::Candidates(layout.full_candidates()); layout.n_cells()],
            n_solved: 0,
        }
    }

    // Seeds a board from the given cells of a grid. All givens go through
    // the same propagation as search assignments, so duplicate givens in
    // a unit are already caught here.
    fn from_grid(layout: &'a Layout, grid: &Grid) -> Result<Board<'a>, Unsolvable> {
        let mut board = Board::blank(layout);
        let mut pending: Vec<(Cell, Value)> = (0..layout.n_cells() as u16)
            .filter_map(|index| {
                let cell = Cell::new(index);
                grid.value_at(cell).map(|value| (cell, value))
            })
            .collect();
        board.assign_all(&mut pending)?;
        Ok(board)
    }

    fn assign(&mut self, cell: Cell, value: Value) -> Result<(), Unsolvable> {
        let mut pending = vec![(cell, value)];
        self.assign_all(&mut pending)
    }

    // Drains the queue of pending assignments, pushing any assignment
    // forced along the way back onto it.
    fn assign_all(&mut self, pending: &mut Vec<(Cell, Value)>) -> Result<(), Unsolvable> {
        while let Some((cell, value)) = pending.pop() {
            let state = self.cells[cell.as_index()];
            match state {
                // fixed from an earlier queue entry, nothing left to do
                CellState::Value(fixed) if fixed == value => continue,
                CellState::Value(_) => return Err(Unsolvable),
                CellState::Candidates(candidates) => {
                    if !candidates.contains(value) {
                        return Err(Unsolvable);
                    }
                    self.cells[cell.as_index()] = CellState::Value(value);
                    self.n_solved += 1;
                    for &peer in self.layout.peers(cell) {
                        self.eliminate(peer, value, pending)?;
                    }
                }
            }
        }
        Ok(())
    }

    // Removes `value` from the candidates of `cell`. An empty remainder
    // is a contradiction; a single remainder forces an assignment, which
    // is queued rather than recursed into.
    fn eliminate(
        &mut self,
        cell: Cell,
        value: Value,
        pending: &mut Vec<(Cell, Value)>,
    ) -> Result<(), Unsolvable> {
        let candidates = match &mut self.cells[cell.as_index()] {
            // peers fixed to `value` cannot occur: fixing them removed
            // `value` from this cell's unit before we got here
            CellState::Value(_) => return Ok(()),
            CellState::Candidates(candidates) => candidates,
        };
        if !candidates.contains(value) {
            return Ok(());
        }
        candidates.remove(value);
        if let Some(forced) = candidates.unique()? {
            pending.push((cell, forced));
        }
        Ok(())
    }

    fn is_solved(&self) -> bool {
        self.n_solved == self.layout.n_cells()
    }

    // The most-constrained-variable heuristic: among undetermined cells,
    // the one with the fewest candidates, lowest index on ties. Two is
    // the minimum a stalled board can have, so stop looking early.
    fn best_guess_cell(&self) -> (Cell, CandidateSet) {
        let mut best: Option<(Cell, CandidateSet)> = None;
        for (index, state) in self.cells.iter().enumerate() {
            if let CellState::Candidates(candidates) = *state {
                let better = match best {
                    Some((_, best_candidates)) => candidates.len() < best_candidates.len(),
                    None => true,
                };
                if better {
                    if candidates.len() == 2 {
                        return (Cell::new(index as u16), candidates);
                    }
                    best = Some((Cell::new(index as u16), candidates));
                }
            }
        }
        best.expect("board has undetermined cells")
    }

    fn search(
        &self,
        solutions: &mut Vec<Grid>,
        limit: usize,
        guesses: &mut u64,
        max_guesses: u64,
    ) -> Result<(), GuessLimitReached> {
        if self.is_solved() {
            solutions.push(self.to_grid());
            return Ok(());
        }

        let (cell, candidates) = self.best_guess_cell();
        for value in candidates {
            if *guesses >= max_guesses {
                return Err(GuessLimitReached(max_guesses));
            }
            *guesses += 1;

            let mut branch = self.clone();
            if branch.assign(cell, value).is_err() {
                // contradiction: abandon this branch, try the next value
                continue;
            }
            branch.search(solutions, limit, guesses, max_guesses)?;
            if solutions.len() >= limit {
                return Ok(());
            }
        }
        Ok(())
    }

    fn to_grid(&self) -> Grid {
        let values = self
            .cells
            .iter()
            .map(|state| match state {
                CellState::Value(value) => value.get(),
                CellState::Candidates(_) => 0,
            })
            .collect();
        Grid {
            size: self.layout.size(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_4() -> Layout {
        Layout::new(4).unwrap()
    }

    #[test]
    fn seeding_prunes_peer_candidates() {
        let layout = layout_4();
        let grid = Grid::from_values(4, vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        let board = Board::from_grid(&layout, &grid).unwrap();

        for &peer in layout.peers(Cell::new(0)) {
            match board.cells[peer.as_index()] {
                CellState::Candidates(candidates) => {
                    assert!(!candidates.contains(Value::new(1)));
                    assert_eq!(candidates.len(), 3);
                }
                CellState::Value(_) => panic!("no peer should be fixed yet"),
            }
        }
    }

    #[test]
    fn assign_is_idempotent_on_same_value() {
        let layout = layout_4();
        let mut board = Board::blank(&layout);
        board.assign(Cell::new(5), Value::new(3)).unwrap();
        let snapshot = board.cells.clone();

        board.assign(Cell::new(5), Value::new(3)).unwrap();
        assert_eq!(board.cells, snapshot);
    }

    #[test]
    fn assign_conflicting_value_is_a_contradiction() {
        let layout = layout_4();
        let mut board = Board::blank(&layout);
        board.assign(Cell::new(5), Value::new(3)).unwrap();
        assert!(board.assign(Cell::new(5), Value::new(4)).is_err());
    }

    #[test]
    fn forced_singles_cascade() {
        let layout = layout_4();
        // top row 1 2 3 _ forces the 4, which in turn prunes its column
        let grid = Grid::from_values(4, vec![1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        let board = Board::from_grid(&layout, &grid).unwrap();

        assert_eq!(
            board.cells[3],
            CellState::Value(Value::new(4)),
            "last cell of the row must be forced"
        );
        match board.cells[7] {
            // row 1, column 3: the forced 4 above and the 3 in its box
            // leave exactly {1, 2}
            CellState::Candidates(candidates) => {
                assert!(!candidates.contains(Value::new(4)));
                assert_eq!(candidates.len(), 2);
            }
            CellState::Value(_) => panic!("cell 7 is not forced by these givens"),
        }
    }

    #[test]
    fn duplicate_givens_mean_no_solution() {
        let solver = Solver::new(layout_4());
        let grid = Grid::from_values(4, vec![1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        assert_eq!(solver.solve_at_most(&grid, 4), vec![]);
    }

    #[test]
    fn propagation_only_grid_needs_no_guesses() {
        let solver = Solver::new(layout_4());
        // a solved 4×4 with one blank per band: every blank is forced
        let grid = Grid::from_values(4, vec![0, 2, 3, 4, 3, 4, 1, 2, 2, 1, 0, 3, 4, 3, 2, 1])
            .unwrap();
        let solution = solver.solve_one_bounded(&grid, 0).unwrap().unwrap();
        assert!(solution.is_solved());
        assert_eq!(solution.values()[0], 1);
        assert_eq!(solution.values()[10], 4);
    }

    #[test]
    fn guess_budget_aborts_search() {
        let solver = Solver::new(layout_4());
        // blank grid cannot be solved without guessing
        let grid = Grid::from_values(4, vec![0; 16]).unwrap();
        assert_eq!(
            solver.solve_one_bounded(&grid, 0),
            Err(GuessLimitReached(0))
        );
        assert!(solver.solve_one(&grid).is_some());
    }

    #[test]
    fn solve_unique_rejects_ambiguous_grids() {
        let solver = Solver::new(layout_4());
        let blank = Grid::from_values(4, vec![0; 16]).unwrap();
        assert_eq!(solver.solve_unique(&blank), None);

        let solved = Grid::from_values(4, vec![1, 2, 3, 4, 3, 4, 1, 2, 2, 1, 4, 3, 4, 3, 2, 1])
            .unwrap();
        assert_eq!(solver.solve_unique(&solved), Some(solved));
    }

    #[test]
    #[should_panic]
    fn mismatched_grid_size_is_a_contract_violation() {
        let solver = Solver::new(layout_4());
        let grid = Grid::from_values(9, vec![0; 81]).unwrap();
        solver.solve_one(&grid);
    }
}
