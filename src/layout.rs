//! Grid geometry: units, peers and the variant catalog
//!
//! A [`Layout`] is the immutable per-size configuration of the solver: the
//! 3N units (rows, columns, boxes) that must each contain every value
//! exactly once, and the precomputed peer list of every cell. It is built
//! once per grid size and shared by reference with every board derived
//! from it; search branches never copy it.

use crate::bitset::CandidateSet;
use crate::board::Cell;
use crate::errors::InvalidSizeError;

/// Immutable unit and peer tables for one grid size.
///
/// # Examples
///
/// ```
/// use anydoku::Layout;
///
/// let layout = Layout::new(9).unwrap();
/// assert_eq!(layout.box_size(), 3);
/// assert_eq!(layout.units().count(), 27);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: u8,
    box_size: u8,
    // 3N entries: N rows, then N columns, then N boxes in row-major box
    // order. Each unit lists its N cells in ascending order.
    units: Vec<Box<[Cell]>>,
    // One entry per cell: every cell sharing a unit with it, ascending,
    // without the cell itself. 2(N-1) + (B-1)² cells each.
    peers: Vec<Box<[Cell]>>,
}

impl Layout {
    /// Computes the unit and peer tables for a grid of `size`×`size` cells.
    ///
    /// `size` must be a perfect square (so boxes are B×B with B = √size)
    /// no larger than 25, the widest grid a candidate bitset can hold.
    pub fn new(size: u8) -> Result<Layout, InvalidSizeError> {
        let box_size = match size {
            1 => 1,
            4 => 2,
            9 => 3,
            16 => 4,
            25 => 5,
            _ => return Err(InvalidSizeError(size)),
        };

        let n = size as u16;
        let mut units = Vec::with_capacity(3 * size as usize);

        for row in 0..n {
            units.push((0..n).map(|col| Cell::new(row * n + col)).collect());
        }
        for col in 0..n {
            units.push((0..n).map(|row| Cell::new(row * n + col)).collect());
        }
        let b = box_size as u16;
        for box_row in 0..b {
            for box_col in 0..b {
                let mut cells = Vec::with_capacity(size as usize);
                for row in box_row * b..(box_row + 1) * b {
                    for col in box_col * b..(box_col + 1) * b {
                        cells.push(Cell::new(row * n + col));
                    }
                }
                units.push(cells.into_boxed_slice());
            }
        }

        let n_cells = (n * n) as usize;
        let mut peers = Vec::with_capacity(n_cells);
        for index in 0..n_cells as u16 {
            let cell = Cell::new(index);
            let mut cell_peers: Vec<Cell> = units
                .iter()
                .filter(|unit| unit.contains(&cell))
                .flat_map(|unit| unit.iter().copied())
                .filter(|&peer| peer != cell)
                .collect();
            cell_peers.sort_unstable();
            cell_peers.dedup();
            peers.push(cell_peers.into_boxed_slice());
        }

        Ok(Layout {
            size,
            box_size,
            units,
            peers,
        })
    }

    /// The grid size N. Rows, columns and boxes contain N cells each.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// The box dimension B = √N.
    pub fn box_size(&self) -> u8 {
        self.box_size
    }

    /// The number of cells, N².
    pub fn n_cells(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Iterates over all 3N units: rows, then columns, then boxes.
    pub fn units(&self) -> impl Iterator<Item = &[Cell]> {
        self.units.iter().map(|unit| &**unit)
    }

    /// All cells sharing a unit with `cell`, ascending, excluding `cell`.
    ///
    /// # Panics
    /// Panics if `cell` is outside the grid.
    pub fn peers(&self, cell: Cell) -> &[Cell] {
        &self.peers[cell.as_index()]
    }

    /// Row of `cell`, `0..N` from the top.
    pub fn row_of(&self, cell: Cell) -> u8 {
        (cell.get() / self.size as u16) as u8
    }

    /// Column of `cell`, `0..N` from the left.
    pub fn col_of(&self, cell: Cell) -> u8 {
        (cell.get() % self.size as u16) as u8
    }

    /// Box of `cell`, `0..N` counted row-major among boxes.
    pub fn box_of(&self, cell: Cell) -> u8 {
        let row = self.row_of(cell);
        let col = self.col_of(cell);
        (row / self.box_size) * self.box_size + col / self.box_size
    }

    pub(crate) fn full_candidates(&self) -> CandidateSet {
        CandidateSet::all(self.size)
    }
}

/// The catalog of grid variants the surrounding application offers.
///
/// This is plain configuration data: each variant names a size and yields
/// its [`Layout`] on demand. The solver itself only ever sees a `Layout`,
/// so other sizes (e.g. 25×25) can be used without going through the
/// catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 4×4 grid, 2×2 boxes
    FourByFour,
    /// 9×9 grid, 3×3 boxes
    NineByNine,
    /// 16×16 grid, 4×4 boxes
    SixteenBySixteen,
}

impl Variant {
    /// Every supported variant, smallest first.
    pub const ALL: [Variant; 3] = [
        Variant::FourByFour,
        Variant::NineByNine,
        Variant::SixteenBySixteen,
    ];

    /// The display title of this variant.
    pub fn title(self) -> &'static str {
        match self {
            Variant::FourByFour => "Sudoku (4x4)",
            Variant::NineByNine => "Sudoku (9x9)",
            Variant::SixteenBySixteen => "Sudoku (16x16) (slow!)",
        }
    }

    /// The grid size N of this variant.
    pub fn size(self) -> u8 {
        match self {
            Variant::FourByFour => 4,
            Variant::NineByNine => 9,
            Variant::SixteenBySixteen => 16,
        }
    }

    /// Builds the unit and peer tables for this variant.
    pub fn layout(self) -> Layout {
        Layout::new(self.size()).expect("catalog sizes are perfect squares")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_square_sizes() {
        for size in [0, 2, 3, 5, 6, 8, 10, 12, 15, 36] {
            assert_eq!(Layout::new(size), Err(InvalidSizeError(size)));
        }
    }

    #[test]
    fn unit_counts() {
        for (size, unit_len) in [(4, 4), (9, 9), (16, 16)] {
            let layout = Layout::new(size).unwrap();
            assert_eq!(layout.units().count(), 3 * size as usize);
            for unit in layout.units() {
                assert_eq!(unit.len(), unit_len);
            }
        }
    }

    #[test]
    fn every_cell_is_in_three_units() {
        let layout = Layout::new(9).unwrap();
        for index in 0..81 {
            let cell = Cell::new(index);
            let memberships = layout
                .units()
                .filter(|unit| unit.contains(&cell))
                .count();
            assert_eq!(memberships, 3);
        }
    }

    #[test]
    fn peer_counts() {
        // 2(N-1) + (B-1)²
        for (size, n_peers) in [(4, 7), (9, 20), (16, 39)] {
            let layout = Layout::new(size).unwrap();
            for index in 0..layout.n_cells() as u16 {
                assert_eq!(layout.peers(Cell::new(index)).len(), n_peers);
            }
        }
    }

    #[test]
    fn peers_of_a_corner_cell() {
        let layout = Layout::new(4).unwrap();
        let peers: Vec<u16> = layout
            .peers(Cell::new(0))
            .iter()
            .map(|cell| cell.get())
            .collect();
        // row 0, column 0 and the top-left 2×2 box
        assert_eq!(peers, [1, 2, 3, 4, 5, 8, 12]);
    }

    #[test]
    fn box_of_matches_unit_membership() {
        let layout = Layout::new(9).unwrap();
        let box_units: Vec<&[Cell]> = layout.units().skip(18).collect();
        for index in 0..81 {
            let cell = Cell::new(index);
            let b = layout.box_of(cell) as usize;
            assert!(box_units[b].contains(&cell));
        }
    }

    #[test]
    fn catalog_layouts_are_consistent() {
        for variant in Variant::ALL {
            let layout = variant.layout();
            assert_eq!(layout.size(), variant.size());
            assert_eq!(
                layout.box_size() as u16 * layout.box_size() as u16,
                layout.size() as u16
            );
        }
    }

    #[test]
    fn catalog_titles() {
        assert_eq!(Variant::FourByFour.title(), "Sudoku (4x4)");
        assert_eq!(Variant::NineByNine.title(), "Sudoku (9x9)");
        assert_eq!(Variant::SixteenBySixteen.title(), "Sudoku (16x16) (slow!)");
    }
}
