use crate::models::{plant::PlantAssignment, Coordinate, Matrix};

pub const MIN_DIMENSION: usize = 4;
pub const MAX_DIMENSION: usize = 20;

/// Clamps a grid dimension to the range the editor accepts.
pub fn clamp_dimension(value: usize) -> usize {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// One plot of the farm grid.
pub type Cell = Option<PlantAssignment>;

/// Dense rows × cols matrix of plots. Every row always holds exactly `cols` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmGrid {
    rows: usize,
    cols: usize,
    cells: Matrix<Cell>,
}

impl FarmGrid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![None; cols]; rows],
        }
    }

    /// Builds a grid from possibly jagged input: short rows are padded with empty
    /// plots, anything outside rows × cols is dropped.
    pub fn from_rows(rows: usize, cols: usize, source: Matrix<Cell>) -> Self {
        let mut grid = Self::empty(rows, cols);
        for (r, row) in source.into_iter().take(rows).enumerate() {
            for (c, cell) in row.into_iter().take(cols).enumerate() {
                grid.cells[r][c] = cell;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: Coordinate) -> Option<&PlantAssignment> {
        self.cells.get(at.row)?.get(at.col)?.as_ref()
    }

    pub fn is_occupied(&self, at: Coordinate) -> bool {
        self.get(at).is_some()
    }

    /// Returns a grid of the new dimensions. Plots valid in both keep their
    /// content, new plots are empty, plots outside the new bounds are dropped.
    pub fn resize(&self, rows: usize, cols: usize) -> FarmGrid {
        let cells = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        self.cells
                            .get(r)
                            .and_then(|row| row.get(c))
                            .cloned()
                            .flatten()
                    })
                    .collect()
            })
            .collect();
        FarmGrid { rows, cols, cells }
    }

    /// Copy of this grid with one plot replaced. Out-of-range coordinates leave it unchanged.
    pub fn with_cell(&self, at: Coordinate, cell: Cell) -> FarmGrid {
        let mut next = self.clone();
        if self.contains(at) {
            next.cells[at.row][at.col] = cell;
        }
        next
    }

    /// Copy of this grid with every given plot emptied.
    pub fn with_cleared<'a>(&self, coords: impl IntoIterator<Item = &'a Coordinate>) -> FarmGrid {
        let mut next = self.clone();
        for at in coords {
            if self.contains(*at) {
                next.cells[at.row][at.col] = None;
            }
        }
        next
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}
