//! Fixed-size grid of maze cells
//!
//! The grid is created once with its final dimensions and never resized.
//! Cells are stored in an `Array2` indexed `[row, col]`, while the public API
//! speaks in `(x, y)` = `(column, row)` coordinates.

use ndarray::Array2;

use crate::algorithm::cell::Cell;
use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::io::error::{MazeError, Result, invalid_parameter};
use crate::spatial::direction::{Direction, DirectionMap};

/// Grid of cells addressed by `(x, y)`
#[derive(Debug, Clone)]
pub struct MazeGrid {
    cells: Array2<Cell>,
}

impl MazeGrid {
    /// Create a grid whose cells start with the full registry domain
    ///
    /// Cells on the outer edge drop every template whose allowed-border mask
    /// forbids the side that touches the edge.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(columns: usize, rows: usize, registry: &TemplateRegistry) -> Result<Self> {
        if columns == 0 {
            return Err(invalid_parameter("columns", &columns, &"must be positive"));
        }
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be positive"));
        }

        let cells = Array2::from_shape_fn((rows, columns), |(row, col)| {
            let edges = DirectionMap::new(row == 0, col + 1 == columns, row + 1 == rows, col == 0);
            Cell::new(col, row, registry.initial_domain(&edges))
        });

        Ok(Self { cells })
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns() && y < self.rows()
    }

    /// Cell at `(x, y)` if it is in bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error for coordinates outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell> {
        let (columns, rows) = (self.columns(), self.rows());
        self.cells.get([y, x]).ok_or(MazeError::OutOfBounds {
            x,
            y,
            columns,
            rows,
        })
    }

    /// Mutable cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error for coordinates outside the grid.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let (columns, rows) = (self.columns(), self.rows());
        self.cells.get_mut([y, x]).ok_or(MazeError::OutOfBounds {
            x,
            y,
            columns,
            rows,
        })
    }

    /// Resolved template at `(x, y)`, if any
    pub fn resolved_at(&self, x: usize, y: usize) -> Option<TemplateId> {
        self.get(x, y).and_then(Cell::resolved)
    }

    /// Overwrite the resolved template at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error for coordinates outside the grid.
    pub fn set_resolved(&mut self, x: usize, y: usize, template: TemplateId) -> Result<()> {
        self.cell_mut(x, y)?.resolve(template);
        Ok(())
    }

    /// Coordinates one step from `(x, y)` in `direction`, if in bounds
    pub fn neighbor_position(
        &self,
        x: usize,
        y: usize,
        direction: Direction,
    ) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// In-bounds orthogonal neighbours of `(x, y)` in clockwise order
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> impl Iterator<Item = (Direction, (usize, usize))> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.neighbor_position(x, y, direction)
                .map(|position| (direction, position))
        })
    }

    /// Iterate every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Whether every cell holds a resolved template
    pub fn is_fully_resolved(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    /// Every orthogonally adjacent pair once, as `(origin, direction, other)`
    ///
    /// Only `Right` and `Down` pairs are produced.
    pub fn neighbor_pairs(
        &self,
    ) -> impl Iterator<Item = ((usize, usize), Direction, (usize, usize))> + '_ {
        self.cells.iter().flat_map(move |cell| {
            let (x, y) = cell.position();
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(move |direction| {
                    self.neighbor_position(x, y, direction)
                        .map(|other| ((x, y), direction, other))
                })
        })
    }
}
