// grid.rs - Cell buffer for Conway's Game of Life, plus the padding helpers

use std::fmt;

use crate::error::{LifeError, Result};

pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

/// Fixed-size rectangular grid of cells, stored row-major.
///
/// The shape is chosen at construction and never changes afterwards; every
/// whole-grid copy (`copy_from`, `crop_into`) insists on matching shapes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid of `rows` x `cols`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols, cells: vec![DEAD; rows * cols] })
    }

    /// Parse an ASCII picture, one string per row.
    ///
    /// `#`, `O`, `*` and `1` are alive; `.`, `_` and `0` are dead. Every row must
    /// have the same width.
    pub fn from_rows(lines: &[&str]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = Self::new(rows, cols)?;

        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(LifeError::InvalidPattern {
                    line: row + 1,
                    reason: format!("expected {cols} cells, found {width}"),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' | 'O' | '*' | '1' => ALIVE,
                    '.' | '_' | '0'       => DEAD,
                    other => {
                        return Err(LifeError::InvalidPattern {
                            line: row + 1,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                };
                grid.cells[row * cols + col] = cell;
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Any non-zero value is stored as `ALIVE`.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = if value == DEAD { DEAD } else { ALIVE };
        Ok(())
    }

    /// Flip one cell and return its new value.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        let index = self.index(row, col)?;
        self.cells[index] ^= ALIVE;
        Ok(self.cells[index])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Ok(ALIVE))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Overwrite every cell with the contents of `other`.
    pub fn copy_from(&mut self, other: &Grid) -> Result<()> {
        self.expect_shape(other.shape())?;
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Copy of this grid centred inside a dead frame `border` cells thick.
    ///
    /// A border of `b` corresponds to an even padding of `2 * b` per axis.
    pub fn padded(&self, border: usize) -> Grid {
        let cols = self.cols + 2 * border;
        let mut padded = Grid {
            rows: self.rows + 2 * border,
            cols,
            cells: vec![DEAD; (self.rows + 2 * border) * cols],
        };
        for (row, src) in self.iter_rows().enumerate() {
            let start = (row + border) * cols + border;
            padded.cells[start..start + self.cols].copy_from_slice(src);
        }
        padded
    }

    /// Copy the centred region, `border` cells in from every edge, into `dest`.
    ///
    /// `dest` must be exactly the shape this grid had before `padded(border)`.
    pub fn crop_into(&self, border: usize, dest: &mut Grid) -> Result<()> {
        let inner = (
            self.rows.saturating_sub(2 * border),
            self.cols.saturating_sub(2 * border),
        );
        dest.expect_shape(inner)?;
        for row in 0..dest.rows {
            let start = (row + border) * self.cols + border;
            let out = row * dest.cols;
            dest.cells[out..out + dest.cols].copy_from_slice(&self.cells[start..start + dest.cols]);
        }
        Ok(())
    }

    // Owned copy of the centred region. Callers guarantee the border leaves
    // at least one row and one column.
    pub(crate) fn cropped(&self, border: usize) -> Grid {
        let rows = self.rows - 2 * border;
        let cols = self.cols - 2 * border;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let start = (row + border) * self.cols + border;
            cells.extend_from_slice(&self.cells[start..start + cols]);
        }
        Grid { rows, cols, cells }
    }

    // Dead grid of the same shape.
    pub(crate) fn blank(&self) -> Grid {
        Grid { rows: self.rows, cols: self.cols, cells: vec![DEAD; self.cells.len()] }
    }

    // Unchecked accessors for the step engine, which only ever touches
    // coordinates it has already proven to be in range.
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, value: Cell) {
        self.cells[row * self.cols + col] = value;
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(row * self.cols + col)
    }

    fn expect_shape(&self, actual: (usize, usize)) -> Result<()> {
        if self.shape() != actual {
            return Err(LifeError::DimensionMismatch { expected: self.shape(), actual });
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                f.write_str(if cell == ALIVE { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}
