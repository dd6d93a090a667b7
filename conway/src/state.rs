// state.rs - Live grid plus one saved snapshot

use crate::engine;
use crate::error::Result;
use crate::grid::{Cell, Grid};

/// Everything the simulation owns: the live grid, the saved snapshot and
/// the number of generations computed since the last reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Life {
    grid: Grid,
    snapshot: Grid,
    generation: u64,
}

impl Life {
    /// Dead grid and dead snapshot of the given shape.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let grid = Grid::new(rows, cols)?;
        Ok(Self::from_grid(grid))
    }

    /// Start from an existing pattern. The snapshot starts all-dead.
    pub fn from_grid(grid: Grid) -> Self {
        let snapshot = grid.blank();
        Self { grid, snapshot, generation: 0 }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> &Grid {
        &self.snapshot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.grid.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
        self.grid.set(row, col, value)
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.grid.toggle(row, col)
    }

    /// Overwrite the snapshot with the live grid.
    pub fn save_snapshot(&mut self) {
        self.snapshot.clone_from(&self.grid);
    }

    /// Overwrite the live grid with the snapshot and restart the generation
    /// count. Without a prior save this clears the grid.
    pub fn restore_snapshot(&mut self) {
        self.grid.clone_from(&self.snapshot);
        self.generation = 0;
    }

    /// Kill every live cell. The snapshot is left alone.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.grid = engine::next_generation(&self.grid);
        self.generation += 1;
    }
}
