// engine.rs - One Game of Life generation over a zero-padded grid
//
// The live grid is framed by a single dead border, so every interior cell of
// the padded copy has all 8 neighbours in range and no edge checks are needed.
// Off-grid cells are therefore permanently dead (no wrap-around).

use crate::error::Result;
use crate::grid::{ALIVE, Cell, DEAD, Grid};

/// Thickness of the dead frame. Only one ring is ever read.
pub const BORDER: usize = 1;

const NEIGHBOURS: [(usize, usize); 8] = [
    (0, 0), (0, 1), (0, 2),
    (1, 0),         (1, 2),
    (2, 0), (2, 1), (2, 2),
];

/// Conway's rule for a single cell.
pub fn rule(cell: Cell, live_neighbours: u8) -> Cell {
    match (cell == ALIVE, live_neighbours) {
        (true, 2) | (true, 3) => ALIVE,   // Survival
        (false, 3)            => ALIVE,   // Birth
        _                     => DEAD,    // Death or stays dead
    }
}

// Sum of the Moore neighbourhood around interior cell (`row`, `col`) of a
// grid padded with at least `BORDER`. Row and column 0 are never interior.
pub(crate) fn live_neighbours(padded: &Grid, row: usize, col: usize) -> u8 {
    NEIGHBOURS
        .iter()
        .map(|&(dr, dc)| padded.at(row + dr - 1, col + dc - 1))
        .sum()
}

/// Compute the generation after `current` and write it into `next`.
///
/// `current` is only read; `next` must have the same shape.
pub fn step_into(current: &Grid, next: &mut Grid) -> Result<()> {
    padded_generation(current).crop_into(BORDER, next)
}

/// Pure form of `step_into`: returns the next generation as a new grid.
pub fn next_generation(current: &Grid) -> Grid {
    padded_generation(current).cropped(BORDER)
}

// Next generation, still framed by the dead border. Reads from the padded
// copy and writes to a separate buffer so every neighbour sum sees the
// previous generation.
fn padded_generation(current: &Grid) -> Grid {
    let padded = current.padded(BORDER);
    let mut result = padded.blank();

    for row in BORDER..padded.rows() - BORDER {
        for col in BORDER..padded.cols() - BORDER {
            let count = live_neighbours(&padded, row, col);
            result.put(row, col, rule(padded.at(row, col), count));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survive = if n == 2 || n == 3 { ALIVE } else { DEAD };
            let born = if n == 3 { ALIVE } else { DEAD };
            assert_eq!(rule(ALIVE, n), survive, "alive with {n}");
            assert_eq!(rule(DEAD, n), born, "dead with {n}");
        }
    }

    #[test]
    fn neighbour_sum_excludes_centre() {
        let grid = Grid::from_rows(&["###", "###", "###"]).unwrap().padded(BORDER);
        assert_eq!(live_neighbours(&grid, 2, 2), 8);
        assert_eq!(live_neighbours(&grid, 1, 1), 3);
        assert_eq!(live_neighbours(&grid, 1, 2), 5);
    }

    #[test]
    fn step_into_checks_shape() {
        let grid = Grid::new(3, 3).unwrap();
        let mut wrong = Grid::new(3, 4).unwrap();
        assert!(step_into(&grid, &mut wrong).is_err());
    }

    #[test]
    fn glider_moves_diagonally() {
        let glider = Grid::from_rows(&[
            ".#....",
            "..#...",
            "###...",
            "......",
            "......",
            "......",
        ])
        .unwrap();
        let mut grid = glider.clone();
        for _ in 0..4 {
            grid = next_generation(&grid);
        }
        let expected = Grid::from_rows(&[
            "......",
            "..#...",
            "...#..",
            ".###..",
            "......",
            "......",
        ])
        .unwrap();
        assert_eq!(grid, expected);
    }

    #[test]
    fn one_by_one_grid_dies() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set(0, 0, ALIVE).unwrap();
        assert_eq!(next_generation(&grid).population(), 0);
    }
}
