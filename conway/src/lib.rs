// lib.rs - Conway's Game of Life: padded-grid step engine, snapshot state
// and a fixed-interval driver usable from any front end

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;

pub use config::LifeConfig;
pub use driver::{Command, RedrawCallback, Simulation};
pub use engine::{next_generation, step_into};
pub use error::{LifeError, Result};
pub use grid::{ALIVE, Cell, DEAD, Grid};
pub use state::Life;
