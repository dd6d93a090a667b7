// config.rs - Grid shape and tick cadence

use std::time::Duration;

use crate::error::{LifeError, Result};

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 40;
pub const DEFAULT_INTERVAL_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeConfig {
    pub rows: usize,          // grid height
    pub cols: usize,          // grid width
    pub interval_ms: u64,     // time between generations
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimensions { rows: self.rows, cols: self.cols });
        }
        if self.interval_ms == 0 {
            return Err(LifeError::InvalidInterval);
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
