// driver.rs - Fixed-interval scheduler and command handlers around `Life`
//
// All grid mutations, including the write-back of a timed step, go through
// one mutex. The id of the current run lives behind the same lock, so a tick
// that was already waiting when `stop` returned sees a stale id and leaves
// the grid untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::LifeConfig;
use crate::error::{LifeError, Result};
use crate::grid::Cell;
use crate::state::Life;

/// Called after every timed or manual tick with the new generation number.
pub type RedrawCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Front-end agnostic control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle { row: usize, col: usize },
    Start,
    Stop,
    Reset,
    Save,
    Tick,
    Clear,
}

struct Shared {
    life: Life,
    run: Option<u64>,
}

pub struct Simulation {
    shared: Arc<Mutex<Shared>>,
    interval: Duration,
    runtime: Handle,
    ticker: Option<JoinHandle<()>>,
    next_run: u64,
    on_tick: Option<RedrawCallback>,
}

impl Simulation {
    pub fn new(config: LifeConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;
        let life = Life::new(config.rows, config.cols)?;
        Self::with_life(life, config.interval(), runtime)
    }

    /// Drive an already populated `Life`. The interval must be non-zero.
    pub fn with_life(life: Life, interval: Duration, runtime: Handle) -> Result<Self> {
        if interval.is_zero() {
            return Err(LifeError::InvalidInterval);
        }
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared { life, run: None })),
            interval,
            runtime,
            ticker: None,
            next_run: 0,
            on_tick: None,
        })
    }

    /// Register the redraw hook. Takes effect from the next `start`.
    pub fn on_tick(&mut self, callback: impl Fn(u64) + Send + Sync + 'static) {
        self.on_tick = Some(Arc::new(callback));
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).run.is_some()
    }

    /// Read access for rendering and inspection.
    pub fn with_state<R>(&self, read: impl FnOnce(&Life) -> R) -> R {
        read(&lock(&self.shared).life)
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!(?command, "applying command");
        match command {
            Command::Toggle { row, col } => {
                self.edit_cell(row, col)?;
            }
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::Save => self.save(),
            Command::Tick => {
                self.tick();
            }
            Command::Clear => self.clear(),
        }
        Ok(())
    }

    /// Flip one cell; returns its new value.
    pub fn edit_cell(&self, row: usize, col: usize) -> Result<Cell> {
        let value = lock(&self.shared).life.toggle(row, col)?;
        debug!(row, col, value, "cell toggled");
        Ok(value)
    }

    /// Advance one generation right now and fire the redraw hook.
    pub fn tick(&self) -> u64 {
        let generation = {
            let mut shared = lock(&self.shared);
            shared.life.step();
            shared.life.generation()
        };
        debug!(generation, "manual tick");
        if let Some(redraw) = &self.on_tick {
            redraw(generation);
        }
        generation
    }

    /// Begin stepping every `interval`. A running ticker is replaced.
    pub fn start(&mut self) {
        self.halt();

        let run = self.next_run;
        self.next_run += 1;
        lock(&self.shared).run = Some(run);

        let ticker = run_ticker(
            Arc::clone(&self.shared),
            run,
            self.interval,
            self.on_tick.clone(),
        );
        self.ticker = Some(self.runtime.spawn(ticker));
        info!(interval_ms = self.interval.as_millis() as u64, "Simulation started");
    }

    /// No step is applied after this returns.
    pub fn stop(&mut self) {
        self.halt();
        info!("Simulation stopped");
    }

    /// Stop, then bring back the saved snapshot.
    pub fn reset(&mut self) {
        self.halt();
        lock(&self.shared).life.restore_snapshot();
        info!("Simulation reset");
    }

    /// Stop, then remember the current grid.
    pub fn save(&mut self) {
        self.halt();
        lock(&self.shared).life.save_snapshot();
        info!("Pattern saved");
    }

    pub fn clear(&mut self) {
        self.halt();
        lock(&self.shared).life.clear();
        info!("Grid cleared");
    }

    fn halt(&mut self) {
        lock(&self.shared).run = None;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.halt();
    }
}

async fn run_ticker(
    shared: Arc<Mutex<Shared>>,
    run: u64,
    period: Duration,
    on_tick: Option<RedrawCallback>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let generation = {
            let mut shared = lock(&shared);
            if shared.run != Some(run) {
                break;
            }
            shared.life.step();
            shared.life.generation()
        };
        debug!(generation, "tick");
        if let Some(redraw) = &on_tick {
            redraw(generation);
        }
    }
}

// Every mutation is a single call on `Life`, so a panicking holder cannot
// leave a half-written grid behind.
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::grid::{ALIVE, Grid};

    fn blinker_sim() -> Simulation {
        let grid = Grid::from_rows(&[".....", ".....", ".###.", ".....", "....."]).unwrap();
        Simulation::with_life(Life::from_grid(grid), Duration::from_millis(100), Handle::current())
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn steps_once_per_interval() {
        let mut sim = blinker_sim();
        sim.start();
        assert!(sim.is_running());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(sim.with_state(|life| life.generation()), 3);
        // Odd generation: the blinker is vertical.
        assert_eq!(sim.with_state(|life| life.get(1, 2)), Ok(ALIVE));
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_the_grid() {
        let mut sim = blinker_sim();
        sim.start();
        tokio::time::sleep(Duration::from_millis(250)).await;
        sim.stop();
        assert!(!sim.is_running());

        let frozen = sim.with_state(|life| life.clone());
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(sim.with_state(|life| life.clone()), frozen);
        assert_eq!(frozen.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_tick_after_stop_leaves_grid_alone() {
        let grid = Grid::from_rows(&[".....", ".....", ".###.", ".....", "....."]).unwrap();
        let shared = Arc::new(Mutex::new(Shared { life: Life::from_grid(grid), run: Some(7) }));
        let ticker = tokio::spawn(run_ticker(
            Arc::clone(&shared),
            7,
            Duration::from_millis(100),
            None,
        ));

        // Withdraw the run id without aborting the task, as a stop racing a
        // tick that is already past `interval.tick()` would.
        lock(&shared).run = None;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(ticker.is_finished());
        assert_eq!(lock(&shared).life.generation(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_run_id_never_steps() {
        let shared = Arc::new(Mutex::new(Shared { life: Life::new(3, 3).unwrap(), run: Some(2) }));
        run_ticker(Arc::clone(&shared), 1, Duration::from_millis(50), None).await;
        assert_eq!(lock(&shared).life.generation(), 0);
        assert_eq!(lock(&shared).run, Some(2));
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let life = Life::new(3, 3).unwrap();
        assert!(matches!(
            Simulation::with_life(life, Duration::ZERO, Handle::current()),
            Err(LifeError::InvalidInterval)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_ticker() {
        let mut sim = blinker_sim();
        sim.start();
        sim.start();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(sim.with_state(|life| life.generation()), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn redraw_hook_sees_each_generation() {
        let seen = Arc::new(AtomicU64::new(0));
        let mut sim = blinker_sim();
        let hook = Arc::clone(&seen);
        sim.on_tick(move |generation| hook.store(generation, Ordering::SeqCst));

        sim.start();
        tokio::time::sleep(Duration::from_millis(450)).await;
        sim.stop();
        assert_eq!(seen.load(Ordering::SeqCst), 4);

        assert_eq!(sim.tick(), 5);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn save_and_reset_stop_the_ticker() {
        let mut sim = blinker_sim();
        sim.apply(Command::Save).unwrap();
        sim.apply(Command::Start).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        sim.apply(Command::Toggle { row: 0, col: 0 }).unwrap();
        sim.apply(Command::Reset).unwrap();
        assert!(!sim.is_running());
        sim.with_state(|life| {
            assert_eq!(life.grid(), life.snapshot());
            assert_eq!(life.generation(), 0);
        });

        sim.apply(Command::Start).unwrap();
        sim.apply(Command::Save).unwrap();
        assert!(!sim.is_running());
    }

    #[tokio::test]
    async fn commands_surface_grid_errors() {
        let mut sim = Simulation::new(LifeConfig { rows: 2, cols: 2, interval_ms: 10 }, Handle::current())
            .unwrap();
        assert!(sim.apply(Command::Toggle { row: 2, col: 0 }).is_err());
        sim.apply(Command::Toggle { row: 1, col: 1 }).unwrap();
        sim.apply(Command::Tick).unwrap();
        assert_eq!(sim.with_state(|life| life.population()), 0);
        sim.apply(Command::Clear).unwrap();
    }

    #[test]
    fn invalid_config_is_rejected() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let config = LifeConfig { interval_ms: 0, ..LifeConfig::default() };
        assert!(Simulation::new(config, runtime.handle().clone()).is_err());
    }
}
