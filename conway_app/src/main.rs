// main.rs - Desktop Game of Life: egui front end over the conway driver

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway::{LifeConfig, Simulation};
use eframe::egui;
use egui::Color32;
use tracing::info;

mod ui;

#[derive(Parser, Debug)]
#[command(name = "game_of_life", version, about = "Conway's Game of Life on a fixed grid")]
struct Cli {
    /// Grid height in cells.
    #[arg(long, env = "CONWAY_ROWS", default_value_t = conway::config::DEFAULT_ROWS)]
    rows: usize,

    /// Grid width in cells.
    #[arg(long, env = "CONWAY_COLS", default_value_t = conway::config::DEFAULT_COLS)]
    cols: usize,

    /// Milliseconds between generations while running.
    #[arg(long, env = "CONWAY_INTERVAL_MS", default_value_t = conway::config::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// On-screen size of one cell, in points.
    #[arg(long, default_value_t = 20.0)]
    cell_size: f32,
}

impl Cli {
    fn life_config(&self) -> LifeConfig {
        LifeConfig {
            rows: self.rows,
            cols: self.cols,
            interval_ms: self.interval_ms,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.life_config();

    let app = GameOfLife::new(config, cli.cell_size)?;
    info!(rows = config.rows, cols = config.cols, interval_ms = config.interval_ms, "Starting Game of Life");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(app.window_size()),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            let mut app = app;
            app.attach_repaint(&cc.egui_ctx);
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow!("window closed with error: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Front-end state. The simulation itself lives in `conway::Simulation`;
/// this only adds presentation settings.
pub struct GameOfLife {
    simulation: Simulation,
    pub cell_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub last_error: Option<String>,

    // Declared last so the ticker is aborted before the runtime shuts down.
    _runtime: tokio::runtime::Runtime,
}

impl GameOfLife {
    pub fn new(config: LifeConfig, cell_size: f32) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().context("failed to start the tick runtime")?;
        let simulation = Simulation::new(config, runtime.handle().clone())
            .context("invalid grid configuration")?;

        Ok(Self {
            simulation,
            cell_size: cell_size.max(4.0),
            live_color: Color32::YELLOW,
            dead_color: Color32::GRAY,
            last_error: None,
            _runtime: runtime,
        })
    }

    /// Repaint the window whenever the ticker produces a generation.
    fn attach_repaint(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.simulation.on_tick(move |_generation| ctx.request_repaint());
    }

    fn window_size(&self) -> [f32; 2] {
        let (rows, cols) = self.simulation.with_state(|life| life.grid().shape());
        let width = cols as f32 * self.cell_size + 40.0;
        let height = rows as f32 * self.cell_size + 160.0;
        [width.max(420.0), height]
    }
}
