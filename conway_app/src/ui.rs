// ui.rs - Controls, cell grid and statistics for the desktop front end

use conway::{Command, Life};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::warn;

use crate::GameOfLife;

const SPACING: f32 = 1.0;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            let running = self.simulation.is_running();
            let mut command = None;
            ui.horizontal(|ui| {
                if ui.add_enabled(!running, egui::Button::new("▶ Start")).clicked() {
                    command = Some(Command::Start);
                }
                if ui.add_enabled(running, egui::Button::new("⏸ Stop")).clicked() {
                    command = Some(Command::Stop);
                }
                if ui.button("⏮ Reset").clicked() {
                    command = Some(Command::Reset);
                }
                if ui.button("💾 Save").clicked() {
                    command = Some(Command::Save);
                }
                if ui.add_enabled(!running, egui::Button::new("⏭ Step")).clicked() {
                    command = Some(Command::Tick);
                }
                if ui.button("⏹ Clear").clicked() {
                    command = Some(Command::Clear);
                }

                ui.separator();

                let generation = self.simulation.with_state(Life::generation);
                ui.label(format!("Generation: {generation}"));
            });

            ui.horizontal(|ui| {
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
                ui.separator();
                ui.label(format!("Tick: {} ms", self.simulation.interval().as_millis()));
            });

            ui.separator();
            ui.label("Click cells to toggle them while stopped. Save remembers the grid, Reset brings it back.");
            ui.separator();

            // Grid
            let grid = self.simulation.with_state(|life| life.grid().clone());
            let pitch = self.cell_size + SPACING;
            let total_size = Vec2::new(
                pitch * grid.cols() as f32 - SPACING,
                pitch * grid.rows() as f32 - SPACING,
            );
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, Color32::BLACK);

            for (row, cells) in grid.iter_rows().enumerate() {
                for (col, &cell) in cells.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(col as f32 * pitch, row as f32 * pitch),
                        Vec2::splat(self.cell_size),
                    );
                    let color = if cell == conway::ALIVE { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            // Editing only while stopped
            if !running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((row, col)) = cell_under(pos - origin, self.cell_size) {
                        command = Some(Command::Toggle { row, col });
                    }
                }
            }

            ui.separator();

            // Statistics
            let total = grid.rows() * grid.cols();
            let live = grid.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live}"));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            });

            if let Some(err) = &self.last_error {
                ui.colored_label(Color32::LIGHT_RED, err.as_str());
            }

            if let Some(command) = command {
                self.last_error = match self.simulation.apply(command) {
                    Ok(()) => None,
                    Err(err) => {
                        warn!(%err, ?command, "command rejected");
                        Some(err.to_string())
                    }
                };
                ctx.request_repaint();
            }
        });
    }
}

/// Cell hit by a click at `offset` from the grid origin. Clicks on the
/// spacing between cells hit nothing.
fn cell_under(offset: Vec2, cell_size: f32) -> Option<(usize, usize)> {
    let pitch = cell_size + SPACING;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    if offset.x % pitch >= cell_size || offset.y % pitch >= cell_size {
        return None;
    }
    Some(((offset.y / pitch) as usize, (offset.x / pitch) as usize))
}
