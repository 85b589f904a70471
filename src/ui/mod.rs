//! User interface for the flowchart builder.
//!
//! The core crate knows nothing about egui. This module owns the
//! [`FlowchartBuilderApp`], turns egui input into canvas pointer calls, and
//! paints the frames the canvas describes.
//!
//! # Module Organization
//!
//! - `state` - The app struct, UI flags, and persisted settings
//! - `canvas` - Pointer routing and scroll-wheel zoom
//! - `rendering` - Drawing the surface, grid, blocks, and ports

mod canvas;
mod rendering;
mod state;

#[cfg(test)]
mod tests;

pub use state::{AppSettings, BuilderContext, FlowchartBuilderApp, APP_STATE_KEY};

use crate::block::BlockBuilder;
use crate::canvas::Canvas;
use crate::types::BlockId;
use eframe::egui;

impl eframe::App for FlowchartBuilderApp {
    /// Persist settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.settings().to_json() {
            Ok(json) => {
                storage.set_string(APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("failed to serialize app state: {err}");
            }
        }
    }

    /// Lays out the toolbar, the toolbox, the canvas, and any pending prompt.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("toolbox")
            .resizable(true)
            .default_width(220.0)
            .show_animated(ctx, self.context.toolbox_open, |ui| {
                Self::draw_toolbox(&self.canvas, &mut self.context, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.draw_confirmation(ctx);
    }
}

impl FlowchartBuilderApp {
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.context.toolbox_open {
                "Hide toolbox"
            } else {
                "Show toolbox"
            };
            if ui.button(label).clicked() {
                self.toggle_toolbox();
            }

            ui.separator();

            if ui.button("Add block").clicked() {
                self.add_default_block();
            }

            ui.separator();

            if ui.button("Reset view").clicked() {
                self.canvas.update_location(Some(0.0), Some(0.0));
                if let Err(err) = self.canvas.change_scale(1.0) {
                    log::warn!("failed to reset scale: {err}");
                }
            }

            let (pan_x, pan_y) = self.canvas.pan();
            ui.label(format!(
                "Zoom {:.0}%  Pan ({pan_x:.0}, {pan_y:.0})",
                self.canvas.scale() * 100.0
            ));
        });
    }

    /// Lists the blocks on the canvas with their logical geometry.
    ///
    /// The toolbox only reads the canvas; the one thing it may change is its
    /// own open flag.
    fn draw_toolbox(canvas: &Canvas, context: &mut BuilderContext, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Toolbox");
            if ui.small_button("Close").clicked() {
                context.toolbox_open = false;
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, block) in canvas.blocks().iter().enumerate() {
                let transform = block.transform();
                ui.label(format!(
                    "Block {}: {}x{} at ({}, {})",
                    index + 1,
                    transform.width(),
                    transform.height(),
                    transform.x(),
                    transform.y()
                ));
            }
        });
    }

    /// Adds a block with the configured default geometry.
    pub fn add_default_block(&mut self) -> Option<BlockId> {
        match BlockBuilder::new(self.canvas.config().block_defaults).build() {
            Ok(block) => Some(self.canvas.add_block(block)),
            Err(err) => {
                log::error!("failed to build default block: {err}");
                None
            }
        }
    }

    /// Shows the canvas's pending question, if any, as a modal-style window.
    fn draw_confirmation(&mut self, ctx: &egui::Context) {
        let Some(confirmation) = self.canvas.pending_confirmation() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("Out of bounds")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(confirmation.message());
                ui.horizontal(|ui| {
                    if ui.button("Return").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Stay").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(accepted) = answer {
            self.answer_confirmation(accepted);
        }
    }
}
