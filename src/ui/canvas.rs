//! Canvas interaction: adapts egui pointer input to the core canvas.
//!
//! egui reports pointer positions in screen points; the core expects positions
//! relative to the top-left corner of the canvas viewport.

use super::state::FlowchartBuilderApp;
use crate::constants::SCALE_STEP;
use eframe::egui;

/// Converts a screen position into viewport-relative coordinates.
pub fn to_viewport(canvas_rect: egui::Rect, pos: egui::Pos2) -> (f32, f32) {
    let local = pos - canvas_rect.min;
    (local.x, local.y)
}

impl FlowchartBuilderApp {
    /// Allocates the canvas area, routes input to the core, and paints the frame.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // Keep the viewport in sync; a collapsed window reports a zero size
        let width = canvas_rect.width().floor() as u32;
        let height = canvas_rect.height().floor() as u32;
        if let Err(err) = self.canvas.resize_viewport(width, height) {
            log::trace!("skipping canvas frame: {err}");
            return;
        }

        self.handle_pointer_events(ui, canvas_rect);
        self.handle_canvas_zoom(ui, &response);

        if self.canvas.dragging_block().is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
        }

        self.render_canvas(&painter, canvas_rect);
    }

    /// Feeds this frame's raw pointer events to the canvas in arrival order.
    ///
    /// Presses only count inside the canvas area; moves and releases count
    /// anywhere so a drag that leaves the canvas still ends cleanly.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn handle_pointer_events(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) {
        let events = ui.input(|i| i.events.clone());

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    self.canvas.pointer_move(to_viewport(canvas_rect, pos));
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if canvas_rect.contains(pos) {
                        let target = self.canvas.pointer_down(to_viewport(canvas_rect, pos));
                        log::trace!("pointer down on {target:?}");
                    }
                }
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    self.canvas.pointer_up();
                }
                _ => {}
            }
        }
    }

    /// Handles scroll wheel zooming while the cursor is over the canvas.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_zoom(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }

        let step = if scroll_delta > 0.0 { SCALE_STEP } else { -SCALE_STEP };
        if let Err(err) = self.canvas.change_scale(self.canvas.scale() + step) {
            log::warn!("zoom rejected: {err}");
        }
    }
}
