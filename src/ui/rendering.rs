//! Canvas painting.
//!
//! Paints a [`Frame`] from the core canvas in layers: the area beyond the
//! surface, the surface with its unit grid, then blocks and their ports.

use super::state::FlowchartBuilderApp;
use crate::render::{BlockRender, Frame, PixelRect};
use crate::types::{Color, PortDirection};
use eframe::egui;
use eframe::epaint::StrokeKind;

const BLOCK_CORNER_RADIUS: f32 = 5.0;
const BLOCK_STROKE_WIDTH: f32 = 2.0;
const GRID_MIN_SPACING: f32 = 4.0;

/// Maps a core rectangle to screen space.
fn to_screen(rect: PixelRect, origin: egui::Pos2) -> egui::Rect {
    let moved = rect.translate(origin.x, origin.y);
    egui::Rect::from_min_size(
        egui::pos2(moved.x, moved.y),
        egui::vec2(moved.width, moved.height),
    )
}

fn to_color32(color: Color) -> egui::Color32 {
    let (r, g, b) = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

impl FlowchartBuilderApp {
    /// Paints the current canvas frame.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_canvas(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let frame = self.canvas.render();
        let (pan_x, pan_y) = frame.canvas.pan;
        let origin = canvas_rect.min + egui::vec2(pan_x, pan_y);
        let painter = painter.with_clip_rect(canvas_rect);
        let visuals = painter.ctx().style().visuals.clone();

        painter.rect_filled(canvas_rect, 0.0, visuals.extreme_bg_color);
        let surface = to_screen(frame.canvas.surface, origin);
        painter.rect_filled(surface, 0.0, visuals.panel_fill);

        self.draw_grid(&painter, canvas_rect, surface, &frame);

        for block in &frame.blocks {
            self.draw_block(&painter, origin, block, &visuals);
        }
    }

    /// Draws grid lines on unit boundaries, clipped to the visible surface.
    ///
    /// Skipped when zoomed out far enough that the lines would merge.
    pub fn draw_grid(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        surface: egui::Rect,
        frame: &Frame,
    ) {
        let unit = self.canvas.unit_pixels();
        if unit < GRID_MIN_SPACING {
            return;
        }

        let visible = canvas_rect.intersect(surface);
        if !visible.is_positive() {
            return;
        }

        let stroke = egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32),
        );
        // Unscaled pixel 0 lands here once the zoom around the viewport center is applied
        let (pan_x, pan_y) = frame.canvas.pan;
        let (cx, cy) = self.canvas.viewport().center();
        let scale = frame.canvas.scale;
        let origin_x = canvas_rect.min.x + pan_x + cx * (1.0 - scale);
        let origin_y = canvas_rect.min.y + pan_y + cy * (1.0 - scale);

        let mut k = ((visible.min.x - origin_x) / unit).ceil();
        while origin_x + k * unit <= visible.max.x {
            let x = origin_x + k * unit;
            painter.line_segment(
                [egui::pos2(x, visible.min.y), egui::pos2(x, visible.max.y)],
                stroke,
            );
            k += 1.0;
        }

        let mut k = ((visible.min.y - origin_y) / unit).ceil();
        while origin_y + k * unit <= visible.max.y {
            let y = origin_y + k * unit;
            painter.line_segment(
                [egui::pos2(visible.min.x, y), egui::pos2(visible.max.x, y)],
                stroke,
            );
            k += 1.0;
        }
    }

    /// Draws one block with its ports on top.
    fn draw_block(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        block: &BlockRender,
        visuals: &egui::Visuals,
    ) {
        let rect = to_screen(block.rect, origin);
        let dragging = self.canvas.dragging_block() == Some(block.id);

        let fill = visuals.widgets.inactive.bg_fill;
        let stroke_color = if dragging {
            egui::Color32::from_rgb(100, 150, 255)
        } else {
            visuals.widgets.inactive.fg_stroke.color
        };

        painter.rect_filled(rect, BLOCK_CORNER_RADIUS, fill);
        painter.rect_stroke(
            rect,
            BLOCK_CORNER_RADIUS,
            egui::Stroke::new(BLOCK_STROKE_WIDTH, stroke_color),
            StrokeKind::Outside,
        );

        for port in &block.ports {
            let port_rect = to_screen(port.rect, rect.min);
            let fill = port.color.map(to_color32).unwrap_or(match port.direction {
                PortDirection::In => egui::Color32::from_rgb(90, 170, 90),
                PortDirection::Out => egui::Color32::from_rgb(200, 120, 60),
            });
            painter.rect_filled(port_rect, 0.0, fill);
            painter.rect_stroke(
                port_rect,
                0.0,
                egui::Stroke::new(1.0, stroke_color),
                StrokeKind::Inside,
            );
        }
    }
}
