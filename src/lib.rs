//! # Treemate
//!
//! Core of a grid-snapped flowchart editor. Blocks live on an integer grid whose
//! origin sits at the center of the viewport; the canvas can be panned and
//! zoomed, and blocks are dragged in whole grid units.
//!
//! ## Features
//! - Translation between pixel positions and logical grid coordinates
//! - Canvas panning with protection against spurious pointer jumps
//! - Block dragging that keeps the grab offset for the whole gesture
//! - Ports anchored to block sides
//! - A typed event manager for lifecycle and canvas events
//! - An egui front end that hosts the canvas

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod block;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod coords;
pub mod drag;
pub mod error;
pub mod events;
pub mod pan;
pub mod port;
pub mod render;
pub mod seed;
pub mod types;
mod ui;

// Re-export public types and functions
pub use block::{Block, BlockBuilder};
pub use canvas::{Canvas, Confirmation, HitTarget};
pub use config::{BlockDefaults, CanvasConfig};
pub use coords::{Translator, Viewport};
pub use error::{FlowchartError, Result};
pub use events::{EventKind, EventManager, FlowchartEvent, ListenerId};
pub use port::Port;
pub use types::*;
pub use ui::{AppSettings, BuilderContext, FlowchartBuilderApp};

/// Runs the flowchart builder as a native window.
///
/// Settings persisted by a previous run are restored when present.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use treemate::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> std::result::Result<(), eframe::Error> {
    let (width, height) = constants::INITIAL_VIEWPORT;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_title("Treemate"),
        ..Default::default()
    };
    eframe::run_native(
        "Treemate",
        options,
        Box::new(|cc| Ok(Box::new(FlowchartBuilderApp::from_storage(cc.storage)?))),
    )
}

/// Starts the flowchart builder on the page's `<canvas>` element with id `canvas_id`.
#[cfg(target_arch = "wasm32")]
pub async fn start_web(canvas_id: &str) -> std::result::Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let missing = || {
        let err = FlowchartError::MissingElement(canvas_id.to_string());
        wasm_bindgen::JsValue::from_str(&err.to_string())
    };

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(canvas_id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(missing)?;

    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(FlowchartBuilderApp::from_storage(cc.storage)?))),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_geometry() {
        let block = Block::default();
        assert_eq!(block.transform().width(), 6);
        assert_eq!(block.transform().height(), 4);
        assert_eq!(block.transform().position(), (0, 0));
        assert_eq!(block.ports().len(), 2);
    }

    #[test]
    fn test_translator_origin_at_viewport_center() {
        let translator = Translator::new(Viewport::new(800, 600).unwrap(), 25.0);
        assert_eq!(translator.to_pixels(0, 0), (400.0, 300.0));
        assert_eq!(translator.to_logical(400.0, 300.0), (0, 0));
    }
}
