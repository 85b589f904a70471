use super::*;
use crate::canvas::{Confirmation, HitTarget};
use crate::config::CanvasConfig;
use eframe::egui;
use eframe::Storage;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

fn press(pos: egui::Pos2) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed: true,
        modifiers: egui::Modifiers::NONE,
    }
}

fn release(pos: egui::Pos2) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed: false,
        modifiers: egui::Modifiers::NONE,
    }
}

/// Runs one headless frame with the canvas filling the whole 1200x800 screen,
/// so screen positions equal viewport positions.
fn run_canvas_frame(ctx: &egui::Context, app: &mut FlowchartBuilderApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                app.draw_canvas(ui);
            });
    });
}

#[derive(Default)]
struct MemoryStorage(HashMap<String, String>);

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

#[test]
fn canvas_frame_syncs_viewport() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let ctx = egui::Context::default();

    run_canvas_frame(&ctx, &mut app, Vec::new());
    let viewport = app.canvas.viewport();
    assert_eq!((viewport.width(), viewport.height()), (1200, 800));

    let _ = ctx.run(raw_input(Vec::new()), |ctx| {
        egui::SidePanel::left("spacer").exact_width(300.0).show(ctx, |_| {});
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                app.draw_canvas(ui);
            });
    });
    let viewport = app.canvas.viewport();
    assert!(viewport.width() < 1000);
    assert_eq!(viewport.height(), 800);
}

#[test]
fn dragging_background_pans_canvas() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let ctx = egui::Context::default();
    let start = egui::pos2(200.0, 200.0);

    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start), press(start)]);
    assert!(app.canvas.is_panning());

    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(240.0, 220.0))]);
    run_canvas_frame(&ctx, &mut app, vec![release(egui::pos2(240.0, 220.0))]);

    assert!(!app.canvas.is_panning());
    assert_eq!(app.canvas.pan(), (40.0, 20.0));
    assert_eq!(app.canvas.pan_controller().data_attributes(), (-40.0, -20.0));
}

#[test]
fn dragging_block_moves_it_by_whole_units() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let ctx = egui::Context::default();
    let first = app.canvas.blocks()[0].id();

    // Default block sits at (0, 0), whose corner is the viewport center (600, 400)
    let grab = egui::pos2(620.0, 450.0);
    run_canvas_frame(&ctx, &mut app, Vec::new());
    assert_eq!(app.canvas.hit_test((grab.x, grab.y)), HitTarget::Block(first));

    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(grab), press(grab)]);
    assert_eq!(app.canvas.dragging_block(), Some(first));

    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(egui::pos2(645.0, 475.0))]);
    run_canvas_frame(&ctx, &mut app, vec![release(egui::pos2(645.0, 475.0))]);

    let block = app.canvas.block(first).unwrap();
    assert_eq!(block.transform().position(), (1, 1));
    assert_eq!(app.canvas.dragging_block(), None);
    assert_eq!(app.canvas.pan(), (0.0, 0.0));
}

#[test]
fn press_outside_canvas_area_is_ignored() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let ctx = egui::Context::default();

    let _ = ctx.run(raw_input(vec![press(egui::pos2(50.0, 50.0))]), |ctx| {
        egui::SidePanel::left("spacer").exact_width(300.0).show(ctx, |_| {});
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                app.draw_canvas(ui);
            });
    });

    assert!(!app.canvas.is_panning());
    assert_eq!(app.canvas.pending_confirmation(), None);
}

#[test]
fn out_of_bounds_press_asks_to_return() {
    let mut config = CanvasConfig::default();
    config.canvas_width = 400.0;
    config.canvas_height = 400.0;
    let mut app = FlowchartBuilderApp::new(AppSettings {
        config,
        ..AppSettings::default()
    })
    .unwrap();
    let ctx = egui::Context::default();
    app.canvas.update_location(Some(300.0), Some(0.0));

    run_canvas_frame(&ctx, &mut app, vec![press(egui::pos2(100.0, 100.0))]);
    assert_eq!(app.canvas.pending_confirmation(), Some(Confirmation::ReturnToOrigin));

    // The prompt stays up until answered
    let _ = ctx.run(raw_input(Vec::new()), |ctx| app.draw_confirmation(ctx));
    assert!(app.canvas.pending_confirmation().is_some());

    app.answer_confirmation(true);
    assert_eq!(app.canvas.pending_confirmation(), None);
    assert_eq!(app.canvas.pan(), (0.0, 0.0));
}

#[test]
fn declining_return_keeps_pan() {
    let mut config = CanvasConfig::default();
    config.canvas_width = 400.0;
    config.canvas_height = 400.0;
    let mut app = FlowchartBuilderApp::new(AppSettings {
        config,
        ..AppSettings::default()
    })
    .unwrap();
    let ctx = egui::Context::default();
    app.canvas.update_location(Some(300.0), Some(0.0));

    run_canvas_frame(&ctx, &mut app, vec![press(egui::pos2(100.0, 100.0))]);
    app.answer_confirmation(false);

    assert_eq!(app.canvas.pending_confirmation(), None);
    assert_eq!(app.canvas.pan(), (300.0, 0.0));
}

#[test]
fn toolbar_and_toolbox_render() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let ctx = egui::Context::default();

    let _ = ctx.run(raw_input(Vec::new()), |ctx| {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| app.draw_toolbar(ui));
        egui::SidePanel::right("toolbox").show(ctx, |ui| {
            FlowchartBuilderApp::draw_toolbox(&app.canvas, &mut app.context, ui)
        });
    });

    assert_eq!(app.canvas.blocks().len(), 2);
}

#[test]
fn clicking_through_toolbox_leaves_canvas_untouched() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    let before: Vec<_> = app
        .canvas
        .blocks()
        .iter()
        .map(|block| (block.id(), *block.transform()))
        .collect();
    let ctx = egui::Context::default();

    // Click down the whole toolbox column, one row at a time
    for y in (10..400).step_by(10) {
        let pos = egui::pos2(1100.0, y as f32);
        for events in [
            vec![egui::Event::PointerMoved(pos), press(pos)],
            vec![release(pos)],
        ] {
            let _ = ctx.run(raw_input(events), |ctx| {
                egui::SidePanel::right("toolbox")
                    .exact_width(250.0)
                    .show(ctx, |ui| {
                        FlowchartBuilderApp::draw_toolbox(&app.canvas, &mut app.context, ui)
                    });
            });
        }
    }

    let after: Vec<_> = app
        .canvas
        .blocks()
        .iter()
        .map(|block| (block.id(), *block.transform()))
        .collect();
    assert_eq!(after, before);
}

#[test]
fn toggle_toolbox_flips_flag() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    assert!(app.context.toolbox_open);

    app.toggle_toolbox();
    assert!(!app.context.toolbox_open);
    assert!(!app.settings().context.toolbox_open);
}

#[test]
fn add_default_block_uses_configured_defaults() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();

    let id = app.add_default_block().unwrap();

    assert_eq!(app.canvas.blocks().len(), 3);
    let block = app.canvas.block(id).unwrap();
    assert_eq!(block.transform().width(), 6);
    assert_eq!(block.transform().height(), 4);
}

#[test]
fn settings_survive_save_and_restore() {
    let mut app = FlowchartBuilderApp::new(AppSettings::default()).unwrap();
    app.toggle_toolbox();
    let mut storage = MemoryStorage::default();

    eframe::App::save(&mut app, &mut storage);
    assert!(storage.0.contains_key(APP_STATE_KEY));

    let restored = FlowchartBuilderApp::from_storage(Some(&storage as &dyn eframe::Storage)).unwrap();
    assert_eq!(restored.settings(), app.settings());
}

#[test]
fn from_storage_falls_back_to_defaults() {
    let app = FlowchartBuilderApp::from_storage(None).unwrap();
    assert_eq!(app.settings(), AppSettings::default());

    let mut storage = MemoryStorage::default();
    storage.set_string(APP_STATE_KEY, "not json".to_string());
    let app = FlowchartBuilderApp::from_storage(Some(&storage as &dyn eframe::Storage)).unwrap();
    assert_eq!(app.settings(), AppSettings::default());

    let mut storage = MemoryStorage::default();
    storage.set_string(
        APP_STATE_KEY,
        r#"{"context":{"toolbox_open":false},"config":{"unit_size":-5.0}}"#.to_string(),
    );
    let app = FlowchartBuilderApp::from_storage(Some(&storage as &dyn eframe::Storage)).unwrap();
    assert!(!app.context.toolbox_open);
    assert_eq!(app.canvas.config(), &CanvasConfig::default());
}
