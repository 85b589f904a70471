#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    treemate::run_app()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Redirect `log` messages to the browser console
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = treemate::start_web("the_canvas_id").await {
            log::error!("failed to start flowchart builder: {err:?}");
        }
    });
}
