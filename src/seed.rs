//! Startup sequence and the blocks every new canvas starts with.
//!
//! There is no document loader yet, so the canvas is seeded with a fixed set of
//! demo blocks. Startup runs the lifecycle events in order: `PreInit`, listener
//! registration, `Init`, mounting and seeding the canvas, then `PostInit`.

use crate::block::{Block, BlockBuilder};
use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::coords::Viewport;
use crate::error::Result;
use crate::events::{EventKind, EventManager, FlowchartEvent};

/// Blocks placed on a fresh canvas: one with default geometry and one wider
/// block below and to the left of it.
pub fn seed_blocks(config: &CanvasConfig) -> Result<Vec<Block>> {
    Ok(vec![
        BlockBuilder::new(config.block_defaults).build()?,
        BlockBuilder::new(config.block_defaults)
            .width(10)
            .x(-12)
            .y(6)
            .build()?,
    ])
}

/// Listeners the application always carries.
pub fn register_default_listeners(events: &mut EventManager) {
    events.add_listener(EventKind::PostInit, |_| {
        log::info!("flowchart builder ready");
    });
    events.add_listener(EventKind::ReturnedToOrigin, |_| {
        log::info!("canvas returned to origin");
    });
}

/// Runs the startup lifecycle and returns a mounted, seeded canvas.
///
/// `events` may already carry listeners; they observe every lifecycle event,
/// including `PreInit`.
pub fn bootstrap(config: CanvasConfig, viewport: Viewport, mut events: EventManager) -> Result<Canvas> {
    events.emit(FlowchartEvent::PreInit);
    register_default_listeners(&mut events);
    events.emit(FlowchartEvent::Init);

    let blocks = seed_blocks(&config)?;
    let mut canvas = Canvas::with_events(config, viewport, events)?;
    for block in blocks {
        canvas.add_block(block);
    }

    canvas.events_mut().emit(FlowchartEvent::PostInit);
    Ok(canvas)
}
