//! The canvas: owner of all blocks, the pan controller, and the event manager.
//!
//! Raw pointer positions arrive in viewport pixels. The canvas decides what was
//! hit on pointer-down, feeds every move to the pan controller, and then fans the
//! canvas-relative position out to each block so its drag controller can react.
//! Whether a gesture pans or drags is settled by the pointer-down target alone:
//! the background starts a pan, a block's own surface starts that block's drag,
//! and anything else (a port, the area beyond the surface) starts neither.

use crate::block::Block;
use crate::config::CanvasConfig;
use crate::coords::{Translator, Viewport};
use crate::error::{FlowchartError, Result};
use crate::events::{EventManager, FlowchartEvent};
use crate::pan::{PanController, PanUpdate};
use crate::render::{BlockRender, CanvasRender, Frame, PixelRect, PortRender};
use crate::types::BlockId;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas surface
    Background,
    /// A block's own surface
    Block(BlockId),
    /// A port, which belongs to a block but is not its surface
    Port {
        /// Owning block
        block: BlockId,
        /// Index into the block's ports
        index: usize,
    },
    /// The container area outside the pannable surface
    OutOfBounds,
}

/// A question the user must answer before input resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Reset the pan after a click outside the surface
    ReturnToOrigin,
}

impl Confirmation {
    /// Prompt shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Confirmation::ReturnToOrigin => "You seem to have clicked out of bounds. Return?",
        }
    }
}

/// Holds every block and the canvas-wide viewport state.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    viewport: Viewport,
    pan: PanController,
    blocks: Vec<Block>,
    pending_confirmation: Option<Confirmation>,
    events: EventManager,
}

impl Canvas {
    /// Creates an empty canvas with its own event manager.
    pub fn new(config: CanvasConfig, viewport: Viewport) -> Result<Self> {
        Self::with_events(config, viewport, EventManager::new())
    }

    /// Creates an empty canvas around an existing event manager.
    pub fn with_events(config: CanvasConfig, viewport: Viewport, events: EventManager) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pan: PanController::new(config.jump_guard_factor),
            config,
            viewport,
            blocks: Vec::new(),
            pending_confirmation: None,
            events,
        })
    }

    /// The configuration the canvas was built with.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The pan controller's state.
    pub fn pan_controller(&self) -> &PanController {
        &self.pan
    }

    /// Current pan in pixels.
    pub fn pan(&self) -> (f32, f32) {
        self.pan.pan()
    }

    /// Current scale.
    pub fn scale(&self) -> f32 {
        self.pan.scale()
    }

    /// Whether the background is being dragged.
    pub fn is_panning(&self) -> bool {
        self.pan.is_dragging()
    }

    /// The block currently being dragged, if any.
    pub fn dragging_block(&self) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|block| block.drag().is_dragging())
            .map(Block::id)
    }

    /// The event manager, for registering listeners.
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Translator for the current viewport. It always works in unscaled
    /// pixels; zoom is applied around the viewport center on the way in and out.
    pub fn translator(&self) -> Translator {
        Translator::new(self.viewport, self.config.unit_size)
    }

    /// Side length of a port square in unscaled pixels.
    pub fn port_size(&self) -> f32 {
        self.config.port_size
    }

    /// Length of one logical unit on screen at the current scale.
    pub fn unit_pixels(&self) -> f32 {
        self.config.unit_size * self.pan.scale()
    }

    /// Records a new viewport size reported by the host.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        if viewport != self.viewport {
            log::debug!("viewport resized to {width}x{height}");
            self.viewport = viewport;
        }
        Ok(())
    }

    /// Blocks in paint order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks a block up by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    /// Looks a block up by id for modification.
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.id() == id)
    }

    /// Adds a block on top of the others.
    pub fn add_block(&mut self, block: Block) -> BlockId {
        let id = block.id();
        log::debug!("adding block {id} at {:?}", block.transform().position());
        self.blocks.push(block);
        self.events.emit(FlowchartEvent::BlockAdded { id });
        id
    }

    /// Removes a block together with its ports.
    pub fn remove_block(&mut self, id: BlockId) -> Result<Block> {
        let index = self
            .blocks
            .iter()
            .position(|block| block.id() == id)
            .ok_or(FlowchartError::UnknownBlock(id))?;

        let mut block = self.blocks.remove(index);
        block.on_canvas_release();
        log::debug!("removed block {id}");
        self.events.emit(FlowchartEvent::BlockRemoved { id });
        Ok(block)
    }

    /// Pixel offset of a port from its block's corner, resolved through the collection.
    pub fn port_offset(&self, block: BlockId, index: usize) -> Result<(f32, f32)> {
        let owner = self.block(block).ok_or(FlowchartError::UnknownBlock(block))?;
        let port = owner
            .ports()
            .get(index)
            .ok_or(FlowchartError::UnknownPort { block, index })?;
        port.pixel_offset(owner, self.unit_pixels())
    }

    /// Converts a viewport pointer position to a canvas-relative one.
    pub fn to_canvas(&self, pointer: (f32, f32)) -> (f32, f32) {
        let (pan_x, pan_y) = self.pan.pan();
        (pointer.0 - pan_x, pointer.1 - pan_y)
    }

    /// Converts a viewport pointer position to canvas-relative pixels with the
    /// zoom undone, the space the translator and hit testing work in.
    pub fn to_unscaled(&self, pointer: (f32, f32)) -> (f32, f32) {
        let (x, y) = self.to_canvas(pointer);
        let (cx, cy) = self.viewport.center();
        let scale = self.pan.scale();
        (cx + (x - cx) / scale, cy + (y - cy) / scale)
    }

    /// Logical cell under a viewport pointer position.
    pub fn logical_at(&self, pointer: (f32, f32)) -> (i32, i32) {
        let (x, y) = self.to_unscaled(pointer);
        self.translator().to_logical(x, y)
    }

    /// Applies the zoom to an unscaled canvas-relative rectangle.
    fn scale_rect(&self, rect: PixelRect) -> PixelRect {
        let (cx, cy) = self.viewport.center();
        let scale = self.pan.scale();
        PixelRect {
            x: cx + (rect.x - cx) * scale,
            y: cy + (rect.y - cy) * scale,
            width: rect.width * scale,
            height: rect.height * scale,
        }
    }

    /// The pannable surface in unscaled canvas-relative pixels, centered on
    /// the viewport center.
    pub fn surface_rect(&self) -> PixelRect {
        let (cx, cy) = self.viewport.center();
        PixelRect {
            x: cx - self.config.canvas_width / 2.0,
            y: cy - self.config.canvas_height / 2.0,
            width: self.config.canvas_width,
            height: self.config.canvas_height,
        }
    }

    /// Finds the topmost element under a viewport pointer position.
    pub fn hit_test(&self, pointer: (f32, f32)) -> HitTarget {
        let local = self.to_unscaled(pointer);
        let translator = self.translator();
        let port_size = self.port_size();

        for block in self.blocks.iter().rev() {
            if let Some(index) = block.port_at(local, &translator, port_size) {
                return HitTarget::Port {
                    block: block.id(),
                    index,
                };
            }
            if block.pixel_rect(&translator).contains(local) {
                return HitTarget::Block(block.id());
            }
        }

        if self.surface_rect().contains(local) {
            HitTarget::Background
        } else {
            HitTarget::OutOfBounds
        }
    }

    /// Question waiting for the user, if any. Pointer input is ignored until it is resolved.
    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.pending_confirmation
    }

    /// Answers the pending question.
    pub fn resolve_confirmation(&mut self, accepted: bool) {
        let Some(confirmation) = self.pending_confirmation.take() else {
            return;
        };
        match confirmation {
            Confirmation::ReturnToOrigin if accepted => {
                log::info!("returning canvas to origin");
                self.update_location(Some(0.0), Some(0.0));
                self.events.emit(FlowchartEvent::ReturnedToOrigin);
            }
            Confirmation::ReturnToOrigin => {
                log::info!("return to origin declined");
            }
        }
    }

    /// Handles a pointer press. Returns `None` while a confirmation is pending.
    pub fn pointer_down(&mut self, pointer: (f32, f32)) -> Option<HitTarget> {
        if self.pending_confirmation.is_some() {
            return None;
        }

        let target = self.hit_test(pointer);
        match target {
            HitTarget::Background => self.pan.begin(pointer),
            HitTarget::Block(id) => {
                let local = self.to_unscaled(pointer);
                let translator = self.translator();
                if let Some(block) = self.block_mut(id) {
                    block.begin_drag(local, &translator);
                }
            }
            HitTarget::Port { .. } => {}
            HitTarget::OutOfBounds => {
                log::debug!("pointer down outside the canvas surface");
                self.pending_confirmation = Some(Confirmation::ReturnToOrigin);
            }
        }
        Some(target)
    }

    /// Handles a pointer move: pans if the background is held, then lets every
    /// block react to the canvas-relative position.
    pub fn pointer_move(&mut self, pointer: (f32, f32)) {
        if self.pending_confirmation.is_some() {
            return;
        }

        if let PanUpdate::Moved { dx, dy } = self.pan.drag_to(pointer, self.viewport) {
            if dx != 0.0 || dy != 0.0 {
                let (pan_x, pan_y) = self.pan.pan();
                self.events.emit(FlowchartEvent::CanvasPanned { pan_x, pan_y });
            }
        }

        let local = self.to_unscaled(pointer);
        let translator = self.translator();
        for block in &mut self.blocks {
            if let Some((x, y)) = block.on_canvas_move(local, &translator) {
                self.events.emit(FlowchartEvent::BlockMoved { id: block.id(), x, y });
            }
        }
    }

    /// Handles a pointer release anywhere: ends the pan and every block drag.
    pub fn pointer_up(&mut self) {
        if self.pending_confirmation.is_some() {
            return;
        }

        self.pan.end();
        for block in &mut self.blocks {
            block.on_canvas_release();
        }
    }

    /// Sets the pan absolutely. Axes passed as `None` keep their value.
    pub fn update_location(&mut self, x: Option<f32>, y: Option<f32>) {
        self.pan.update_location(x, y);
        let (pan_x, pan_y) = self.pan.pan();
        self.events.emit(FlowchartEvent::CanvasPanned { pan_x, pan_y });
    }

    /// Changes the scale, clamped to the configured range.
    pub fn change_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FlowchartError::InvalidScale(scale));
        }
        let clamped = scale.clamp(self.config.min_scale, self.config.max_scale);
        if (clamped - self.pan.scale()).abs() > f32::EPSILON {
            log::debug!("canvas scale changed to {clamped}");
            self.pan.change_scale(clamped);
            self.events.emit(FlowchartEvent::CanvasScaled { scale: clamped });
        }
        Ok(())
    }

    /// Describes the current frame, with the zoom applied around the viewport center.
    pub fn render(&self) -> Frame {
        let translator = self.translator();
        let unit = self.unit_pixels();
        let port_size = self.port_size() * self.pan.scale();

        let blocks = self
            .blocks
            .iter()
            .map(|block| {
                let rect = self.scale_rect(block.pixel_rect(&translator));
                let ports = block
                    .ports()
                    .iter()
                    .map(|port| {
                        let offset = port.offset_within(rect.width, rect.height, unit);
                        PortRender {
                            direction: port.direction(),
                            side: port.side(),
                            offset,
                            rect: PixelRect {
                                x: offset.0,
                                y: offset.1,
                                width: port_size,
                                height: port_size,
                            },
                            color: port.color(),
                        }
                    })
                    .collect();
                let transform = block.transform();
                BlockRender {
                    id: block.id(),
                    rect,
                    data_position: transform.position(),
                    data_size: (transform.width(), transform.height()),
                    cursor: block.cursor(),
                    ports,
                }
            })
            .collect();

        Frame {
            canvas: CanvasRender {
                pan: self.pan.pan(),
                data: self.pan.data_attributes(),
                scale: self.pan.scale(),
                surface: self.scale_rect(self.surface_rect()),
            },
            blocks,
        }
    }
}
