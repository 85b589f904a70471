//! Blocks: positioned, sized rectangles carrying ports.
//!
//! A block owns its [`Transform`], its ports, and its [`DragController`]. The
//! canvas feeds it pointer positions that are already canvas-relative.

use crate::config::BlockDefaults;
use crate::coords::Translator;
use crate::drag::DragController;
use crate::error::{FlowchartError, Result};
use crate::port::Port;
use crate::render::PixelRect;
use crate::types::{BlockId, BlockSide, Color, Cursor, PortDirection, Transform};
use uuid::Uuid;

/// A rectangle on the canvas, measured in logical units.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    transform: Transform,
    ports: Vec<Port>,
    drag: DragController,
}

impl Default for Block {
    /// A 6 x 4 block at the origin with the default ports.
    fn default() -> Self {
        Self::new(Transform::default())
    }
}

impl Block {
    /// Creates a block with a fresh tracking id and the default ports: an inlet
    /// centered on the top side and an outlet centered on the bottom side.
    pub fn new(transform: Transform) -> Self {
        let id = Uuid::new_v4();
        let center = transform.width() / 2;
        Self {
            id,
            transform,
            ports: vec![
                Port::new(id, PortDirection::In, BlockSide::Top, center),
                Port::new(id, PortDirection::Out, BlockSide::Bottom, center),
            ],
            drag: DragController::default(),
        }
    }

    /// The block's tracking id.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The block's current geometry.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Ports in insertion order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// The block's drag state.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Cursor to show over the block.
    pub fn cursor(&self) -> Cursor {
        self.drag.cursor()
    }

    /// Width in pixels.
    pub fn actual_width(&self, unit_size: f32) -> f32 {
        self.transform.width() as f32 * unit_size
    }

    /// Height in pixels.
    pub fn actual_height(&self, unit_size: f32) -> f32 {
        self.transform.height() as f32 * unit_size
    }

    /// Adds a port and returns its index.
    pub fn add_port(
        &mut self,
        direction: PortDirection,
        side: BlockSide,
        side_position: u32,
        color: Option<Color>,
    ) -> Result<usize> {
        let mut port = Port::new(self.id, direction, side, side_position);
        if let Some(color) = color {
            port = port.with_color(color);
        }
        self.attach_port(port)
    }

    /// Attaches a port created for this block and returns its index.
    pub fn attach_port(&mut self, port: Port) -> Result<usize> {
        if port.owner() != self.id {
            return Err(FlowchartError::PortOwnerMismatch {
                port_owner: port.owner(),
                block: self.id,
            });
        }
        port.validate(&self.transform)?;
        self.ports.push(port);
        Ok(self.ports.len() - 1)
    }

    /// Changes the block's footprint. Ports beyond the new edges are clamped onto them.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let transform = self.transform.with_width(width)?.with_height(height)?;
        for port in &mut self.ports {
            port.clamp_to(&transform);
        }
        self.transform = transform;
        Ok(())
    }

    /// Moves the block. Returns `false` without touching the transform when the
    /// position is unchanged.
    pub fn set_position(&mut self, x: i32, y: i32) -> bool {
        if self.transform.position() == (x, y) {
            return false;
        }
        self.transform = self.transform.with_position(x, y);
        true
    }

    /// Rectangle covered by the block, in canvas-relative pixels.
    pub fn pixel_rect(&self, translator: &Translator) -> PixelRect {
        let (x, y) = translator.to_pixels(self.transform.x(), self.transform.y());
        PixelRect {
            x,
            y,
            width: self.actual_width(translator.unit_size()),
            height: self.actual_height(translator.unit_size()),
        }
    }

    /// Rectangle covered by the port at `index`, in canvas-relative pixels.
    pub fn port_rect(&self, index: usize, translator: &Translator, port_size: f32) -> Option<PixelRect> {
        let port = self.ports.get(index)?;
        let body = self.pixel_rect(translator);
        let (dx, dy) = port.offset_within(body.width, body.height, translator.unit_size());
        Some(PixelRect {
            x: body.x + dx,
            y: body.y + dy,
            width: port_size,
            height: port_size,
        })
    }

    /// Topmost port under a canvas-relative pointer position.
    pub fn port_at(&self, pointer: (f32, f32), translator: &Translator, port_size: f32) -> Option<usize> {
        (0..self.ports.len())
            .rev()
            .find(|&index| {
                self.port_rect(index, translator, port_size)
                    .is_some_and(|rect| rect.contains(pointer))
            })
    }

    /// Picks the block up at a canvas-relative pointer position.
    pub fn begin_drag(&mut self, pointer: (f32, f32), translator: &Translator) {
        self.drag.begin(pointer, &self.transform, translator);
        log::debug!(
            "block {} picked up with offset {:?}",
            self.id,
            self.drag.pickup_offset()
        );
    }

    /// Reacts to a canvas-wide pointer move. Returns the new position when the
    /// block moved.
    pub fn on_canvas_move(&mut self, pointer: (f32, f32), translator: &Translator) -> Option<(i32, i32)> {
        let (x, y) = self.drag.track(pointer, &self.transform, translator)?;
        self.set_position(x, y);
        log::trace!("block {} moved to ({x}, {y})", self.id);
        Some((x, y))
    }

    /// Reacts to a canvas-wide pointer release. Returns whether a drag ended.
    pub fn on_canvas_release(&mut self) -> bool {
        let released = self.drag.release();
        if released {
            log::debug!(
                "block {} dropped at ({}, {})",
                self.id,
                self.transform.x(),
                self.transform.y()
            );
        }
        released
    }
}

/// Builds a block from default geometry with optional overrides.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    defaults: BlockDefaults,
    width: Option<u32>,
    height: Option<u32>,
    x: Option<i32>,
    y: Option<i32>,
    extra_ports: Vec<(PortDirection, BlockSide, u32, Option<Color>)>,
}

impl BlockBuilder {
    /// Starts from the given defaults.
    pub fn new(defaults: BlockDefaults) -> Self {
        Self {
            defaults,
            width: None,
            height: None,
            x: None,
            y: None,
            extra_ports: Vec::new(),
        }
    }

    /// Overrides the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Overrides the height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Overrides the X-coordinate.
    pub fn x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    /// Overrides the Y-coordinate.
    pub fn y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    /// Adds a port on top of the two default ones.
    pub fn port(mut self, direction: PortDirection, side: BlockSide, side_position: u32, color: Option<Color>) -> Self {
        self.extra_ports.push((direction, side, side_position, color));
        self
    }

    /// Validates the geometry and ports and creates the block.
    pub fn build(self) -> Result<Block> {
        let transform = Transform::new(
            self.width.unwrap_or(self.defaults.width),
            self.height.unwrap_or(self.defaults.height),
            self.x.unwrap_or(self.defaults.x),
            self.y.unwrap_or(self.defaults.y),
        )?;

        let mut block = Block::new(transform);
        for (direction, side, side_position, color) in self.extra_ports {
            block.add_port(direction, side, side_position, color)?;
        }
        Ok(block)
    }
}
