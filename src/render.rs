//! Frame descriptions produced by the canvas.
//!
//! The core never paints. Each frame it yields plain rectangles and attributes
//! for the host UI to draw. Block rectangles are canvas-relative; the host adds
//! [`CanvasRender::pan`] and its own viewport origin. Port rectangles are relative
//! to their block's top-left corner.

use crate::types::{BlockId, BlockSide, Color, Cursor, PortDirection};

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl PixelRect {
    /// Whether `point` lies inside the rectangle (edges on the left/top inclusive).
    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 < self.x + self.width
            && point.1 >= self.y
            && point.1 < self.y + self.height
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Canvas-level output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasRender {
    /// Displacement of the canvas in pixels
    pub pan: (f32, f32),
    /// `data-x`/`data-y` attributes, the inverse of the pan
    pub data: (f32, f32),
    /// Rendering-time scale multiplier
    pub scale: f32,
    /// The pannable surface, canvas-relative
    pub surface: PixelRect,
}

/// A port square, positioned relative to its block.
#[derive(Debug, Clone, PartialEq)]
pub struct PortRender {
    /// Inlet or outlet
    pub direction: PortDirection,
    /// Side of the block
    pub side: BlockSide,
    /// Anchor offset from the block's top-left corner
    pub offset: (f32, f32),
    /// Square drawn at the anchor
    pub rect: PixelRect,
    /// Optional fill color
    pub color: Option<Color>,
}

/// A block rectangle with its ports.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRender {
    /// Tracking id of the block
    pub id: BlockId,
    /// Canvas-relative rectangle
    pub rect: PixelRect,
    /// `data-x`/`data-y` attributes (logical position)
    pub data_position: (i32, i32),
    /// `data-width`/`data-height` attributes (logical size)
    pub data_size: (u32, u32),
    /// Cursor requested over the block
    pub cursor: Cursor,
    /// Ports in insertion order
    pub ports: Vec<PortRender>,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Canvas displacement, scale, and surface
    pub canvas: CanvasRender,
    /// Blocks in paint order (later blocks on top)
    pub blocks: Vec<BlockRender>,
}
