//! Core data types shared by the canvas, blocks, and ports.
//!
//! Block geometry lives in [`Transform`], expressed in logical units. Pixels only
//! appear once a [`crate::coords::Translator`] is involved.

use crate::error::{FlowchartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque tracking token for blocks on the canvas.
pub type BlockId = Uuid;

/// Width, height, and top-left position of a block, in logical units.
///
/// Transforms are values: every setter returns an updated copy and leaves the
/// original untouched, so the owning block swaps its transform in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    width: u32,
    height: u32,
    x: i32,
    y: i32,
}

impl Transform {
    /// Creates a transform, rejecting zero-sized footprints.
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FlowchartError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }

    /// The width of the block (in units).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the block (in units).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The X-coordinate of the block's top-left corner.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The Y-coordinate of the block's top-left corner.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The `(x, y)` position of the block's top-left corner.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns a copy with a new width.
    pub fn with_width(self, width: u32) -> Result<Self> {
        Self::new(width, self.height, self.x, self.y)
    }

    /// Returns a copy with a new height.
    pub fn with_height(self, height: u32) -> Result<Self> {
        Self::new(self.width, height, self.x, self.y)
    }

    /// Returns a copy moved to `(x, y)`.
    pub fn with_position(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            width: crate::constants::BLOCK_DEFAULT_WIDTH,
            height: crate::constants::BLOCK_DEFAULT_HEIGHT,
            x: crate::constants::BLOCK_DEFAULT_X,
            y: crate::constants::BLOCK_DEFAULT_Y,
        }
    }
}

/// The side of a block a port sits on, listed in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSide {
    /// Top edge, offsets measured rightwards from the top-left corner
    Top,
    /// Right edge, offsets measured downwards from the top-right corner
    Right,
    /// Bottom edge, offsets measured rightwards from the bottom-left corner
    Bottom,
    /// Left edge, offsets measured downwards from the top-left corner
    Left,
}

/// Whether a port accepts (`In`) or emits (`Out`) a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Inlet
    In,
    /// Outlet
    Out,
}

/// An RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Splits the packed value into its red, green, and blue channels.
    pub fn rgb(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }
}

impl fmt::Display for Color {
    /// Formats as a CSS hex color, e.g. `#ffff00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Pointer cursor affordance requested by an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Whatever the host uses normally
    #[default]
    Default,
    /// Shown while a block is being dragged
    Move,
}
