//! Conversion between flowchart logical units and canvas pixels.
//!
//! Logical `(0, 0)` sits at the pixel center of the viewport. Pixel positions here
//! are canvas-relative: they already exclude the canvas pan, which the caller
//! subtracts from raw pointer coordinates before translating.
//!
//! The two directions floor independently, so they are only exact inverses on
//! unit-aligned input. `to_logical` of a pixel halfway through a cell returns
//! that cell, and `to_pixels` of the cell returns its corner, not the original
//! pixel. Block positions snap to the unit grid through exactly this behavior.

use crate::error::{FlowchartError, Result};

/// Pixel dimensions of the visible canvas area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Creates a viewport, rejecting zero-sized areas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FlowchartError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel center of the viewport, where the logical origin lands.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Stateless translator for one viewport size and unit size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translator {
    viewport: Viewport,
    unit_size: f32,
}

impl Translator {
    /// Creates a translator. `unit_size` is the number of pixels per logical unit.
    pub fn new(viewport: Viewport, unit_size: f32) -> Self {
        Self {
            viewport,
            unit_size,
        }
    }

    /// The viewport this translator was built for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixels per logical unit.
    pub fn unit_size(&self) -> f32 {
        self.unit_size
    }

    /// Converts flowchart coordinates into canvas-relative pixels.
    pub fn to_pixels(&self, x: i32, y: i32) -> (f32, f32) {
        let (cx, cy) = self.viewport.center();
        (
            cx + self.units_to_pixels(x),
            cy + self.units_to_pixels(y),
        )
    }

    /// Converts canvas-relative pixels into flowchart coordinates.
    pub fn to_logical(&self, px: f32, py: f32) -> (i32, i32) {
        let (cx, cy) = self.viewport.center();
        (
            self.pixels_to_units(px) - self.pixels_to_units(cx),
            self.pixels_to_units(py) - self.pixels_to_units(cy),
        )
    }

    /// Length of `units` logical units in pixels.
    pub fn units_to_pixels(&self, units: i32) -> f32 {
        units as f32 * self.unit_size
    }

    /// Whole units covered by a pixel length, floored.
    pub fn pixels_to_units(&self, pixels: f32) -> i32 {
        (pixels / self.unit_size).floor() as i32
    }
}
