//! Ports: fixed anchors on a block's perimeter.
//!
//! A port only stores which side it sits on and how far along that side. Its
//! pixel offset is derived from the owning block's current size every time it is
//! asked for, so resizing a block moves its Right and Bottom ports with it.

use crate::block::Block;
use crate::error::{FlowchartError, Result};
use crate::types::{BlockId, BlockSide, Color, PortDirection, Transform};

/// A directional anchor on one side of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    direction: PortDirection,
    side: BlockSide,
    side_position: u32,
    color: Option<Color>,
    owner: BlockId,
}

impl Port {
    /// Creates an uncolored port for `owner`. Bounds are checked when the port is
    /// attached to its block.
    pub fn new(owner: BlockId, direction: PortDirection, side: BlockSide, side_position: u32) -> Self {
        Self {
            direction,
            side,
            side_position,
            color: None,
            owner,
        }
    }

    /// Returns a copy painted with `color`.
    pub fn with_color(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    /// Whether the port is an inlet or an outlet.
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// The side the port sits on.
    pub fn side(&self) -> BlockSide {
        self.side
    }

    /// Offset in units along the side, from the side's origin corner.
    pub fn side_position(&self) -> u32 {
        self.side_position
    }

    /// Optional fill color.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The block this port belongs to.
    pub fn owner(&self) -> BlockId {
        self.owner
    }

    /// Largest valid `side_position` on `side` for a block of this footprint.
    ///
    /// A 6 x 4 block has positions `0..=6` on Top/Bottom and `0..=4` on Left/Right.
    pub fn side_limit(side: BlockSide, transform: &Transform) -> u32 {
        match side {
            BlockSide::Top | BlockSide::Bottom => transform.width(),
            BlockSide::Left | BlockSide::Right => transform.height(),
        }
    }

    /// Checks that the port fits on a block with this footprint.
    pub fn validate(&self, transform: &Transform) -> Result<()> {
        let limit = Self::side_limit(self.side, transform);
        if self.side_position > limit {
            return Err(FlowchartError::PortOutOfBounds {
                side: self.side,
                position: self.side_position,
                limit,
            });
        }
        Ok(())
    }

    /// Pulls the port back onto its side after the block shrank.
    pub(crate) fn clamp_to(&mut self, transform: &Transform) {
        let limit = Self::side_limit(self.side, transform);
        if self.side_position > limit {
            log::debug!(
                "clamping {:?} port of block {} from {} to {}",
                self.side,
                self.owner,
                self.side_position,
                limit
            );
            self.side_position = limit;
        }
    }

    /// Pixel offset of the port from its block's top-left corner.
    pub fn pixel_offset(&self, block: &Block, unit_size: f32) -> Result<(f32, f32)> {
        if block.id() != self.owner {
            return Err(FlowchartError::PortOwnerMismatch {
                port_owner: self.owner,
                block: block.id(),
            });
        }
        Ok(self.offset_within(
            block.actual_width(unit_size),
            block.actual_height(unit_size),
            unit_size,
        ))
    }

    pub(crate) fn offset_within(&self, actual_width: f32, actual_height: f32, unit_size: f32) -> (f32, f32) {
        let along = self.side_position as f32 * unit_size;
        match self.side {
            BlockSide::Top => (along, 0.0),
            BlockSide::Bottom => (along, actual_height),
            BlockSide::Left => (0.0, along),
            BlockSide::Right => (actual_width, along),
        }
    }
}
