//! Error types for the flowchart builder core.

use crate::types::{BlockId, BlockSide};
use thiserror::Error;

/// Errors raised by canvas, block, and port operations.
#[derive(Debug, Error)]
pub enum FlowchartError {
    /// The backing visual element could not be resolved at mount time.
    #[error("backing element `{0}` is missing or is not a canvas")]
    MissingElement(String),

    /// The viewport reported a size the translator cannot work with.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport {
        /// Reported width in pixels
        width: u32,
        /// Reported height in pixels
        height: u32,
    },

    /// Block dimensions must be at least one unit on each axis.
    #[error("invalid block dimensions {width}x{height} (both must be >= 1)")]
    InvalidDimensions {
        /// Requested width in units
        width: u32,
        /// Requested height in units
        height: u32,
    },

    /// A port position lies outside the side it was placed on.
    #[error("port position {position} is outside the {side:?} side (0..={limit})")]
    PortOutOfBounds {
        /// Side the port was placed on
        side: BlockSide,
        /// Requested offset along the side
        position: u32,
        /// Largest valid offset for that side
        limit: u32,
    },

    /// No block with this identifier lives on the canvas.
    #[error("unknown block {0}")]
    UnknownBlock(BlockId),

    /// The block exists but has no port at this index.
    #[error("block {block} has no port at index {index}")]
    UnknownPort {
        /// Owning block
        block: BlockId,
        /// Requested port index
        index: usize,
    },

    /// A port was resolved against a block that does not own it.
    #[error("port owned by {port_owner} was resolved against block {block}")]
    PortOwnerMismatch {
        /// Block recorded on the port
        port_owner: BlockId,
        /// Block the port was resolved against
        block: BlockId,
    },

    /// Scale factors must be finite and positive.
    #[error("invalid canvas scale {0}")]
    InvalidScale(f32),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FlowchartError>;
