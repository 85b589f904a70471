//! Shared application-wide constants.
//! Centralizes tweakable values used by the canvas, blocks, and ports.

// Canvas surface
/// Width of the pannable canvas surface in pixels.
pub const CANVAS_WIDTH: f32 = 100_000.0;
/// Height of the pannable canvas surface in pixels.
pub const CANVAS_HEIGHT: f32 = 100_000.0;
/// Pixels per logical unit at a scale of 1.0.
pub const CANVAS_UNIT: f32 = 25.0;

// Block defaults (in logical units)
/// Default block width.
pub const BLOCK_DEFAULT_WIDTH: u32 = 6;
/// Default block height.
pub const BLOCK_DEFAULT_HEIGHT: u32 = 4;
/// Default block X-coordinate.
pub const BLOCK_DEFAULT_X: i32 = 0;
/// Default block Y-coordinate.
pub const BLOCK_DEFAULT_Y: i32 = 0;

// Ports
/// Side length of a rendered port square, in pixels at a scale of 1.0.
pub const PORT_SIZE: f32 = 25.0;

// Canvas interactions
/// A single pointer delta larger than this many viewports is treated as a spurious jump.
pub const PAN_JUMP_GUARD_FACTOR: f32 = 2.0;
/// Smallest allowed canvas scale.
pub const MIN_SCALE: f32 = 0.25;
/// Largest allowed canvas scale.
pub const MAX_SCALE: f32 = 5.0;
/// Scale change applied per scroll-wheel notch.
pub const SCALE_STEP: f32 = 0.025;

// Startup
/// Viewport size assumed before the first frame reports the real one.
pub const INITIAL_VIEWPORT: (u32, u32) = (1200, 800);
