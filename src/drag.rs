//! Per-block drag controller.
//!
//! A drag starts when the pointer goes down on the block's own surface. The
//! pointer's offset from the block's top-left corner is captured in whole units at
//! that moment and preserved for the rest of the drag, so the block follows the
//! pointer without its corner jumping under it.

use crate::coords::Translator;
use crate::types::{Cursor, Transform};

/// Drag state of a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragController {
    dragging: bool,
    pickup_offset_x: i32,
    pickup_offset_y: i32,
}

impl DragController {
    /// Whether the block is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Offset between the block's corner and the pointer, in units, captured at pickup.
    pub fn pickup_offset(&self) -> (i32, i32) {
        (self.pickup_offset_x, self.pickup_offset_y)
    }

    /// Cursor to show over the block.
    pub fn cursor(&self) -> Cursor {
        if self.dragging {
            Cursor::Move
        } else {
            Cursor::Default
        }
    }

    /// Picks the block up. `pointer` is canvas-relative, in pixels.
    pub fn begin(&mut self, pointer: (f32, f32), transform: &Transform, translator: &Translator) {
        let (corner_x, corner_y) = translator.to_pixels(transform.x(), transform.y());

        self.dragging = true;
        self.pickup_offset_x = translator.pixels_to_units(pointer.0 - corner_x);
        self.pickup_offset_y = translator.pixels_to_units(pointer.1 - corner_y);
    }

    /// Computes where the block should move for a canvas-relative pointer position.
    ///
    /// Returns `None` when not dragging or when the block already sits at the
    /// computed position.
    pub fn track(
        &self,
        pointer: (f32, f32),
        transform: &Transform,
        translator: &Translator,
    ) -> Option<(i32, i32)> {
        if !self.dragging {
            return None;
        }

        let (pointer_x, pointer_y) = translator.to_logical(pointer.0, pointer.1);
        let target = (
            pointer_x - self.pickup_offset_x,
            pointer_y - self.pickup_offset_y,
        );

        (target != transform.position()).then_some(target)
    }

    /// Drops the block. Returns whether a drag was active.
    pub fn release(&mut self) -> bool {
        std::mem::take(&mut self.dragging)
    }
}
