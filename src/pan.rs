//! Canvas pan controller.
//!
//! The canvas is never scrolled; it is displaced by `(pan_x, pan_y)` pixels from
//! its resting place, with the logical origin at the viewport center when the pan
//! is zero. Panning follows raw pointer deltas between consecutive samples.

use crate::coords::Viewport;

/// Result of feeding one pointer sample to the pan controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanUpdate {
    /// The canvas is not being dragged
    Idle,
    /// The sample jumped further than the guard allows and was dropped
    Discarded,
    /// The pan moved by this delta (possibly zero)
    Moved {
        /// Horizontal change in pixels
        dx: f32,
        /// Vertical change in pixels
        dy: f32,
    },
}

/// Tracks background drags and the resulting canvas displacement and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PanController {
    dragging: bool,
    scale: f32,
    last_pointer: (f32, f32),
    pan_x: f32,
    pan_y: f32,
    jump_guard_factor: f32,
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(crate::constants::PAN_JUMP_GUARD_FACTOR)
    }
}

impl PanController {
    /// Creates a resting controller: not dragging, scale 1, pan `(0, 0)`.
    pub fn new(jump_guard_factor: f32) -> Self {
        Self {
            dragging: false,
            scale: 1.0,
            last_pointer: (0.0, 0.0),
            pan_x: 0.0,
            pan_y: 0.0,
            jump_guard_factor,
        }
    }

    /// Whether the canvas background is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current scale multiplier.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current displacement of the canvas in pixels.
    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// The canvas `data-x`/`data-y` attributes: the pan with its sign inverted.
    pub fn data_attributes(&self) -> (f32, f32) {
        (-self.pan_x, -self.pan_y)
    }

    /// Starts a background drag with `pointer` as the reference sample.
    pub fn begin(&mut self, pointer: (f32, f32)) {
        self.dragging = true;
        self.last_pointer = pointer;
        log::debug!("canvas pan started at ({}, {})", pointer.0, pointer.1);
    }

    /// Feeds a pointer sample.
    ///
    /// A delta exceeding the guard factor times the viewport on either axis is
    /// dropped without moving the reference sample, so panning resumes from the
    /// last good position.
    pub fn drag_to(&mut self, pointer: (f32, f32), viewport: Viewport) -> PanUpdate {
        if !self.dragging {
            return PanUpdate::Idle;
        }

        let dx = pointer.0 - self.last_pointer.0;
        let dy = pointer.1 - self.last_pointer.1;

        let max_dx = viewport.width() as f32 * self.jump_guard_factor;
        let max_dy = viewport.height() as f32 * self.jump_guard_factor;
        if dx.abs() > max_dx || dy.abs() > max_dy {
            log::warn!("discarding spurious pointer jump of ({dx}, {dy}) while panning");
            return PanUpdate::Discarded;
        }

        self.pan_x += dx;
        self.pan_y += dy;
        self.last_pointer = pointer;
        log::trace!("canvas pan is now ({}, {})", self.pan_x, self.pan_y);

        PanUpdate::Moved { dx, dy }
    }

    /// Ends a background drag. Returns whether one was active.
    pub fn end(&mut self) -> bool {
        let was_dragging = std::mem::take(&mut self.dragging);
        if was_dragging {
            log::debug!("canvas pan ended at ({}, {})", self.pan_x, self.pan_y);
        }
        was_dragging
    }

    /// Sets the pan absolutely. Axes passed as `None` keep their value.
    pub fn update_location(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.pan_x = x;
        }
        if let Some(y) = y {
            self.pan_y = y;
        }
    }

    /// Replaces the scale. The caller validates and clamps it.
    pub fn change_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800, 600).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let pan = PanController::default();
        assert!(!pan.is_dragging());
        assert_eq!(pan.scale(), 1.0);
        assert_eq!(pan.pan(), (0.0, 0.0));
    }

    #[test]
    fn test_moves_ignored_when_not_dragging() {
        let mut pan = PanController::default();
        assert_eq!(pan.drag_to((50.0, 50.0), viewport()), PanUpdate::Idle);
        assert_eq!(pan.pan(), (0.0, 0.0));
    }

    #[test]
    fn test_deltas_accumulate() {
        let mut pan = PanController::default();
        pan.begin((100.0, 100.0));

        let samples = [(110.0, 95.0), (130.0, 80.0), (125.0, 90.0), (200.0, 300.0)];
        for sample in samples {
            assert!(matches!(pan.drag_to(sample, viewport()), PanUpdate::Moved { .. }));
        }

        assert_eq!(pan.pan(), (100.0, 200.0));
        assert_eq!(pan.data_attributes(), (-100.0, -200.0));
    }

    #[test]
    fn test_spurious_jump_contributes_nothing() {
        let mut pan = PanController::default();
        pan.begin((0.0, 0.0));

        pan.drag_to((10.0, 10.0), viewport());
        // Twice the viewport width is 1600; this sample is beyond it
        assert_eq!(pan.drag_to((1700.0, 10.0), viewport()), PanUpdate::Discarded);
        // Vertical guard is 1200
        assert_eq!(pan.drag_to((10.0, -1300.0), viewport()), PanUpdate::Discarded);
        // Resumes from the last good sample
        pan.drag_to((15.0, 20.0), viewport());

        assert_eq!(pan.pan(), (15.0, 20.0));
    }

    #[test]
    fn test_zero_delta_is_idempotent() {
        let mut pan = PanController::default();
        pan.begin((40.0, 40.0));
        pan.drag_to((50.0, 60.0), viewport());
        let before = pan.clone();

        assert_eq!(
            pan.drag_to((50.0, 60.0), viewport()),
            PanUpdate::Moved { dx: 0.0, dy: 0.0 }
        );
        assert_eq!(pan, before);
    }

    #[test]
    fn test_end_and_update_location() {
        let mut pan = PanController::default();
        pan.begin((0.0, 0.0));
        pan.drag_to((30.0, 40.0), viewport());

        assert!(pan.end());
        assert!(!pan.end());

        pan.update_location(Some(0.0), None);
        assert_eq!(pan.pan(), (0.0, 40.0));
        pan.update_location(None, Some(0.0));
        assert_eq!(pan.pan(), (0.0, 0.0));
    }
}
