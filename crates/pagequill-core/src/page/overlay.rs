//! Region-selection overlay state machine.
//!
//! `Idle -> Active -> Dragging -> Idle`. The overlay is a full-viewport
//! interaction layer; while it exists the page sees only pointer and
//! Escape events. Teardown is one idempotent routine shared by every exit
//! path.

use pagequill_protocols::geometry::{CaptureArea, Point};

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;

/// Drags smaller than this in either dimension are accidental clicks.
pub const MIN_REGION_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum OverlayState {
    Idle,
    Active,
    Dragging { origin: Point, current: Point },
}

/// The live selection rectangle, for rendering while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Interactive region-selection overlay.
#[derive(Debug)]
pub struct CaptureOverlay {
    state: OverlayState,
}

impl Default for CaptureOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureOverlay {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Idle,
        }
    }

    /// Bring up the interaction layer. No-op while one already exists;
    /// returns whether the layer was newly created.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = OverlayState::Active;
        true
    }

    /// Whether the interaction layer currently exists.
    pub fn is_active(&self) -> bool {
        self.state != OverlayState::Idle
    }

    /// Begin a drag. Ignored unless the overlay is up and idle.
    pub fn pointer_down(&mut self, point: Point) {
        if self.state == OverlayState::Active {
            self.state = OverlayState::Dragging {
                origin: point,
                current: point,
            };
        }
    }

    /// Track pointer movement; returns the rectangle to render, normalized
    /// over min/max regardless of drag direction.
    pub fn pointer_move(&mut self, point: Point) -> Option<DragRect> {
        match self.state {
            OverlayState::Dragging { origin, .. } => {
                self.state = OverlayState::Dragging {
                    origin,
                    current: point,
                };
                Some(DragRect {
                    x: origin.x.min(point.x),
                    y: origin.y.min(point.y),
                    width: (point.x - origin.x).abs(),
                    height: (point.y - origin.y).abs(),
                })
            }
            _ => None,
        }
    }

    /// Finish a drag: tear down, then return the selected area unless
    /// either dimension is below [`MIN_REGION_PX`]. Ignored when no drag is
    /// in progress.
    pub fn pointer_up(&mut self, point: Point, device_pixel_ratio: f64) -> Option<CaptureArea> {
        let OverlayState::Dragging { origin, .. } = self.state else {
            return None;
        };
        self.teardown();

        let area = CaptureArea::from_drag(origin, point, device_pixel_ratio);
        if area.width < MIN_REGION_PX || area.height < MIN_REGION_PX {
            return None;
        }
        Some(area)
    }

    /// Escape: tear down unconditionally, discarding any in-progress drag.
    pub fn cancel(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.state = OverlayState::Idle;
    }
}
