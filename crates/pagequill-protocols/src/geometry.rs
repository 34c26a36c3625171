//! Viewport geometry for region capture.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;

/// A point in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A user-selected capture region: a viewport rectangle plus the page's
/// device pixel ratio, which maps it into source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl CaptureArea {
    /// Build a normalized area from a drag, regardless of drag direction.
    pub fn from_drag(origin: Point, end: Point, device_pixel_ratio: f64) -> Self {
        Self {
            x: origin.x.min(end.x),
            y: origin.y.min(end.y),
            width: (end.x - origin.x).abs(),
            height: (end.y - origin.y).abs(),
            device_pixel_ratio,
        }
    }

    /// The region in source-image (device) pixels, rounded outward from zero.
    pub fn to_device_pixels(&self) -> DeviceRect {
        let dpr = if self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        DeviceRect {
            x: (self.x * dpr).round().max(0.0) as u32,
            y: (self.y * dpr).round().max(0.0) as u32,
            width: (self.width * dpr).round().max(0.0) as u32,
            height: (self.height * dpr).round().max(0.0) as u32,
        }
    }
}

/// An integer pixel rectangle in source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DeviceRect {
    /// Clamp this rectangle to fit inside an image of the given dimensions.
    /// Returns `None` when nothing of the rectangle remains in bounds.
    pub fn clamped_to(&self, image_width: u32, image_height: u32) -> Option<DeviceRect> {
        if self.x >= image_width || self.y >= image_height {
            return None;
        }
        let width = self.width.min(image_width - self.x);
        let height = self.height.min(image_height - self.y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(DeviceRect {
            x: self.x,
            y: self.y,
            width,
            height,
        })
    }
}
