//! Conversions between grid space and canvas pixel space.
//!
//! Grid space has its origin in the middle of the canvas and Y growing upwards.
//! Canvas space is the usual pixel space with the origin in the top-left corner
//! and Y growing downwards. Both conversions take the canvas size explicitly so
//! they stay pure; the [`crate::dimensions`] module is where the current size lives.

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use serde::{Deserialize, Serialize};

/// A position in grid space (origin at center, Y up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// Horizontal grid coordinate
    pub x: f32,
    /// Vertical grid coordinate, positive above the origin
    pub y: f32,
}

impl GridPoint {
    /// Creates a grid point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position in canvas pixel space (origin top-left, Y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// Pixels from the left edge
    pub x: f32,
    /// Pixels from the top edge
    pub y: f32,
}

impl CanvasPoint {
    /// Creates a canvas point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of the drawing canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasDimensions {
    /// Creates a dimensions record.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel position of the grid origin. Both halves are floored so that
    /// odd sizes map the origin onto a whole pixel.
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }
}

/// Converts a grid position to canvas pixels.
///
/// # Example
///
/// ```
/// use force_diagram_tool::{grid_to_canvas, CanvasDimensions};
///
/// let p = grid_to_canvas(10.0, 20.0, &CanvasDimensions::new(500.0, 400.0));
/// assert_eq!((p.x, p.y), (260.0, 180.0));
/// ```
pub fn grid_to_canvas(x: f32, y: f32, dims: &CanvasDimensions) -> CanvasPoint {
    let center = dims.center();
    // Canvas Y grows downwards
    CanvasPoint::new(center.x + x, center.y - y)
}

/// Converts a canvas pixel position back to grid space.
pub fn canvas_to_grid(px: f32, py: f32, dims: &CanvasDimensions) -> GridPoint {
    let center = dims.center();
    GridPoint::new(px - center.x, center.y - py)
}
