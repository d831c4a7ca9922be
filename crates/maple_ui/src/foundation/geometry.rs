//! Geometry value types for window extents and screen positions

use serde::{Deserialize, Serialize};

/// A window extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A position in screen coordinates, relative to the top-left corner of the
/// primary monitor's work area. Negative values are valid on multi-monitor
/// setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal screen coordinate
    pub x: i32,
    /// Vertical screen coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
