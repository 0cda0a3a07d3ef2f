//! Core types for the signature surface.
//!
//! Geometry in surface-local logical units, surface dimensions, and the
//! stroke rendering parameters shared by every raster implementation.

use crate::constants::{STROKE_COLOR, STROKE_WIDTH};
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry
// ============================================================================

/// A point in surface-local coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Point = Point::new(0.0, 0.0);
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// On-screen placement of the surface, in viewport coordinates.
///
/// Touch input arrives viewport-absolute and is mapped through this rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner of the surface
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Pixel dimensions of a raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }
}

// ============================================================================
// Stroke Style
// ============================================================================

/// Straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::from_array(STROKE_COLOR);

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Rendering parameters applied to every committed segment.
///
/// Caps and joins are always round. Chained segments are stroked as one
/// polyline, so consecutive segments meet in a round join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Line width in logical units
    pub width: f32,
    pub color: Rgba,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: STROKE_WIDTH,
            color: Rgba::BLACK,
        }
    }
}

impl StrokeStyle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}
