//! Coordinate conversion utilities for surface input.
//!
//! Pointer events already arrive in surface-local space; touch events arrive
//! viewport-absolute and must be shifted by the surface's on-screen origin.

use super::event::TouchPoint;
use crate::types::{Point, SurfaceRect};

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Pointer offset coordinates are used as-is
    #[inline]
    pub fn pointer_to_local(offset: Point) -> Point {
        offset
    }

    /// Convert a viewport-absolute touch to surface-local coordinates
    #[inline]
    pub fn touch_to_local(touch: TouchPoint, bounds: &SurfaceRect) -> Point {
        let origin = bounds.origin();
        Point::new(touch.client_x - origin.x, touch.client_y - origin.y)
    }

    /// Local position of the tracked (first) touch, if there is one.
    /// Additional simultaneous touches are ignored.
    #[inline]
    pub fn primary_touch(touches: &[TouchPoint], bounds: &SurfaceRect) -> Option<Point> {
        touches
            .first()
            .map(|touch| Self::touch_to_local(*touch, bounds))
    }
}
