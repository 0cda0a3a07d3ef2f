//! Normalized input events.

use crate::types::{Point, SurfaceRect};
use serde::{Deserialize, Serialize};

/// One active touch, in viewport-absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

impl TouchPoint {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// An input event delivered to the surface.
///
/// Pointer positions are already surface-local (offset coordinates). Touch
/// events carry every active touch plus the surface's on-screen rect at the
/// time of the event; only the first touch is ever used.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { offset: Point },
    PointerMove { offset: Point },
    PointerUp,
    /// Pointer left the surface while (possibly) drawing
    PointerLeave,
    TouchStart { touches: Vec<TouchPoint>, bounds: SurfaceRect },
    TouchMove { touches: Vec<TouchPoint>, bounds: SurfaceRect },
    TouchEnd,
    TouchCancel,
    /// Anything else the platform delivers (wheel, key, hover...)
    Other,
}

/// What the handler asks of the platform after processing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the platform default (scroll/pan) for this event
    pub prevent_default: bool,
}

impl EventResponse {
    pub const IGNORED: EventResponse = EventResponse {
        prevent_default: false,
    };

    pub const CAPTURED: EventResponse = EventResponse {
        prevent_default: true,
    };
}
