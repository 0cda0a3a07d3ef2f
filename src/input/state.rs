//! Stroke state machine.
//!
//! A single explicit state instead of an `is_drawing` flag next to a
//! separately tracked last point.
//!
//! ## State Transitions
//!
//! ```text
//! Idle   -> Active   (begin: pointer down / touch start)
//! Active -> Active   (continue: pointer move / touch move, records last point)
//! Active -> Idle     (end: pointer up, pointer leave, touch end/cancel)
//! Idle   -> Idle     (end with no active stroke is a no-op)
//! ```

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No pointer or touch engaged
    #[default]
    Idle,

    /// A stroke is in progress
    Active {
        /// Last committed point; the next segment starts here
        last: Point,
        /// Whether the stroke was started by touch input
        touch: bool,
    },
}

impl StrokeState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// True if the active stroke was started by touch input
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Active { touch: true, .. })
    }

    /// Get the last recorded point, if a stroke is active
    pub fn last_point(&self) -> Option<Point> {
        match self {
            Self::Active { last, .. } => Some(*last),
            Self::Idle => None,
        }
    }

    /// Open a stroke at `origin`, replacing any stroke in progress
    pub fn begin(&mut self, origin: Point, touch: bool) {
        *self = Self::Active {
            last: origin,
            touch,
        };
    }

    /// Advance the active stroke to `to`, returning the segment to commit.
    /// Returns `None` when idle.
    pub fn advance(&mut self, to: Point) -> Option<(Point, Point)> {
        match self {
            Self::Active { last, .. } => {
                let from = *last;
                *last = to;
                Some((from, to))
            }
            Self::Idle => None,
        }
    }

    /// Close the stroke. Returns true if a stroke was actually active.
    pub fn end(&mut self) -> bool {
        let was_active = self.is_active();
        *self = Self::Idle;
        was_active
    }
}
