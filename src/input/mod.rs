//! Pointer and touch input handling for the signature surface.
//!
//! ## Architecture
//!
//! Platform events are normalized into [`InputEvent`], mapped into
//! surface-local coordinates by [`CoordinateConverter`], and fed through an
//! explicit stroke state machine ([`StrokeState`]) that is either idle or
//! tracking one active stroke.
//!
//! ## Modules
//!
//! - `event` - Normalized input events and the handler response
//! - `state` - Stroke state machine
//! - `coords` - Pointer/touch coordinate conversion

pub mod coords;
mod event;
mod state;

pub use coords::CoordinateConverter;
pub use event::{EventResponse, InputEvent, TouchPoint};
pub use state::StrokeState;
