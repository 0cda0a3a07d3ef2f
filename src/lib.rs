//! Freehand signature capture.
//!
//! A [`SignatureSurface`] turns pointer and touch input into a composited
//! raster, exports it as a PNG data URI, and can re-display a previously
//! exported value (optionally read-only). It survives container resizes by
//! snapshotting and recompositing its raster.
//!
//! The surface is headless: pixels live behind the [`RasterBuffer`]
//! capability ([`PixelBuffer`] is the software implementation), resize
//! notifications come from a [`Viewport`] subscription, and decoding runs as
//! a cancellable [`DecodeTask`].

pub mod constants;
pub mod controls;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod input;
pub mod logging;
pub mod perf;
pub mod raster;
pub mod replay;
pub mod settings;
pub mod surface;
pub mod types;
pub mod viewport;

pub use controls::{ControlAction, SurfaceControls};
pub use decode::DecodeTask;
pub use encoding::EncodedRaster;
pub use error::{SignatureError, SignatureResult};
pub use input::{EventResponse, InputEvent, TouchPoint};
pub use raster::{PixelBuffer, RasterBuffer};
pub use settings::SignatureSettings;
pub use surface::{SignatureSurface, SurfaceProps};
pub use types::{Point, Rgba, StrokeStyle, SurfaceRect, SurfaceSize};
pub use viewport::{ContainerResize, ResizeSubscription, Viewport};
