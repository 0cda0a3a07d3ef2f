//! Raster buffer capability.
//!
//! The surface never touches pixels directly. Everything it does to its
//! drawing goes through [`RasterBuffer`], which keeps the stroke logic
//! testable against a fake buffer and lets a host swap in a different
//! backend (a GPU texture, a platform canvas) without touching the surface.
//!
//! ## Modules
//!
//! - `pixel` - Software implementation backed by a `tiny_skia::Pixmap`

mod pixel;

pub use pixel::PixelBuffer;

use crate::encoding::EncodedRaster;
use crate::error::SignatureResult;
use crate::types::{Point, StrokeStyle, SurfaceSize};
use image::RgbaImage;

/// A mutable pixel grid that can be serialized to an encoded raster.
pub trait RasterBuffer {
    /// Allocate a blank buffer of the given size.
    ///
    /// Fails with `SurfaceUnavailable` when no buffer of that size can exist.
    fn allocate(size: SurfaceSize) -> SignatureResult<Self>
    where
        Self: Sized;

    /// Current pixel dimensions
    fn size(&self) -> SurfaceSize;

    /// Draw one line segment from `from` to `to` and composite it immediately.
    fn commit_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Erase every pixel to transparent.
    fn clear(&mut self);

    /// Encode the current contents as a PNG data URI.
    fn snapshot_encode(&self) -> SignatureResult<EncodedRaster>;

    /// Composite a decoded raster with its top-left corner at `at`.
    ///
    /// Pixels falling outside the buffer are dropped; nothing is rescaled.
    fn composite_decoded(&mut self, raster: &RgbaImage, at: Point);
}
