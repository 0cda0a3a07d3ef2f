//! Error types for signature operations
//!
//! Provides unified error handling for encoding, decoding and settings I/O.
//! The surface itself never hands these to its host: they are absorbed and
//! logged at the operation boundary.

use thiserror::Error;

/// Errors that can occur while producing or consuming a signature raster
#[derive(Error, Debug)]
pub enum SignatureError {
    /// The raster buffer has not been allocated (surface not mounted)
    #[error("Drawing surface is not available")]
    SurfaceUnavailable,

    /// The string is not a well-formed base64 data URI
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The data URI declares a media type other than PNG
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Base64 payload could not be decoded
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// PNG encode or decode failure
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// The raster has zero width or height
    #[error("Raster has no pixels")]
    EmptyRaster,

    /// The decode was dropped before it produced a result
    #[error("Decode cancelled")]
    DecodeCancelled,

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings (de)serialization failure
    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type alias for signature operations
pub type SignatureResult<T> = Result<T, SignatureError>;
