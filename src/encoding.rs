//! Portable raster encoding.
//!
//! A signature leaves the surface as a PNG wrapped in a base64 data URI
//! (`data:image/png;base64,...`). The same string is accepted back as an
//! initial value, which is the round-trip contract between the surface and
//! whatever host stores it.

use crate::constants::{PNG_DATA_URI_PREFIX, PNG_MEDIA_TYPE};
use crate::error::{SignatureError, SignatureResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

/// A validated PNG data URI.
///
/// Construction checks the scheme, media type and base64 marker; the payload
/// itself is only inspected when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedRaster {
    uri: String,
    /// Byte offset of the base64 payload inside `uri`
    payload_start: usize,
}

impl EncodedRaster {
    /// Validate a data URI string.
    pub fn parse(uri: impl Into<String>) -> SignatureResult<Self> {
        let uri = uri.into();
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| SignatureError::InvalidDataUri("missing `data:` scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| SignatureError::InvalidDataUri("missing payload separator".into()))?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default().trim();
        if !media_type.eq_ignore_ascii_case(PNG_MEDIA_TYPE) {
            return Err(SignatureError::UnsupportedMediaType(media_type.to_string()));
        }
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(SignatureError::InvalidDataUri(
                "payload is not base64-encoded".into(),
            ));
        }
        if payload.trim().is_empty() {
            return Err(SignatureError::InvalidDataUri("empty payload".into()));
        }

        let payload_start = uri.len() - payload.len();
        Ok(Self { uri, payload_start })
    }

    /// Encode an RGBA raster as a PNG data URI.
    pub fn from_image(image: &RgbaImage) -> SignatureResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(SignatureError::EmptyRaster);
        }

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let uri = format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&png));
        Ok(Self {
            uri,
            payload_start: PNG_DATA_URI_PREFIX.len(),
        })
    }

    /// The base64 payload, without the data URI header
    pub fn payload(&self) -> &str {
        &self.uri[self.payload_start..]
    }

    /// Raw PNG bytes carried by this URI
    pub fn png_bytes(&self) -> SignatureResult<Vec<u8>> {
        Ok(STANDARD.decode(self.payload().trim())?)
    }

    /// Decode the payload into an RGBA raster.
    pub fn decode(&self) -> SignatureResult<RgbaImage> {
        let bytes = self.png_bytes()?;
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)?;
        Ok(image.into_rgba8())
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn into_string(self) -> String {
        self.uri
    }
}

impl fmt::Display for EncodedRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl FromStr for EncodedRaster {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EncodedRaster {
    type Error = SignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<EncodedRaster> for String {
    fn from(raster: EncodedRaster) -> Self {
        raster.uri
    }
}

impl AsRef<str> for EncodedRaster {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
