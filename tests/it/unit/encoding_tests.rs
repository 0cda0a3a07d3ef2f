//! Unit tests for the data URI encoding.

use image::RgbaImage;
use signature_surface::constants::PNG_DATA_URI_PREFIX;
use signature_surface::encoding::EncodedRaster;
use signature_surface::error::SignatureError;

fn sample() -> RgbaImage {
    let mut image = RgbaImage::new(16, 8);
    image.put_pixel(3, 4, image::Rgba([0, 0, 0, 255]));
    image.put_pixel(15, 7, image::Rgba([12, 34, 56, 78]));
    image
}

#[test]
fn test_encoded_value_is_self_describing() {
    let encoded = EncodedRaster::from_image(&sample()).unwrap();
    assert!(encoded.as_str().starts_with(PNG_DATA_URI_PREFIX));
    assert_eq!(encoded.payload().len() + PNG_DATA_URI_PREFIX.len(), encoded.as_str().len());
}

#[test]
fn test_encoded_value_reparses_and_decodes() {
    let image = sample();
    let encoded = EncodedRaster::from_image(&image).unwrap();

    let reparsed: EncodedRaster = encoded.as_str().parse().unwrap();
    assert_eq!(reparsed, encoded);
    assert_eq!(reparsed.decode().unwrap(), image);
}

#[test]
fn test_png_bytes_carry_png_signature() {
    let encoded = EncodedRaster::from_image(&sample()).unwrap();
    let bytes = encoded.png_bytes().unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_serde_uses_plain_string() {
    let encoded = EncodedRaster::from_image(&sample()).unwrap();
    let json = serde_json::to_string(&encoded).unwrap();
    assert_eq!(json, format!("\"{}\"", encoded.as_str()));

    let back: EncodedRaster = serde_json::from_str(&json).unwrap();
    assert_eq!(back, encoded);
}

#[test]
fn test_serde_rejects_invalid_uri() {
    let result: Result<EncodedRaster, _> = serde_json::from_str("\"data:text/plain;base64,AAAA\"");
    assert!(result.is_err());
}

#[test]
fn test_garbage_payload_fails_at_decode() {
    let encoded = EncodedRaster::parse("data:image/png;base64,AAAA").unwrap();
    assert!(matches!(encoded.decode(), Err(SignatureError::Image(_))));
}

#[test]
fn test_error_messages() {
    let err = EncodedRaster::parse("data:image/gif;base64,AAAA").unwrap_err();
    assert_eq!(err.to_string(), "Unsupported media type: image/gif");
    assert_eq!(SignatureError::SurfaceUnavailable.to_string(), "Drawing surface is not available");
}
