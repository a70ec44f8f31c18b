//! Image validation and decoding for uploaded photos.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

/// Allowed image formats for fridge photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for uploads (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Validate image data: check format is allowed and detect content type.
///
/// Returns the content type on success (e.g., "image/jpeg").
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

/// Decode image data into pixels for the detector.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, String> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?
        .decode()
        .map_err(|e| format!("Failed to decode image: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::new_rgb8(4, 4);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_validate_png() {
        let data = png_bytes();
        assert_eq!(validate_image(&data).unwrap(), "image/png");
    }

    #[test]
    fn test_validate_invalid_format() {
        let invalid_data = b"not an image";
        let result = validate_image(invalid_data);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_png() {
        let data = png_bytes();
        let img = decode_image(&data).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(b"\x00\x01\x02\x03").is_err());
    }
}
