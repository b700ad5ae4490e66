//! Image header reading
//!
//! Provides dimensions and layout without decoding pixel data, so callers
//! can size textures and masks before committing to a full decode.

use crate::{ImageFormat, IoError, IoResult, detect_format_from_bytes};
use std::path::Path;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per pixel as stored
    pub depth: u32,
    /// Whether the stored pixels carry alpha
    pub has_alpha: bool,
    /// Whether the pixel data is run-length encoded (TGA type 10)
    pub compressed: bool,
    /// Detected image format
    pub format: ImageFormat,
}

/// Read image metadata from a file path
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let data = std::fs::read(path)?;
    read_image_header_mem(&data)
}

/// Read image metadata from bytes
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Tga => tga_header(data),
        ImageFormat::Png => png_header(data),
    }
}

fn tga_header(data: &[u8]) -> IoResult<ImageHeader> {
    let h = crate::tga::read_tga_header(data)?;
    Ok(ImageHeader {
        width: h.width as u32,
        height: h.height as u32,
        depth: h.pixel_depth as u32,
        has_alpha: h.pixel_depth == 32 || h.pixel_depth == 16,
        compressed: h.image_type() == Some(crate::tga::TgaImageType::RleTrueColor),
        format: ImageFormat::Tga,
    })
}

#[cfg(feature = "png-format")]
fn png_header(data: &[u8]) -> IoResult<ImageHeader> {
    use png::ColorType;

    let decoder = png::Decoder::new(std::io::Cursor::new(data));
    let reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG header error: {}", e)))?;
    let info = reader.info();
    let samples = match info.color_type {
        ColorType::Grayscale | ColorType::Indexed => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };
    Ok(ImageHeader {
        width: info.width,
        height: info.height,
        depth: samples * info.bit_depth as u32,
        has_alpha: matches!(info.color_type, ColorType::GrayscaleAlpha | ColorType::Rgba)
            || info.trns.is_some(),
        compressed: true,
        format: ImageFormat::Png,
    })
}

#[cfg(not(feature = "png-format"))]
fn png_header(_data: &[u8]) -> IoResult<ImageHeader> {
    Err(IoError::UnsupportedFormat(
        "PNG support not enabled".to_string(),
    ))
}
