//! PNG image format support
//!
//! Artwork supplied as PNG is decoded to the same top-down RGBA raster as
//! TGA input, and masks are exported as 8-bit RGBA PNG.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use uvmask_core::RasterBuffer;

/// Read a PNG image as RGBA.
///
/// Palette, low-bit-depth and 16-bit images are expanded to 8 bits per
/// channel; grayscale is replicated into R, G and B; missing alpha is 255.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RasterBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG output depth {:?} after expansion",
            bit_depth
        )));
    }

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        for px in row.chunks_exact(samples) {
            let rgba = match samples {
                1 => [px[0], px[0], px[0], 255],
                2 => [px[0], px[0], px[0], px[1]],
                3 => [px[0], px[1], px[2], 255],
                _ => [px[0], px[1], px[2], px[3]],
            };
            pixels.extend_from_slice(&rgba);
        }
    }

    Ok(RasterBuffer::from_rgba(width, height, pixels)?)
}

/// Write a raster as an 8-bit RGBA PNG.
pub fn write_png<W: Write>(raster: &RasterBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.pixels())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use uvmask_core::Color;

    #[test]
    fn test_png_keeps_alpha() {
        let mut raster = RasterBuffer::new(3, 2).unwrap();
        raster.set_rgba(0, 0, [255, 0, 0, 255]).unwrap();
        raster.set_rgba(2, 1, [0, 0, 255, 64]).unwrap();

        let mut bytes = Vec::new();
        write_png(&raster, &mut bytes).unwrap();
        let back = read_png(Cursor::new(bytes)).unwrap();

        assert_eq!(back, raster);
    }

    #[test]
    fn test_png_grayscale_expands() {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[10, 200]).unwrap();
        }
        let raster = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(raster.get_rgba(1, 0), Some([200, 200, 200, 255]));
        assert_eq!(
            raster.get_rgba(0, 0),
            Some(Color::rgb(10, 10, 10).to_rgba())
        );
    }
}
