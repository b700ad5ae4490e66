//! uvmask-io - Image decoding and encoding for the uvmask engine
//!
//! Decodes artwork and textures into top-down RGBA
//! [`RasterBuffer`](uvmask_core::RasterBuffer)s and exports masks.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | TGA (types 2, 3, 10) | yes | yes (32 bpp, raw or RLE) | always |
//! | PNG | yes | yes (RGBA) | `png-format` (default) |
//!
//! All decoding works on byte slices already in memory; the path helpers
//! are thin wrappers that read the whole file first.

mod error;
pub mod format;
pub mod header;
#[cfg(feature = "png-format")]
pub mod png;
pub mod tga;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use header::{ImageHeader, read_image_header, read_image_header_mem};
pub use tga::{TgaHeader, TgaImageType, TgaWriteOptions, read_tga, read_tga_header, write_tga};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use uvmask_core::RasterBuffer;

/// Decode an image from memory, detecting its format.
pub fn read_image_mem(data: &[u8]) -> IoResult<RasterBuffer> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

/// Decode an image from memory as a known format.
pub fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<RasterBuffer> {
    match format {
        ImageFormat::Tga => tga::read_tga(data),

        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),

        #[cfg(not(feature = "png-format"))]
        ImageFormat::Png => Err(IoError::UnsupportedFormat(
            "PNG support not enabled".to_string(),
        )),
    }
}

/// Read an image file.
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RasterBuffer> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let raster = read_image_mem(&data)?;
    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "read image"
    );
    Ok(raster)
}

/// Encode an image to a writer.
pub fn write_image_to<W: Write>(
    raster: &RasterBuffer,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        ImageFormat::Tga => tga::write_tga(raster, writer, &TgaWriteOptions::default()),

        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),

        #[cfg(not(feature = "png-format"))]
        ImageFormat::Png => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(
                "PNG support not enabled".to_string(),
            ))
        }
    }
}

/// Encode an image to a byte vector.
pub fn write_image_mem(raster: &RasterBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_image_to(raster, &mut out, format)?;
    Ok(out)
}

/// Write an image file.
pub fn write_image<P: AsRef<Path>>(
    raster: &RasterBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}
