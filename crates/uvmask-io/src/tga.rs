//! TGA image format support
//!
//! Reads uncompressed true-color (type 2), uncompressed grayscale (type 3)
//! and RLE true-color (type 10) images into top-down RGBA rasters, and
//! writes 32-bpp type 2 or type 10 images.
//!
//! # Layout
//!
//! An 18-byte little-endian header is followed by an optional image ID,
//! an optional color map (skipped; paletted images are not supported),
//! and the pixel data. True-color pixels are stored BGR(A); 16-bpp pixels
//! pack 5 bits per channel with the top bit as a 1-bit alpha. Rows are
//! bottom-up unless descriptor bit 0x20 is set.

use crate::{IoError, IoResult};
use std::io::Write;
use tracing::debug;
use uvmask_core::RasterBuffer;

/// Size of the fixed TGA header in bytes
pub const TGA_HEADER_SIZE: usize = 18;

/// Descriptor bit marking top-down row order
const DESCRIPTOR_TOP_DOWN: u8 = 0x20;

/// Supported TGA image types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgaImageType {
    /// Uncompressed true-color (type 2)
    TrueColor,
    /// Uncompressed grayscale (type 3)
    Grayscale,
    /// Run-length encoded true-color (type 10)
    RleTrueColor,
}

impl TgaImageType {
    /// Map the header's image type byte.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::TrueColor),
            3 => Some(Self::Grayscale),
            10 => Some(Self::RleTrueColor),
            _ => None,
        }
    }

    /// Header code of this type.
    pub fn code(self) -> u8 {
        match self {
            Self::TrueColor => 2,
            Self::Grayscale => 3,
            Self::RleTrueColor => 10,
        }
    }
}

/// Parsed TGA header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    /// Raw image type byte (see [`TgaHeader::image_type`])
    pub image_type_code: u8,
    pub color_map_first: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel
    pub pixel_depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Parse the 18-byte header at the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Truncated`] if fewer than 18 bytes are available.
    pub fn parse(data: &[u8]) -> IoResult<Self> {
        if data.len() < TGA_HEADER_SIZE {
            return Err(IoError::Truncated {
                expected: TGA_HEADER_SIZE,
                decoded: data.len(),
            });
        }
        let u16_at = |i: usize| u16::from_le_bytes([data[i], data[i + 1]]);
        Ok(Self {
            id_length: data[0],
            color_map_type: data[1],
            image_type_code: data[2],
            color_map_first: u16_at(3),
            color_map_length: u16_at(5),
            color_map_depth: data[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            pixel_depth: data[16],
            descriptor: data[17],
        })
    }

    /// Supported image type, if any.
    pub fn image_type(&self) -> Option<TgaImageType> {
        TgaImageType::from_code(self.image_type_code)
    }

    /// Whether rows are stored top-down.
    pub fn is_top_down(&self) -> bool {
        self.descriptor & DESCRIPTOR_TOP_DOWN != 0
    }

    /// Offset of the first pixel byte.
    pub fn data_offset(&self) -> usize {
        let mut offset = TGA_HEADER_SIZE + self.id_length as usize;
        if self.color_map_type == 1 {
            let entry_bytes = (self.color_map_depth as usize).div_ceil(8);
            offset += self.color_map_length as usize * entry_bytes;
        }
        offset
    }

    /// Number of pixels described by the header.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check type, dimensions and depth.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for image types other than
    /// 2, 3 and 10 or for unsupported depths, and [`IoError::InvalidData`]
    /// for zero dimensions.
    pub fn validate(&self) -> IoResult<TgaImageType> {
        let kind = self.image_type().ok_or_else(|| {
            IoError::UnsupportedFormat(format!("TGA image type {}", self.image_type_code))
        })?;
        if self.width == 0 || self.height == 0 {
            return Err(IoError::InvalidData(format!(
                "TGA dimensions {}x{}",
                self.width, self.height
            )));
        }
        let depth_ok = match kind {
            TgaImageType::Grayscale => self.pixel_depth == 8,
            TgaImageType::TrueColor | TgaImageType::RleTrueColor => {
                matches!(self.pixel_depth, 16 | 24 | 32)
            }
        };
        if !depth_ok {
            return Err(IoError::UnsupportedFormat(format!(
                "TGA type {} with {} bits per pixel",
                self.image_type_code, self.pixel_depth
            )));
        }
        Ok(kind)
    }
}

/// Read only the header of a TGA stream and validate it.
pub fn read_tga_header(data: &[u8]) -> IoResult<TgaHeader> {
    let header = TgaHeader::parse(data)?;
    header.validate()?;
    Ok(header)
}

/// Convert one source pixel to RGBA.
#[inline]
fn decode_pixel(src: &[u8]) -> [u8; 4] {
    match src.len() {
        1 => [src[0], src[0], src[0], 255],
        2 => {
            let v = u16::from_le_bytes([src[0], src[1]]);
            let r = (((v >> 10) & 0x1F) << 3) as u8;
            let g = (((v >> 5) & 0x1F) << 3) as u8;
            let b = ((v & 0x1F) << 3) as u8;
            let a = if v & 0x8000 != 0 { 255 } else { 0 };
            [r, g, b, a]
        }
        3 => [src[2], src[1], src[0], 255],
        _ => [src[2], src[1], src[0], src[3]],
    }
}

/// Byte cursor over the pixel section.
struct PixelSource<'a> {
    data: &'a [u8],
    pos: usize,
    bytes_per_pixel: usize,
}

impl<'a> PixelSource<'a> {
    fn next_pixel(&mut self) -> Option<[u8; 4]> {
        let end = self.pos + self.bytes_per_pixel;
        let src = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(decode_pixel(src))
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Decode a TGA image from memory.
///
/// # Errors
///
/// - [`IoError::Truncated`] if the header or the pixel data ends early
/// - [`IoError::UnsupportedFormat`] for other image types or depths
/// - [`IoError::InvalidData`] for zero dimensions
///
/// # Examples
///
/// ```
/// // 1x1, 24 bpp, top-down, one blue-green-red pixel
/// let mut data = vec![0u8; 18];
/// data[2] = 2;
/// data[12] = 1;
/// data[14] = 1;
/// data[16] = 24;
/// data[17] = 0x20;
/// data.extend_from_slice(&[30, 20, 10]);
///
/// let raster = uvmask_io::tga::read_tga(&data).unwrap();
/// assert_eq!(raster.get_rgba(0, 0), Some([10, 20, 30, 255]));
/// ```
pub fn read_tga(data: &[u8]) -> IoResult<RasterBuffer> {
    let header = TgaHeader::parse(data)?;
    let kind = header.validate()?;

    let width = header.width as u32;
    let height = header.height as u32;
    let n = header.pixel_count();
    let offset = header.data_offset();

    let mut src = PixelSource {
        data: data.get(offset..).unwrap_or(&[]),
        pos: 0,
        bytes_per_pixel: (header.pixel_depth as usize) / 8,
    };
    let mut pixels = vec![0u8; n * 4];

    let decoded = match kind {
        TgaImageType::TrueColor | TgaImageType::Grayscale => decode_raw(&mut src, &mut pixels, n),
        TgaImageType::RleTrueColor => decode_rle(&mut src, &mut pixels, n),
    };
    if decoded < n {
        return Err(IoError::Truncated {
            expected: n,
            decoded,
        });
    }

    let mut raster = RasterBuffer::from_rgba(width, height, pixels)?;
    if !header.is_top_down() {
        raster.flip_vertical();
    }

    debug!(
        width,
        height,
        depth = header.pixel_depth,
        image_type = header.image_type_code,
        top_down = header.is_top_down(),
        "decoded TGA"
    );
    Ok(raster)
}

/// Decode uncompressed pixels; returns the number written.
fn decode_raw(src: &mut PixelSource<'_>, out: &mut [u8], n: usize) -> usize {
    for i in 0..n {
        match src.next_pixel() {
            Some(px) => out[i * 4..i * 4 + 4].copy_from_slice(&px),
            None => return i,
        }
    }
    n
}

/// Decode RLE packets; returns the number of pixels written.
///
/// Runs that would pass the end of the image are clipped.
fn decode_rle(src: &mut PixelSource<'_>, out: &mut [u8], n: usize) -> usize {
    let mut i = 0;
    while i < n {
        let Some(lead) = src.next_byte() else {
            return i;
        };
        let count = (lead & 0x7F) as usize + 1;
        if lead & 0x80 != 0 {
            let Some(px) = src.next_pixel() else {
                return i;
            };
            let end = (i + count).min(n);
            for j in i..end {
                out[j * 4..j * 4 + 4].copy_from_slice(&px);
            }
            i = end;
        } else {
            for _ in 0..count {
                if i >= n {
                    break;
                }
                let Some(px) = src.next_pixel() else {
                    return i;
                };
                out[i * 4..i * 4 + 4].copy_from_slice(&px);
                i += 1;
            }
        }
    }
    n
}

/// Options for [`write_tga`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaWriteOptions {
    /// Write type 10 (RLE) instead of type 2
    pub rle: bool,
}

impl TgaWriteOptions {
    /// Enable or disable run-length encoding
    pub fn with_rle(mut self, rle: bool) -> Self {
        self.rle = rle;
        self
    }
}

/// Write a raster as a 32-bpp top-down TGA.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] if the raster is larger than 65535
/// pixels in either direction, or [`IoError::Io`] on write failure.
pub fn write_tga<W: Write>(
    raster: &RasterBuffer,
    mut writer: W,
    options: &TgaWriteOptions,
) -> IoResult<()> {
    let (width, height) = (raster.width(), raster.height());
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::InvalidData(format!(
            "{width}x{height} exceeds the TGA size limit"
        )));
    }
    let kind = if options.rle {
        TgaImageType::RleTrueColor
    } else {
        TgaImageType::TrueColor
    };

    let mut header = [0u8; TGA_HEADER_SIZE];
    header[2] = kind.code();
    header[12..14].copy_from_slice(&(width as u16).to_le_bytes());
    header[14..16].copy_from_slice(&(height as u16).to_le_bytes());
    header[16] = 32;
    // Top-down rows, 8 alpha bits
    header[17] = DESCRIPTOR_TOP_DOWN | 8;
    writer.write_all(&header)?;

    let bgra: Vec<[u8; 4]> = raster
        .pixels()
        .chunks_exact(4)
        .map(|p| [p[2], p[1], p[0], p[3]])
        .collect();

    let body = if options.rle {
        encode_rle(&bgra, width as usize)
    } else {
        bgra.concat()
    };
    writer.write_all(&body)?;
    Ok(())
}

/// RLE-encode BGRA pixels; packets never cross a row boundary.
fn encode_rle(pixels: &[[u8; 4]], width: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * 2);
    for row in pixels.chunks(width) {
        let mut i = 0;
        while i < row.len() {
            let mut run = 1;
            while i + run < row.len() && run < 128 && row[i + run] == row[i] {
                run += 1;
            }
            if run > 1 {
                out.push(0x80 | (run - 1) as u8);
                out.extend_from_slice(&row[i]);
                i += run;
                continue;
            }
            // Raw packet: extend until the next repeat starts
            let start = i;
            let mut len = 0;
            while i < row.len() && len < 128 {
                if i + 1 < row.len() && row[i + 1] == row[i] {
                    break;
                }
                i += 1;
                len += 1;
            }
            if len == 0 {
                continue;
            }
            out.push((len - 1) as u8);
            for px in &row[start..start + len] {
                out.extend_from_slice(px);
            }
        }
    }
    out
}
