//! RasterBuffer - The RGBA pixel container
//!
//! `RasterBuffer` is the image type exchanged by every stage of the
//! engine: decoded textures, rasterized island masks, morphology results
//! and clipped artwork all travel as one.
//!
//! # Pixel layout
//!
//! - 4 bytes per pixel in R, G, B, A order
//! - Rows are stored top-down with no padding: row 0 is the first visual
//!   row, which corresponds to UV `v = 1`
//! - `pixels.len() == width * height * 4`
//!
//! # Ownership model
//!
//! A buffer is created fresh by each operation and moved to the caller.
//! Nothing in the engine keeps a reference to a buffer it has returned.
//!
//! # Binary interpretation
//!
//! Masks reuse the same container. A pixel is *on* when any of its RGB
//! channels exceeds [`BINARY_THRESHOLD`]. Operations producing binary
//! masks write [`ON`] and [`OFF`].

pub mod graphics;

pub use graphics::{Color, Coverage};

use crate::error::{Error, Result};

/// Channel value above which a pixel counts as "on" in a binary mask.
pub const BINARY_THRESHOLD: u8 = 128;

/// Alpha value at or above which a pixel counts as opaque.
pub const OPAQUE_THRESHOLD: u8 = 128;

/// Canonical "on" pixel of a binary mask.
pub const ON: [u8; 4] = [255, 255, 255, 255];

/// Canonical "off" pixel of a binary mask.
pub const OFF: [u8; 4] = [0, 0, 0, 255];

/// Returns true if an RGBA pixel is "on" under the binary interpretation.
#[inline]
pub fn is_on(px: [u8; 4]) -> bool {
    px[0] > BINARY_THRESHOLD || px[1] > BINARY_THRESHOLD || px[2] > BINARY_THRESHOLD
}

/// RGBA raster with top-down row order.
///
/// # Examples
///
/// ```
/// use uvmask_core::RasterBuffer;
///
/// let mut buf = RasterBuffer::new(4, 2).unwrap();
/// buf.set_rgba(3, 1, [10, 20, 30, 255]).unwrap();
/// assert_eq!(buf.get_rgba(3, 1), Some([10, 20, 30, 255]));
/// assert_eq!(buf.pixels().len(), 4 * 2 * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Create a fully transparent black raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let len = width as usize * height as usize * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Create a raster with every pixel set to `color`.
    pub fn new_filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        buf.fill(color);
        Ok(buf)
    }

    /// Wrap an existing RGBA byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `pixels` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes, row-major, top-down.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw RGBA bytes.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the raster and return its bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Check whether two rasters have identical dimensions.
    pub fn same_size(&self, other: &RasterBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with [`Error::DimensionMismatch`] unless `other` has the same size.
    pub fn require_same_size(&self, other: &RasterBuffer) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            })
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get a pixel, or `None` when out of bounds.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgba_unchecked(x, y))
    }

    /// Get a pixel without a bounds check beyond the slice index.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get_rgba_unchecked(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Set a pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` lies outside the buffer.
    pub fn set_rgba(&mut self, x: u32, y: u32, px: [u8; 4]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_rgba_unchecked(x, y, px);
        Ok(())
    }

    /// Set a pixel without a bounds check beyond the slice index.
    #[inline]
    pub fn set_rgba_unchecked(&mut self, x: u32, y: u32, px: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&px);
    }

    /// Set only the alpha channel of a pixel.
    #[inline]
    pub fn set_alpha_unchecked(&mut self, x: u32, y: u32, alpha: u8) {
        let i = self.offset(x, y);
        self.pixels[i + 3] = alpha;
    }

    /// Binary interpretation of a pixel; out-of-bounds is "off".
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        self.get_rgba(x, y).is_some_and(is_on)
    }

    /// Number of "on" pixels under the binary interpretation.
    pub fn count_on(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| is_on([px[0], px[1], px[2], px[3]]))
            .count()
    }

    /// Boolean "on" map indexed by `y * width + x`.
    pub fn on_map(&self) -> Vec<bool> {
        self.pixels
            .chunks_exact(4)
            .map(|px| is_on([px[0], px[1], px[2], px[3]]))
            .collect()
    }

    /// Build a binary mask ([`ON`]/[`OFF`]) from a boolean map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `map` does not hold
    /// `width * height` entries.
    pub fn from_on_map(width: u32, height: u32, map: &[bool]) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if map.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                expected: expected * 4,
                actual: map.len() * 4,
            });
        }
        let mut pixels = Vec::with_capacity(expected * 4);
        for &on in map {
            pixels.extend_from_slice(if on { &ON } else { &OFF });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let px = color.to_rgba();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Reverse the row order in place.
    pub fn flip_vertical(&mut self) {
        let row_bytes = self.width as usize * 4;
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (top, bottom) = self.pixels.split_at_mut((h - 1 - y) * row_bytes);
            top[y * row_bytes..(y + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
        }
    }

    /// Iterate over `(x, y, rgba)` in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        let w = self.width as usize;
        self.pixels
            .chunks_exact(4)
            .enumerate()
            .map(move |(i, px)| ((i % w) as u32, (i / w) as u32, [px[0], px[1], px[2], px[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(RasterBuffer::new(0, 5).is_err());
        assert!(RasterBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_from_rgba_length_check() {
        assert!(RasterBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
        let err = RasterBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::BufferLength { expected: 16, .. }));
    }

    #[test]
    fn test_set_get_bounds() {
        let mut buf = RasterBuffer::new(3, 3).unwrap();
        assert!(buf.set_rgba(3, 0, ON).is_err());
        buf.set_rgba(2, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buf.get_rgba(2, 2), Some([1, 2, 3, 4]));
        assert_eq!(buf.get_rgba(0, 3), None);
    }

    #[test]
    fn test_flip_vertical_odd_height() {
        let mut buf = RasterBuffer::new(1, 3).unwrap();
        for y in 0..3 {
            buf.set_rgba(0, y, [y as u8, 0, 0, 255]).unwrap();
        }
        buf.flip_vertical();
        assert_eq!(buf.get_rgba(0, 0), Some([2, 0, 0, 255]));
        assert_eq!(buf.get_rgba(0, 1), Some([1, 0, 0, 255]));
        assert_eq!(buf.get_rgba(0, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_binary_interpretation() {
        assert!(is_on([129, 0, 0, 255]));
        assert!(is_on([0, 0, 200, 0]));
        assert!(!is_on([128, 128, 128, 255]));

        let map = [true, false, false, true];
        let mask = RasterBuffer::from_on_map(2, 2, &map).unwrap();
        assert_eq!(mask.count_on(), 2);
        assert_eq!(mask.on_map(), map.to_vec());
        assert_eq!(mask.get_rgba(1, 0), Some(OFF));
    }

    #[test]
    fn test_iter_pixels_coordinates() {
        let buf = RasterBuffer::new(3, 2).unwrap();
        let coords: Vec<_> = buf.iter_pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords[4], (1, 1));
        assert_eq!(coords.len(), 6);
    }
}
