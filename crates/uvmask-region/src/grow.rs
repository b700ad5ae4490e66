//! Color-tolerance region growing
//!
//! Grows a 4-connected region from a seed pixel, admitting every pixel
//! whose RGB distance `|Δr| + |Δg| + |Δb|` to the seed color is within a
//! tolerance. Alpha is ignored.
//!
//! The walk uses an explicit stack and a `width * height` visited bitset;
//! pixels are marked when pushed, so each one enters the stack at most
//! once.

use tracing::debug;
use uvmask_core::{OperationTimer, RasterBuffer};

use crate::conncomp::PixelBounds;
use crate::error::{RegionError, RegionResult};

/// Pixels reached by [`region_grow`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrownRegion {
    width: u32,
    height: u32,
    /// RGB of the seed pixel
    pub seed_color: [u8; 3],
    pixels: Vec<(u32, u32)>,
    visited: Vec<bool>,
}

impl GrownRegion {
    /// Pixels in the order they were reached.
    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.visited[y as usize * self.width as usize + x as usize]
    }

    /// Bounding box of the region.
    pub fn bounds(&self) -> Option<PixelBounds> {
        let (&(x, y), rest) = self.pixels.split_first()?;
        let mut bounds = PixelBounds::at(x, y);
        for &(x, y) in rest {
            bounds.include(x, y);
        }
        Some(bounds)
    }

    /// Binary mask of the region at the source image size.
    pub fn to_mask(&self) -> RegionResult<RasterBuffer> {
        Ok(RasterBuffer::from_on_map(self.width, self.height, &self.visited)?)
    }
}

#[inline]
fn rgb_distance(a: [u8; 4], b: [u8; 3]) -> u32 {
    (0..3).map(|c| a[c].abs_diff(b[c]) as u32).sum()
}

/// Grow a region of similar color from `(x, y)`.
///
/// # Errors
///
/// Returns [`RegionError::InvalidSeed`] if the seed lies outside the
/// image.
///
/// # Examples
///
/// ```
/// use uvmask_core::{Color, RasterBuffer};
/// use uvmask_region::region_grow;
///
/// let buf = RasterBuffer::new_filled(8, 4, Color::RED).unwrap();
/// let region = region_grow(&buf, 3, 1, 0).unwrap();
/// assert_eq!(region.len(), 32);
/// ```
pub fn region_grow(buf: &RasterBuffer, x: u32, y: u32, tolerance: u32) -> RegionResult<GrownRegion> {
    let (width, height) = (buf.width(), buf.height());
    if x >= width || y >= height {
        return Err(RegionError::InvalidSeed { x, y });
    }
    let _timer = OperationTimer::new("region_grow");

    let seed = buf.get_rgba_unchecked(x, y);
    let seed_color = [seed[0], seed[1], seed[2]];
    let (w, h) = (width as usize, height as usize);

    let mut visited = vec![false; w * h];
    let mut pixels = Vec::new();
    let mut stack = vec![(x, y)];
    visited[y as usize * w + x as usize] = true;

    while let Some((px, py)) = stack.pop() {
        pixels.push((px, py));
        let neighbours = [
            (px.wrapping_add(1), py),
            (px.wrapping_sub(1), py),
            (px, py.wrapping_add(1)),
            (px, py.wrapping_sub(1)),
        ];
        for (nx, ny) in neighbours {
            if nx >= width || ny >= height {
                continue;
            }
            let i = ny as usize * w + nx as usize;
            if visited[i] {
                continue;
            }
            if rgb_distance(buf.get_rgba_unchecked(nx, ny), seed_color) <= tolerance {
                visited[i] = true;
                stack.push((nx, ny));
            }
        }
    }

    debug!(seed_x = x, seed_y = y, tolerance, pixels = pixels.len(), "grew region");
    Ok(GrownRegion {
        width,
        height,
        seed_color,
        pixels,
        visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvmask_core::Color;

    #[test]
    fn test_seed_out_of_bounds() {
        let buf = RasterBuffer::new(4, 4).unwrap();
        assert!(matches!(
            region_grow(&buf, 4, 0, 0),
            Err(RegionError::InvalidSeed { x: 4, y: 0 })
        ));
    }

    #[test]
    fn test_tolerance_boundary() {
        let mut buf = RasterBuffer::new_filled(3, 1, Color::rgb(100, 100, 100)).unwrap();
        buf.set_rgba(1, 0, [110, 100, 95, 255]).unwrap();
        assert_eq!(region_grow(&buf, 0, 0, 14).unwrap().len(), 1);
        // (2, 0) is only reachable through (1, 0)
        let region = region_grow(&buf, 0, 0, 15).unwrap();
        assert_eq!(region.len(), 3);
        assert!(region.contains(2, 0));
    }

    #[test]
    fn test_alpha_ignored() {
        let mut buf = RasterBuffer::new_filled(2, 1, Color::BLUE).unwrap();
        buf.set_rgba(1, 0, [0, 0, 255, 0]).unwrap();
        assert_eq!(region_grow(&buf, 0, 0, 0).unwrap().len(), 2);
    }

    #[test]
    fn test_bounds_and_mask() {
        let mut buf = RasterBuffer::new_filled(6, 6, Color::BLACK).unwrap();
        buf.fill_rect(1, 2, 3, 2, Color::WHITE);
        let region = region_grow(&buf, 2, 2, 0).unwrap();
        assert_eq!(region.len(), 6);
        assert_eq!(
            region.bounds(),
            Some(PixelBounds { min_x: 1, min_y: 2, max_x: 3, max_y: 3 })
        );
        let mask = region.to_mask().unwrap();
        assert_eq!(mask.count_on(), 6);
        assert!(!mask.is_on(0, 0));
    }
}
