//! Mask painting
//!
//! A [`MaskCanvas`] is an opaque black image painted in one current
//! color. Shapes overwrite what is beneath them; erasing makes pixels
//! fully transparent.

use tracing::debug;
use uvmask_core::raster::graphics::generate_line_points;
use uvmask_core::{Color, Coverage, RasterBuffer};
use uvmask_region::region_grow;

use crate::error::ColorResult;
use crate::library::SavedMask;

/// Paintable mask image
#[derive(Debug, Clone)]
pub struct MaskCanvas {
    raster: RasterBuffer,
    color: Color,
}

impl MaskCanvas {
    /// Black canvas painting in red.
    pub fn new(width: u32, height: u32) -> ColorResult<Self> {
        Ok(Self {
            raster: RasterBuffer::new_filled(width, height, Color::BLACK)?,
            color: Color::RED,
        })
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn into_raster(self) -> RasterBuffer {
        self.raster
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Reset to black.
    pub fn clear(&mut self) {
        self.raster.fill(Color::BLACK);
    }

    /// Clear and switch to a new color.
    pub fn start_mask(&mut self, color: Color) {
        self.clear();
        self.color = color;
    }

    /// Restore a saved mask's image and color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Core`](crate::ColorError::Core) if the saved
    /// mask has a different size.
    pub fn load(&mut self, saved: &SavedMask) -> ColorResult<()> {
        self.raster.require_same_size(&saved.image)?;
        self.raster = saved.image.clone();
        self.color = saved.color;
        Ok(())
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.raster.fill_rect(x, y, width, height, self.color);
    }

    /// Fill a closed polygon (nonzero winding).
    ///
    /// Fewer than three points draw nothing.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)]) {
        let mut coverage = Coverage::new(self.raster.width(), self.raster.height());
        coverage.add_polygon(points);
        coverage.paint(&mut self.raster, self.color);
    }

    /// Make a disc of diameter `size` fully transparent.
    pub fn erase_circle(&mut self, cx: i32, cy: i32, size: u32) {
        self.raster.fill_circle(cx, cy, size / 2, Color::TRANSPARENT);
    }

    /// Stroke a polyline with a round brush of the given width.
    ///
    /// A single point stamps one brush dot.
    pub fn stroke_polyline(&mut self, points: &[(i32, i32)], width: u32) {
        let radius = width / 2;
        let mut stamp = |(x, y): (i32, i32)| self.raster.fill_circle(x, y, radius, self.color);
        match points {
            [] => {}
            [p] => stamp(*p),
            _ => {
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    for p in generate_line_points(a.0, a.1, b.0, b.1) {
                        stamp(p);
                    }
                }
            }
        }
    }

    /// Paint the region of `source` similar to the color at `(x, y)`.
    ///
    /// Returns the number of pixels painted.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Core`](crate::ColorError::Core) if `source`
    /// differs in size from the canvas, or
    /// [`ColorError::Region`](crate::ColorError::Region) if the seed is
    /// outside it.
    pub fn magic_wand(&mut self, source: &RasterBuffer, x: u32, y: u32, tolerance: u32) -> ColorResult<usize> {
        self.raster.require_same_size(source)?;
        let region = region_grow(source, x, y, tolerance)?;
        let px = self.color.to_rgba();
        for &(rx, ry) in region.pixels() {
            self.raster.set_rgba_unchecked(rx, ry, px);
        }
        debug!(pixels = region.len(), tolerance, "magic wand");
        Ok(region.len())
    }
}
