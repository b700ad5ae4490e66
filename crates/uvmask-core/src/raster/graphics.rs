//! Graphics rendering functions
//!
//! This module provides the drawing primitives the rasterizers and the
//! mask painter are built on:
//! - Lines (Bresenham, with variable width)
//! - Rectangles and filled circles
//! - Filled polygons through a [`Coverage`] map that unions shapes before
//!   painting, so overlapping shapes never blend twice

use super::RasterBuffer;

/// RGBA color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Default outline color of the editor
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    /// As an `[r, g, b, a]` pixel
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an `[r, g, b, a]` pixel
    #[inline]
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// =============================================================================
// Point generation helpers
// =============================================================================

/// Generate the points of a line using Bresenham's integer algorithm.
///
/// The line connects `(x1, y1)` to `(x2, y2)` with 8-connectivity and
/// includes both endpoints.
pub fn generate_line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    if x1 == x2 && y1 == y2 {
        return vec![(x1, y1)];
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1i32 } else { -1 };
    let sy = if y2 > y1 { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut pts = Vec::with_capacity(npts as usize);

    let mut x = x1;
    let mut y = y1;

    if dx >= dy {
        // Step along x (more horizontal)
        let mut err = dx / 2;
        for _ in 0..npts {
            pts.push((x, y));
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        // Step along y (more vertical)
        let mut err = dy / 2;
        for _ in 0..npts {
            pts.push((x, y));
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    pts
}

/// Generate the points of a line with the given width.
///
/// For width > 1, parallel lines are added alternately on both sides of
/// the base line, offset across its minor axis.
pub fn generate_wide_line_points(x1: i32, y1: i32, x2: i32, y2: i32, width: u32) -> Vec<(i32, i32)> {
    let width = width.max(1);
    let mut pts = generate_line_points(x1, y1, x2, y2);
    if width == 1 {
        return pts;
    }

    let is_horizontal = (x2 - x1).abs() > (y2 - y1).abs();
    let base_len = pts.len();
    pts.reserve(base_len * (width as usize - 1));

    for i in 1..width {
        let offset = ((i + 1) / 2) as i32;
        let offset = if i % 2 == 1 { -offset } else { offset };
        let parallel = if is_horizontal {
            generate_line_points(x1, y1 + offset, x2, y2 + offset)
        } else {
            generate_line_points(x1 + offset, y1, x2 + offset, y2)
        };
        pts.extend(parallel);
    }

    pts
}

// =============================================================================
// Coverage
// =============================================================================

/// Union of filled shapes over a raster grid.
///
/// A pixel is covered when its centre `(x + 0.5, y + 0.5)` lies inside a
/// shape (nonzero winding). Shapes are accumulated first and painted once,
/// which is how batched fills avoid double blending where shapes overlap.
#[derive(Debug, Clone)]
pub struct Coverage {
    width: u32,
    height: u32,
    bits: Vec<bool>,
    count: usize,
}

impl Coverage {
    /// Create an empty coverage map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
            count: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of covered pixels.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether `(x, y)` is covered; out of bounds is not.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    /// Covered flags indexed by `y * width + x`.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn mark(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        if !self.bits[i] {
            self.bits[i] = true;
            self.count += 1;
        }
    }

    /// Add a triangle given in pixel coordinates.
    pub fn add_triangle(&mut self, tri: [(f32, f32); 3]) {
        self.add_polygon(&tri);
    }

    /// Add a closed polygon given in pixel coordinates.
    ///
    /// Polygons with fewer than 3 vertices or non-finite coordinates cover
    /// nothing.
    pub fn add_polygon(&mut self, pts: &[(f32, f32)]) {
        if pts.len() < 3 || pts.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }

        let (min_y, max_y) = pts
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        let row_start = (min_y - 0.5).ceil().max(0.0) as i64;
        let row_end = ((max_y - 0.5).ceil() as i64).min(self.height as i64);

        let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(pts.len());
        for row in row_start..row_end {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for i in 0..pts.len() {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % pts.len()];
                if y0 == y1 {
                    continue;
                }
                // Half-open in y so shared vertices are counted once
                let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
                if yc < lo || yc >= hi {
                    continue;
                }
                let t = (yc - y0) / (y1 - y0);
                let x = x0 + t * (x1 - x0);
                let dir = if y1 > y0 { 1 } else { -1 };
                crossings.push((x, dir));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    self.mark_span(row as u32, pair[0].0, pair[1].0);
                }
            }
        }
    }

    /// Mark pixels of `row` whose centres fall in `[xa, xb)`.
    fn mark_span(&mut self, row: u32, xa: f32, xb: f32) {
        let start = (xa - 0.5).ceil().max(0.0) as i64;
        let end = ((xb - 0.5).ceil() as i64).min(self.width as i64);
        for x in start..end {
            self.mark(x as u32, row);
        }
    }

    /// Write `color` into every covered pixel of `raster`.
    ///
    /// Pixels outside the overlapping area of the two grids are ignored.
    pub fn paint(&self, raster: &mut RasterBuffer, color: Color) {
        let px = color.to_rgba();
        let w = self.width.min(raster.width());
        let h = self.height.min(raster.height());
        for y in 0..h {
            for x in 0..w {
                if self.bits[self.index(x, y)] {
                    raster.set_rgba_unchecked(x, y, px);
                }
            }
        }
    }
}

// =============================================================================
// RasterBuffer rendering implementations
// =============================================================================

impl RasterBuffer {
    /// Render points with a color. Points outside the raster are clipped.
    pub fn render_points(&mut self, pts: &[(i32, i32)], color: Color) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        let px = color.to_rgba();
        for &(x, y) in pts {
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }
            self.set_rgba_unchecked(x as u32, y as u32, px);
        }
    }

    /// Render a line from `(x1, y1)` to `(x2, y2)`.
    pub fn render_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: u32, color: Color) {
        let pts = generate_wide_line_points(x1, y1, x2, y2, width);
        self.render_points(&pts, color);
    }

    /// Fill an axis-aligned rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width() as i64);
        let y1 = (y as i64 + h as i64).min(self.height() as i64);
        let px = color.to_rgba();
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_rgba_unchecked(xx as u32, yy as u32, px);
            }
        }
    }

    /// Fill a disc of the given radius centred on `(cx, cy)`.
    ///
    /// A pixel is inside when its squared distance to the centre is at most
    /// `(radius + 0.5)^2`.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let threshold = (radius as f64 + 0.5).powi(2);
        let y0 = (cy - r).max(0);
        let y1 = (cy + r).min(self.height() as i64 - 1);
        let x0 = (cx - r).max(0);
        let x1 = (cx + r).min(self.width() as i64 - 1);
        let px = color.to_rgba();
        for y in y0..=y1 {
            let dy = y - cy;
            for x in x0..=x1 {
                let dx = x - cx;
                if (dx * dx + dy * dy) as f64 <= threshold {
                    self.set_rgba_unchecked(x as u32, y as u32, px);
                }
            }
        }
    }
}
