//! UV sheet simplification
//!
//! Reduces a drawn UV sheet (colored lines on a dark or transparent
//! background) to the outer boundaries of its major shapes:
//!
//! 1. [`binarize_sheet`] turns every visibly colored pixel white
//! 2. A closing merges nearby shapes into solid regions
//! 3. The 4-neighbour outline of the closed regions is extracted
//!
//! The closed mask doubles as the region map used to group faces into
//! simplified islands.

use tracing::info;
use uvmask_core::{Color, OperationTimer, RasterBuffer};

use crate::MorphResult;
use crate::binary::{close_map, outline_map};

/// Alpha a sheet pixel must exceed to count as drawn.
pub const SHEET_ALPHA_THRESHOLD: u8 = 100;

/// Channel value one of R, G, B must exceed to count as drawn.
pub const SHEET_COLOR_THRESHOLD: u8 = 50;

/// Options for [`simplify_sheet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Radius of the square closing element
    pub closing_radius: u32,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { closing_radius: 8 }
    }
}

impl SimplifyOptions {
    pub fn with_closing_radius(mut self, radius: u32) -> Self {
        self.closing_radius = radius;
        self
    }
}

/// Result of [`simplify_sheet`]
#[derive(Debug, Clone)]
pub struct SimplifiedSheet {
    /// Binary mask of the merged regions
    pub closed: RasterBuffer,
    /// Boundary of the merged regions, transparent elsewhere
    pub outline: RasterBuffer,
}

fn is_drawn(px: [u8; 4]) -> bool {
    px[3] > SHEET_ALPHA_THRESHOLD
        && (px[0] > SHEET_COLOR_THRESHOLD
            || px[1] > SHEET_COLOR_THRESHOLD
            || px[2] > SHEET_COLOR_THRESHOLD)
}

/// Binary mask of the drawn pixels of a sheet.
pub fn binarize_sheet(sheet: &RasterBuffer) -> MorphResult<RasterBuffer> {
    let map: Vec<bool> = sheet.iter_pixels().map(|(_, _, px)| is_drawn(px)).collect();
    Ok(RasterBuffer::from_on_map(sheet.width(), sheet.height(), &map)?)
}

/// Binarize, close and outline a UV sheet.
pub fn simplify_sheet(sheet: &RasterBuffer, options: &SimplifyOptions) -> MorphResult<SimplifiedSheet> {
    let _timer = OperationTimer::with_items("simplify_sheet", sheet.pixel_count());
    let (w, h) = (sheet.width(), sheet.height());

    let drawn: Vec<bool> = sheet.iter_pixels().map(|(_, _, px)| is_drawn(px)).collect();
    let closed = close_map(&drawn, w, h, options.closing_radius);
    let boundary = outline_map(&closed, w, h);

    let mut outline = RasterBuffer::new(w, h)?;
    let mut count = 0usize;
    for (i, _) in boundary.iter().enumerate().filter(|(_, on)| **on) {
        outline.set_rgba_unchecked((i % w as usize) as u32, (i / w as usize) as u32, uvmask_core::ON);
        count += 1;
    }

    info!(
        drawn = drawn.iter().filter(|&&v| v).count(),
        closed = closed.iter().filter(|&&v| v).count(),
        outline = count,
        "simplified UV sheet"
    );
    Ok(SimplifiedSheet {
        closed: RasterBuffer::from_on_map(w, h, &closed)?,
        outline,
    })
}

/// Draw the on pixels of `outline` over a copy of `base` in `color`.
///
/// # Errors
///
/// Returns [`MorphError::Core`](crate::MorphError::Core) if the two
/// buffers differ in size.
pub fn overlay_outline(
    base: &RasterBuffer,
    outline: &RasterBuffer,
    color: Color,
) -> MorphResult<RasterBuffer> {
    base.require_same_size(outline)?;
    let mut out = base.clone();
    let px = color.to_rgba();
    for (x, y, _) in outline.iter_pixels().filter(|&(_, _, p)| uvmask_core::raster::is_on(p)) {
        out.set_rgba_unchecked(x, y, px);
    }
    Ok(out)
}
