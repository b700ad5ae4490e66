//! Binary morphological operations
//!
//! Implements dilation, erosion, closing, opening and 4-neighbour outline
//! extraction over the binary interpretation of a [`RasterBuffer`]: a
//! pixel is on when any RGB channel exceeds 128.
//!
//! The structuring element is a square of side `2r + 1` clipped at the
//! image border, so only in-bounds neighbours take part. Dilation and
//! erosion are computed separably (row pass, then column pass) from
//! prefix counts, which keeps the cost at O(W·H) for any radius.

use tracing::debug;
use uvmask_core::{OperationTimer, RasterBuffer};

use crate::MorphResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// On if any pixel in the window is on
    Dilate,
    /// On if every in-bounds pixel in the window is on
    Erode,
}

/// Dilate a binary image with a `(2r+1) x (2r+1)` square.
///
/// Output pixels are [`ON`](uvmask_core::ON) or [`OFF`](uvmask_core::OFF).
///
/// # Examples
///
/// ```
/// use uvmask_core::{RasterBuffer, ON};
/// use uvmask_morph::dilate;
///
/// let mut buf = RasterBuffer::new(5, 5).unwrap();
/// buf.set_rgba(2, 2, ON).unwrap();
/// let grown = dilate(&buf, 1).unwrap();
/// assert_eq!(grown.count_on(), 9);
/// ```
pub fn dilate(buf: &RasterBuffer, radius: u32) -> MorphResult<RasterBuffer> {
    let _timer = OperationTimer::new("dilate");
    let map = morph_map(&buf.on_map(), buf.width(), buf.height(), radius, Pass::Dilate);
    Ok(RasterBuffer::from_on_map(buf.width(), buf.height(), &map)?)
}

/// Erode a binary image with a `(2r+1) x (2r+1)` square.
///
/// Neighbours outside the image are ignored, so an all-on image stays
/// all on.
pub fn erode(buf: &RasterBuffer, radius: u32) -> MorphResult<RasterBuffer> {
    let _timer = OperationTimer::new("erode");
    let map = morph_map(&buf.on_map(), buf.width(), buf.height(), radius, Pass::Erode);
    Ok(RasterBuffer::from_on_map(buf.width(), buf.height(), &map)?)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion. Fills gaps narrower than
/// `2r + 1` and merges nearby shapes. Idempotent.
pub fn close(buf: &RasterBuffer, radius: u32) -> MorphResult<RasterBuffer> {
    let _timer = OperationTimer::new("close");
    let map = close_map(&buf.on_map(), buf.width(), buf.height(), radius);
    Ok(RasterBuffer::from_on_map(buf.width(), buf.height(), &map)?)
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation. Removes shapes thinner than
/// `2r + 1`.
pub fn open(buf: &RasterBuffer, radius: u32) -> MorphResult<RasterBuffer> {
    let _timer = OperationTimer::new("open");
    let (w, h) = (buf.width(), buf.height());
    let eroded = morph_map(&buf.on_map(), w, h, radius, Pass::Erode);
    let map = morph_map(&eroded, w, h, radius, Pass::Dilate);
    Ok(RasterBuffer::from_on_map(w, h, &map)?)
}

/// Extract the inner boundary of the on regions.
///
/// An on pixel is kept when at least one 4-neighbour is off. Pixels in
/// the first and last row and column are never part of the outline.
/// Outline pixels are [`ON`](uvmask_core::ON); everything else is fully
/// transparent so the result can be drawn over other artwork.
pub fn extract_outline(buf: &RasterBuffer) -> MorphResult<RasterBuffer> {
    let (w, h) = (buf.width(), buf.height());
    let outline = outline_map(&buf.on_map(), w, h);
    let mut out = RasterBuffer::new(w, h)?;
    let mut count = 0usize;
    for (i, _) in outline.iter().enumerate().filter(|(_, on)| **on) {
        let (x, y) = ((i % w as usize) as u32, (i / w as usize) as u32);
        out.set_rgba_unchecked(x, y, uvmask_core::ON);
        count += 1;
    }
    debug!(pixels = count, "extracted outline");
    Ok(out)
}

/// Closing over a boolean map indexed by `y * width + x`.
pub(crate) fn close_map(map: &[bool], width: u32, height: u32, radius: u32) -> Vec<bool> {
    let dilated = morph_map(map, width, height, radius, Pass::Dilate);
    morph_map(&dilated, width, height, radius, Pass::Erode)
}

/// 4-neighbour inner boundary of a boolean map.
pub(crate) fn outline_map(map: &[bool], width: u32, height: u32) -> Vec<bool> {
    let (w, h) = (width as usize, height as usize);
    let mut out = vec![false; w * h];
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            if map[i] && (!map[i - 1] || !map[i + 1] || !map[i - w] || !map[i + w]) {
                out[i] = true;
            }
        }
    }
    out
}

fn morph_map(map: &[bool], width: u32, height: u32, radius: u32, pass: Pass) -> Vec<bool> {
    if radius == 0 {
        return map.to_vec();
    }
    let (w, h) = (width as usize, height as usize);
    let r = radius as usize;

    let mut tmp = vec![false; w * h];
    let mut line = Vec::with_capacity(w.max(h));
    let mut out_line = Vec::with_capacity(w.max(h));

    // Horizontal pass
    for y in 0..h {
        line.clear();
        line.extend_from_slice(&map[y * w..(y + 1) * w]);
        window_pass(&line, r, pass, &mut out_line);
        tmp[y * w..(y + 1) * w].copy_from_slice(&out_line);
    }

    // Vertical pass
    let mut out = vec![false; w * h];
    for x in 0..w {
        line.clear();
        line.extend((0..h).map(|y| tmp[y * w + x]));
        window_pass(&line, r, pass, &mut out_line);
        for (y, &v) in out_line.iter().enumerate() {
            out[y * w + x] = v;
        }
    }
    out
}

/// One-dimensional window of half-width `r`, clipped to the line.
fn window_pass(line: &[bool], r: usize, pass: Pass, out: &mut Vec<bool>) {
    let n = line.len();
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    for &v in line {
        prefix.push(prefix[prefix.len() - 1] + usize::from(v));
    }

    out.clear();
    out.extend((0..n).map(|i| {
        let lo = i.saturating_sub(r);
        let hi = (i + r).min(n - 1);
        let on = prefix[hi + 1] - prefix[lo];
        match pass {
            Pass::Dilate => on > 0,
            Pass::Erode => on == hi - lo + 1,
        }
    }));
}
