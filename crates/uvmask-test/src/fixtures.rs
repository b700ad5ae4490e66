//! Shared fixtures for regression tests
//!
//! Meshes are produced as OBJ text so tests exercise the parser on the way
//! in; TGA streams are assembled byte by byte so decoder tests do not
//! depend on the encoder.

use crate::error::{TestError, TestResult};
use uvmask_core::{Color, OFF, ON, RasterBuffer};

/// Unit quad split into two triangles along the `1-3` diagonal.
///
/// Both triangles reference UV indices 1 and 3 for the diagonal, so the
/// mesh forms one island whose outline is the four outer edges. UVs sit
/// at 0.125 and 0.875 so every edge lands inside a raster.
pub fn quad_obj() -> String {
    let mut s = String::from("# two-triangle quad\n");
    s.push_str(QUAD_VERTICES);
    s.push_str("vt 0.125 0.125\nvt 0.875 0.125\nvt 0.875 0.875\nvt 0.125 0.875\n");
    s.push_str("f 1/1 2/2 3/3\nf 1/1 3/3 4/4\n");
    s
}

/// The same quad written as a single four-sided face.
pub fn quad_polygon_obj() -> String {
    let mut s = String::from(QUAD_VERTICES);
    s.push_str("vt 0.125 0.125\nvt 0.875 0.125\nvt 0.875 0.875\nvt 0.125 0.875\n");
    s.push_str("f 1/1 2/2 3/3 4/4\n");
    s
}

const QUAD_VERTICES: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n";

/// Two quads that share 3D vertices but not UV indices.
///
/// The left quad covers `u` in `[0.0625, 0.4375]` and the right quad
/// `u` in `[0.5625, 0.9375]`; both span `v` in `[0.125, 0.875]`. Faces 0-1
/// form one island and faces 2-3 the other.
pub fn two_islands_obj() -> String {
    let mut s = String::new();
    for (x, y) in [(0, 0), (1, 0), (1, 1), (0, 1), (2, 0), (2, 1)] {
        s.push_str(&format!("v {} {} 0\n", x, y));
    }
    for (u, v) in [
        (0.0625, 0.125),
        (0.4375, 0.125),
        (0.4375, 0.875),
        (0.0625, 0.875),
        (0.5625, 0.125),
        (0.9375, 0.125),
        (0.9375, 0.875),
        (0.5625, 0.875),
    ] {
        s.push_str(&format!("vt {} {}\n", u, v));
    }
    s.push_str("f 1/1 2/2 3/3\nf 1/1 3/3 4/4\n");
    s.push_str("f 2/5 5/6 6/7\nf 2/5 6/7 3/8\n");
    s
}

/// Build an 18-byte TGA header.
pub fn tga_header(image_type: u8, width: u16, height: u16, depth: u8, descriptor: u8) -> Vec<u8> {
    let mut h = vec![0u8; 18];
    h[2] = image_type;
    h[12..14].copy_from_slice(&width.to_le_bytes());
    h[14..16].copy_from_slice(&height.to_le_bytes());
    h[16] = depth;
    h[17] = descriptor;
    h
}

/// Build a complete TGA stream from a header description and a body.
///
/// The body must already be in file order (BGR(A), bottom-up unless the
/// descriptor's 0x20 bit is set).
pub fn tga_stream(
    image_type: u8,
    width: u16,
    height: u16,
    depth: u8,
    descriptor: u8,
    body: &[u8],
) -> Vec<u8> {
    let mut data = tga_header(image_type, width, height, depth, descriptor);
    data.extend_from_slice(body);
    data
}

/// Raster of one color.
pub fn solid_raster(width: u32, height: u32, color: Color) -> TestResult<RasterBuffer> {
    Ok(RasterBuffer::new_filled(width, height, color)?)
}

/// Binary mask that is on only inside `[x0, x1) x [y0, y1)`.
pub fn rect_mask(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> TestResult<RasterBuffer> {
    if x0 > x1 || y0 > y1 || x1 > width || y1 > height {
        return Err(TestError::InvalidFixture(format!(
            "rectangle [{x0},{x1})x[{y0},{y1}) does not fit {width}x{height}"
        )));
    }
    let mut mask = RasterBuffer::new_filled(width, height, Color::from_rgba(OFF))?;
    for y in y0..y1 {
        for x in x0..x1 {
            mask.set_rgba_unchecked(x, y, ON);
        }
    }
    Ok(mask)
}

/// Binary mask whose top-left quadrant is on.
pub fn quadrant_mask(width: u32, height: u32) -> TestResult<RasterBuffer> {
    rect_mask(width, height, 0, 0, width / 2, height / 2)
}

/// Raster from rows of single-character color codes.
///
/// `R`, `G`, `B`, `W`, `K` (black) and `.` (transparent). Rows must be of
/// equal length.
pub fn raster_from_art(rows: &[&str]) -> TestResult<RasterBuffer> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut buf = RasterBuffer::new(width, height)?;
    for (y, row) in rows.iter().enumerate() {
        if row.len() as u32 != width {
            return Err(TestError::InvalidFixture(format!("row {y} has length {}", row.len())));
        }
        for (x, c) in row.chars().enumerate() {
            let color = match c {
                'R' => Color::RED,
                'G' => Color::GREEN,
                'B' => Color::BLUE,
                'W' => Color::WHITE,
                'K' => Color::BLACK,
                '.' => Color::TRANSPARENT,
                other => {
                    return Err(TestError::InvalidFixture(format!("unknown color code '{other}'")));
                }
            };
            buf.set_rgba_unchecked(x as u32, y as u32, color.to_rgba());
        }
    }
    Ok(buf)
}
