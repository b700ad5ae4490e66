//! Rasterization of faces, outlines and wireframes into UV-space images
//!
//! UV coordinates map to pixels as `(u * width, v * height)`; since `v` is
//! stored flipped, row 0 is UV `v = 1` of the source file.
//!
//! - [`rasterize_faces`] unions the coverage of every triangle and paints
//!   it once, so overlapping triangles do not blend twice.
//! - [`rasterize_outline`] draws only UV edges used by exactly one face.
//! - [`rasterize_wireframe`] draws every distinct UV edge.
//!
//! UV indices past the end of the UV array drop the affected triangle or
//! edge rather than failing.

use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use uvmask_core::{
    Color, Coverage, OperationTimer, ProcessLimits, ProgressCallback, ProgressGate, RasterBuffer,
    Truncation,
};

use crate::error::{MeshError, MeshResult};
use crate::topology::{EdgeKey, EdgeUsage, face_edges};
use crate::types::{Mesh, UvCoord};

/// Integer pixel for a UV coordinate, clamped to the raster.
///
/// `u = 1` maps to the last column rather than one past it.
#[inline]
pub fn uv_to_pixel(uv: UvCoord, width: u32, height: u32) -> (i32, i32) {
    let (x, y) = uv.to_pixel(width, height);
    let clamp = |p: f32, max: u32| {
        if p.is_finite() {
            (p.floor() as i64).clamp(0, max as i64 - 1) as i32
        } else {
            0
        }
    };
    (clamp(x, width), clamp(y, height))
}

/// Fill the given faces into a transparent raster.
///
/// Faces that do not exist, have no UVs or reference missing UVs are
/// skipped.
///
/// # Errors
///
/// Returns [`MeshError::Core`] if width or height is 0.
pub fn rasterize_faces(
    mesh: &Mesh,
    faces: &[usize],
    width: u32,
    height: u32,
    fill: Color,
) -> MeshResult<RasterBuffer> {
    let _timer = OperationTimer::with_items("rasterize_faces", faces.len());
    let mut raster = RasterBuffer::new(width, height)?;
    let coverage = face_coverage(mesh, faces, width, height);
    coverage.paint(&mut raster, fill);
    debug!(
        faces = faces.len(),
        pixels = coverage.count(),
        "rasterized faces"
    );
    Ok(raster)
}

/// Coverage of the given faces on a `width x height` grid.
pub fn face_coverage(mesh: &Mesh, faces: &[usize], width: u32, height: u32) -> Coverage {
    let mut coverage = Coverage::new(width, height);
    let mut dropped = 0usize;
    for &face in faces {
        match mesh.face_uv_coordinates(face) {
            Some(tri) => coverage.add_triangle(tri.map(|uv| uv.to_pixel(width, height))),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "faces without usable UVs skipped");
    }
    coverage
}

/// Options for [`rasterize_outline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Caps the number of faces whose edges are counted
    pub limits: ProcessLimits,
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub line_width: u32,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            limits: ProcessLimits::default(),
            color: Color::CYAN,
            line_width: 1,
        }
    }
}

impl OutlineOptions {
    pub fn with_limits(mut self, limits: ProcessLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width.max(1);
        self
    }
}

/// Result of [`rasterize_outline`]
#[derive(Debug, Clone)]
pub struct OutlineRaster {
    /// Transparent raster with boundary edges drawn
    pub raster: RasterBuffer,
    /// Number of boundary edges drawn
    pub boundary_edges: usize,
    /// Set when a face cap left faces uncounted
    pub truncation: Option<Truncation>,
}

/// Draw UV edges used by exactly one face.
///
/// Edges shared by two or more faces (island interiors and non-manifold
/// seams) are not drawn.
pub fn rasterize_outline(
    mesh: &Mesh,
    width: u32,
    height: u32,
    options: &OutlineOptions,
) -> MeshResult<OutlineRaster> {
    outline(mesh, width, height, options, None)
}

/// [`rasterize_outline`], polling `progress` every `check_interval` edges.
///
/// # Errors
///
/// Returns [`MeshError::Cancelled`] if the callback returns `false`.
pub fn rasterize_outline_with_progress(
    mesh: &Mesh,
    width: u32,
    height: u32,
    options: &OutlineOptions,
    progress: ProgressCallback<'_>,
) -> MeshResult<OutlineRaster> {
    outline(mesh, width, height, options, Some(progress))
}

fn outline(
    mesh: &Mesh,
    width: u32,
    height: u32,
    options: &OutlineOptions,
    progress: Option<ProgressCallback<'_>>,
) -> MeshResult<OutlineRaster> {
    let _timer = OperationTimer::with_items("rasterize_outline", mesh.face_count());
    let mut raster = RasterBuffer::new(width, height)?;

    let (n, _) = options.limits.cap(mesh.face_count());
    let mut gate = ProgressGate::new("outline_edge_usage", n, &options.limits, progress);
    let Some(usage) = EdgeUsage::count_gated(mesh, &options.limits, &mut gate) else {
        return Err(MeshError::Cancelled {
            stage: "outline_edge_usage",
            processed: gate.last_tick(),
        });
    };
    if let Some(t) = &usage.truncation {
        warn!(%t, "outline edge count limited by face cap");
    }
    let edges = usage.boundary_edges();
    gate.next_pass("rasterize_outline", edges.len());

    let mut drawn = 0;
    for (i, &edge) in edges.iter().enumerate() {
        if draw_edge(mesh, &mut raster, edge, options.line_width, options.color) {
            drawn += 1;
        }
        if !gate.tick(i + 1) {
            return Err(MeshError::Cancelled {
                stage: "rasterize_outline",
                processed: i + 1,
            });
        }
    }

    info!(
        unique_edges = usage.edge_count(),
        boundary_edges = drawn,
        "rasterized UV outline"
    );
    Ok(OutlineRaster {
        raster,
        boundary_edges: drawn,
        truncation: usage.truncation,
    })
}

/// Options for [`rasterize_wireframe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireframeOptions {
    /// Caps the number of faces drawn
    pub limits: ProcessLimits,
    /// Line color
    pub color: Color,
    /// Background color
    pub background: Color,
    /// Line width in pixels
    pub line_width: u32,
}

impl Default for WireframeOptions {
    fn default() -> Self {
        Self {
            limits: ProcessLimits::default(),
            color: Color::CYAN,
            background: Color::rgb(0x1a, 0x1a, 0x1a),
            line_width: 1,
        }
    }
}

impl WireframeOptions {
    pub fn with_limits(mut self, limits: ProcessLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Result of [`rasterize_wireframe`]
#[derive(Debug, Clone)]
pub struct WireframeRaster {
    pub raster: RasterBuffer,
    /// Number of distinct edges drawn
    pub edges: usize,
    pub truncation: Option<Truncation>,
}

/// Draw every distinct UV edge of the mesh over a solid background.
pub fn rasterize_wireframe(
    mesh: &Mesh,
    width: u32,
    height: u32,
    options: &WireframeOptions,
) -> MeshResult<WireframeRaster> {
    let _timer = OperationTimer::with_items("rasterize_wireframe", mesh.face_count());
    let mut raster = RasterBuffer::new_filled(width, height, options.background)?;

    let (n, truncation) = options.limits.cap(mesh.face_count());
    let edges: BTreeSet<EdgeKey> = mesh.faces[..n]
        .iter()
        .filter_map(|f| f.uvs)
        .flat_map(face_edges)
        .collect();

    let mut drawn = 0;
    for &edge in &edges {
        if draw_edge(mesh, &mut raster, edge, options.line_width, options.color) {
            drawn += 1;
        }
    }
    debug!(edges = drawn, "rasterized UV wireframe");

    Ok(WireframeRaster {
        raster,
        edges: drawn,
        truncation,
    })
}

/// Draw one UV edge; false if either end has no UV coordinate.
fn draw_edge(mesh: &Mesh, raster: &mut RasterBuffer, edge: EdgeKey, width: u32, color: Color) -> bool {
    let (Some(a), Some(b)) = (mesh.uv(edge.0), mesh.uv(edge.1)) else {
        return false;
    };
    let (w, h) = (raster.width(), raster.height());
    let (x1, y1) = uv_to_pixel(a, w, h);
    let (x2, y2) = uv_to_pixel(b, w, h);
    raster.render_line(x1, y1, x2, y2, width, color);
    true
}
