//! OBJ text parsing
//!
//! Reads the subset of Wavefront OBJ the UV tools need:
//!
//! - `v x y z` vertex positions
//! - `vt u v` texture coordinates, stored with `v` flipped to `1 - v`
//! - `f a[/b[/c]] ...` faces; polygons are fan-triangulated
//!
//! Normals (`vn`) are counted so relative normal indices resolve, but not
//! stored. Comments, groups, objects, materials and smoothing groups are
//! ignored.
//!
//! Lines that cannot be read (missing coordinates, faces with fewer than
//! three corners, corners that mix UV and non-UV references) are skipped
//! and counted. A face index that is not an integer, is zero, or resolves
//! before the start of its array aborts the parse, as does (by default)
//! any index past the end of its array once parsing is done.

use crate::error::{MeshError, MeshResult};
use crate::types::{Face, Mesh, UvCoord, Vertex};
use tracing::{debug, info, warn};
use uvmask_core::{OperationTimer, ProcessLimits, ProgressCallback, ProgressGate, Truncation};

/// Options for [`parse_obj`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Caps the number of lines read and sets the polling interval
    pub limits: ProcessLimits,
    /// Reject faces whose indices fall outside the parsed arrays
    pub validate_indices: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: ProcessLimits::default(),
            validate_indices: true,
        }
    }
}

impl ParseOptions {
    pub fn with_limits(mut self, limits: ProcessLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_validate_indices(mut self, validate: bool) -> Self {
        self.validate_indices = validate;
        self
    }
}

/// Statistics about a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Lines read
    pub lines: usize,
    /// Lines skipped as unreadable
    pub skipped_lines: usize,
    /// Set when the line cap stopped the parse early
    pub truncated: Option<Truncation>,
}

/// A parsed mesh and its report
#[derive(Debug, Clone)]
pub struct ParsedMesh {
    pub mesh: Mesh,
    pub report: ParseReport,
}

/// Parse OBJ text.
///
/// An input with no faces is not an error; check
/// [`Mesh::has_faces`](crate::Mesh::has_faces).
///
/// # Examples
///
/// ```
/// use uvmask_mesh::{ParseOptions, parse_obj};
///
/// let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
///             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
///             f 1/1 2/2 3/3 4/4\n";
/// let parsed = parse_obj(text, &ParseOptions::default()).unwrap();
/// assert_eq!(parsed.mesh.face_count(), 2);
/// assert_eq!(parsed.mesh.uvs[0].v, 1.0);
/// ```
pub fn parse_obj(text: &str, options: &ParseOptions) -> MeshResult<ParsedMesh> {
    parse_obj_with_progress(text, options, None)
}

/// Parse OBJ text, polling `progress` every `check_interval` lines.
///
/// # Errors
///
/// Returns [`MeshError::Cancelled`] if the callback returns `false`, in
/// addition to the errors of [`parse_obj`].
pub fn parse_obj_with_progress(
    text: &str,
    options: &ParseOptions,
    progress: Option<ProgressCallback<'_>>,
) -> MeshResult<ParsedMesh> {
    let total = text.lines().count();
    let _timer = OperationTimer::with_items("parse_obj", total);
    let (limit, truncated) = options.limits.cap(total);
    let mut gate = ProgressGate::new("parse_obj", limit, &options.limits, progress);

    let mut parser = ObjParser::default();
    for (i, line) in text.lines().take(limit).enumerate() {
        parser.line(i + 1, line)?;
        if !gate.tick(i + 1) {
            return Err(MeshError::Cancelled {
                stage: "parse_obj",
                processed: i + 1,
            });
        }
    }

    if let Some(t) = &truncated {
        warn!(%t, "OBJ parse stopped at line cap");
    }

    let mesh = parser.mesh;
    if options.validate_indices {
        mesh.validate_indices()?;
    }

    info!(
        vertices = mesh.vertices.len(),
        uvs = mesh.uvs.len(),
        faces = mesh.faces.len(),
        skipped = parser.skipped,
        "parsed OBJ"
    );

    Ok(ParsedMesh {
        mesh,
        report: ParseReport {
            lines: limit,
            skipped_lines: parser.skipped,
            truncated,
        },
    })
}

#[derive(Default)]
struct ObjParser {
    mesh: Mesh,
    normal_count: usize,
    skipped: usize,
}

/// One corner of a face line, resolved to 0-based indices
struct Corner {
    vertex: u32,
    uv: Option<u32>,
    normal: Option<u32>,
}

impl ObjParser {
    fn line(&mut self, line_no: usize, raw: &str) -> MeshResult<()> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };
        match keyword {
            "v" => match parse_floats::<3>(tokens) {
                Some([x, y, z]) => self.mesh.vertices.push(Vertex::new(x, y, z)),
                None => self.skip(line_no, "vertex needs three numeric coordinates"),
            },
            "vt" => match parse_floats::<2>(tokens) {
                Some([u, v]) => self.mesh.uvs.push(UvCoord::new(u, 1.0 - v)),
                None => self.skip(line_no, "texture coordinate needs two numeric values"),
            },
            "vn" => self.normal_count += 1,
            "f" => self.face(line_no, tokens)?,
            _ => {}
        }
        Ok(())
    }

    fn skip(&mut self, line_no: usize, reason: &str) {
        debug!(line = line_no, reason, "skipping OBJ line");
        self.skipped += 1;
    }

    fn face<'a>(
        &mut self,
        line_no: usize,
        refs: impl Iterator<Item = &'a str>,
    ) -> MeshResult<()> {
        let mut corners = Vec::new();
        for r in refs {
            corners.push(self.corner(line_no, r)?);
        }
        if corners.len() < 3 {
            self.skip(line_no, "face needs at least three corners");
            return Ok(());
        }

        let with_uv = corners.iter().filter(|c| c.uv.is_some()).count();
        if with_uv != 0 && with_uv != corners.len() {
            self.skip(line_no, "face mixes corners with and without UVs");
            return Ok(());
        }
        let with_normal = corners.iter().filter(|c| c.normal.is_some()).count();
        let has_normals = with_normal == corners.len();

        // Fan: (0, i, i + 1)
        let first = &corners[0];
        for pair in corners[1..].windows(2) {
            let tri = [first, &pair[0], &pair[1]];
            let uvs = if with_uv != 0 {
                tri.iter()
                    .map(|c| c.uv)
                    .collect::<Option<Vec<u32>>>()
                    .map(|v| [v[0], v[1], v[2]])
            } else {
                None
            };
            let normals = if has_normals {
                tri.iter()
                    .map(|c| c.normal)
                    .collect::<Option<Vec<u32>>>()
                    .map(|v| [v[0], v[1], v[2]])
            } else {
                None
            };
            self.mesh.faces.push(Face {
                vertices: [tri[0].vertex, tri[1].vertex, tri[2].vertex],
                uvs,
                normals,
            });
        }
        Ok(())
    }

    fn corner(&self, line_no: usize, r: &str) -> MeshResult<Corner> {
        let mut parts = r.split('/');
        let vertex = match parts.next() {
            Some(s) if !s.is_empty() => resolve_index(line_no, s, self.mesh.vertices.len())?,
            _ => {
                return Err(MeshError::Parse {
                    line: line_no,
                    message: format!("face corner '{r}' has no vertex index"),
                });
            }
        };
        let uv = match parts.next() {
            Some(s) if !s.is_empty() => Some(resolve_index(line_no, s, self.mesh.uvs.len())?),
            _ => None,
        };
        let normal = match parts.next() {
            Some(s) if !s.is_empty() => Some(resolve_index(line_no, s, self.normal_count)?),
            _ => None,
        };
        Ok(Corner { vertex, uv, normal })
    }
}

/// Resolve a 1-based or negative (relative) OBJ index to 0-based.
fn resolve_index(line_no: usize, token: &str, current_len: usize) -> MeshResult<u32> {
    let parse_err = |message: String| MeshError::Parse {
        line: line_no,
        message,
    };
    let value: i64 = token
        .parse()
        .map_err(|_| parse_err(format!("'{token}' is not an integer index")))?;
    let resolved = match value {
        0 => return Err(parse_err("index 0 is not valid in OBJ".to_string())),
        v if v > 0 => v - 1,
        v => current_len as i64 + v,
    };
    if resolved < 0 {
        return Err(parse_err(format!(
            "relative index {value} reaches before the first of {current_len} entries"
        )));
    }
    u32::try_from(resolved).map_err(|_| parse_err(format!("index {value} is too large")))
}

fn parse_floats<'a, const N: usize>(mut tokens: impl Iterator<Item = &'a str>) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        let value: f32 = tokens.next()?.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    Some(out)
}
