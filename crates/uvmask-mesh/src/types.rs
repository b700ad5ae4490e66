//! Mesh data types
//!
//! A [`Mesh`] owns three flat arrays: 3D positions, UV coordinates and
//! triangular faces that index into them. Faces never hold references to
//! vertices, only `u32` indices, so islands and simplified regions can
//! refer back to faces by index as well.

use crate::error::{IndexKind, MeshError, MeshResult};

/// A 3D vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A texture coordinate.
///
/// `v` is stored flipped relative to the OBJ file (`1 - v`), so `v = 0`
/// is the top raster row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvCoord {
    pub u: f32,
    pub v: f32,
}

impl UvCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Position in a `width x height` raster (continuous pixel space).
    #[inline]
    pub fn to_pixel(self, width: u32, height: u32) -> (f32, f32) {
        (self.u * width as f32, self.v * height as f32)
    }
}

/// A triangle.
///
/// UV and normal references are either present for all three corners or
/// absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub vertices: [u32; 3],
    pub uvs: Option<[u32; 3]>,
    pub normals: Option<[u32; 3]>,
}

impl Face {
    /// Triangle with positions only.
    pub const fn new(vertices: [u32; 3]) -> Self {
        Self {
            vertices,
            uvs: None,
            normals: None,
        }
    }

    /// Triangle with positions and UVs.
    pub const fn with_uvs(vertices: [u32; 3], uvs: [u32; 3]) -> Self {
        Self {
            vertices,
            uvs: Some(uvs),
            normals: None,
        }
    }

    /// Whether the face takes part in UV topology.
    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }
}

/// Where a mesh builder gets its triangle corner indices from.
///
/// Indexed geometry carries an explicit list; non-indexed geometry uses
/// every vertex once, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// An explicit index list
    Explicit(Vec<u32>),
    /// Indices `0..count`
    Sequential(usize),
}

impl IndexSource {
    /// Number of indices
    pub fn len(&self) -> usize {
        match self {
            Self::Explicit(list) => list.len(),
            Self::Sequential(count) => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index at position `i`
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::Explicit(list) => list.get(i).copied(),
            Self::Sequential(count) => (i < *count).then_some(i as u32),
        }
    }

    /// Iterate over all indices in order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// A triangle mesh with optional UVs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub uvs: Vec<UvCoord>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from per-vertex attributes and a corner index source.
    ///
    /// UVs, when given, are per vertex: each corner uses the same index for
    /// its position and its UV. Trailing indices that do not form a full
    /// triangle are rejected.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidGeometry`] if the index count is not a
    ///   multiple of 3, or `uvs` is non-empty with a length different
    ///   from `positions`
    /// - [`MeshError::IndexOutOfRange`] if an index exceeds `positions`
    ///
    /// # Examples
    ///
    /// ```
    /// use uvmask_mesh::{IndexSource, Mesh, UvCoord, Vertex};
    ///
    /// let positions = vec![Vertex::new(0.0, 0.0, 0.0); 6];
    /// let uvs = vec![UvCoord::new(0.5, 0.5); 6];
    /// let mesh = Mesh::from_triangles(positions, uvs, IndexSource::Sequential(6)).unwrap();
    /// assert_eq!(mesh.face_count(), 2);
    /// assert_eq!(mesh.faces[1].uvs, Some([3, 4, 5]));
    /// ```
    pub fn from_triangles(
        positions: Vec<Vertex>,
        uvs: Vec<UvCoord>,
        indices: IndexSource,
    ) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::InvalidGeometry(format!(
                "{} indices do not form whole triangles",
                indices.len()
            )));
        }
        if !uvs.is_empty() && uvs.len() != positions.len() {
            return Err(MeshError::InvalidGeometry(format!(
                "{} UVs for {} positions",
                uvs.len(),
                positions.len()
            )));
        }

        let corners: Vec<u32> = indices.iter().collect();
        let mut faces = Vec::with_capacity(corners.len() / 3);
        for (face, tri) in corners.chunks_exact(3).enumerate() {
            for &index in tri {
                if index as usize >= positions.len() {
                    return Err(MeshError::IndexOutOfRange {
                        face,
                        kind: IndexKind::Vertex,
                        index,
                        len: positions.len(),
                    });
                }
            }
            let vertices = [tri[0], tri[1], tri[2]];
            faces.push(Face {
                vertices,
                uvs: (!uvs.is_empty()).then_some(vertices),
                normals: None,
            });
        }

        Ok(Self {
            vertices: positions,
            uvs,
            faces,
        })
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether any face was parsed or built.
    #[inline]
    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// UV coordinate by index, `None` when out of range.
    #[inline]
    pub fn uv(&self, index: u32) -> Option<UvCoord> {
        self.uvs.get(index as usize).copied()
    }

    /// The three UV coordinates of a face.
    ///
    /// `None` if the face does not exist, has no UVs, or references a UV
    /// index past the end of `uvs`.
    pub fn face_uv_coordinates(&self, face: usize) -> Option<[UvCoord; 3]> {
        let [a, b, c] = self.faces.get(face)?.uvs?;
        Some([self.uv(a)?, self.uv(b)?, self.uv(c)?])
    }

    /// Centroid of a face in UV space.
    pub fn face_uv_centroid(&self, face: usize) -> Option<UvCoord> {
        let [a, b, c] = self.face_uv_coordinates(face)?;
        Some(UvCoord::new(
            (a.u + b.u + c.u) / 3.0,
            (a.v + b.v + c.v) / 3.0,
        ))
    }

    /// Check every face index against the vertex and UV arrays.
    ///
    /// # Errors
    ///
    /// Returns the first [`MeshError::IndexOutOfRange`] found, in face order.
    pub fn validate_indices(&self) -> MeshResult<()> {
        for (face, f) in self.faces.iter().enumerate() {
            check_range(face, IndexKind::Vertex, &f.vertices, self.vertices.len())?;
            if let Some(uvs) = &f.uvs {
                check_range(face, IndexKind::Uv, uvs, self.uvs.len())?;
            }
        }
        Ok(())
    }
}

fn check_range(face: usize, kind: IndexKind, indices: &[u32; 3], len: usize) -> MeshResult<()> {
    match indices.iter().find(|&&i| i as usize >= len) {
        Some(&index) => Err(MeshError::IndexOutOfRange {
            face,
            kind,
            index,
            len,
        }),
        None => Ok(()),
    }
}

/// Axis-aligned bounds in UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvBounds {
    pub min_u: f32,
    pub min_v: f32,
    pub max_u: f32,
    pub max_v: f32,
}

impl UvBounds {
    pub fn width(&self) -> f32 {
        self.max_u - self.min_u
    }

    pub fn height(&self) -> f32 {
        self.max_v - self.min_v
    }

    /// Whether `uv` lies inside the bounds (inclusive).
    pub fn contains(&self, uv: UvCoord) -> bool {
        uv.u >= self.min_u && uv.u <= self.max_u && uv.v >= self.min_v && uv.v <= self.max_v
    }
}

/// UV bounds of a set of faces.
///
/// Faces without UVs and UV indices past the end of `uvs` are ignored;
/// `None` if nothing remains.
pub fn uv_bounds(mesh: &Mesh, faces: &[usize]) -> Option<UvBounds> {
    let mut bounds: Option<UvBounds> = None;
    for &face in faces {
        let Some(uvs) = mesh.faces.get(face).and_then(|f| f.uvs) else {
            continue;
        };
        for uv in uvs.iter().filter_map(|&i| mesh.uv(i)) {
            let b = bounds.get_or_insert(UvBounds {
                min_u: uv.u,
                min_v: uv.v,
                max_u: uv.u,
                max_v: uv.v,
            });
            b.min_u = b.min_u.min(uv.u);
            b.min_v = b.min_v.min(uv.v);
            b.max_u = b.max_u.max(uv.u);
            b.max_v = b.max_v.max(uv.v);
        }
    }
    bounds
}
