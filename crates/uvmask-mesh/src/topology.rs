//! UV-space face adjacency
//!
//! Two faces are neighbours when they share a UV edge, i.e. the same
//! unordered pair of UV indices. Faces that share 3D positions but use
//! different UV indices along a seam are not neighbours.
//!
//! The graph is built by bucketing every face edge under its [`EdgeKey`]
//! and connecting all faces found in the same bucket, which is linear in
//! the number of face edges. Buckets with more than two faces
//! (non-manifold seams) connect every pair.

use std::collections::HashMap;
use tracing::debug;
use uvmask_core::{ProcessLimits, ProgressGate, Truncation};

use crate::types::Mesh;

/// Unordered UV edge, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(pub u32, pub u32);

impl EdgeKey {
    /// Key for the edge between two UV indices, in either order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// Whether both ends are the same UV index.
    pub fn is_degenerate(&self) -> bool {
        self.0 == self.1
    }
}

/// The three UV edges of a face's UV triple.
#[inline]
pub fn face_edges(uvs: [u32; 3]) -> [EdgeKey; 3] {
    [
        EdgeKey::new(uvs[0], uvs[1]),
        EdgeKey::new(uvs[1], uvs[2]),
        EdgeKey::new(uvs[2], uvs[0]),
    ]
}

/// Face adjacency through shared UV edges.
///
/// Symmetric: `b` is in `neighbors(a)` iff `a` is in `neighbors(b)`.
/// Neighbour lists are sorted ascending and contain no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<usize>>,
    eligible: Vec<bool>,
}

impl AdjacencyGraph {
    /// Build the graph over the first `face_limit` faces.
    ///
    /// `gate` is ticked once per face; returns `None` if it asks to stop.
    pub fn build(mesh: &Mesh, face_limit: usize, gate: &mut ProgressGate<'_>) -> Option<Self> {
        let n = face_limit.min(mesh.face_count());
        let mut eligible = vec![false; n];
        let mut buckets: HashMap<EdgeKey, Vec<usize>> = HashMap::with_capacity(n * 3 / 2);

        for (face, f) in mesh.faces[..n].iter().enumerate() {
            if let Some(uvs) = f.uvs {
                eligible[face] = true;
                for key in face_edges(uvs) {
                    buckets.entry(key).or_default().push(face);
                }
            }
            if !gate.tick(face + 1) {
                return None;
            }
        }

        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for faces in buckets.values().filter(|faces| faces.len() >= 2) {
            for (i, &a) in faces.iter().enumerate() {
                for &b in &faces[i + 1..] {
                    if a != b {
                        neighbors[a].push(b);
                        neighbors[b].push(a);
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        debug!(
            faces = n,
            edges = buckets.len(),
            "built UV adjacency"
        );
        Some(Self {
            neighbors,
            eligible,
        })
    }

    /// Number of faces covered by the graph.
    pub fn face_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbours of `face`; empty for faces outside the graph.
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.neighbors.get(face).map_or(&[], |v| v.as_slice())
    }

    /// Whether `face` has UVs and lies within the processed range.
    pub fn is_eligible(&self, face: usize) -> bool {
        self.eligible.get(face).copied().unwrap_or(false)
    }

    /// Number of undirected adjacency links.
    pub fn link_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// How many faces use each UV edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeUsage {
    counts: HashMap<EdgeKey, u32>,
    /// Set when a face cap stopped the count early
    pub truncation: Option<Truncation>,
}

impl EdgeUsage {
    /// Count edge usage over the faces allowed by `limits`.
    ///
    /// Faces without UVs contribute nothing.
    pub fn count(mesh: &Mesh, limits: &ProcessLimits) -> Self {
        let mut gate = ProgressGate::disabled("edge_usage");
        Self::count_gated(mesh, limits, &mut gate).unwrap_or_default()
    }

    /// [`EdgeUsage::count`], ticking `gate` once per face.
    ///
    /// Returns `None` if the gate asks to stop.
    pub fn count_gated(mesh: &Mesh, limits: &ProcessLimits, gate: &mut ProgressGate<'_>) -> Option<Self> {
        let (n, truncation) = limits.cap(mesh.face_count());
        let mut counts: HashMap<EdgeKey, u32> = HashMap::with_capacity(n * 3 / 2);
        for (face, f) in mesh.faces[..n].iter().enumerate() {
            if let Some(uvs) = f.uvs {
                for key in face_edges(uvs) {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
            if !gate.tick(face + 1) {
                return None;
            }
        }
        Some(Self { counts, truncation })
    }

    /// Number of faces using `edge`.
    pub fn usage(&self, edge: EdgeKey) -> u32 {
        self.counts.get(&edge).copied().unwrap_or(0)
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.counts.len()
    }

    /// Edges used by exactly one face, sorted.
    pub fn boundary_edges(&self) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .counts
            .iter()
            .filter(|&(_, &c)| c == 1)
            .map(|(&k, _)| k)
            .collect();
        edges.sort_unstable();
        edges
    }
}

/// Count UV edge usage over the faces allowed by `limits`.
pub fn edge_usage(mesh: &Mesh, limits: &ProcessLimits) -> EdgeUsage {
    EdgeUsage::count(mesh, limits)
}

/// UV edges used by exactly one face, sorted.
pub fn boundary_edges(mesh: &Mesh, limits: &ProcessLimits) -> Vec<EdgeKey> {
    EdgeUsage::count(mesh, limits).boundary_edges()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Face, UvCoord};

    fn mesh_with_uv_faces(faces: &[[u32; 3]]) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.uvs = vec![UvCoord::default(); 16];
        mesh.faces = faces.iter().map(|&uv| Face::with_uvs([0, 0, 0], uv)).collect();
        mesh
    }

    #[test]
    fn test_edge_key_unordered() {
        assert_eq!(EdgeKey::new(5, 2), EdgeKey::new(2, 5));
        assert_eq!(EdgeKey::new(5, 2), EdgeKey(2, 5));
        assert!(EdgeKey::new(3, 3).is_degenerate());
    }

    #[test]
    fn test_adjacency_symmetric_and_sorted() {
        // Fan of three triangles around UV 0, plus a detached one
        let mesh = mesh_with_uv_faces(&[[0, 1, 2], [0, 2, 3], [0, 3, 4], [7, 8, 9]]);
        let graph = AdjacencyGraph::build(&mesh, usize::MAX, &mut ProgressGate::disabled("t")).unwrap();
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert!(graph.neighbors(3).is_empty());
        assert_eq!(graph.link_count(), 2);
        for a in 0..4 {
            for &b in graph.neighbors(a) {
                assert!(graph.neighbors(b).contains(&a));
            }
        }
    }

    #[test]
    fn test_non_manifold_edge_connects_all() {
        let mesh = mesh_with_uv_faces(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);
        let graph = AdjacencyGraph::build(&mesh, usize::MAX, &mut ProgressGate::disabled("t")).unwrap();
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(2), &[0, 1]);
    }

    #[test]
    fn test_degenerate_face_does_not_panic() {
        let mesh = mesh_with_uv_faces(&[[1, 1, 2], [1, 2, 3]]);
        let graph = AdjacencyGraph::build(&mesh, usize::MAX, &mut ProgressGate::disabled("t")).unwrap();
        assert_eq!(graph.neighbors(0), &[1]);
        assert!(graph.is_eligible(0));
    }

    #[test]
    fn test_faces_without_uvs_not_eligible() {
        let mut mesh = mesh_with_uv_faces(&[[0, 1, 2]]);
        mesh.faces.push(Face::new([0, 1, 2]));
        let graph = AdjacencyGraph::build(&mesh, usize::MAX, &mut ProgressGate::disabled("t")).unwrap();
        assert!(graph.is_eligible(0));
        assert!(!graph.is_eligible(1));
        assert!(!graph.is_eligible(99));
    }

    #[test]
    fn test_edge_usage_boundary() {
        let mesh = mesh_with_uv_faces(&[[0, 1, 2], [0, 2, 3]]);
        let usage = edge_usage(&mesh, &ProcessLimits::default());
        assert_eq!(usage.edge_count(), 5);
        assert_eq!(usage.usage(EdgeKey::new(2, 0)), 2);
        assert_eq!(
            usage.boundary_edges(),
            vec![EdgeKey(0, 1), EdgeKey(0, 3), EdgeKey(1, 2), EdgeKey(2, 3)]
        );

        let capped = edge_usage(&mesh, &ProcessLimits::default().with_max_items(1));
        assert_eq!(capped.boundary_edges().len(), 3);
        assert!(capped.truncation.is_some());
    }
}
