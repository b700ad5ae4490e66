//! UV island segmentation
//!
//! An island is a maximal set of faces connected through shared UV edges.
//! Segmentation visits eligible faces in ascending index order and runs a
//! breadth-first search from each one not yet assigned, so the same mesh
//! always yields the same islands in the same order, with faces listed in
//! BFS order.

use std::collections::{BTreeSet, VecDeque};
use tracing::{info, warn};
use uvmask_core::{OperationTimer, ProcessLimits, ProgressCallback, ProgressGate, Truncation};

use crate::error::{MeshError, MeshResult};
use crate::topology::AdjacencyGraph;
use crate::types::{Mesh, UvBounds, uv_bounds};

/// A connected set of faces in UV space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    /// Face indices in BFS order
    pub faces: Vec<usize>,
    /// Every UV index used by the faces
    pub uv_indices: BTreeSet<u32>,
}

impl Island {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn contains_face(&self, face: usize) -> bool {
        self.faces.contains(&face)
    }

    /// UV bounds of the island's faces.
    pub fn uv_bounds(&self, mesh: &Mesh) -> Option<UvBounds> {
        uv_bounds(mesh, &self.faces)
    }
}

/// Options for [`segment_islands`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Caps the number of faces considered and sets the polling interval
    pub limits: ProcessLimits,
}

impl SegmentOptions {
    pub fn with_limits(mut self, limits: ProcessLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Result of island segmentation
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Islands in discovery order
    pub islands: Vec<Island>,
    /// The adjacency graph the islands were derived from
    pub adjacency: AdjacencyGraph,
    /// Set when a face cap left faces unprocessed
    pub truncation: Option<Truncation>,
    face_island: Vec<Option<usize>>,
}

impl Segmentation {
    /// Index of the island containing `face`.
    pub fn island_index_of(&self, face: usize) -> Option<usize> {
        self.face_island.get(face).copied().flatten()
    }

    /// The island containing `face`, if the face was segmented.
    pub fn island_containing_face(&self, face: usize) -> Option<&Island> {
        self.island_index_of(face).map(|i| &self.islands[i])
    }

    /// Number of faces assigned to some island.
    pub fn segmented_face_count(&self) -> usize {
        self.islands.iter().map(Island::face_count).sum()
    }
}

/// Segment a mesh into UV islands.
///
/// Faces without UVs, and faces beyond the cap in `options.limits`, are
/// not part of any island.
///
/// # Examples
///
/// ```
/// use uvmask_mesh::{Face, Mesh, SegmentOptions, UvCoord, segment_islands};
///
/// let mut mesh = Mesh::new();
/// mesh.uvs = vec![UvCoord::default(); 6];
/// mesh.faces.push(Face::with_uvs([0, 0, 0], [0, 1, 2]));
/// mesh.faces.push(Face::with_uvs([0, 0, 0], [3, 4, 5]));
/// mesh.faces.push(Face::with_uvs([0, 0, 0], [2, 1, 5]));
///
/// let seg = segment_islands(&mesh, &SegmentOptions::default());
/// assert_eq!(seg.islands.len(), 2);
/// assert_eq!(seg.islands[0].faces, vec![0, 2]);
/// ```
pub fn segment_islands(mesh: &Mesh, options: &SegmentOptions) -> Segmentation {
    let (n, truncation) = options.limits.cap(mesh.face_count());
    let mut gate = ProgressGate::disabled("segment_islands");
    match segment(mesh, n, truncation, &mut gate) {
        Some(seg) => seg,
        // A disabled gate never cancels
        None => Segmentation {
            islands: Vec::new(),
            adjacency: AdjacencyGraph::default(),
            truncation,
            face_island: Vec::new(),
        },
    }
}

/// Segment a mesh into UV islands, polling `progress` every
/// `check_interval` faces.
///
/// # Errors
///
/// Returns [`MeshError::Cancelled`] if the callback returns `false`.
pub fn segment_islands_with_progress(
    mesh: &Mesh,
    options: &SegmentOptions,
    progress: ProgressCallback<'_>,
) -> MeshResult<Segmentation> {
    let (n, truncation) = options.limits.cap(mesh.face_count());
    let mut gate = ProgressGate::new("segment_islands", n, &options.limits, Some(progress));
    match segment(mesh, n, truncation, &mut gate) {
        Some(seg) => Ok(seg),
        None => Err(MeshError::Cancelled {
            stage: "segment_islands",
            processed: gate.last_tick(),
        }),
    }
}

fn segment(
    mesh: &Mesh,
    n: usize,
    truncation: Option<Truncation>,
    gate: &mut ProgressGate<'_>,
) -> Option<Segmentation> {
    let _timer = OperationTimer::with_items("segment_islands", n);
    if let Some(t) = &truncation {
        warn!(%t, "island segmentation limited by face cap");
    }

    let adjacency = AdjacencyGraph::build(mesh, n, gate)?;

    let mut face_island: Vec<Option<usize>> = vec![None; n];
    let mut islands = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if face_island[start].is_some() || !adjacency.is_eligible(start) {
            continue;
        }
        let id = islands.len();
        let mut island = Island {
            faces: Vec::new(),
            uv_indices: BTreeSet::new(),
        };

        face_island[start] = Some(id);
        queue.push_back(start);
        while let Some(face) = queue.pop_front() {
            island.faces.push(face);
            if let Some(uvs) = mesh.faces[face].uvs {
                island.uv_indices.extend(uvs);
            }
            for &next in adjacency.neighbors(face) {
                if face_island[next].is_none() {
                    face_island[next] = Some(id);
                    queue.push_back(next);
                }
            }
        }
        islands.push(island);
    }

    info!(
        faces = n,
        islands = islands.len(),
        "segmented UV islands"
    );
    Some(Segmentation {
        islands,
        adjacency,
        truncation,
        face_island,
    })
}
