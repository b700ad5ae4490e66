//! uvmask-mesh - Mesh text parsing, UV topology and island masks
//!
//! This crate turns OBJ text into a [`Mesh`] and derives everything the
//! mask tools need from its UV layout:
//!
//! - [`obj`] - OBJ subset parser with per-line skipping and fan
//!   triangulation
//! - [`topology`] - UV edge keys, face adjacency and edge usage counts
//! - [`island`] - Deterministic BFS segmentation into UV islands
//! - [`raster`] - Face fill, boundary outline and wireframe rasterization
//!
//! # Example
//!
//! ```
//! use uvmask_core::Color;
//! use uvmask_mesh::{ParseOptions, SegmentOptions, parse_obj, rasterize_faces, segment_islands};
//!
//! let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\n\
//!             vt 0.1 0.1\nvt 0.9 0.1\nvt 0.9 0.9\n\
//!             f 1/1 2/2 3/3\n";
//! let mesh = parse_obj(text, &ParseOptions::default()).unwrap().mesh;
//! let seg = segment_islands(&mesh, &SegmentOptions::default());
//! let mask = rasterize_faces(&mesh, &seg.islands[0].faces, 32, 32, Color::WHITE).unwrap();
//! assert!(mask.count_on() > 0);
//! ```

pub mod error;
pub mod island;
pub mod obj;
pub mod raster;
pub mod topology;
pub mod types;

pub use error::{IndexKind, MeshError, MeshResult};
pub use island::{Island, SegmentOptions, Segmentation, segment_islands, segment_islands_with_progress};
pub use obj::{ParseOptions, ParseReport, ParsedMesh, parse_obj, parse_obj_with_progress};
pub use raster::{
    OutlineOptions, OutlineRaster, WireframeOptions, WireframeRaster, face_coverage,
    rasterize_faces, rasterize_outline, rasterize_outline_with_progress, rasterize_wireframe,
    uv_to_pixel,
};
pub use topology::{AdjacencyGraph, EdgeKey, EdgeUsage, boundary_edges, edge_usage, face_edges};
pub use types::{Face, IndexSource, Mesh, UvBounds, UvCoord, Vertex, uv_bounds};
