//! uvmask - UV-space mesh topology and raster mask engine
//!
//! Turns a textured mesh and its texture into masks:
//!
//! - Parse OBJ text and segment it into UV islands
//! - Rasterize island fills, boundary outlines and wireframes
//! - Decode TGA and PNG textures and mask images
//! - Clean masks up with binary morphology and simplify drawn UV sheets
//! - Grow regions, classify color-keyed masks and clip artwork to them
//!
//! [`UvSession`] ties the mesh stages together at one texture size.
//!
//! # Example
//!
//! ```
//! use uvmask::{OutlineOptions, ParseOptions, SegmentOptions, UvSession};
//!
//! let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
//!            vt 0.125 0.125\nvt 0.875 0.125\nvt 0.875 0.875\nvt 0.125 0.875\n\
//!            f 1/1 2/2 3/3\nf 1/1 3/3 4/4\n";
//! let session =
//!     UvSession::from_obj(obj, &ParseOptions::default(), &SegmentOptions::default(), 64, 64)
//!         .unwrap();
//! assert_eq!(session.islands().len(), 1);
//!
//! let outline = session.outline(&OutlineOptions::default()).unwrap();
//! assert_eq!(outline.boundary_edges, 4);
//! ```

mod error;
pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use uvmask_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use uvmask_color as color;
pub use uvmask_io as io;
pub use uvmask_mesh as mesh;
pub use uvmask_morph as morph;
pub use uvmask_region as region;

pub use error::{UvError, UvResult};
pub use session::{SimplifiedIsland, SimplifiedRegions, UvSession};
pub use uvmask_mesh::{OutlineOptions, ParseOptions, SegmentOptions};
pub use uvmask_morph::SimplifyOptions;
