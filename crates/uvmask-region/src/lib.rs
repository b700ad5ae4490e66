//! uvmask-region - Region growing and component labelling
//!
//! This crate provides the pixel-region tools behind the mask painter:
//!
//! - [`grow`] - Color-tolerance region growing from a seed (magic wand)
//! - [`conncomp`] - 4-connected component labelling of binary masks
//! - [`autodetect`] - Edge-separated flat-color area detection
//!
//! Every walk is iterative with a preallocated visited map.
//!
//! # Examples
//!
//! ```
//! use uvmask_core::{Color, RasterBuffer};
//! use uvmask_region::region_grow;
//!
//! let mut buf = RasterBuffer::new_filled(10, 10, Color::BLACK).unwrap();
//! buf.fill_rect(2, 2, 4, 4, Color::WHITE);
//!
//! let region = region_grow(&buf, 3, 3, 10).unwrap();
//! assert_eq!(region.len(), 16);
//! ```

pub mod autodetect;
pub mod conncomp;
mod error;
pub mod grow;

pub use autodetect::{AutoDetectOptions, DetectedComponents, detect_components, edge_map};
pub use conncomp::{ComponentInfo, LabelMap, PixelBounds, label_components};
pub use error::{RegionError, RegionResult};
pub use grow::{GrownRegion, region_grow};
