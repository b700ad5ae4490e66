//! uvmask-test - Regression test harness for the uvmask engine
//!
//! Every crate's `tests/*_reg.rs` file drives its checks through
//! [`RegParams`], which numbers each comparison, records failures instead
//! of panicking on the first one, and reports all of them at
//! [`RegParams::cleanup`]:
//!
//! ```
//! use uvmask_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The [`fixtures`] module builds the small meshes, TGA streams and
//! rasters the regression tests share.
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: `compare` (default) or `display`. Display mode also
//!   prints ASCII renderings of the masks passed to [`RegParams::show_mask`].

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
