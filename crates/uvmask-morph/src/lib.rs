//! uvmask-morph - Binary morphology for UV masks
//!
//! This crate provides the mask clean-up operations:
//!
//! - [`binary`] - Dilation, erosion, closing, opening and outline
//!   extraction with a square structuring element
//! - [`simplify`] - UV sheet simplification (binarize, close, outline)

pub mod binary;
mod error;
pub mod simplify;

pub use binary::{close, dilate, erode, extract_outline, open};
pub use error::{MorphError, MorphResult};
pub use simplify::{
    SimplifiedSheet, SimplifyOptions, binarize_sheet, overlay_outline, simplify_sheet,
};
