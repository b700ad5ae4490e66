//! uvmask-color - Color-keyed masks and mask painting
//!
//! This crate provides the component-mask workflow:
//!
//! - [`classify`] - Distinct opaque colors of a mask image, with part names
//! - [`mask`] - Component selection, point queries and image clipping
//! - [`library`] - Caller-owned store of source and saved masks
//! - [`paint`] - Rectangle, polygon, brush, eraser and magic-wand painting
//!
//! # Examples
//!
//! ```
//! use uvmask_core::{Color, RasterBuffer};
//! use uvmask_color::{ColorKey, MaskClassifier};
//!
//! let mut parts = RasterBuffer::new_filled(4, 4, Color::BLUE).unwrap();
//! parts.fill_rect(0, 0, 2, 4, Color::RED);
//!
//! let mut classifier = MaskClassifier::new(parts);
//! classifier.select_component(ColorKey::new(255, 0, 0));
//!
//! let artwork = RasterBuffer::new_filled(4, 4, Color::WHITE).unwrap();
//! let clipped = classifier.apply_mask_to_image(&artwork);
//! assert_eq!(clipped.get_rgba(0, 0), Some([255, 255, 255, 255]));
//! assert_eq!(clipped.get_rgba(3, 0), Some([255, 255, 255, 0]));
//! ```

pub mod classify;
pub mod error;
pub mod library;
pub mod mask;
pub mod paint;

pub use classify::{ColorKey, Component, component_label, extract_colors};
pub use error::{ColorError, ColorResult};
pub use library::{MASK_PALETTE, MaskLibrary, PaletteEntry, SavedMask, SourceMask};
pub use mask::MaskClassifier;
pub use paint::MaskCanvas;
