//! Caller-owned store of mask images
//!
//! A [`MaskLibrary`] holds the named source masks (color-keyed images
//! loaded by the user) and the masks painted and saved during a session.
//! It is an ordinary value passed to whatever needs it; nothing is global.

use tracing::info;
use uvmask_core::{Color, RasterBuffer};

use crate::classify::{Component, extract_colors};
use crate::error::{ColorError, ColorResult};
use crate::mask::MaskClassifier;

/// Suggested mask color with its usual part name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Color,
    pub name: &'static str,
}

/// Colors suggested for successive saved masks.
pub const MASK_PALETTE: [PaletteEntry; 8] = [
    PaletteEntry { color: Color::rgb(255, 0, 0), name: "Red - Body" },
    PaletteEntry { color: Color::rgb(0, 255, 0), name: "Green - Magazine" },
    PaletteEntry { color: Color::rgb(0, 0, 255), name: "Blue - Handle" },
    PaletteEntry { color: Color::rgb(255, 255, 0), name: "Yellow - Barrel" },
    PaletteEntry { color: Color::rgb(255, 0, 255), name: "Magenta - Stock" },
    PaletteEntry { color: Color::rgb(0, 255, 255), name: "Cyan - Trigger" },
    PaletteEntry { color: Color::rgb(255, 128, 0), name: "Orange - Sights" },
    PaletteEntry { color: Color::rgb(128, 0, 255), name: "Purple - Accents" },
];

/// A color-keyed mask image and its components
#[derive(Debug, Clone)]
pub struct SourceMask {
    pub name: String,
    pub image: RasterBuffer,
    pub components: Vec<Component>,
}

/// A painted mask saved from a [`MaskCanvas`](crate::MaskCanvas)
#[derive(Debug, Clone)]
pub struct SavedMask {
    pub name: String,
    pub color: Color,
    pub image: RasterBuffer,
}

/// Named source masks and saved painted masks of one texture size
#[derive(Debug, Clone)]
pub struct MaskLibrary {
    width: u32,
    height: u32,
    sources: Vec<SourceMask>,
    saved: Vec<SavedMask>,
}

impl MaskLibrary {
    /// Empty library for masks of `width x height`.
    pub fn new(width: u32, height: u32) -> ColorResult<Self> {
        if width == 0 || height == 0 {
            return Err(ColorError::InvalidParameters(format!(
                "mask size {width}x{height} must be non-zero"
            )));
        }
        Ok(Self {
            width,
            height,
            sources: Vec::new(),
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn check_size(&self, image: &RasterBuffer) -> ColorResult<()> {
        if image.width() != self.width || image.height() != self.height {
            return Err(uvmask_core::Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (image.width(), image.height()),
            }
            .into());
        }
        Ok(())
    }

    /// Register a source mask, replacing any mask of the same name.
    ///
    /// Returns the mask's components, largest first.
    pub fn add_source(&mut self, name: &str, image: RasterBuffer) -> ColorResult<&[Component]> {
        self.check_size(&image)?;
        let entry = SourceMask {
            name: name.to_string(),
            components: extract_colors(&image),
            image,
        };
        info!(name, components = entry.components.len(), "added source mask");

        let index = match self.sources.iter().position(|s| s.name == name) {
            Some(i) => {
                self.sources[i] = entry;
                i
            }
            None => {
                self.sources.push(entry);
                self.sources.len() - 1
            }
        };
        Ok(&self.sources[index].components)
    }

    pub fn source(&self, name: &str) -> Option<&SourceMask> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Source mask names in registration order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Components of a source mask; empty if the name is unknown.
    pub fn components(&self, name: &str) -> &[Component] {
        self.source(name).map_or(&[], |s| s.components.as_slice())
    }

    /// Classifier over a copy of the named source mask.
    pub fn classifier(&self, name: &str) -> ColorResult<MaskClassifier> {
        self.source(name)
            .map(|s| MaskClassifier::new(s.image.clone()))
            .ok_or_else(|| ColorError::UnknownMask(name.to_string()))
    }

    /// Save a painted mask; returns its index.
    pub fn save_mask(&mut self, name: &str, color: Color, image: RasterBuffer) -> ColorResult<usize> {
        self.check_size(&image)?;
        self.saved.push(SavedMask {
            name: name.to_string(),
            color,
            image,
        });
        info!(name, total = self.saved.len(), "saved mask");
        Ok(self.saved.len() - 1)
    }

    pub fn saved_masks(&self) -> &[SavedMask] {
        &self.saved
    }

    pub fn saved(&self, index: usize) -> Option<&SavedMask> {
        self.saved.get(index)
    }

    /// Suggested color for the next saved mask.
    pub fn next_mask_color(&self) -> PaletteEntry {
        MASK_PALETTE[self.saved.len() % MASK_PALETTE.len()]
    }

    /// All saved masks composited in order over an opaque black image.
    ///
    /// Each mask is drawn source-over, so transparent pixels leave what
    /// lies beneath.
    pub fn combined(&self) -> ColorResult<RasterBuffer> {
        let mut out = RasterBuffer::new_filled(self.width, self.height, Color::BLACK)?;
        for mask in &self.saved {
            let dst = out.pixels_mut();
            for (d, s) in dst.chunks_exact_mut(4).zip(mask.image.pixels().chunks_exact(4)) {
                let a = s[3] as u32;
                if a == 0 {
                    continue;
                }
                for c in 0..3 {
                    d[c] = ((s[c] as u32 * a + d[c] as u32 * (255 - a) + 127) / 255) as u8;
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_checked() {
        let mut lib = MaskLibrary::new(4, 4).unwrap();
        let wrong = RasterBuffer::new(4, 5).unwrap();
        assert!(lib.add_source("parts", wrong.clone()).is_err());
        assert!(lib.save_mask("body", Color::RED, wrong).is_err());
        assert!(MaskLibrary::new(0, 4).is_err());
    }

    #[test]
    fn test_sources_replace_by_name() {
        let mut lib = MaskLibrary::new(2, 2).unwrap();
        lib.add_source("parts", RasterBuffer::new_filled(2, 2, Color::RED).unwrap())
            .unwrap();
        lib.add_source("alt", RasterBuffer::new_filled(2, 2, Color::BLUE).unwrap())
            .unwrap();
        let components = lib
            .add_source("parts", RasterBuffer::new_filled(2, 2, Color::GREEN).unwrap())
            .unwrap();
        assert_eq!(components[0].label, "Magazine");
        assert_eq!(lib.source_names(), vec!["parts", "alt"]);
        assert!(lib.components("missing").is_empty());
        assert!(matches!(lib.classifier("missing"), Err(ColorError::UnknownMask(_))));
    }

    #[test]
    fn test_palette_cycles() {
        let mut lib = MaskLibrary::new(1, 1).unwrap();
        assert_eq!(lib.next_mask_color().name, "Red - Body");
        for i in 0..8 {
            let color = lib.next_mask_color().color;
            lib.save_mask(&format!("m{i}"), color, RasterBuffer::new(1, 1).unwrap())
                .unwrap();
        }
        assert_eq!(lib.next_mask_color(), MASK_PALETTE[0]);
    }

    #[test]
    fn test_combined_draws_in_order() {
        let mut lib = MaskLibrary::new(3, 1).unwrap();
        let mut first = RasterBuffer::new(3, 1).unwrap();
        first.fill_rect(0, 0, 2, 1, Color::RED);
        let mut second = RasterBuffer::new(3, 1).unwrap();
        second.fill_rect(1, 0, 1, 1, Color::BLUE);
        lib.save_mask("a", Color::RED, first).unwrap();
        lib.save_mask("b", Color::BLUE, second).unwrap();

        let combined = lib.combined().unwrap();
        assert_eq!(combined.get_rgba(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(combined.get_rgba(1, 0), Some([0, 0, 255, 255]));
        assert_eq!(combined.get_rgba(2, 0), Some([0, 0, 0, 255]));
    }
}
