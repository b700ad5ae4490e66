//! Component selection and mask clipping
//!
//! A [`MaskClassifier`] owns one mask image and at most one active
//! selection: the binary mask of a single component color. Selecting a
//! component replaces the previous selection wholesale. Without a
//! selection the classifier is unconstrained: every in-bounds point is
//! inside and clipping leaves images unchanged.

use tracing::{debug, info};
use uvmask_core::{OFF, ON, OPAQUE_THRESHOLD, RasterBuffer};

use crate::classify::{ColorKey, Component, extract_colors};

#[derive(Debug, Clone)]
struct Selection {
    color: ColorKey,
    mask: RasterBuffer,
    pixel_count: usize,
}

/// Mask image with an optional active component selection
#[derive(Debug, Clone)]
pub struct MaskClassifier {
    source: RasterBuffer,
    components: Vec<Component>,
    selection: Option<Selection>,
}

impl MaskClassifier {
    /// Classify the colors of a mask image.
    pub fn new(source: RasterBuffer) -> Self {
        let components = extract_colors(&source);
        Self {
            source,
            components,
            selection: None,
        }
    }

    pub fn source(&self) -> &RasterBuffer {
        &self.source
    }

    /// Components of the mask image, largest first.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn width(&self) -> u32 {
        self.source.width()
    }

    pub fn height(&self) -> u32 {
        self.source.height()
    }

    /// Select the component with the given color.
    ///
    /// A mask pixel is on when its RGB equals `color` and its alpha
    /// exceeds 128. Colors absent from the image select an empty mask.
    /// Returns the new binary mask.
    pub fn select_component(&mut self, color: ColorKey) -> &RasterBuffer {
        let mut mask = self.source.clone();
        let mut pixel_count = 0usize;
        for px in mask.pixels_mut().chunks_exact_mut(4) {
            let hit = color.matches([px[0], px[1], px[2], px[3]]) && px[3] > OPAQUE_THRESHOLD;
            px.copy_from_slice(if hit { &ON } else { &OFF });
            pixel_count += usize::from(hit);
        }
        info!(%color, pixels = pixel_count, "selected mask component");

        &self
            .selection
            .insert(Selection {
                color,
                mask,
                pixel_count,
            })
            .mask
    }

    /// Drop the active selection.
    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Color of the active selection.
    pub fn selected_color(&self) -> Option<ColorKey> {
        self.selection.as_ref().map(|s| s.color)
    }

    /// Binary mask of the active selection.
    pub fn active_mask(&self) -> Option<&RasterBuffer> {
        self.selection.as_ref().map(|s| &s.mask)
    }

    /// Number of on pixels in the active selection.
    pub fn selected_pixel_count(&self) -> usize {
        self.selection.as_ref().map_or(0, |s| s.pixel_count)
    }

    /// Whether mask-space point `(x, y)` is inside the active selection.
    ///
    /// Points outside the mask image are always outside, even with no
    /// selection. With no selection every point inside the image counts
    /// as inside, so painting is unconstrained only within the mask bounds.
    pub fn is_point_in_mask(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        match &self.selection {
            Some(sel) => sel.mask.is_on(x as u32, y as u32),
            None => true,
        }
    }

    /// Clip `image` to the active selection.
    ///
    /// Each image pixel maps to mask pixel
    /// `(floor(x * mask_w / image_w), floor(y * mask_h / image_h))`; pixels
    /// mapping outside the selection get alpha 0. The input is not
    /// modified.
    pub fn apply_mask_to_image(&self, image: &RasterBuffer) -> RasterBuffer {
        let mut out = image.clone();
        if self.selection.is_none() {
            return out;
        }

        let (iw, ih) = (image.width() as u64, image.height() as u64);
        let (mw, mh) = (self.width() as u64, self.height() as u64);
        let mut cleared = 0usize;
        for y in 0..image.height() {
            let my = (y as u64 * mh / ih) as i64;
            for x in 0..image.width() {
                let mx = (x as u64 * mw / iw) as i64;
                if !self.is_point_in_mask(mx, my) {
                    out.set_alpha_unchecked(x, y, 0);
                    cleared += 1;
                }
            }
        }
        debug!(cleared, "applied mask to image");
        out
    }

    /// Tinted preview of the active selection.
    ///
    /// On pixels take the selected color at alpha `floor(opacity * 255)`;
    /// everything else is transparent. `None` without a selection.
    pub fn mask_overlay(&self, opacity: f32) -> Option<RasterBuffer> {
        let sel = self.selection.as_ref()?;
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
        let tint = sel.color.to_color().with_alpha(alpha).to_rgba();

        let mut out = sel.mask.clone();
        for px in out.pixels_mut().chunks_exact_mut(4) {
            let on = uvmask_core::raster::is_on([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(if on { &tint } else { &[0, 0, 0, 0] });
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvmask_core::Color;

    fn two_color_source() -> RasterBuffer {
        let mut buf = RasterBuffer::new_filled(4, 2, Color::RED).unwrap();
        buf.fill_rect(2, 0, 2, 2, Color::BLUE);
        buf.set_rgba(0, 1, [255, 0, 0, 128]).unwrap();
        buf
    }

    #[test]
    fn test_no_selection_is_unconstrained() {
        let classifier = MaskClassifier::new(two_color_source());
        assert!(classifier.is_point_in_mask(3, 1));
        assert!(!classifier.is_point_in_mask(4, 0));
        assert!(!classifier.is_point_in_mask(-1, 0));
        let image = RasterBuffer::new_filled(8, 8, Color::WHITE).unwrap();
        assert_eq!(classifier.apply_mask_to_image(&image), image);
        assert!(classifier.mask_overlay(0.5).is_none());
    }

    #[test]
    fn test_select_requires_alpha_above_128() {
        let mut classifier = MaskClassifier::new(two_color_source());
        let mask = classifier.select_component(ColorKey::new(255, 0, 0));
        assert_eq!(mask.count_on(), 3);
        assert!(classifier.is_point_in_mask(0, 0));
        assert!(!classifier.is_point_in_mask(0, 1));
        assert!(!classifier.is_point_in_mask(2, 0));
        assert_eq!(classifier.selected_pixel_count(), 3);
    }

    #[test]
    fn test_selection_replaced() {
        let mut classifier = MaskClassifier::new(two_color_source());
        classifier.select_component(ColorKey::new(255, 0, 0));
        classifier.select_component(ColorKey::new(0, 0, 255));
        assert_eq!(classifier.selected_color(), Some(ColorKey::new(0, 0, 255)));
        assert!(classifier.is_point_in_mask(2, 0));
        assert!(!classifier.is_point_in_mask(0, 0));

        classifier.clear();
        assert!(classifier.active_mask().is_none());
        assert!(classifier.is_point_in_mask(0, 0));
    }

    #[test]
    fn test_apply_scales_to_image() {
        let mut classifier = MaskClassifier::new(two_color_source());
        classifier.select_component(ColorKey::new(0, 0, 255));
        // 8x4 image: mask column = x / 2, so x >= 4 is inside
        let image = RasterBuffer::new_filled(8, 4, Color::GREEN).unwrap();
        let clipped = classifier.apply_mask_to_image(&image);
        assert_eq!(clipped.get_rgba(3, 0), Some([0, 255, 0, 0]));
        assert_eq!(clipped.get_rgba(4, 3), Some([0, 255, 0, 255]));
        assert_eq!(image.get_rgba(3, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_overlay_alpha() {
        let mut classifier = MaskClassifier::new(two_color_source());
        classifier.select_component(ColorKey::new(0, 0, 255));
        let overlay = classifier.mask_overlay(0.3).unwrap();
        assert_eq!(overlay.get_rgba(2, 0), Some([0, 0, 255, 76]));
        assert_eq!(overlay.get_rgba(0, 0), Some([0, 0, 0, 0]));
    }
}
