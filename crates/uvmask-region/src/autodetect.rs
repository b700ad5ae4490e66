//! Automatic component detection
//!
//! Splits a texture into flat-colored areas: pixels whose color differs
//! sharply from their right and lower neighbours form an edge map, and
//! the 4-connected areas between edges that are large enough become
//! components.

use tracing::info;
use uvmask_core::{OperationTimer, RasterBuffer};

use crate::conncomp::{ComponentInfo, LabelMap, label_map};
use crate::error::RegionResult;

/// Options for [`detect_components`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoDetectOptions {
    /// Summed RGB difference to the right and lower neighbours above
    /// which a pixel is an edge
    pub edge_threshold: u32,
    /// Components must have more pixels than this
    pub min_size: usize,
}

impl Default for AutoDetectOptions {
    fn default() -> Self {
        Self {
            edge_threshold: 100,
            min_size: 1000,
        }
    }
}

impl AutoDetectOptions {
    pub fn with_edge_threshold(mut self, threshold: u32) -> Self {
        self.edge_threshold = threshold;
        self
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }
}

/// Result of [`detect_components`]
#[derive(Debug, Clone)]
pub struct DetectedComponents {
    /// Labels of every non-edge area, including ones below `min_size`
    pub labels: LabelMap,
    /// Areas larger than `min_size`, in label order
    pub components: Vec<ComponentInfo>,
}

impl DetectedComponents {
    /// Binary mask of the `index`-th kept component.
    pub fn mask(&self, index: usize) -> Option<RegionResult<RasterBuffer>> {
        self.components
            .get(index)
            .map(|c| self.labels.component_mask(c.label))
    }
}

/// Edge map indexed by `y * width + x`.
///
/// Only interior pixels are tested; the first and last rows and columns
/// are never edges.
pub fn edge_map(buf: &RasterBuffer, threshold: u32) -> Vec<bool> {
    let (w, h) = (buf.width(), buf.height());
    let mut edges = vec![false; w as usize * h as usize];
    if w < 3 || h < 3 {
        return edges;
    }
    let diff = |a: [u8; 4], b: [u8; 4]| -> u32 { (0..3).map(|c| a[c].abs_diff(b[c]) as u32).sum() };
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let here = buf.get_rgba_unchecked(x, y);
            let total = diff(here, buf.get_rgba_unchecked(x + 1, y))
                + diff(here, buf.get_rgba_unchecked(x, y + 1));
            if total > threshold {
                edges[y as usize * w as usize + x as usize] = true;
            }
        }
    }
    edges
}

/// Find large flat-colored areas of a texture.
pub fn detect_components(buf: &RasterBuffer, options: &AutoDetectOptions) -> DetectedComponents {
    let _timer = OperationTimer::with_items("detect_components", buf.pixel_count());
    let edges = edge_map(buf, options.edge_threshold);
    let open: Vec<bool> = edges.iter().map(|&e| !e).collect();
    let labels = label_map(&open, buf.width(), buf.height());

    let components: Vec<ComponentInfo> = labels
        .components()
        .iter()
        .filter(|c| c.pixel_count > options.min_size)
        .copied()
        .collect();

    info!(
        edges = edges.iter().filter(|&&e| e).count(),
        areas = labels.component_count(),
        kept = components.len(),
        "detected components"
    );
    DetectedComponents { labels, components }
}
