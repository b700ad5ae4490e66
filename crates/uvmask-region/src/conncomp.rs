//! Connected component labelling
//!
//! Labels 4-connected groups of on pixels. Labels are 1-based and
//! assigned in raster order of each component's first pixel; 0 marks
//! background. The walk uses an explicit stack, so component size is
//! bounded by memory rather than call depth.

use tracing::debug;
use uvmask_core::RasterBuffer;

use crate::error::RegionResult;

/// Inclusive pixel bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    /// Box containing the single pixel `(x, y)`.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow to include `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Summary of one labelled component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentInfo {
    /// 1-based label
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: usize,
    /// Bounding box of this component
    pub bounds: PixelBounds,
}

/// Per-pixel component labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    components: Vec<ComponentInfo>,
}

impl LabelMap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at `(x, y)`; 0 for background and out-of-bounds points.
    pub fn label(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.labels[y as usize * self.width as usize + x as usize]
    }

    /// Raw labels indexed by `y * width + x`.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Components ordered by label.
    pub fn components(&self) -> &[ComponentInfo] {
        &self.components
    }

    /// Component with the given label.
    pub fn component(&self, label: u32) -> Option<&ComponentInfo> {
        label
            .checked_sub(1)
            .and_then(|i| self.components.get(i as usize))
    }

    /// Binary mask of one component.
    pub fn component_mask(&self, label: u32) -> RegionResult<RasterBuffer> {
        let map: Vec<bool> = self.labels.iter().map(|&l| l != 0 && l == label).collect();
        Ok(RasterBuffer::from_on_map(self.width, self.height, &map)?)
    }
}

/// Label the 4-connected on-pixel components of a binary mask.
///
/// # Examples
///
/// ```
/// use uvmask_core::{RasterBuffer, ON};
/// use uvmask_region::label_components;
///
/// let mut mask = RasterBuffer::new(5, 1).unwrap();
/// mask.set_rgba(0, 0, ON).unwrap();
/// mask.set_rgba(1, 0, ON).unwrap();
/// mask.set_rgba(3, 0, ON).unwrap();
/// let labels = label_components(&mask);
/// assert_eq!(labels.component_count(), 2);
/// assert_eq!(labels.label(3, 0), 2);
/// ```
pub fn label_components(mask: &RasterBuffer) -> LabelMap {
    label_map(&mask.on_map(), mask.width(), mask.height())
}

/// Label the 4-connected `true` regions of a map indexed by `y * width + x`.
pub(crate) fn label_map(map: &[bool], width: u32, height: u32) -> LabelMap {
    let (w, h) = (width as usize, height as usize);
    let mut labels = vec![0u32; w * h];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..w * h {
        if !map[start] || labels[start] != 0 {
            continue;
        }
        let label = components.len() as u32 + 1;
        let (sx, sy) = ((start % w) as u32, (start / w) as u32);
        let mut info = ComponentInfo {
            label,
            pixel_count: 0,
            bounds: PixelBounds::at(sx, sy),
        };

        labels[start] = label;
        stack.push(start);
        while let Some(i) = stack.pop() {
            let (x, y) = (i % w, i / w);
            info.pixel_count += 1;
            info.bounds.include(x as u32, y as u32);

            let mut visit = |j: usize| {
                if map[j] && labels[j] == 0 {
                    labels[j] = label;
                    stack.push(j);
                }
            };
            if x > 0 {
                visit(i - 1);
            }
            if x + 1 < w {
                visit(i + 1);
            }
            if y > 0 {
                visit(i - w);
            }
            if y + 1 < h {
                visit(i + w);
            }
        }
        components.push(info);
    }

    debug!(components = components.len(), "labelled components");
    LabelMap {
        width,
        height,
        labels,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(rows: &[&str]) -> (Vec<bool>, u32, u32) {
        let map = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        (map, rows[0].len() as u32, rows.len() as u32)
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let (map, w, h) = map_from(&["#.", ".#"]);
        let labels = label_map(&map, w, h);
        assert_eq!(labels.component_count(), 2);
        assert_eq!(labels.label(0, 0), 1);
        assert_eq!(labels.label(1, 1), 2);
    }

    #[test]
    fn test_component_stats() {
        let (map, w, h) = map_from(&["##..#", "#...#", "..###"]);
        let labels = label_map(&map, w, h);
        assert_eq!(labels.component_count(), 2);
        let first = labels.component(1).unwrap();
        assert_eq!(first.pixel_count, 3);
        assert_eq!(first.bounds, PixelBounds { min_x: 0, min_y: 0, max_x: 1, max_y: 1 });
        let second = labels.component(2).unwrap();
        assert_eq!(second.pixel_count, 5);
        assert_eq!((second.bounds.width(), second.bounds.height()), (3, 3));
        assert!(labels.component(0).is_none());
        assert!(labels.component(3).is_none());
    }

    #[test]
    fn test_out_of_bounds_is_background() {
        let (map, w, h) = map_from(&["##"]);
        let labels = label_map(&map, w, h);
        assert_eq!(labels.label(5, 0), 0);
        assert_eq!(labels.component_mask(1).unwrap().count_on(), 2);
        assert_eq!(labels.component_mask(0).unwrap().count_on(), 0);
    }
}
