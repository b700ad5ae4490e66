//! Color-keyed component extraction
//!
//! A mask image paints each part of a model in its own flat color. Every
//! distinct opaque RGB value is one component, named by a fixed table of
//! approximate color ranges.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uvmask_core::{Color, OPAQUE_THRESHOLD, RasterBuffer};

/// Exact RGB value identifying a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Key of an RGBA pixel, ignoring alpha.
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Whether the pixel's RGB equals this key.
    #[inline]
    pub fn matches(&self, px: [u8; 4]) -> bool {
        px[0] == self.r && px[1] == self.g && px[2] == self.b
    }

    /// Opaque color with this RGB.
    pub const fn to_color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }
}

impl From<Color> for ColorKey {
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// One distinct color of a mask image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub color: ColorKey,
    /// Part name derived from the color
    pub label: String,
    /// Number of opaque pixels with this color
    pub pixel_count: usize,
}

/// Part name for a component color.
///
/// The first matching rule wins:
///
/// | Rule                        | Label       |
/// |-----------------------------|-------------|
/// | r > 200, g < 100, b < 100   | Body/Main   |
/// | g > 200, r < 100, b < 100   | Magazine    |
/// | b > 200, r < 100, g < 100   | Barrel      |
/// | r > 200, g > 200, b < 100   | Stock       |
/// | r > 200, b > 200, g < 100   | Grip        |
/// | all < 100                   | Receiver    |
/// | all > 200                   | Accents     |
///
/// Anything else is `Component (r,g,b)`.
pub fn component_label(color: ColorKey) -> String {
    let ColorKey { r, g, b } = color;
    let label = match () {
        _ if r > 200 && g < 100 && b < 100 => "Body/Main",
        _ if g > 200 && r < 100 && b < 100 => "Magazine",
        _ if b > 200 && r < 100 && g < 100 => "Barrel",
        _ if r > 200 && g > 200 && b < 100 => "Stock",
        _ if r > 200 && b > 200 && g < 100 => "Grip",
        _ if r < 100 && g < 100 && b < 100 => "Receiver",
        _ if r > 200 && g > 200 && b > 200 => "Accents",
        _ => return format!("Component ({r},{g},{b})"),
    };
    label.to_string()
}

/// Distinct opaque colors of a mask image.
///
/// Pixels with alpha below 128 are skipped. Components are sorted by
/// descending pixel count; equal counts keep the order in which the
/// colors first appear in raster order.
///
/// # Examples
///
/// ```
/// use uvmask_core::{Color, RasterBuffer};
/// use uvmask_color::extract_colors;
///
/// let mut buf = RasterBuffer::new_filled(2, 2, Color::RED).unwrap();
/// buf.set_rgba(1, 1, Color::GREEN.to_rgba()).unwrap();
/// let components = extract_colors(&buf);
/// assert_eq!(components[0].label, "Body/Main");
/// assert_eq!(components[0].pixel_count, 3);
/// assert_eq!(components[1].label, "Magazine");
/// ```
pub fn extract_colors(buf: &RasterBuffer) -> Vec<Component> {
    let mut slots: HashMap<ColorKey, usize> = HashMap::new();
    let mut components: Vec<Component> = Vec::new();
    for (_, _, px) in buf.iter_pixels() {
        if px[3] < OPAQUE_THRESHOLD {
            continue;
        }
        let color = ColorKey::from_rgba(px);
        let slot = *slots.entry(color).or_insert_with(|| {
            components.push(Component {
                color,
                label: component_label(color),
                pixel_count: 0,
            });
            components.len() - 1
        });
        components[slot].pixel_count += 1;
    }

    // Stable sort keeps first-seen order among equal counts
    components.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count));

    debug!(components = components.len(), "extracted mask colors");
    components
}
