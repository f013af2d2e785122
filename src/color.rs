use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::Species;

/// Histogram fill.
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
/// Histogram bar edges.
pub const EDGE: Color32 = Color32::BLACK;
/// Line chart stroke and markers.
pub const LINE: Color32 = Color32::from_rgb(0x1F, 0x77, 0xB4);

/// First entries of the "deep" categorical palette.
const DEEP: [Color32; 10] = [
    Color32::from_rgb(0x4C, 0x72, 0xB0),
    Color32::from_rgb(0xDD, 0x84, 0x52),
    Color32::from_rgb(0x55, 0xA8, 0x68),
    Color32::from_rgb(0xC4, 0x4E, 0x52),
    Color32::from_rgb(0x81, 0x72, 0xB3),
    Color32::from_rgb(0x93, 0x78, 0x60),
    Color32::from_rgb(0xDA, 0x8B, 0xC3),
    Color32::from_rgb(0x8C, 0x8C, 0x8C),
    Color32::from_rgb(0xCC, 0xB9, 0x74),
    Color32::from_rgb(0x64, 0xB5, 0xCD),
];

/// Viridis control points, evenly spaced over `[0, 1]`.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3B, 0x52, 0x8B),
    (0x21, 0x91, 0x8C),
    (0x5E, 0xC9, 0x62),
    (0xFD, 0xE7, 0x25),
];

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generators
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// `n` categorical colours: the deep palette, then evenly spaced hues.
pub fn deep_palette(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = DEEP.iter().copied().take(n).collect();
    if n > DEEP.len() {
        colors.extend(generate_palette(n - DEEP.len()));
    }
    colors
}

/// Sample the viridis colormap at position `t` in `[0, 1]`.
pub fn viridis_at(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS.len() - 1) as f32;
    let scaled = t * segments;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let local = scaled - lo as f32;

    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = linear(VIRIDIS[lo]).mix(linear(VIRIDIS[lo + 1]), local);
    to_color32(Srgb::from_linear(mixed))
}

/// `n` colours from viridis, skipping the two extremes.
pub fn viridis_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| viridis_at((i + 1) as f32 / (n + 1) as f32))
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// Maps label categories to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Species, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign the deep palette to `categories` in the order given.
    pub fn new(categories: &[Species]) -> Self {
        let mapping = categories
            .iter()
            .copied()
            .zip(deep_palette(categories.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_have_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
        assert_eq!(deep_palette(3), DEEP[..3].to_vec());
        assert_eq!(deep_palette(12).len(), 12);
        assert_eq!(viridis_palette(3).len(), 3);
    }

    #[test]
    fn viridis_endpoints_match_control_points() {
        assert_eq!(viridis_at(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(viridis_at(1.0), Color32::from_rgb(0xFD, 0xE7, 0x25));
        assert_eq!(viridis_at(0.5), Color32::from_rgb(0x21, 0x91, 0x8C));
    }

    #[test]
    fn color_map_is_distinct_per_species() {
        let map = ColorMap::new(&Species::ALL);
        let colors: Vec<Color32> = Species::ALL.iter().map(|&sp| map.color_for(sp)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_eq!(map.color_for(Species::Setosa), DEEP[0]);

        let partial = ColorMap::new(&[Species::Virginica]);
        assert_eq!(partial.color_for(Species::Setosa), Color32::GRAY);
    }
}
