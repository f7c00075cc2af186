use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
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

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Sequential scale: count → yellow / orange / red
// ---------------------------------------------------------------------------

/// Anchor colours of the YlOrRd scale, light to dark.
const YL_OR_RD: [(u8, u8, u8); 5] = [
    (255, 255, 204),
    (254, 217, 118),
    (253, 141, 60),
    (227, 26, 28),
    (128, 0, 38),
];

/// Colour for `value` on a YlOrRd scale spanning `0..=max`.
pub fn sequential_color(value: usize, max: usize) -> Color32 {
    let t = if max == 0 {
        0.0
    } else {
        (value as f32 / max as f32).clamp(0.0, 1.0)
    };

    let segments = (YL_OR_RD.len() - 1) as f32;
    let pos = t * segments;
    let lo = (pos.floor() as usize).min(YL_OR_RD.len() - 2);
    let frac = pos - lo as f32;

    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = linear(YL_OR_RD[lo]).mix(linear(YL_OR_RD[lo + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

// ---------------------------------------------------------------------------
// Color mapping: status → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (launch statuses) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the category labels. Duplicates are ignored.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: Vec<&str> = labels.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let palette = generate_palette(keys.len());
        let mapping = keys
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_sequential_endpoints() {
        assert_eq!(sequential_color(0, 10), Color32::from_rgb(255, 255, 204));
        assert_eq!(sequential_color(10, 10), Color32::from_rgb(128, 0, 38));
        assert_eq!(sequential_color(0, 0), Color32::from_rgb(255, 255, 204));
    }

    #[test]
    fn test_sequential_darkens() {
        let lum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(lum(sequential_color(2, 10)) > lum(sequential_color(8, 10)));
    }

    #[test]
    fn test_color_map_is_order_independent() {
        let a = ColorMap::new(["Active", "Decayed", "Unknown"]);
        let b = ColorMap::new(["Unknown", "Active", "Decayed", "Active"]);
        for label in ["Active", "Decayed", "Unknown"] {
            assert_eq!(a.color_for(label), b.color_for(label));
        }
        assert_eq!(a.color_for("Lost"), Color32::GRAY);
    }
}
