use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Technique;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: technique → Color32
// ---------------------------------------------------------------------------

/// Maps each collision-resolution technique to a fixed distinct colour, so
/// a technique keeps its colour across filter changes and both metric tabs.
#[derive(Debug, Clone)]
pub struct TechniqueColors {
    mapping: BTreeMap<Technique, Color32>,
    default_color: Color32,
}

impl Default for TechniqueColors {
    fn default() -> Self {
        let palette = generate_palette(Technique::ALL.len());
        let mapping: BTreeMap<Technique, Color32> = Technique::ALL
            .iter()
            .copied()
            .zip(palette.into_iter())
            .collect();

        TechniqueColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl TechniqueColors {
    /// Look up the colour for a technique.
    pub fn color_for(&self, technique: Technique) -> Color32 {
        self.mapping
            .get(&technique)
            .copied()
            .unwrap_or(self.default_color)
    }
}
