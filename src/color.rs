use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{self, Color32};
use palette::{Hsl, IntoColor, Srgb};

/// Accent colour for bars, lines and headings.
pub const SPOTIFY_GREEN: Color32 = Color32::from_rgb(0x1D, 0xB9, 0x54);
/// Secondary series colour (the clean group in the box plot).
pub const SPOTIFY_GREY: Color32 = Color32::from_rgb(0xB3, 0xB3, 0xB3);
pub const BACKGROUND: Color32 = Color32::from_rgb(0x12, 0x12, 0x12);
pub const SIDEBAR: Color32 = Color32::BLACK;

/// Dark theme with the green accent.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = SIDEBAR;
    visuals.selection.bg_fill = SPOTIFY_GREEN;
    visuals.hyperlink_color = SPOTIFY_GREEN;
    ctx.set_visuals(visuals);
}

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
// Genre → Color32
// ---------------------------------------------------------------------------

/// Swatch colours for the genre multi-select.
#[derive(Debug, Clone)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl GenreColors {
    pub fn new(genres: &BTreeSet<String>) -> Self {
        let palette = generate_palette(genres.len());
        let mapping = genres.iter().cloned().zip(palette).collect();

        GenreColors {
            mapping,
            default_color: SPOTIFY_GREY,
        }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping
            .get(genre)
            .copied()
            .unwrap_or(self.default_color)
    }
}
