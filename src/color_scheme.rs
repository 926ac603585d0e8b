//! Color schemes for the scatter viewer.
//!
//! A scheme supplies the egui visuals, the opaque plot background the point
//! renderer clears to, the axis/overlay ink, and a default category palette.
//! Palettes are plain values handed to [`ColorTable`](crate::data::color_table::ColorTable);
//! there is no process-wide palette.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

use crate::data::color_table::{Rgba, DEFAULT_PALETTE};

/// Visual theme for the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// White plot area, egui light visuals.
    #[default]
    Light,
    /// egui dark visuals.
    Dark,
    /// Solarized Dark.
    SolarizedDark,
    /// Nord: blue-grey dark theme.
    Nord,
    /// Pure-black background with maximally-saturated colours.
    HighContrast,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Light,
            ColorScheme::Dark,
            ColorScheme::SolarizedDark,
            ColorScheme::Nord,
            ColorScheme::HighContrast,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
            ColorScheme::SolarizedDark => "Solarized Dark",
            ColorScheme::Nord => "Nord",
            ColorScheme::HighContrast => "High Contrast",
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::SolarizedDark => {
                let mut v = Visuals::dark();
                let base03 = Color32::from_rgb(0, 43, 54);
                let base02 = Color32::from_rgb(7, 54, 66);
                let base0 = Color32::from_rgb(131, 148, 150);
                v.panel_fill = base03;
                v.window_fill = base02;
                v.extreme_bg_color = base03;
                v.faint_bg_color = base02;
                v.override_text_color = Some(base0);
                ctx.set_visuals(v);
            }
            ColorScheme::Nord => {
                let mut v = Visuals::dark();
                let polar0 = Color32::from_rgb(46, 52, 64);
                let polar1 = Color32::from_rgb(59, 66, 82);
                v.panel_fill = polar0;
                v.window_fill = polar1;
                v.extreme_bg_color = polar0;
                v.faint_bg_color = polar1;
                v.override_text_color = Some(Color32::from_rgb(216, 222, 233));
                ctx.set_visuals(v);
            }
            ColorScheme::HighContrast => {
                let mut v = Visuals::dark();
                v.panel_fill = Color32::BLACK;
                v.window_fill = Color32::from_rgb(10, 10, 10);
                v.extreme_bg_color = Color32::BLACK;
                v.override_text_color = Some(Color32::WHITE);
                ctx.set_visuals(v);
            }
        }
    }

    /// Opaque background the points are composited over.
    pub fn plot_background(&self) -> Rgba {
        match self {
            ColorScheme::Light => Rgba::WHITE,
            ColorScheme::Dark => Rgba::rgb(27, 27, 27),
            ColorScheme::SolarizedDark => Rgba::rgb(0, 43, 54),
            ColorScheme::Nord => Rgba::rgb(46, 52, 64),
            ColorScheme::HighContrast => Rgba::BLACK,
        }
    }

    /// Ink for axes, ticks and the hover ring.
    pub fn foreground(&self) -> Rgba {
        match self {
            ColorScheme::Light => Rgba::rgb(51, 51, 51),
            ColorScheme::Dark => Rgba::rgb(200, 200, 200),
            ColorScheme::SolarizedDark => Rgba::rgb(131, 148, 150),
            ColorScheme::Nord => Rgba::rgb(216, 222, 233),
            ColorScheme::HighContrast => Rgba::WHITE,
        }
    }

    /// Default category palette for this scheme.
    pub fn category_palette(&self) -> Vec<Rgba> {
        match self {
            ColorScheme::Light | ColorScheme::Dark => DEFAULT_PALETTE.to_vec(),
            ColorScheme::SolarizedDark => vec![
                Rgba::rgb(181, 137, 0),
                Rgba::rgb(203, 75, 22),
                Rgba::rgb(220, 50, 47),
                Rgba::rgb(211, 54, 130),
                Rgba::rgb(108, 113, 196),
                Rgba::rgb(38, 139, 210),
                Rgba::rgb(42, 161, 152),
                Rgba::rgb(133, 153, 0),
            ],
            ColorScheme::Nord => vec![
                Rgba::rgb(136, 192, 208),
                Rgba::rgb(191, 97, 106),
                Rgba::rgb(163, 190, 140),
                Rgba::rgb(235, 203, 139),
                Rgba::rgb(180, 142, 173),
                Rgba::rgb(208, 135, 112),
                Rgba::rgb(94, 129, 172),
                Rgba::rgb(129, 161, 193),
            ],
            ColorScheme::HighContrast => vec![
                Rgba::rgb(255, 0, 0),
                Rgba::rgb(0, 255, 0),
                Rgba::rgb(0, 128, 255),
                Rgba::rgb(255, 255, 0),
                Rgba::rgb(255, 0, 255),
                Rgba::rgb(0, 255, 255),
                Rgba::rgb(255, 128, 0),
                Rgba::WHITE,
            ],
        }
    }
}
