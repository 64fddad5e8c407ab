//! Color schemes for the head panel.
//!
//! A scheme bundles the source marker palette (addressed by a point's
//! `color_index`) with the colors used for the panel chrome: background,
//! boundary ring, listener head and the emphasis ring of the active source.

use egui::{Color32, Context, Visuals};

/// Colors used to draw everything that is not a source marker.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelColors {
    pub background: Color32,
    pub boundary: Color32,
    pub listener: Color32,
    /// Border drawn around the active source.
    pub emphasis: Color32,
    pub label: Color32,
}

/// Visual theme for the panel, including user-defined custom schemes.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
    SolarizedDark,
    Nord,
    /// Pure-black background with maximally-saturated sources.
    HighContrast,
    Custom(CustomColorScheme),
}

/// User-defined custom color scheme.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomColorScheme {
    /// Visuals for the egui context (falls back to dark).
    pub visuals: Option<Visuals>,
    pub palette: Vec<Color32>,
    pub panel: PanelColors,
    pub label: Option<String>,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Dark,
            ColorScheme::Light,
            ColorScheme::SolarizedDark,
            ColorScheme::Nord,
            ColorScheme::HighContrast,
        ]
    }

    pub fn label(&self) -> String {
        match self {
            ColorScheme::Dark => "Dark".to_string(),
            ColorScheme::Light => "Light".to_string(),
            ColorScheme::SolarizedDark => "Solarized Dark".to_string(),
            ColorScheme::Nord => "Nord".to_string(),
            ColorScheme::HighContrast => "High Contrast".to_string(),
            ColorScheme::Custom(custom) => {
                custom.label.clone().unwrap_or_else(|| "Custom".to_string())
            }
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        let visuals = match self {
            ColorScheme::Light => Visuals::light(),
            ColorScheme::Custom(custom) => custom.visuals.clone().unwrap_or_else(Visuals::dark),
            _ => {
                let mut v = Visuals::dark();
                let panel = self.panel_colors();
                v.panel_fill = panel.background;
                v.extreme_bg_color = panel.background;
                v
            }
        };
        ctx.set_visuals(visuals);
    }

    /// Source marker palette. Never empty.
    pub fn source_colors(&self) -> Vec<Color32> {
        match self {
            ColorScheme::Dark => vec![
                Color32::from_rgb(31, 119, 180),
                Color32::from_rgb(255, 127, 14),
                Color32::from_rgb(44, 160, 44),
                Color32::from_rgb(214, 39, 40),
                Color32::from_rgb(148, 103, 189),
                Color32::from_rgb(227, 119, 194),
            ],
            ColorScheme::Light => vec![
                Color32::from_rgb(228, 26, 28),
                Color32::from_rgb(55, 126, 184),
                Color32::from_rgb(77, 175, 74),
                Color32::from_rgb(152, 78, 163),
                Color32::from_rgb(255, 127, 0),
                Color32::from_rgb(166, 86, 40),
            ],
            ColorScheme::SolarizedDark => vec![
                Color32::from_rgb(181, 137, 0),
                Color32::from_rgb(203, 75, 22),
                Color32::from_rgb(220, 50, 47),
                Color32::from_rgb(211, 54, 130),
                Color32::from_rgb(108, 113, 196),
                Color32::from_rgb(42, 161, 152),
            ],
            ColorScheme::Nord => vec![
                Color32::from_rgb(136, 192, 208),
                Color32::from_rgb(191, 97, 106),
                Color32::from_rgb(208, 135, 112),
                Color32::from_rgb(235, 203, 139),
                Color32::from_rgb(163, 190, 140),
                Color32::from_rgb(180, 142, 173),
            ],
            ColorScheme::HighContrast => vec![
                Color32::from_rgb(255, 0, 0),
                Color32::from_rgb(0, 255, 0),
                Color32::from_rgb(0, 128, 255),
                Color32::from_rgb(255, 255, 0),
                Color32::from_rgb(255, 0, 255),
                Color32::from_rgb(0, 255, 255),
            ],
            ColorScheme::Custom(custom) if !custom.palette.is_empty() => custom.palette.clone(),
            ColorScheme::Custom(_) => ColorScheme::Dark.source_colors(),
        }
    }

    pub fn panel_colors(&self) -> PanelColors {
        match self {
            ColorScheme::Dark => PanelColors {
                background: Color32::from_rgb(27, 27, 27),
                boundary: Color32::from_rgb(90, 90, 90),
                listener: Color32::from_rgb(200, 200, 200),
                emphasis: Color32::WHITE,
                label: Color32::from_rgb(220, 220, 220),
            },
            ColorScheme::Light => PanelColors {
                background: Color32::from_rgb(245, 245, 245),
                boundary: Color32::from_rgb(170, 170, 170),
                listener: Color32::from_rgb(60, 60, 60),
                emphasis: Color32::BLACK,
                label: Color32::from_rgb(40, 40, 40),
            },
            ColorScheme::SolarizedDark => PanelColors {
                background: Color32::from_rgb(0, 43, 54),
                boundary: Color32::from_rgb(88, 110, 117),
                listener: Color32::from_rgb(147, 161, 161),
                emphasis: Color32::from_rgb(253, 246, 227),
                label: Color32::from_rgb(131, 148, 150),
            },
            ColorScheme::Nord => PanelColors {
                background: Color32::from_rgb(46, 52, 64),
                boundary: Color32::from_rgb(76, 86, 106),
                listener: Color32::from_rgb(216, 222, 233),
                emphasis: Color32::from_rgb(236, 239, 244),
                label: Color32::from_rgb(229, 233, 240),
            },
            ColorScheme::HighContrast => PanelColors {
                background: Color32::BLACK,
                boundary: Color32::WHITE,
                listener: Color32::WHITE,
                emphasis: Color32::WHITE,
                label: Color32::WHITE,
            },
            ColorScheme::Custom(custom) => custom.panel.clone(),
        }
    }

    /// Palette lookup that wraps around for indices past the end.
    pub fn source_color(&self, color_index: usize) -> Color32 {
        let palette = self.source_colors();
        palette[color_index % palette.len()]
    }
}
