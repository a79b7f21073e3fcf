// File: crates/perfchart-core/src/theme.rs
// Summary: Named style presets (backgrounds, grid, spines, text, palette).

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Ten-color series palette used when a series has no explicit color.
pub const DEEP_PALETTE: [Color; 10] = [
    Color::rgb(0x4C, 0x72, 0xB0),
    Color::rgb(0xDD, 0x84, 0x52),
    Color::rgb(0x55, 0xA8, 0x68),
    Color::rgb(0xC4, 0x4E, 0x52),
    Color::rgb(0x81, 0x72, 0xB3),
    Color::rgb(0x93, 0x78, 0x60),
    Color::rgb(0xDA, 0x8B, 0xC3),
    Color::rgb(0x8C, 0x8C, 0x8C),
    Color::rgb(0xCC, 0xB9, 0x74),
    Color::rgb(0x64, 0xB5, 0xCD),
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Theme {
    // Never deserialized field-wise (try_from); skipping drops serde's `'de: 'static` bound.
    #[serde(skip_deserializing)]
    pub name: &'static str,
    pub figure_background: Color,
    pub axes_background: Color,
    pub grid: Color,
    pub grid_width: f32,
    /// Whether horizontal/vertical grid lines are on unless the config says otherwise.
    pub grid_by_default: bool,
    pub spine: Color,
    pub spine_width: f32,
    pub text: Color,
    /// Outward tick mark length in points; 0 draws no tick marks.
    pub tick_length: f32,
    pub legend_background: Color,
    pub legend_edge: Color,
    pub palette: [Color; 10],
}

impl Theme {
    pub fn whitegrid() -> Self {
        Self {
            name: "whitegrid",
            figure_background: Color::WHITE,
            axes_background: Color::WHITE,
            grid: Color::grey(0.8),
            grid_width: 1.0,
            grid_by_default: true,
            spine: Color::grey(0.8),
            spine_width: 1.25,
            text: Color::grey(0.15),
            tick_length: 0.0,
            legend_background: Color::WHITE.with_alpha(204),
            legend_edge: Color::grey(0.8),
            palette: DEEP_PALETTE,
        }
    }

    pub fn darkgrid() -> Self {
        Self {
            name: "darkgrid",
            axes_background: Color::rgb(0xEA, 0xEA, 0xF2),
            grid: Color::WHITE,
            spine: Color::WHITE,
            legend_edge: Color::WHITE,
            ..Self::whitegrid()
        }
    }

    pub fn white() -> Self {
        Self {
            name: "white",
            grid_by_default: false,
            spine: Color::grey(0.15),
            ..Self::whitegrid()
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            grid_by_default: false,
            ..Self::darkgrid()
        }
    }

    pub fn ticks() -> Self {
        Self {
            name: "ticks",
            tick_length: 3.5,
            ..Self::white()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::whitegrid()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::whitegrid(),
        Theme::darkgrid(),
        Theme::white(),
        Theme::dark(),
        Theme::ticks(),
    ]
}

/// Find a preset by its `name`, ignoring ASCII case.
pub fn find(name: &str) -> Option<Theme> {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

impl TryFrom<String> for Theme {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        find(&value).ok_or_else(|| {
            let known: Vec<&str> = presets().iter().map(|t| t.name).collect();
            format!("unknown theme '{value}' (known: {})", known.join(", "))
        })
    }
}

impl From<Theme> for String {
    fn from(t: Theme) -> Self {
        t.name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("WhiteGrid").map(|t| t.name), Some("whitegrid"));
        assert_eq!(find("ticks").map(|t| t.tick_length), Some(3.5));
        assert!(find("solarized").is_none());
    }

    #[test]
    fn preset_names_are_unique() {
        let mut names: Vec<_> = presets().iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), presets().len());
    }

    #[test]
    fn grid_defaults_follow_the_preset() {
        assert!(Theme::whitegrid().grid_by_default);
        assert!(Theme::darkgrid().grid_by_default);
        assert!(!Theme::white().grid_by_default);
        assert!(!Theme::dark().grid_by_default);
    }

    #[test]
    fn unknown_name_is_rejected_by_serde() {
        let err = serde_json::from_str::<Theme>("\"neon\"").unwrap_err();
        assert!(err.to_string().contains("unknown theme 'neon'"));
    }
}
