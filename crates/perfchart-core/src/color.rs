// File: crates/perfchart-core/src/color.rs
// Summary: RGBA colors parsed from hex strings or a handful of named colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Grey level in matplotlib's "0.8" sense: 0.0 is black, 1.0 is white.
    pub fn grey(level: f32) -> Self {
        let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(v, v, v)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Composite over an opaque background; used by outputs without alpha support.
    pub fn over(self, bg: Color) -> Color {
        let a = self.a as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Color::rgb(mix(self.r, bg.r), mix(self.g, bg.g), mix(self.b, bg.b))
    }

    /// Components as 0..1 floats, the way PostScript `setrgbcolor` wants them.
    pub fn unit_rgb(&self) -> (f32, f32, f32) {
        (self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0)
    }

    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "black" | "k" => Color::BLACK,
            "white" | "w" => Color::WHITE,
            "red" | "r" => Color::rgb(255, 0, 0),
            "green" | "g" => Color::rgb(0, 128, 0),
            "blue" | "b" => Color::rgb(0, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "tomato" => Color::rgb(0xFF, 0x63, 0x47),
            "royalblue" => Color::rgb(0x41, 0x69, 0xE1),
            "mediumseagreen" => Color::rgb(0x3C, 0xB3, 0x71),
            "gold" => Color::rgb(0xFF, 0xD7, 0x00),
            "indigo" => Color::rgb(0x4B, 0x00, 0x82),
            "orange" => Color::rgb(0xFF, 0xA5, 0x00),
            "purple" => Color::rgb(0x80, 0x00, 0x80),
            _ => return None,
        };
        Some(c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}': expected #RRGGBB, #RRGGBBAA or a color name", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseColorError(s.to_string());

        let Some(hex) = s.strip_prefix('#') else {
            return Color::named(&s.to_ascii_lowercase()).ok_or_else(err);
        };
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
