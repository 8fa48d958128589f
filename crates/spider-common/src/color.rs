//! Line colors for spider charts.
//!
//! Colors are written either as single-letter shorthands (`b`, `r`, `g`,
//! `m`, `y`) or as `#RRGGBB` / `#RRGGBBAA` hex strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SpiderError;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const MAGENTA: Color = Color::rgb(191, 0, 191);
    pub const YELLOW: Color = Color::rgb(191, 191, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRID: Color = Color::rgb(176, 176, 176);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with its alpha replaced by `alpha` in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a hex color string (`#RRGGBB` or `#RRGGBBAA`, leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Some(Self { r, g, b, a })
    }

    /// Color for a single-letter shorthand.
    pub fn from_shorthand(code: &str) -> Option<Self> {
        match code {
            "b" => Some(Self::BLUE),
            "r" => Some(Self::RED),
            "g" => Some(Self::GREEN),
            "m" => Some(Self::MAGENTA),
            "y" => Some(Self::YELLOW),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = SpiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Color::from_shorthand(s)
            .or_else(|| {
                if s.starts_with('#') {
                    Color::from_hex(s)
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                SpiderError::InvalidColor(format!(
                    "'{}' is not one of b, r, g, m, y or a #RRGGBB hex value",
                    s
                ))
            })
    }
}

impl TryFrom<String> for Color {
    type Error = SpiderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// An ordered list of colors that is cycled when more charts than colors
/// need one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<Color>);

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            Color::BLUE,
            Color::RED,
            Color::GREEN,
            Color::MAGENTA,
            Color::YELLOW,
        ])
    }
}

impl Palette {
    /// Assign `count` colors by walking the palette and wrapping around.
    pub fn cycle(&self, count: usize) -> Vec<Color> {
        if self.0.is_empty() {
            return vec![Color::BLACK; count];
        }
        self.0.iter().copied().cycle().take(count).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
