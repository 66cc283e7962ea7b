//! Color model and SVG color encoding
//!
//! Colors are plain values passed per call. Encoding is a pure function:
//! the same `Color` always yields the same attribute string, and the unset
//! sentinel yields no attribute at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed palette of named colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    White,
    Gray,
    Red,
    Blue,
    Green,
    Yellow,
    /// Cycle through [`RAINBOW_PALETTE`]; the caller owns the cycle index
    Rainbow,
    /// Unset: emit no color attribute and let the renderer default apply
    None,
}

/// Named color -> SVG color keyword
static NAMED_COLORS: [(NamedColor, &str); 7] = [
    (NamedColor::Black, "black"),
    (NamedColor::White, "white"),
    (NamedColor::Gray, "gray"),
    (NamedColor::Red, "red"),
    (NamedColor::Blue, "blue"),
    (NamedColor::Green, "green"),
    (NamedColor::Yellow, "yellow"),
];

/// Palette indexed by [`Color::rainbow`]
pub static RAINBOW_PALETTE: [Rgb8; 7] = [
    Rgb8::new(255, 0, 0),
    Rgb8::new(255, 127, 0),
    Rgb8::new(255, 255, 0),
    Rgb8::new(0, 255, 0),
    Rgb8::new(0, 0, 255),
    Rgb8::new(75, 0, 130),
    Rgb8::new(148, 0, 211),
];

/// Literal 0-255 channel triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Color value: named entry, gray intensity or RGB intensities (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Named(NamedColor),
    Gray(f32),
    Rgb(f32, f32, f32),
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(NamedColor::None)
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Color::Named(named)
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Color::from_rgb8(rgb)
    }
}

impl Color {
    pub const BLACK: Color = Color::Named(NamedColor::Black);
    pub const GRAY: Color = Color::Named(NamedColor::Gray);
    pub const NONE: Color = Color::Named(NamedColor::None);

    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Color::Rgb(rgb.r as f32 / 255.0, rgb.g as f32 / 255.0, rgb.b as f32 / 255.0)
    }

    /// Entry `index` of the rainbow palette, wrapping around
    pub fn rainbow(index: usize) -> Self {
        Color::from_rgb8(RAINBOW_PALETTE[index % RAINBOW_PALETTE.len()])
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Color::Named(NamedColor::None))
    }

    pub fn is_rainbow(&self) -> bool {
        matches!(self, Color::Named(NamedColor::Rainbow))
    }

    /// SVG color string, or `None` when no attribute should be written
    pub fn encode(&self) -> Option<String> {
        match *self {
            Color::Named(NamedColor::None) => None,
            Color::Named(NamedColor::Rainbow) => Some(RAINBOW_PALETTE[0].to_string()),
            Color::Named(named) => NAMED_COLORS
                .iter()
                .find(|(entry, _)| *entry == named)
                .map(|(_, keyword)| (*keyword).to_string()),
            Color::Gray(intensity) => Some(Rgb8::new(channel(intensity), channel(intensity), channel(intensity)).to_string()),
            Color::Rgb(r, g, b) => Some(Rgb8::new(channel(r), channel(g), channel(b)).to_string()),
        }
    }
}

/// 0.0-1.0 intensity to a 0-255 channel, rounding half away from zero
fn channel(intensity: f32) -> u8 {
    (intensity * 255.0).round() as u8
}

/// Color of edge `index` out of `count` when a ring is drawn in rainbow mode.
/// Red ramps up across the ring; green and blue bounce at different rates.
pub fn rainbow_gradient(index: usize, count: usize) -> Rgb8 {
    if count == 0 {
        return Rgb8::default();
    }
    let bounce = |v: usize| {
        let v = v % (255 * 2);
        if v > 255 {
            255 * 2 - v
        } else {
            v
        }
    };
    let r = (index * 255 / count).min(255);
    let g = bounce(index * 255 * 11 / count);
    let b = bounce(index * 255 * 5 / count);
    Rgb8::new(r as u8, g as u8, b as u8)
}
