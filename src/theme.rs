//! Colors and per-level theming

use serde::{Deserialize, Serialize};

use crate::level::LevelSource;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fallback block color when a level has no usable theme
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb`, the same form [`Color::from_hex`] reads
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Multiply each channel by `factor` (clamped to 0..=1)
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GRAY
    }
}

/// The base color for a level, falling back to gray
pub fn resolve_base_color(source: &dyn LevelSource, level: u32) -> Color {
    match source.base_color(level) {
        Ok(color) => color,
        Err(e) => {
            log::warn!("Level {level}: {e}, using default color");
            Color::GRAY
        }
    }
}
