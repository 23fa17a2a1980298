//! 8-bit RGBA colors used by simulation entities

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const SKY_BLUE: Color = Color::rgb(102, 191, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` (0-1, clamped)
    pub fn fade(self, alpha: f32) -> Self {
        Self {
            a: alpha_byte(alpha),
            ..self
        }
    }

    /// Linear float components for the GPU
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Map a 0-1 intensity onto the alpha byte, clamping out-of-range values
#[inline]
pub fn alpha_byte(alpha: f32) -> u8 {
    (alpha * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_byte_clamps() {
        assert_eq!(alpha_byte(1.0), 255);
        assert_eq!(alpha_byte(0.5), 127);
        assert_eq!(alpha_byte(-0.2), 0);
        assert_eq!(alpha_byte(3.0), 255);
    }

    #[test]
    fn test_fade_keeps_rgb() {
        let faded = Color::BLUE.fade(0.0);
        assert_eq!((faded.r, faded.g, faded.b), (0, 121, 241));
        assert_eq!(faded.a, 0);
        assert_eq!(Color::WHITE.to_f32(), [1.0; 4]);
    }
}
