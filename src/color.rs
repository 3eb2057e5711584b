//! RGB colors shared by the emotion table and the wave renderer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parse `#rrggbb`, falling back to white for anything malformed.
    pub fn from_hex_or_white(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::WHITE)
    }

    /// Composite `self` at `alpha` over `dst` (source-over).
    pub fn over(self, dst: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| -> u8 {
            (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
        };
        Rgb::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }

    /// Offset each channel, saturating at 0 and 255.
    pub fn shifted(self, dr: f32, dg: f32, db: f32) -> Rgb {
        let shift = |c: u8, d: f32| (c as f32 + d).clamp(0.0, 255.0).round() as u8;
        Rgb::new(shift(self.r, dr), shift(self.g, dg), shift(self.b, db))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#ff6b6b"), Some(Rgb::new(255, 107, 107)));
        assert_eq!(Rgb::from_hex("4ECDC4"), Some(Rgb::new(78, 205, 196)));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#+f+f+f"), None);
        assert_eq!(Rgb::from_hex("-1-1-1"), None);
        assert_eq!(Rgb::from_hex_or_white("nope"), Rgb::WHITE);
    }

    #[test]
    fn display_round_trips() {
        let color = Rgb::new(0x74, 0xb9, 0xff);
        assert_eq!(color.to_string(), "#74b9ff");
        assert_eq!(Rgb::from_hex(&color.to_string()), Some(color));
    }

    #[test]
    fn over_blends_towards_source() {
        let red = Rgb::new(200, 0, 0);
        assert_eq!(red.over(Rgb::BLACK, 1.0), red);
        assert_eq!(red.over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(red.over(Rgb::BLACK, 0.5), Rgb::new(100, 0, 0));
    }

    #[test]
    fn shifted_saturates() {
        let c = Rgb::new(250, 5, 128).shifted(30.0, -30.0, 0.4);
        assert_eq!(c, Rgb::new(255, 0, 128));
    }
}
