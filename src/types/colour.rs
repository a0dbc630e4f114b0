//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

/// An RGBA colour with each channel normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a colour, clamping every channel into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Create an opaque colour.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque colour from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Parse a colour from a hex string or a CSS colour name.
    ///
    /// Hex supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, with or
    /// without the leading `#`. Names are case-insensitive (`navy`, `beige`,
    /// `lightgray`, ...).
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PosterError::ColourParse {
                message: "Empty colour".to_string(),
                help: Some("Use a hex value like #1a1a2e or a name like navy".to_string()),
            });
        }

        if !s.starts_with('#') {
            let lower = s.to_ascii_lowercase();
            if let Some(named) = palette::named::from_str(&lower) {
                return Ok(Self::from_rgb8(named.red, named.green, named.blue));
            }
        }

        Self::from_hex(s)
    }

    /// Parse a hex colour string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        let digits: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| parse_hex_digit(c, s).map(|d| d << 4 | d))
                .collect::<Result<_>>()?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| parse_hex_byte(hex.get(i..i + 2).unwrap_or(""), s))
                .collect::<Result<_>>()?,
            _ => {
                return Err(PosterError::ColourParse {
                    message: format!("Invalid colour: {}", s),
                    help: Some(
                        "Use #RGB, #RGBA, #RRGGBB, #RRGGBBAA or a CSS colour name".to_string(),
                    ),
                })
            }
        };

        let channel = |i: usize| digits.get(i).map_or(1.0, |&v| v as f32 / 255.0);
        Ok(Self::new(channel(0), channel(1), channel(2), channel(3)))
    }

    /// Relative luminance using Rec. 709 weights (alpha ignored).
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Multiply the colour channels by `factor`, clamping to `[0, 1]`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            to_byte(self.a),
        ]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Colour {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = PosterError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn to_byte(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}

fn parse_hex_digit(c: char, source: &str) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PosterError::ColourParse {
            message: format!("Invalid hex digit '{}' in {}", c, source),
            help: None,
        })
}

fn parse_hex_byte(s: &str, source: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PosterError::ColourParse {
        message: format!("Invalid hex byte '{}' in {}", s, source),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(1.0, 0.0, 0.0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c.to_rgba8(), [0x1a, 0x1a, 0x2e, 255]);
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Colour::from_hex("#ABC").unwrap().to_rgba8(), [0xAA, 0xBB, 0xCC, 255]);
        assert_eq!(Colour::from_hex("#F008").unwrap().to_rgba8(), [255, 0, 0, 0x88]);
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("FF000080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Colour::parse("black").unwrap(), Colour::BLACK);
        assert_eq!(Colour::parse("White").unwrap(), Colour::WHITE);
        assert_eq!(Colour::parse("navy").unwrap().to_rgba8(), [0, 0, 128, 255]);
        assert_eq!(Colour::parse("lightgray").unwrap().to_rgba8(), [211, 211, 211, 255]);
        assert_eq!(Colour::parse("beige").unwrap().to_rgba8(), [245, 245, 220, 255]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Colour::parse("not-a-colour"),
            Err(PosterError::ColourParse { .. })
        ));
        assert!(Colour::parse("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Colour::rgb(1.0, 0.0, 0.0).to_string(), "#FF0000");
        assert_eq!(Colour::rgb(1.0, 0.0, 0.0).with_alpha(0.5).to_string(), "#FF000080");
    }

    #[test]
    fn test_luminance() {
        assert_eq!(Colour::BLACK.luminance(), 0.0);
        assert!((Colour::WHITE.luminance() - 1.0).abs() < 1e-6);
        assert!(Colour::rgb(0.0, 1.0, 0.0).luminance() > Colour::rgb(1.0, 0.0, 0.0).luminance());
    }

    #[test]
    fn test_scaled_clamps() {
        let c = Colour::rgb(0.8, 0.5, 0.1).scaled(1.5);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.75).abs() < 1e-6);
        assert!((c.b - 0.15).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_new_clamps() {
        let c = Colour::new(-0.5, 2.0, f32::NAN, 1.5);
        assert_eq!(c, Colour::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_serde_as_string() {
        let yaml = serde_yaml::to_string(&Colour::WHITE).unwrap();
        assert!(yaml.contains("#FFFFFF"));
        let round: Colour = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(round, Colour::WHITE);
        let back: Colour = serde_yaml::from_str("navy").unwrap();
        assert_eq!(back.to_rgba8(), [0, 0, 128, 255]);
    }
}
