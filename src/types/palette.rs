//! Palette generation for poster themes.
//!
//! Procedural styles sweep the hue circle in even steps, shuffle the hues and
//! pick a saturation and lightness per hue from the style's ranges. Curated
//! styles sample, with replacement, from a small fixed set of theme colours.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::random::RandomStream;

use super::Colour;

/// A colour theme tag.
///
/// Parsing never fails: unrecognized tags map to [`PaletteStyle::Random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaletteStyle {
    Pastel,
    #[default]
    Vivid,
    Neon,
    Earthy,
    Monochrome,
    Ocean,
    Sunset,
    Cyberpunk,
    /// Broad saturation/lightness ranges; the fallback for unknown tags.
    Random,
}

impl PaletteStyle {
    pub const ALL: [PaletteStyle; 9] = [
        PaletteStyle::Pastel,
        PaletteStyle::Vivid,
        PaletteStyle::Neon,
        PaletteStyle::Earthy,
        PaletteStyle::Monochrome,
        PaletteStyle::Ocean,
        PaletteStyle::Sunset,
        PaletteStyle::Cyberpunk,
        PaletteStyle::Random,
    ];

    /// Resolve a tag, falling back to `Random` for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pastel" => Self::Pastel,
            "vivid" => Self::Vivid,
            "neon" => Self::Neon,
            "earthy" => Self::Earthy,
            "monochrome" | "mono" => Self::Monochrome,
            "ocean" => Self::Ocean,
            "sunset" => Self::Sunset,
            "cyberpunk" => Self::Cyberpunk,
            _ => Self::Random,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Pastel => "pastel",
            Self::Vivid => "vivid",
            Self::Neon => "neon",
            Self::Earthy => "earthy",
            Self::Monochrome => "monochrome",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Cyberpunk => "cyberpunk",
            Self::Random => "random",
        }
    }

    fn source(self) -> PaletteSource {
        match self {
            Self::Pastel => PaletteSource::Sweep {
                saturation: (0.3, 0.5),
                lightness: (0.7, 0.9),
            },
            Self::Vivid => PaletteSource::Sweep {
                saturation: (0.7, 1.0),
                lightness: (0.4, 0.6),
            },
            Self::Neon => PaletteSource::Sweep {
                saturation: (0.8, 1.0),
                lightness: (0.5, 0.7),
            },
            Self::Earthy => PaletteSource::Sweep {
                saturation: (0.4, 0.7),
                lightness: (0.3, 0.6),
            },
            Self::Monochrome => PaletteSource::Sweep {
                saturation: (0.0, 0.0),
                lightness: (0.3, 0.9),
            },
            Self::Random => PaletteSource::Sweep {
                saturation: (0.3, 0.9),
                lightness: (0.3, 0.7),
            },
            Self::Ocean => PaletteSource::Curated(&[
                "#03045E", "#023E8A", "#0077B6", "#0096C7", "#00B4D8", "#48CAE4", "#90E0EF",
                "#CAF0F8",
            ]),
            Self::Sunset => PaletteSource::Curated(&[
                "#FF6B35", "#F7931E", "#FFD23F", "#EE4266", "#540D6E", "#FF9F1C",
            ]),
            Self::Cyberpunk => PaletteSource::Curated(&[
                "#FF00FF", "#00FFFF", "#FF2A6D", "#05D9E8", "#D1F7FF", "#7700FF",
            ]),
        }
    }
}

impl FromStr for PaletteStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for PaletteStyle {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<PaletteStyle> for String {
    fn from(style: PaletteStyle) -> Self {
        style.tag().to_string()
    }
}

impl fmt::Display for PaletteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a style's colours come from.
enum PaletteSource {
    /// Evenly spaced hues with saturation/lightness drawn from ranges.
    Sweep {
        saturation: (f64, f64),
        lightness: (f64, f64),
    },
    /// Fixed theme colours, sampled with replacement.
    Curated(&'static [&'static str]),
}

/// Generate exactly `count` colours for a style.
///
/// Draws come from `rng` in a fixed order, so the same stream state always
/// yields the same palette.
pub fn generate_palette(
    style: PaletteStyle,
    count: usize,
    rng: &mut RandomStream,
) -> Result<Vec<Colour>> {
    if count == 0 {
        return Err(PosterError::invalid(
            "palette colour count must be at least 1",
            None,
        ));
    }

    match style.source() {
        PaletteSource::Sweep {
            saturation,
            lightness,
        } => {
            let mut hues: Vec<f64> = (0..count).map(|k| k as f64 / count as f64).collect();
            rng.shuffle(&mut hues);

            Ok(hues
                .into_iter()
                .map(|hue| {
                    let s = rng.uniform(saturation.0, saturation.1);
                    let l = rng.uniform(lightness.0, lightness.1);
                    hsl_to_colour(hue, s, l)
                })
                .collect())
        }
        PaletteSource::Curated(set) => {
            let colours = set
                .iter()
                .map(|hex| Colour::from_hex(hex))
                .collect::<Result<Vec<_>>>()?;
            (0..count)
                .map(|_| {
                    rng.choose(&colours).copied().ok_or_else(|| {
                        PosterError::invalid(format!("style {} has no colours", style), None)
                    })
                })
                .collect()
        }
    }
}

/// Convert a hue in turns (`0..1`) plus saturation and lightness to RGB.
fn hsl_to_colour(hue: f64, saturation: f64, lightness: f64) -> Colour {
    let hsl = Hsl::new(
        (hue * 360.0) as f32,
        saturation as f32,
        lightness as f32,
    );
    let rgb: Srgb = hsl.into_color();
    Colour::rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit(c: &Colour) -> bool {
        [c.r, c.g, c.b, c.a].iter().all(|v| (0.0..=1.0).contains(v))
    }

    #[test]
    fn test_exact_count_for_every_style() {
        for style in PaletteStyle::ALL {
            for count in [1, 3, 8, 50] {
                let mut rng = RandomStream::seeded(9);
                let colours = generate_palette(style, count, &mut rng).unwrap();
                assert_eq!(colours.len(), count, "style {}", style);
                assert!(colours.iter().all(in_unit), "style {}", style);
            }
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut rng = RandomStream::seeded(1);
        let err = generate_palette(PaletteStyle::Vivid, 0, &mut rng).unwrap_err();
        assert!(matches!(err, PosterError::InvalidParameter { .. }));
    }

    #[test]
    fn test_deterministic() {
        let a = generate_palette(PaletteStyle::Neon, 8, &mut RandomStream::seeded(1)).unwrap();
        let b = generate_palette(PaletteStyle::Neon, 8, &mut RandomStream::seeded(1)).unwrap();
        assert_eq!(a, b);

        let c = generate_palette(PaletteStyle::Neon, 8, &mut RandomStream::seeded(2)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_monochrome_is_grey() {
        let colours =
            generate_palette(PaletteStyle::Monochrome, 12, &mut RandomStream::seeded(3)).unwrap();
        for c in colours {
            assert!((c.r - c.g).abs() < 1e-5 && (c.g - c.b).abs() < 1e-5);
            assert!(c.r >= 0.3 - 1e-5 && c.r <= 0.9 + 1e-5);
        }
    }

    #[test]
    fn test_sweep_uses_distinct_hues() {
        // Vivid saturation is high enough that every hue lands on a distinct colour.
        let colours =
            generate_palette(PaletteStyle::Vivid, 6, &mut RandomStream::seeded(4)).unwrap();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_curated_draws_from_theme() {
        let theme: Vec<Colour> = ["#FF00FF", "#00FFFF", "#FF2A6D", "#05D9E8", "#D1F7FF", "#7700FF"]
            .iter()
            .map(|h| Colour::from_hex(h).unwrap())
            .collect();
        let colours =
            generate_palette(PaletteStyle::Cyberpunk, 20, &mut RandomStream::seeded(5)).unwrap();
        assert_eq!(colours.len(), 20);
        assert!(colours.iter().all(|c| theme.contains(c)));
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_colour(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(hsl_to_colour(1.0 / 3.0, 1.0, 0.5).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(hsl_to_colour(2.0 / 3.0, 1.0, 0.5).to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_style_tags() {
        assert_eq!(PaletteStyle::from_tag("Vivid"), PaletteStyle::Vivid);
        assert_eq!(PaletteStyle::from_tag("cyberpunk"), PaletteStyle::Cyberpunk);
        assert_eq!(PaletteStyle::from_tag("plaid"), PaletteStyle::Random);
        assert_eq!("default".parse::<PaletteStyle>().unwrap(), PaletteStyle::Random);
        for style in PaletteStyle::ALL {
            assert_eq!(PaletteStyle::from_tag(style.tag()), style);
        }
    }
}
