//! Readable text colour selection.

use crate::types::Colour;

/// Minimum luminance gap between text and background.
pub const MIN_CONTRAST: f32 = 0.5;

/// Black or white, whichever reads better on `background`.
pub fn readable_text_colour(background: Colour) -> Colour {
    if background.luminance() > MIN_CONTRAST {
        Colour::BLACK
    } else {
        Colour::WHITE
    }
}

/// Pick the text colour drawn over `background`.
///
/// A requested colour is kept when its luminance differs from the
/// background's by at least [`MIN_CONTRAST`]. Otherwise, or when nothing was
/// requested, the result is black or white.
pub fn choose_text_colour(background: Colour, requested: Option<Colour>) -> Colour {
    match requested {
        Some(colour) if (colour.luminance() - background.luminance()).abs() >= MIN_CONTRAST => {
            colour
        }
        Some(_) => {
            let lum = background.luminance();
            if lum >= 1.0 - lum {
                Colour::BLACK
            } else {
                Colour::WHITE
            }
        }
        None => readable_text_colour(background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(v: f32) -> Colour {
        Colour::rgb(v, v, v)
    }

    #[test]
    fn test_default_on_dark_and_light() {
        assert_eq!(readable_text_colour(Colour::BLACK), Colour::WHITE);
        assert_eq!(readable_text_colour(Colour::WHITE), Colour::BLACK);
        assert_eq!(readable_text_colour(Colour::parse("navy").unwrap()), Colour::WHITE);
        assert_eq!(readable_text_colour(Colour::parse("beige").unwrap()), Colour::BLACK);
    }

    #[test]
    fn test_requested_colour_kept_when_distinct() {
        let yellow = Colour::rgb(1.0, 1.0, 0.0);
        assert_eq!(choose_text_colour(Colour::BLACK, Some(yellow)), yellow);
    }

    #[test]
    fn test_requested_colour_overridden_when_close() {
        let dark_blue = Colour::rgb(0.0, 0.0, 0.4);
        assert_eq!(choose_text_colour(Colour::BLACK, Some(dark_blue)), Colour::WHITE);

        let pale = grey(0.8);
        assert_eq!(choose_text_colour(Colour::WHITE, Some(pale)), Colour::BLACK);
    }

    #[test]
    fn test_contrast_guarantee_over_grid() {
        for bg_step in 0..=20 {
            let bg = grey(bg_step as f32 / 20.0);
            for text_step in 0..=20 {
                let text = grey(text_step as f32 / 20.0);
                let chosen = choose_text_colour(bg, Some(text));
                let gap = (chosen.luminance() - bg.luminance()).abs();
                assert!(gap >= MIN_CONTRAST - 1e-6 || chosen == text);
                if (text.luminance() - bg.luminance()).abs() >= MIN_CONTRAST {
                    assert_eq!(chosen, text);
                }
            }
            let fallback = choose_text_colour(bg, None);
            assert!((fallback.luminance() - bg.luminance()).abs() >= MIN_CONTRAST - 1e-6);
        }
    }
}
