//! Title and subtitle drawing.
//!
//! Glyph outlines come from a TrueType/OpenType font via ab_glyph: either a
//! font file the user names, or a sans-serif face found among the system fonts
//! with fontdb. Bold runs are faked with a second pass shifted right by a small
//! fraction of the font size.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use image::RgbaImage;

use crate::compose::{FontWeight, TextOverlay};
use crate::error::{PosterError, Result};
use crate::types::Colour;

use super::Viewport;

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Tried in order when the generic sans-serif query finds nothing.
const SANS_SERIF_FALLBACKS: &[&str] = &[
    "DejaVu Sans",
    "Noto Sans",
    "Liberation Sans",
    "Roboto",
    "Helvetica",
    "Arial",
];

/// Draws text overlays with one loaded font.
pub struct TextRenderer {
    font: FontVec,
}

impl TextRenderer {
    /// Load a font file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| PosterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read font: {}", e),
        })?;
        Self::from_bytes(bytes)
    }

    /// Parse font data already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        FontVec::try_from_vec(bytes)
            .map(|font| Self { font })
            .map_err(|e| PosterError::Font {
                message: format!("Failed to parse font: {}", e),
                help: Some("Use a TrueType (.ttf) or OpenType (.otf) font file".to_string()),
            })
    }

    /// Load a sans-serif face from the installed system fonts.
    ///
    /// Returns `None` when no usable face is installed.
    pub fn system() -> Option<Self> {
        let mut db = Database::new();
        db.load_system_fonts();

        let id = find_sans_serif(&db)?;
        db.with_face_data(id, |data, index| {
            FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
        })
        .flatten()
        .map(|font| Self { font })
    }

    /// Draw one overlay, anchored at its left baseline.
    pub fn draw(&self, image: &mut RgbaImage, viewport: &Viewport, overlay: &TextOverlay, dpi: u32) {
        let px = overlay.size * dpi as f32 / POINTS_PER_INCH;
        let scale = PxScale::from(px);
        let (x, y) = viewport.to_pixel(overlay.position);

        let offsets = [0.0, (px / 32.0).max(1.0)];
        let passes = match overlay.weight {
            FontWeight::Bold => &offsets[..],
            FontWeight::Normal => &offsets[..1],
        };

        for &dx in passes {
            self.draw_run(image, &overlay.text, scale, (x + dx, y), overlay.colour);
        }
    }

    fn draw_run(
        &self,
        image: &mut RgbaImage,
        text: &str,
        scale: PxScale,
        origin: (f32, f32),
        colour: Colour,
    ) {
        let scaled = self.font.as_scaled(scale);
        let mut caret = point(origin.0, origin.1);
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                blend_pixel(image, x, y, colour, coverage);
            });
        }
    }
}

fn find_sans_serif(db: &Database) -> Option<ID> {
    let mut families = vec![Family::SansSerif];
    families.extend(SANS_SERIF_FALLBACKS.iter().map(|&name| Family::Name(name)));

    families.iter().find_map(|family| {
        db.query(&Query {
            families: std::slice::from_ref(family),
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })
    })
}

/// Source-over blend of `colour` at `coverage` onto one pixel.
fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, colour: Colour, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = (coverage * colour.a).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let src = colour.to_rgba8();
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let mixed = src[c] as f32 * alpha + pixel.0[c] as f32 * (1.0 - alpha);
        pixel.0[c] = mixed.round() as u8;
    }
    let dst_alpha = pixel.0[3] as f32 / 255.0;
    pixel.0[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
}
