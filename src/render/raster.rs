//! Canvas rasterization.
//!
//! Shapes are filled with tiny-skia using the even-odd rule. A ring outline
//! holds two contours, each drawn as its own closed subpath, so the inner one
//! cuts a hole.
//! Text is drawn afterwards on the straight-alpha image.

use image::{Rgba, RgbaImage};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::compose::{Bounds, Canvas};
use crate::error::{PosterError, Result};
use crate::types::{Colour, Point};

use super::TextRenderer;

/// Maps canvas coordinates onto a pixel grid, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(bounds: Bounds, width: u32, height: u32) -> Self {
        Self {
            bounds,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel position of a canvas point.
    pub fn to_pixel(&self, p: Point) -> (f32, f32) {
        let b = &self.bounds;
        let x = (p.x - b.min_x) / b.width() * self.width as f64;
        let y = (b.max_y - p.y) / b.height() * self.height as f64;
        (x as f32, y as f32)
    }
}

/// Rasterize a canvas.
///
/// Layers are drawn in order, each preceded by its shadow. Text overlays are
/// drawn only when a `text` renderer is supplied.
pub fn rasterize(canvas: &Canvas, text: Option<&TextRenderer>) -> Result<RgbaImage> {
    let config = &canvas.config;
    let (width, height) = config.figure_size.pixels(config.dpi);

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        PosterError::invalid(
            format!("Cannot allocate a {}x{} pixel canvas", width, height),
            Some("Reduce figure_size or dpi"),
        )
    })?;
    pixmap.fill(skia_colour(config.background));

    let viewport = Viewport::new(config.bounds, width, height);
    for layer in &canvas.layers {
        if let Some(shadow) = &layer.shadow {
            let paths = contours(&shadow.outline, layer.ring_split);
            fill_contours(&mut pixmap, &viewport, &paths, shadow.colour);
        }
        let paths = contours(&layer.outline, layer.ring_split);
        fill_contours(&mut pixmap, &viewport, &paths, layer.fill);
    }

    let mut image = demultiply(&pixmap);

    if let Some(text) = text {
        for overlay in &canvas.texts {
            text.draw(&mut image, &viewport, overlay, config.dpi);
        }
    }

    Ok(image)
}

/// Split an outline into its closed contours.
fn contours(outline: &[Point], ring_split: Option<usize>) -> Vec<&[Point]> {
    match ring_split {
        Some(split) if split > 0 && split < outline.len() => {
            let (outer, inner) = outline.split_at(split);
            vec![outer, inner]
        }
        _ => vec![outline],
    }
}

fn fill_contours(pixmap: &mut Pixmap, viewport: &Viewport, contours: &[&[Point]], colour: Colour) {
    let mut builder = PathBuilder::new();
    for contour in contours {
        for (i, &point) in contour.iter().enumerate() {
            let (x, y) = viewport.to_pixel(point);
            if i == 0 {
                builder.move_to(x, y);
            } else {
                builder.line_to(x, y);
            }
        }
        builder.close();
    }

    // Fewer than two distinct points produce no path.
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(skia_colour(colour));
    paint.anti_alias = true;

    pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
}

fn skia_colour(colour: Colour) -> Color {
    let [r, g, b, a] = colour.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

/// Convert tiny-skia's premultiplied pixels to a straight-alpha image.
fn demultiply(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}
