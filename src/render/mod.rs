//! Rendering module for poster.
//!
//! Rasterizes a composed [`crate::Canvas`] into an RGBA image and writes it
//! out as PNG, optionally with a JSON description of the canvas.

mod png;
mod raster;
mod text;

pub use png::{write_canvas_json, write_png};
pub use raster::{rasterize, Viewport};
pub use text::TextRenderer;
