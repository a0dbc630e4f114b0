//! Core domain types for poster generation.
//!
//! - `Colour` - normalized RGBA colour values
//! - `PaletteStyle` / `generate_palette` - themed colour palettes
//! - `ShapeMode` / `generate_outline` - shape outlines
//! - `PosterParams` - render parameters and config file

mod colour;
mod palette;
mod params;
mod shape;

pub use colour::Colour;
pub use palette::{generate_palette, PaletteStyle};
pub use params::{FigureSize, PosterParams, CONFIG_FILENAME};
pub use shape::{
    generate_outline, rotate_outline, translate_outline, OutlineSpec, Point, ShapeMode,
};
