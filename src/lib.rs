//! poster - seed-driven generative art posters
//!
//! A library for composing poster-style images from randomly placed,
//! stylized shapes, themed palettes and a readable title overlay. The same
//! seed and parameters always produce the same poster.
//!
//! ```
//! use poster::{generate_poster, PosterParams};
//!
//! let params = PosterParams {
//!     layer_count: 3,
//!     dpi: 20,
//!     ..Default::default()
//! };
//! let canvas = generate_poster(&params).unwrap();
//! assert_eq!(canvas.layers.len(), 3);
//! ```

pub mod cli;
pub mod compose;
pub mod error;
pub mod output;
pub mod random;
pub mod render;
pub mod types;

pub use compose::{
    choose_text_colour, generate_poster, Bounds, Canvas, CanvasConfig, FontWeight, Layer, Shadow,
    TextOverlay,
};
pub use error::{PosterError, Result};
pub use random::RandomStream;
pub use render::{rasterize, write_canvas_json, write_png, TextRenderer};
pub use types::{
    generate_outline, generate_palette, Colour, FigureSize, OutlineSpec, PaletteStyle, Point,
    PosterParams, ShapeMode,
};
