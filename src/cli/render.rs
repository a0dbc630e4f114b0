//! Render command implementation.
//!
//! Loads parameters from a config file, applies command-line overrides,
//! composes the poster and writes it as PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::compose::generate_poster;
use crate::error::{PosterError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{rasterize, write_canvas_json, write_png, TextRenderer};
use crate::types::{Colour, PaletteStyle, PosterParams, ShapeMode, CONFIG_FILENAME};

/// Render a poster to PNG
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Config file (default: ./poster.yaml when it exists)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Colour theme: pastel, vivid, neon, earthy, monochrome, ocean, sunset, cyberpunk
    #[arg(long)]
    pub style: Option<PaletteStyle>,

    /// Shape mode: smooth, spiky, square-ish, star, circle, polygon, ring
    #[arg(long)]
    pub shape: Option<ShapeMode>,

    /// Number of shapes
    #[arg(long)]
    pub layers: Option<usize>,

    /// Radial noise magnitude
    #[arg(long)]
    pub wobble: Option<f64>,

    /// Random seed
    #[arg(long, conflicts_with = "random_seed")]
    pub seed: Option<u64>,

    /// Ignore any configured seed and pick a new one
    #[arg(long)]
    pub random_seed: bool,

    /// Background colour (hex or CSS name)
    #[arg(long)]
    pub background: Option<Colour>,

    /// Preferred text colour
    #[arg(long)]
    pub text_colour: Option<Colour>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// Side count for polygon shapes
    #[arg(long)]
    pub polygon_sides: Option<usize>,

    /// Output resolution in dots per inch
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Font file for the title and subtitle (default: a system sans-serif)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Output filename (default: built from title, style, shape and seed)
    #[arg(long)]
    pub name: Option<String>,

    /// Also write a JSON description of the canvas next to the PNG
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    render_to(&args, printer).map(|_| ())
}

/// Render and return the PNG path.
pub fn render_to(args: &RenderArgs, printer: &Printer) -> Result<PathBuf> {
    let params = resolve_params(args)?;
    let canvas = generate_poster(&params)?;

    printer.status(
        "Rendering",
        &format!(
            "{}/{} ({}, seed {})",
            params.style,
            params.shape_mode,
            plural(canvas.layers.len(), "layer", "layers"),
            canvas.seed
        ),
    );

    let text = match &params.font {
        Some(path) => Some(TextRenderer::load(path)?),
        None if canvas.texts.is_empty() => None,
        None => {
            let system = TextRenderer::system();
            if system.is_none() {
                printer.warning("Skipped", "text overlay (no font configured or installed)");
            }
            system
        }
    };

    let image = rasterize(&canvas, text.as_ref())?;

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| PosterError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let filename = args
        .name
        .clone()
        .unwrap_or_else(|| params.suggested_filename(canvas.seed));
    let path = args.output.join(filename);

    write_png(&image, &path)?;
    printer.status(
        "Wrote",
        &format!(
            "{} ({}x{})",
            printer.cyan(&display_path(&path)),
            image.width(),
            image.height()
        ),
    );

    if args.json {
        let json_path = path.with_extension("json");
        write_canvas_json(&canvas, &json_path)?;
        printer.status("Wrote", &printer.cyan(&display_path(&json_path)));
    }

    Ok(path)
}

/// Config file values with command-line overrides applied.
pub fn resolve_params(args: &RenderArgs) -> Result<PosterParams> {
    let mut params = match &args.config {
        Some(path) => PosterParams::load(path)?,
        None if Path::new(CONFIG_FILENAME).exists() => {
            PosterParams::load(Path::new(CONFIG_FILENAME))?
        }
        None => PosterParams::default(),
    };

    if let Some(style) = args.style {
        params.style = style;
    }
    if let Some(shape) = args.shape {
        params.shape_mode = shape;
    }
    if let Some(layers) = args.layers {
        params.layer_count = layers;
    }
    if let Some(wobble) = args.wobble {
        params.wobble = wobble;
    }
    if args.random_seed {
        params.seed = None;
    } else if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    if let Some(background) = args.background {
        params.background = background;
    }
    if let Some(text_colour) = args.text_colour {
        params.text_colour = Some(text_colour);
    }
    if let Some(title) = &args.title {
        params.title = title.clone();
    }
    if let Some(subtitle) = &args.subtitle {
        params.subtitle = subtitle.clone();
    }
    if let Some(sides) = args.polygon_sides {
        params.polygon_sides = sides;
    }
    if let Some(dpi) = args.dpi {
        params.dpi = dpi;
    }
    if let Some(font) = &args.font {
        params.font = Some(font.clone());
    }

    Ok(params)
}
