//! Poster parameters and the `poster.yaml` config file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Validation runs once, before any generation work starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

use super::{Colour, PaletteStyle, ShapeMode};

/// Default config filename looked up by the CLI.
pub const CONFIG_FILENAME: &str = "poster.yaml";

/// Physical figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    /// Size in pixels at `dpi`, never smaller than 1x1.
    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f64| (inches * dpi as f64).round().max(1.0) as u32;
        (px(self.width), px(self.height))
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 6.0,
        }
    }
}

/// All inputs to a poster render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterParams {
    /// Colour theme.
    pub style: PaletteStyle,

    /// Outline style shared by every layer.
    pub shape_mode: ShapeMode,

    /// Number of shapes drawn.
    pub layer_count: usize,

    /// Radial noise magnitude.
    pub wobble: f64,

    /// Seed for every random draw. `None` picks one at render time.
    pub seed: Option<u64>,

    pub background: Colour,

    pub title: String,

    pub subtitle: String,

    /// Preferred text colour. Overridden when it would not read against the
    /// background; `None` always picks black or white.
    pub text_colour: Option<Colour>,

    /// Shadow distance in canvas units. Zero disables shadows.
    pub shadow_offset: f64,

    /// Opacity of the black shadow fill.
    pub shadow_alpha: f64,

    /// How much brighter the top layer is than the bottom one.
    pub brightness_strength: f64,

    pub alpha_min: f64,
    pub alpha_max: f64,

    /// Direction the light comes from, in degrees counter-clockwise from +x.
    pub light_angle: f64,

    /// Maximum layer rotation either way, in degrees.
    pub rotation_range: f64,

    pub figure_size: FigureSize,

    pub dpi: u32,

    /// Angular samples per outline.
    pub resolution: usize,

    /// Control values for smooth outlines.
    pub smoothness: usize,

    /// Side count for polygon outlines.
    pub polygon_sides: usize,

    /// Radius of the first layer.
    pub base_radius: f64,

    /// Relative radius increase per layer.
    pub radius_growth: f64,

    /// TrueType/OpenType font for the title and subtitle. `None` uses a
    /// system sans-serif.
    pub font: Option<PathBuf>,
}

impl Default for PosterParams {
    fn default() -> Self {
        Self {
            style: PaletteStyle::Vivid,
            shape_mode: ShapeMode::Smooth,
            layer_count: 8,
            wobble: 0.05,
            seed: Some(1),
            background: Colour::BLACK,
            title: "Generative Poster".to_string(),
            subtitle: String::new(),
            text_colour: None,
            shadow_offset: 0.04,
            shadow_alpha: 0.3,
            brightness_strength: 0.6,
            alpha_min: 0.6,
            alpha_max: 0.9,
            light_angle: 45.0,
            rotation_range: 15.0,
            figure_size: FigureSize::default(),
            dpi: 300,
            resolution: 300,
            smoothness: 8,
            polygon_sides: 6,
            base_radius: 0.25,
            radius_growth: 0.12,
            font: None,
        }
    }
}

impl PosterParams {
    /// Load parameters from a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PosterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse parameters from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PosterError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PosterError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// Check every numeric parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.layer_count < 1 {
            return Err(PosterError::invalid(
                "layer_count must be at least 1",
                None,
            ));
        }
        non_negative("wobble", self.wobble)?;
        non_negative("shadow_offset", self.shadow_offset)?;
        non_negative("rotation_range", self.rotation_range)?;
        unit("shadow_alpha", self.shadow_alpha)?;
        unit("brightness_strength", self.brightness_strength)?;
        unit("alpha_min", self.alpha_min)?;
        unit("alpha_max", self.alpha_max)?;
        if self.alpha_min > self.alpha_max {
            return Err(PosterError::invalid(
                format!(
                    "alpha_min ({}) is greater than alpha_max ({})",
                    self.alpha_min, self.alpha_max
                ),
                Some("Swap the values or make them equal for a fixed opacity"),
            ));
        }
        if !self.light_angle.is_finite() {
            return Err(PosterError::invalid("light_angle must be finite", None));
        }
        positive("figure_size.width", self.figure_size.width)?;
        positive("figure_size.height", self.figure_size.height)?;
        if self.dpi == 0 {
            return Err(PosterError::invalid("dpi must be at least 1", None));
        }
        positive("base_radius", self.base_radius)?;
        non_negative("radius_growth", self.radius_growth)?;
        if self.resolution < 3 {
            return Err(PosterError::invalid(
                format!("resolution must be at least 3, got {}", self.resolution),
                Some("Use 100 or more samples for smooth outlines"),
            ));
        }
        if self.smoothness < 2 {
            return Err(PosterError::invalid(
                format!("smoothness must be at least 2, got {}", self.smoothness),
                None,
            ));
        }
        if self.polygon_sides < 3 {
            return Err(PosterError::invalid(
                format!("polygon_sides must be at least 3, got {}", self.polygon_sides),
                None,
            ));
        }
        Ok(())
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.figure_size.pixels(self.dpi)
    }

    /// A deterministic output filename for a render with `seed`.
    ///
    /// `poster_{title}_{style}_{shape}_{seed}.png`, with spaces in the title
    /// turned into underscores and anything else unsafe dropped.
    pub fn suggested_filename(&self, seed: u64) -> String {
        let title: String = self
            .title
            .trim()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('_'),
                c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
                _ => None,
            })
            .collect();

        let mut name = String::from("poster_");
        if !title.is_empty() {
            name.push_str(&title);
            name.push('_');
        }
        name.push_str(&format!(
            "{}_{}_{}.png",
            self.style.tag(),
            self.shape_mode.tag(),
            seed
        ));
        name
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PosterError::invalid(
            format!("{} must be zero or more, got {}", name, value),
            None,
        ))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PosterError::invalid(
            format!("{} must be positive, got {}", name, value),
            None,
        ))
    }
}

fn unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PosterError::invalid(
            format!("{} must be within [0, 1], got {}", name, value),
            None,
        ))
    }
}
