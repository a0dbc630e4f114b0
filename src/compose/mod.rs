//! Poster composition.
//!
//! [`generate_poster`] turns [`PosterParams`] into a [`Canvas`]: a fully
//! resolved description of every shape, shadow and text run, in canvas
//! coordinates. The pipeline is
//!
//! 1. validate parameters,
//! 2. seed the master stream and generate the palette,
//! 3. for each layer, draw placement/rotation/alpha from the master stream and
//!    the outline noise from a per-layer fork,
//! 4. place the title and subtitle with a readable colour.
//!
//! Nothing is drawn here; see [`crate::render`] for rasterization.

mod contrast;

pub use contrast::{choose_text_colour, readable_text_colour, MIN_CONTRAST};

use serde::Serialize;

use crate::error::Result;
use crate::random::RandomStream;
use crate::types::{
    generate_outline, generate_palette, rotate_outline, translate_outline, Colour, FigureSize,
    OutlineSpec, Point, PosterParams,
};

/// Half-width of the square canvas coordinate space.
pub const CANVAS_EXTENT: f64 = 1.6;

/// Layer centres are placed at this distance range from the origin.
const PLACEMENT_DISTANCE: (f64, f64) = (0.1, 1.2);

/// Brightness multiplier of the bottom layer.
const BASE_BRIGHTNESS: f64 = 0.7;

/// Canvas coordinate bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn symmetric(extent: f64) -> Self {
        Self {
            min_x: -extent,
            max_x: extent,
            min_y: -extent,
            max_y: extent,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Fixed properties of one render's drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasConfig {
    pub background: Colour,
    pub figure_size: FigureSize,
    pub dpi: u32,
    pub bounds: Bounds,
}

/// The dark copy drawn under a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shadow {
    pub outline: Vec<Point>,
    pub colour: Colour,
}

/// One drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    /// Rotation applied to the outline, in radians.
    pub rotation: f64,
    /// Outline after rotation, in canvas coordinates.
    pub outline: Vec<Point>,
    /// For rings, the index in `outline` (and the shadow's) where the inner
    /// contour starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_split: Option<usize>,
    /// Palette colour assigned to this layer.
    pub base_colour: Colour,
    /// Brightness-adjusted colour with the drawn alpha.
    pub fill: Colour,
    pub shadow: Option<Shadow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// A run of text anchored at its left baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOverlay {
    pub text: String,
    pub position: Point,
    /// Size in points.
    pub size: f32,
    pub weight: FontWeight,
    pub colour: Colour,
}

/// A composed poster, ready to rasterize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    pub config: CanvasConfig,
    /// The seed actually used, even when none was requested.
    pub seed: u64,
    pub palette: Vec<Colour>,
    /// Layers in draw order.
    pub layers: Vec<Layer>,
    pub texts: Vec<TextOverlay>,
}

impl Canvas {
    /// Number of filled paths the canvas contains, shadows included.
    pub fn path_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| 1 + usize::from(layer.shadow.is_some()))
            .sum()
    }
}

/// Compose a poster.
///
/// Fails before generating anything when a parameter is out of range.
pub fn generate_poster(params: &PosterParams) -> Result<Canvas> {
    params.validate()?;

    let seed = params.seed.unwrap_or_else(RandomStream::fresh_seed);
    let mut rng = RandomStream::seeded(seed);

    let n = params.layer_count;
    let palette = generate_palette(params.style, n, &mut rng)?;

    let light = params.light_angle.to_radians();
    let shadow_shift = (
        params.shadow_offset * light.cos(),
        -params.shadow_offset * light.sin(),
    );
    let rotation_range = params.rotation_range.to_radians();

    let mut layers = Vec::with_capacity(n);
    for (i, &base_colour) in palette.iter().enumerate() {
        let radius = params.base_radius * (1.0 + i as f64 * params.radius_growth);
        let angle = rng.uniform(0.0, std::f64::consts::TAU);
        let dist = rng.uniform(PLACEMENT_DISTANCE.0, PLACEMENT_DISTANCE.1);
        let center = Point::new(angle.cos() * dist, angle.sin() * dist);
        let rotation = rng.uniform(-rotation_range, rotation_range);
        let alpha = rng.uniform(params.alpha_min, params.alpha_max);

        let spec = OutlineSpec::new(center, radius, params.wobble, params.shape_mode)
            .with_resolution(params.resolution)
            .with_smoothness(params.smoothness)
            .with_polygon_sides(params.polygon_sides);
        let mut shape_rng = rng.fork(i as u64);
        let outline = rotate_outline(&generate_outline(&spec, &mut shape_rng)?, center, rotation);

        let brightness = BASE_BRIGHTNESS + params.brightness_strength * i as f64 / n as f64;
        let fill = base_colour
            .scaled(brightness as f32)
            .with_alpha(alpha as f32);

        let shadow = (params.shadow_offset > 0.0).then(|| Shadow {
            outline: translate_outline(&outline, shadow_shift.0, shadow_shift.1),
            colour: Colour::BLACK.with_alpha(params.shadow_alpha as f32),
        });

        layers.push(Layer {
            index: i,
            center,
            radius,
            rotation,
            outline,
            ring_split: spec.ring_split(),
            base_colour,
            fill,
            shadow,
        });
    }

    Ok(Canvas {
        config: CanvasConfig {
            background: params.background,
            figure_size: params.figure_size,
            dpi: params.dpi,
            bounds: Bounds::symmetric(CANVAS_EXTENT),
        },
        seed,
        palette,
        layers,
        texts: text_overlays(params),
    })
}

fn text_overlays(params: &PosterParams) -> Vec<TextOverlay> {
    let colour = choose_text_colour(params.background, params.text_colour);
    let mut texts = Vec::new();

    if !params.title.is_empty() {
        texts.push(TextOverlay {
            text: params.title.clone(),
            position: Point::new(-1.5, 1.4),
            size: 16.0,
            weight: FontWeight::Bold,
            colour,
        });
    }
    if !params.subtitle.is_empty() {
        texts.push(TextOverlay {
            text: params.subtitle.clone(),
            position: Point::new(-1.5, 1.2),
            size: 10.0,
            weight: FontWeight::Normal,
            colour,
        });
    }

    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::types::ShapeMode;

    fn small(params: PosterParams) -> PosterParams {
        PosterParams {
            resolution: 64,
            ..params
        }
    }

    #[test]
    fn test_layer_count_and_order() {
        let canvas = generate_poster(&small(PosterParams::default())).unwrap();
        assert_eq!(canvas.layers.len(), 8);
        assert_eq!(canvas.palette.len(), 8);
        for (i, layer) in canvas.layers.iter().enumerate() {
            assert_eq!(layer.index, i);
            assert_eq!(layer.base_colour, canvas.palette[i]);
            assert_eq!(layer.outline.len(), 64);
        }
    }

    #[test]
    fn test_radius_grows_per_layer() {
        let canvas = generate_poster(&small(PosterParams::default())).unwrap();
        assert!((canvas.layers[0].radius - 0.25).abs() < 1e-12);
        assert!((canvas.layers[5].radius - 0.25 * 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_centres_within_placement_ring() {
        let canvas = generate_poster(&small(PosterParams {
            layer_count: 40,
            ..Default::default()
        }))
        .unwrap();
        for layer in &canvas.layers {
            let d = layer.center.distance(Point::new(0.0, 0.0));
            assert!((0.1 - 1e-12..1.2 + 1e-12).contains(&d));
        }
    }

    #[test]
    fn test_alpha_and_rotation_ranges() {
        let params = small(PosterParams {
            layer_count: 30,
            alpha_min: 0.2,
            alpha_max: 0.4,
            rotation_range: 10.0,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        let limit = 10f64.to_radians();
        for layer in &canvas.layers {
            assert!((0.2 - 1e-3..=0.4 + 1e-3).contains(&layer.fill.a));
            assert!(layer.rotation.abs() <= limit);
        }
    }

    #[test]
    fn test_brightness_ramp() {
        let params = small(PosterParams {
            layer_count: 4,
            brightness_strength: 0.0,
            alpha_min: 1.0,
            alpha_max: 1.0,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        for layer in &canvas.layers {
            let expected = layer.base_colour.scaled(0.7);
            assert!((layer.fill.r - expected.r).abs() < 1e-6);
            assert!((layer.fill.g - expected.g).abs() < 1e-6);
            assert!((layer.fill.b - expected.b).abs() < 1e-6);
            assert_eq!(layer.fill.a, 1.0);
        }
    }

    #[test]
    fn test_shadow_offset_follows_light() {
        let params = small(PosterParams {
            layer_count: 3,
            shadow_offset: 0.1,
            light_angle: 90.0,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        for layer in &canvas.layers {
            let shadow = layer.shadow.as_ref().unwrap();
            assert_eq!(shadow.outline.len(), layer.outline.len());
            let (s, p) = (shadow.outline[0], layer.outline[0]);
            assert!((s.x - p.x).abs() < 1e-12);
            assert!((s.y - (p.y - 0.1)).abs() < 1e-12);
            assert_eq!(shadow.colour, Colour::BLACK.with_alpha(0.3));
        }
    }

    #[test]
    fn test_no_shadow_without_offset() {
        let params = small(PosterParams {
            shadow_offset: 0.0,
            layer_count: 1,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        assert!(canvas.layers[0].shadow.is_none());
        assert_eq!(canvas.path_count(), 1);
    }

    #[test]
    fn test_single_layer_with_shadow() {
        let canvas = generate_poster(&small(PosterParams {
            layer_count: 1,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(canvas.layers.len(), 1);
        assert_eq!(canvas.path_count(), 2);
    }

    #[test]
    fn test_zero_wobble_circle_keeps_radius() {
        let params = small(PosterParams {
            wobble: 0.0,
            shape_mode: ShapeMode::Circle,
            layer_count: 2,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        for layer in &canvas.layers {
            for p in &layer.outline {
                assert!((p.distance(layer.center) - layer.radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_fixed_alpha_and_rotation_keep_placement() {
        let varied = generate_poster(&small(PosterParams {
            alpha_min: 0.7,
            alpha_max: 0.7001,
            rotation_range: 0.001,
            ..Default::default()
        }))
        .unwrap();
        let fixed = generate_poster(&small(PosterParams {
            alpha_min: 0.7,
            alpha_max: 0.7,
            rotation_range: 0.0,
            ..Default::default()
        }))
        .unwrap();

        for (a, b) in varied.layers.iter().zip(&fixed.layers) {
            assert_eq!(a.center, b.center);
            assert_eq!(b.rotation, 0.0);
            assert!((b.fill.a - 0.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ring_layers_record_split() {
        let params = small(PosterParams {
            shape_mode: ShapeMode::Ring,
            layer_count: 2,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        for layer in &canvas.layers {
            assert_eq!(layer.ring_split, Some(64));
            assert_eq!(layer.outline.len(), 128);
        }

        let smooth = generate_poster(&small(PosterParams::default())).unwrap();
        assert!(smooth.layers.iter().all(|layer| layer.ring_split.is_none()));
    }

    #[test]
    fn test_text_overlays() {
        let params = PosterParams {
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            background: Colour::WHITE,
            ..small(PosterParams::default())
        };
        let canvas = generate_poster(&params).unwrap();
        assert_eq!(canvas.texts.len(), 2);
        assert_eq!(canvas.texts[0].weight, FontWeight::Bold);
        assert_eq!(canvas.texts[0].colour, Colour::BLACK);
        assert_eq!(canvas.texts[1].size, 10.0);
        assert_eq!(canvas.texts[1].position, Point::new(-1.5, 1.2));
    }

    #[test]
    fn test_empty_subtitle_is_skipped() {
        let canvas = generate_poster(&small(PosterParams::default())).unwrap();
        assert_eq!(canvas.texts.len(), 1);
        assert_eq!(canvas.texts[0].text, "Generative Poster");
    }

    #[test]
    fn test_missing_seed_is_recorded() {
        let params = small(PosterParams {
            seed: None,
            ..Default::default()
        });
        let canvas = generate_poster(&params).unwrap();
        let replay = generate_poster(&PosterParams {
            seed: Some(canvas.seed),
            ..params
        })
        .unwrap();
        assert_eq!(canvas, replay);
    }

    #[test]
    fn test_invalid_params_fail_fast() {
        let err = generate_poster(&PosterParams {
            layer_count: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, PosterError::InvalidParameter { .. }));
    }
}
