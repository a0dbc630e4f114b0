//! Shape outline generation.
//!
//! An outline is an ordered list of points sampled on a uniform angular sweep
//! around a centre. Each shape mode perturbs the base radius multiplicatively:
//!
//! ```text
//! r(θ) = radius * (1 + noise(θ))
//! p(θ) = centre + r(θ) * (cos θ, sin θ)
//! ```
//!
//! Polygons and rings are the exceptions: polygons place exact vertices and
//! repeat the first one, rings append a reversed inner circle so the filled
//! outline has a hole.

use std::convert::Infallible;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::random::RandomStream;

/// Inner radius of a ring, relative to its outer radius.
const RING_INNER_RATIO: f64 = 0.6;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// How an outline deviates from a circle.
///
/// Parsing never fails: unrecognized tags map to [`ShapeMode::Smooth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeMode {
    /// Low-frequency wobble interpolated between a few control values.
    #[default]
    Smooth,
    /// Independent Gaussian noise per sample.
    Spiky,
    /// Square wave at four lobes with a random magnitude per sample.
    SquareIsh,
    /// Five-pointed sine wave.
    Star,
    Circle,
    /// Regular polygon with a configurable side count.
    Polygon,
    /// Smooth outer outline with a circular hole.
    Ring,
}

impl ShapeMode {
    pub const ALL: [ShapeMode; 7] = [
        ShapeMode::Smooth,
        ShapeMode::Spiky,
        ShapeMode::SquareIsh,
        ShapeMode::Star,
        ShapeMode::Circle,
        ShapeMode::Polygon,
        ShapeMode::Ring,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "spiky" => Self::Spiky,
            "square-ish" | "squareish" | "square" => Self::SquareIsh,
            "star" => Self::Star,
            "circle" => Self::Circle,
            "polygon" => Self::Polygon,
            "ring" => Self::Ring,
            _ => Self::Smooth,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Spiky => "spiky",
            Self::SquareIsh => "square-ish",
            Self::Star => "star",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
            Self::Ring => "ring",
        }
    }
}

impl FromStr for ShapeMode {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for ShapeMode {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<ShapeMode> for String {
    fn from(mode: ShapeMode) -> Self {
        mode.tag().to_string()
    }
}

impl fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Everything needed to generate one outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSpec {
    pub center: Point,
    pub radius: f64,
    /// Magnitude of the radial noise.
    pub wobble: f64,
    pub mode: ShapeMode,
    /// Number of angular samples.
    pub resolution: usize,
    /// Control values for [`ShapeMode::Smooth`] and the outer edge of rings.
    pub smoothness: usize,
    /// Vertex count for [`ShapeMode::Polygon`].
    pub polygon_sides: usize,
}

impl OutlineSpec {
    /// A spec with default sampling: 300 samples, 8 control values, hexagons.
    pub fn new(center: Point, radius: f64, wobble: f64, mode: ShapeMode) -> Self {
        Self {
            center,
            radius,
            wobble,
            mode,
            resolution: 300,
            smoothness: 8,
            polygon_sides: 6,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_smoothness(mut self, smoothness: usize) -> Self {
        self.smoothness = smoothness;
        self
    }

    pub fn with_polygon_sides(mut self, sides: usize) -> Self {
        self.polygon_sides = sides;
        self
    }

    /// Index where a ring outline's reversed inner edge starts.
    ///
    /// Ring outlines hold two contours back to back and must be filled as two
    /// closed subpaths. Other modes produce a single contour.
    pub fn ring_split(&self) -> Option<usize> {
        (self.mode == ShapeMode::Ring).then_some(self.resolution)
    }

    /// Reject specs that would produce a degenerate outline.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PosterError::invalid(
                format!("radius must be positive, got {}", self.radius),
                None,
            ));
        }
        if !(self.wobble.is_finite() && self.wobble >= 0.0) {
            return Err(PosterError::invalid(
                format!("wobble must be zero or more, got {}", self.wobble),
                None,
            ));
        }
        if !(self.center.x.is_finite() && self.center.y.is_finite()) {
            return Err(PosterError::invalid("shape centre must be finite", None));
        }
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
        if self.mode == ShapeMode::Polygon && self.polygon_sides < 3 {
            return Err(PosterError::invalid(
                format!("a polygon needs at least 3 sides, got {}", self.polygon_sides),
                None,
            ));
        }
        Ok(())
    }
}

/// Generate an outline. Noise draws come from `rng`.
pub fn generate_outline(spec: &OutlineSpec, rng: &mut RandomStream) -> Result<Vec<Point>> {
    spec.validate()?;

    if spec.mode == ShapeMode::Polygon {
        return Ok(polygon(spec.center, spec.radius, spec.polygon_sides));
    }

    let angles = sweep(spec.resolution);
    let noise = radial_noise(spec, &angles, rng);
    let mut points = trace(spec.center, spec.radius, &angles, &noise);

    if spec.mode == ShapeMode::Ring {
        let inner_radius = spec.radius * RING_INNER_RATIO;
        let flat = vec![0.0; angles.len()];
        let inner = trace(spec.center, inner_radius, &angles, &flat);
        points.extend(inner.into_iter().rev());
    }

    Ok(points)
}

/// Uniform angles over `[0, 2π)`.
fn sweep(resolution: usize) -> Vec<f64> {
    (0..resolution)
        .map(|k| TAU * k as f64 / resolution as f64)
        .collect()
}

/// Per-angle relative radius perturbation for the noise-driven modes.
fn radial_noise(spec: &OutlineSpec, angles: &[f64], rng: &mut RandomStream) -> Vec<f64> {
    let wobble = spec.wobble;
    match spec.mode {
        ShapeMode::Spiky => angles.iter().map(|_| rng.normal(wobble * 2.0)).collect(),
        ShapeMode::SquareIsh => angles
            .iter()
            .map(|&theta| wobble * sign((4.0 * theta).sin()) * rng.uniform(0.5, 1.0))
            .collect(),
        ShapeMode::Star => angles
            .iter()
            .map(|&theta| wobble * (5.0 * theta).sin() * 2.0)
            .collect(),
        ShapeMode::Circle | ShapeMode::Polygon => vec![0.0; angles.len()],
        ShapeMode::Smooth | ShapeMode::Ring => {
            let controls: Vec<f64> = (0..spec.smoothness).map(|_| rng.normal(wobble)).collect();
            smooth_noise(&controls, angles.len())
        }
    }
}

/// Stretch `controls` across `samples` positions by linear interpolation.
///
/// Sample `k` sits at `x = n * k / (samples - 1)` for `n` control values placed
/// at `0..n`. Positions past the last control hold its value.
fn smooth_noise(controls: &[f64], samples: usize) -> Vec<f64> {
    let n = controls.len();
    let last = controls.last().copied().unwrap_or(0.0);
    let span = (samples.max(2) - 1) as f64;

    (0..samples)
        .map(|k| {
            let x = n as f64 * k as f64 / span;
            let i = x.floor() as usize;
            if i + 1 >= n {
                return last;
            }
            let t = x - i as f64;
            controls[i] * (1.0 - t) + controls[i + 1] * t
        })
        .collect()
}

fn trace(center: Point, radius: f64, angles: &[f64], noise: &[f64]) -> Vec<Point> {
    angles
        .iter()
        .zip(noise)
        .map(|(&theta, &n)| {
            let r = radius * (1.0 + n);
            Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect()
}

/// Regular polygon, closed by repeating the first vertex.
fn polygon(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    let mut points: Vec<Point> = sweep(sides)
        .into_iter()
        .map(|theta| Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin()))
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// -1, 0 or 1.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rotate points about `pivot` by `angle` radians (counter-clockwise).
pub fn rotate_outline(points: &[Point], pivot: Point, angle: f64) -> Vec<Point> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| {
            let dx = p.x - pivot.x;
            let dy = p.y - pivot.y;
            Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
        })
        .collect()
}

/// Shift every point by `(dx, dy)`.
pub fn translate_outline(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x + dx, p.y + dy))
        .collect()
}
