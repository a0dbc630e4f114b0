//! PNG and JSON output for rendered posters.

use std::fs;
use std::path::Path;

use image::RgbaImage;

use crate::compose::Canvas;
use crate::error::{PosterError, Result};

/// Write a rasterized poster to a PNG file.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Write a JSON description of a canvas: seed, palette, layers and text.
pub fn write_canvas_json(canvas: &Canvas, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(canvas).map_err(|e| PosterError::Config {
        message: format!("Failed to serialize canvas: {}", e),
        help: None,
    })?;
    fs::write(path, json).map_err(|e| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write canvas description: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::generate_poster;
    use crate::types::PosterParams;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_round_trip() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 128, 255]));
        img.put_pixel(2, 1, Rgba([255, 0, 0, 128]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("poster.png");
        write_png(&img, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 128, 255]);
        assert_eq!(back.get_pixel(2, 1).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_write_png_missing_directory() {
        let img = RgbaImage::new(1, 1);
        let err = write_png(&img, Path::new("/nonexistent/dir/poster.png")).unwrap_err();
        assert!(matches!(err, PosterError::Io { .. }));
    }

    #[test]
    fn test_write_canvas_json() {
        let params = PosterParams {
            layer_count: 2,
            resolution: 16,
            ..Default::default()
        };
        let canvas = generate_poster(&params).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("poster.json");
        write_canvas_json(&canvas, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 1);
        assert_eq!(value["layers"].as_array().unwrap().len(), 2);
        assert_eq!(value["layers"][0]["outline"].as_array().unwrap().len(), 16);
        assert_eq!(value["config"]["background"], "#000000");
        assert_eq!(value["texts"][0]["weight"], "bold");
    }
}
