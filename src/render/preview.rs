//! PNG previews

use std::path::Path;

use image::{ImageResult, Rgb as Pixel, RgbImage};

use super::cell_color;
use crate::world::generation::GridResult;

/// Draw each cell as a `cell_size` square block. North is the top row.
pub fn render_image(result: &GridResult, cell_size: u32) -> RgbImage {
    let grid = &result.grid;
    let cell_size = cell_size.max(1);
    let width = grid.width.max(0) as u32;
    let height = grid.height.max(0) as u32;

    let mut img = RgbImage::new(width * cell_size, height * cell_size);
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let x = (px / cell_size) as i32;
        let y = grid.height - 1 - (py / cell_size) as i32;
        let (r, g, b) = cell_color(result, x, y);
        *pixel = Pixel([r, g, b]);
    }
    img
}

/// Render and save as PNG
pub fn save_png(result: &GridResult, cell_size: u32, path: &Path) -> ImageResult<()> {
    let img = render_image(result, cell_size);
    log::debug!("Writing {}x{} preview to {}", img.width(), img.height(), path.display());
    img.save_with_format(path, image::ImageFormat::Png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, Rgb};
    use crate::world::generate;
    use crate::world::TileVariant;

    fn cave(tint: Rgb) -> GridResult {
        (0..32)
            .find_map(|seed| {
                let config = GeneratorConfig {
                    width: 24,
                    height: 16,
                    seed,
                    smoothing_steps: Some(5),
                    wall_threshold_size: 3,
                    floor_threshold_size: 3,
                    color: tint,
                    ..GeneratorConfig::default()
                };
                generate(&config).ok()
            })
            .unwrap()
    }

    #[test]
    fn test_image_size() {
        let img = render_image(&cave(Rgb::default()), 4);
        assert_eq!(img.dimensions(), (96, 64));
    }

    #[test]
    fn test_top_row_is_north() {
        let result = cave(Rgb::default());
        let img = render_image(&result, 1);
        let top_y = result.grid.height - 1;
        for x in 0..result.grid.width {
            let expected = cell_color(&result, x, top_y);
            let Pixel([r, g, b]) = *img.get_pixel(x as u32, 0);
            assert_eq!((r, g, b), expected);
        }
    }

    #[test]
    fn test_tint_darkens_image() {
        let result = cave(Rgb::new(0.0, 1.0, 1.0));
        let img = render_image(&result, 2);
        assert!(img.pixels().all(|p| p.0[0] == 0));

        // Border is always a wall piece
        assert!(result.variant_at(0, 0).is_some_and(|v| v != TileVariant::Floor));
    }
}
