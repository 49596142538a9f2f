use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage, imageops};

/// Where the resized source landed inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A source image letterboxed onto a fixed-size canvas
#[derive(Debug, Clone)]
pub struct FittedImage {
    pub canvas: RgbImage,
    pub placement: Placement,
}

/// Compute the size the source is scaled to so it fits the target while
/// keeping its aspect ratio
///
/// The bound dimension is chosen by comparing aspect ratios; for a square
/// target this is the plain "wider than tall" test.
pub fn fitted_dimensions(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let ratio = source_width as f64 / source_height as f64;
    let target_ratio = target_width as f64 / target_height as f64;

    let (new_width, new_height) = if ratio > target_ratio {
        (target_width, (target_width as f64 / ratio).round() as u32)
    } else {
        ((target_height as f64 * ratio).round() as u32, target_height)
    };

    (
        new_width.clamp(1, target_width.max(1)),
        new_height.clamp(1, target_height.max(1)),
    )
}

/// Fit an image onto a solid canvas of exactly `target_width` x `target_height`
///
/// # Arguments
/// * `source` - Decoded source image, any positive dimensions
/// * `target_width` - Canvas width
/// * `target_height` - Canvas height
/// * `background` - RGB fill for the letterbox bars
///
/// # Returns
/// The canvas plus the placement of the resized source. The source is
/// resampled with Lanczos3 and centered with truncating integer offsets.
/// Transparent source pixels are blended onto the background.
pub fn fit_to_canvas(
    source: &DynamicImage,
    target_width: u32,
    target_height: u32,
    background: [u8; 3],
) -> FittedImage {
    let (new_width, new_height) =
        fitted_dimensions(source.width(), source.height(), target_width, target_height);

    log::debug!(
        "fitting {}x{} into {}x{} as {}x{}",
        source.width(),
        source.height(),
        target_width,
        target_height,
        new_width,
        new_height
    );

    let resized = imageops::resize(
        &source.to_rgba8(),
        new_width,
        new_height,
        imageops::FilterType::Lanczos3,
    );

    let x = target_width.saturating_sub(new_width) / 2;
    let y = target_height.saturating_sub(new_height) / 2;

    let [r, g, b] = background;
    let mut composed = RgbaImage::from_pixel(target_width, target_height, Rgba([r, g, b, 255]));
    imageops::overlay(&mut composed, &resized, x as i64, y as i64);

    FittedImage {
        canvas: DynamicImage::ImageRgba8(composed).to_rgb8(),
        placement: Placement {
            x,
            y,
            width: new_width,
            height: new_height,
        },
    }
}

/// Solid colour helper shared with the demo and tests
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_rgb(source: &RgbImage, target_width: u32, target_height: u32) -> FittedImage {
        fit_to_canvas(
            &DynamicImage::ImageRgb8(source.clone()),
            target_width,
            target_height,
            [255, 255, 255],
        )
    }

    #[test]
    fn test_wide_image_letterboxed_vertically() {
        let img = solid(1200, 600, [200, 0, 0]);
        let fitted = fit_rgb(&img, 600, 600);

        assert_eq!(fitted.canvas.dimensions(), (600, 600));
        assert_eq!(
            fitted.placement,
            Placement {
                x: 0,
                y: 150,
                width: 600,
                height: 300
            }
        );
        // Bars stay white, the band is the source colour
        assert_eq!(fitted.canvas.get_pixel(300, 10), &Rgb([255, 255, 255]));
        assert_eq!(fitted.canvas.get_pixel(300, 590), &Rgb([255, 255, 255]));
        assert_eq!(fitted.canvas.get_pixel(300, 300), &Rgb([200, 0, 0]));
    }

    #[test]
    fn test_tall_image_letterboxed_horizontally() {
        let img = solid(300, 900, [0, 0, 200]);
        let fitted = fit_rgb(&img, 600, 600);

        assert_eq!(fitted.canvas.dimensions(), (600, 600));
        assert_eq!(fitted.placement.width, 200);
        assert_eq!(fitted.placement.height, 600);
        assert_eq!(fitted.placement.x, 200);
        assert_eq!(fitted.placement.y, 0);
    }

    #[test]
    fn test_square_image_fills_canvas() {
        let img = solid(50, 50, [10, 20, 30]);
        let fitted = fit_rgb(&img, 600, 600);
        assert_eq!(
            fitted.placement,
            Placement {
                x: 0,
                y: 0,
                width: 600,
                height: 600
            }
        );
    }

    #[test]
    fn test_fitted_is_always_target_size_and_centered() {
        let cases = [(1, 1), (7, 3), (3, 7), (640, 480), (480, 640), (1000, 999), (5000, 2)];
        for (w, h) in cases {
            let fitted = fit_rgb(&solid(w, h, [0, 0, 0]), 600, 600);
            let p = fitted.placement;
            assert_eq!(fitted.canvas.dimensions(), (600, 600), "{w}x{h}");
            assert!(p.width == 600 || p.height == 600, "{w}x{h}");
            assert_eq!(p.x, (600 - p.width) / 2, "{w}x{h}");
            assert_eq!(p.y, (600 - p.height) / 2, "{w}x{h}");
        }
    }

    #[test]
    fn test_extreme_ratio_keeps_one_pixel() {
        assert_eq!(fitted_dimensions(10_000, 1, 600, 600), (600, 1));
        assert_eq!(fitted_dimensions(1, 10_000, 600, 600), (1, 600));
    }

    #[test]
    fn test_empty_target_does_not_panic() {
        assert_eq!(fitted_dimensions(100, 50, 0, 0), (1, 1));
        assert_eq!(fitted_dimensions(100, 50, 0, 600), (1, 1));
    }

    #[test]
    fn test_dimensions_round() {
        // 600 / (640/427) = 400.3
        assert_eq!(fitted_dimensions(640, 427, 600, 600), (600, 400));
        // 600 * (2/3) = 400
        assert_eq!(fitted_dimensions(2, 3, 600, 600), (400, 600));
    }

    #[test]
    fn test_transparent_source_blends_onto_background() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0])));
        let fitted = fit_to_canvas(&img, 20, 20, [255, 255, 255]);
        assert_eq!(fitted.canvas.get_pixel(10, 10), &Rgb([255, 255, 255]));
    }
}
