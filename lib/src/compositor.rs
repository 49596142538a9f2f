use crate::config::MemeConfig;
use crate::request::{Alignment, Caption};
use crate::wrap::normalize_caption;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

/// Which edge of the canvas a caption hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Top,
    Bottom,
}

/// Wrapped caption text with its measured size and origin
///
/// Derived per caption per generation and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionLayout {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl CaptionLayout {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Scale that makes one em `size` pixels tall
pub fn em_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size as f32;
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

/// Height of a single line: ascent minus descent
pub fn line_height(font: &FontArc, scale: PxScale) -> u32 {
    font.as_scaled(scale).height().ceil() as u32
}

/// Advance width of one line, kerning included
pub fn line_width(font: &FontArc, scale: PxScale, line: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut previous = None;

    for c in line.chars() {
        let glyph = scaled.glyph_id(c);
        if let Some(previous) = previous {
            width += scaled.kern(previous, glyph);
        }
        width += scaled.h_advance(glyph);
        previous = Some(glyph);
    }

    width.max(0.0).ceil() as u32
}

/// Bounding box of multi-line text
///
/// # Returns
/// `(width, height)`: the widest line, and every line stacked with
/// `line_spacing` pixels between them. Empty text measures `(0, 0)`.
/// Both dimensions saturate at `u32::MAX`.
pub fn measure_text(font: &FontArc, scale: PxScale, text: &str, line_spacing: u32) -> (u32, u32) {
    let count = text.lines().count() as u32;
    if count == 0 {
        return (0, 0);
    }

    let width = text
        .lines()
        .map(|line| line_width(font, scale, line))
        .max()
        .unwrap_or(0);
    let height = count
        .saturating_mul(line_height(font, scale))
        .saturating_add((count - 1).saturating_mul(line_spacing));

    (width, height)
}

/// X origin for a caption
///
/// * left - fixed `padding`
/// * right - `image_width - text_width - padding`
/// * center - `(image_width - text_width) / 2`, rounded down
///
/// Offsets past the `i32` range clamp to it.
pub fn horizontal_offset(alignment: Alignment, text_width: u32, image_width: u32, padding: i32) -> i32 {
    let text_width = i64::from(text_width);
    let image_width = i64::from(image_width);
    match alignment {
        Alignment::Left => padding,
        Alignment::Right => clamp_i32(image_width - text_width - i64::from(padding)),
        Alignment::Center => clamp_i32((image_width - text_width).div_euclid(2)),
    }
}

/// Y origin for a caption
///
/// The top band starts `image_height / margin_divisor` from the top; the
/// bottom band mirrors that margin from the bottom edge. A `margin_divisor`
/// of 0 means no margin.
pub fn vertical_offset(band: Band, text_height: u32, image_height: u32, margin_divisor: u32) -> i32 {
    let margin = i64::from(image_height.checked_div(margin_divisor).unwrap_or(0));
    match band {
        Band::Top => clamp_i32(margin),
        Band::Bottom => clamp_i32(i64::from(image_height) - i64::from(text_height) - margin),
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Wrap, measure and place a caption on a canvas of the given size
pub fn layout_caption(
    caption: &Caption,
    band: Band,
    font: &FontArc,
    scale: PxScale,
    canvas_size: (u32, u32),
    config: &MemeConfig,
) -> CaptionLayout {
    let (image_width, image_height) = canvas_size;
    let text = normalize_caption(&caption.text, config.wrap_width);
    let (width, height) = measure_text(font, scale, &text, config.line_spacing);

    CaptionLayout {
        x: horizontal_offset(caption.alignment, width, image_width, config.side_padding),
        y: vertical_offset(band, height, image_height, config.margin_divisor),
        text,
        width,
        height,
    }
}

fn draw_lines(
    canvas: &mut RgbImage,
    layout: &CaptionLayout,
    (x, y): (i32, i32),
    color: Rgb<u8>,
    font: &FontArc,
    scale: PxScale,
    line_spacing: u32,
) {
    let pitch = i64::from(line_height(font, scale).saturating_add(line_spacing));
    for (i, line) in layout.lines().enumerate() {
        let line_y = clamp_i32(i64::from(y) + i as i64 * pitch);
        draw_text_mut(canvas, color, x, line_y, scale, font, line);
    }
}

/// Draw a caption with a solid outline
///
/// The outline colour is stamped at every offset in
/// `[-border, border] x [-border, border]`, then the text colour is drawn
/// once at the origin. Text that runs off the canvas is clipped.
pub fn draw_bordered_text(
    canvas: &mut RgbImage,
    layout: &CaptionLayout,
    font: &FontArc,
    scale: PxScale,
    config: &MemeConfig,
) {
    if layout.is_empty() {
        return;
    }

    let border = config.border_width;
    let outline = Rgb(config.outline_color);
    for dx in -border..=border {
        for dy in -border..=border {
            draw_lines(
                canvas,
                layout,
                (layout.x.saturating_add(dx), layout.y.saturating_add(dy)),
                outline,
                font,
                scale,
                config.line_spacing,
            );
        }
    }

    draw_lines(
        canvas,
        layout,
        (layout.x, layout.y),
        Rgb(config.text_color),
        font,
        scale,
        config.line_spacing,
    );
}

/// Lay out a caption and draw it onto `canvas` in place
///
/// # Returns
/// The layout that was drawn
pub fn composite(
    canvas: &mut RgbImage,
    caption: &Caption,
    band: Band,
    font: &FontArc,
    size: u32,
    config: &MemeConfig,
) -> CaptionLayout {
    let scale = em_scale(font, size);
    let layout = layout_caption(caption, band, font, scale, canvas.dimensions(), config);

    log::debug!(
        "{:?} caption {:?}: {}x{} at ({}, {})",
        band,
        layout.text,
        layout.width,
        layout.height,
        layout.x,
        layout.y
    );

    draw_bordered_text(canvas, &layout, font, scale, config);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::builtin_font;

    fn config() -> MemeConfig {
        MemeConfig::default()
    }

    #[test]
    fn test_left_alignment_is_fixed_padding() {
        for (text_width, image_width) in [(0, 600), (100, 600), (580, 600), (900, 600), (10, 50)] {
            assert_eq!(horizontal_offset(Alignment::Left, text_width, image_width, 20), 20);
        }
    }

    #[test]
    fn test_right_alignment_leaves_padding() {
        for (text_width, image_width) in [(0, 600), (100, 600), (580, 600), (900, 600)] {
            let x = horizontal_offset(Alignment::Right, text_width, image_width, 20);
            assert_eq!(x + text_width as i32, image_width as i32 - 20);
        }
    }

    #[test]
    fn test_center_alignment() {
        for (text_width, image_width) in [(0, 600), (101, 600), (599, 600), (900, 600)] {
            let x = horizontal_offset(Alignment::Center, text_width, image_width, 20);
            let exact = (image_width as f64 - text_width as f64) / 2.0;
            assert!((x as f64 - exact).abs() <= 1.0, "{text_width} in {image_width}");
        }
        assert_eq!(horizontal_offset(Alignment::Center, 101, 600, 20), 249);
    }

    #[test]
    fn test_vertical_bands() {
        assert_eq!(vertical_offset(Band::Top, 80, 600, 15), 40);
        assert_eq!(vertical_offset(Band::Bottom, 80, 600, 15), 600 - 80 - 40);
    }

    #[test]
    fn test_offsets_clamp_instead_of_overflowing() {
        assert_eq!(horizontal_offset(Alignment::Right, u32::MAX, 600, 20), i32::MIN);
        assert_eq!(
            horizontal_offset(Alignment::Center, u32::MAX, 600, 20),
            (600 - i64::from(u32::MAX)).div_euclid(2) as i32
        );
        assert_eq!(vertical_offset(Band::Bottom, u32::MAX, 600, 15), i32::MIN);
        assert_eq!(vertical_offset(Band::Top, 80, 600, 0), 0);
        assert_eq!(vertical_offset(Band::Bottom, 80, 600, 0), 520);
    }

    #[test]
    fn test_measure_saturates_at_huge_scale() {
        let font = builtin_font();
        let scale = em_scale(&font, u32::MAX);

        let (_, height) = measure_text(&font, scale, "A\nB\nC", u32::MAX);
        assert_eq!(height, u32::MAX);

        let caption = Caption::new("huge caption", Alignment::Right);
        let layout = layout_caption(&caption, Band::Bottom, &font, scale, (600, 600), &config());
        assert_eq!(layout.y, i32::MIN);
        assert!(layout.x < 0);
    }

    #[test]
    fn test_measure_empty_text() {
        let font = builtin_font();
        assert_eq!(measure_text(&font, em_scale(&font, 50), "", 4), (0, 0));
    }

    #[test]
    fn test_measure_grows_with_lines_and_size() {
        let font = builtin_font();
        let scale = em_scale(&font, 50);

        let (w1, h1) = measure_text(&font, scale, "HELLO", 4);
        let (w2, h2) = measure_text(&font, scale, "HELLO\nHELLO", 4);
        assert!(w1 > 0 && h1 > 0);
        assert_eq!(w1, w2);
        assert_eq!(h2, 2 * h1 + 4);

        let (w_big, h_big) = measure_text(&font, em_scale(&font, 100), "HELLO", 4);
        assert!(w_big > w1);
        assert!(h_big > h1);
    }

    #[test]
    fn test_measure_uses_widest_line() {
        let font = builtin_font();
        let scale = em_scale(&font, 40);
        let (short, _) = measure_text(&font, scale, "HI", 4);
        let (long, _) = measure_text(&font, scale, "HI\nHELLO WORLD", 4);
        assert!(long > short);
        assert_eq!(long, line_width(&font, scale, "HELLO WORLD"));
    }

    #[test]
    fn test_layout_uppercases_and_wraps() {
        let font = builtin_font();
        let scale = em_scale(&font, 50);
        let caption = Caption::new("a very long line of text", Alignment::Center);
        let layout = layout_caption(&caption, Band::Top, &font, scale, (600, 600), &config());

        assert_eq!(layout.text, "A VERY LONG LINE OF\nTEXT");
        assert_eq!(layout.lines().count(), 2);
        assert_eq!(layout.y, 40);
    }

    #[test]
    fn test_bottom_layout_mirrors_margin() {
        let font = builtin_font();
        let scale = em_scale(&font, 50);
        let caption = Caption::new("hello world", Alignment::Right);
        let layout = layout_caption(&caption, Band::Bottom, &font, scale, (600, 600), &config());

        assert_eq!(layout.text, "HELLO WORLD");
        assert_eq!(layout.y + layout.height as i32 + 40, 600);
        assert_eq!(layout.x + layout.width as i32, 580);
    }

    #[test]
    fn test_bordered_text_draws_white_over_black() {
        let font = builtin_font();
        let mut canvas = RgbImage::from_pixel(600, 600, Rgb([128, 128, 128]));
        let caption = Caption::new("HELLO", Alignment::Center);

        let layout = composite(&mut canvas, &caption, Band::Top, &font, 80, &config());

        let mut white = 0;
        let mut black = 0;
        for y in layout.y.max(0) as u32..(layout.y as u32 + layout.height).min(600) {
            for x in layout.x.max(0) as u32..(layout.x as u32 + layout.width).min(600) {
                match canvas.get_pixel(x, y).0 {
                    [255, 255, 255] => white += 1,
                    [0, 0, 0] => black += 1,
                    _ => {}
                }
            }
        }
        assert!(white > 0, "caption fill missing");
        assert!(black > 0, "caption outline missing");

        // Nothing drawn far outside the caption box
        assert_eq!(canvas.get_pixel(300, 590), &Rgb([128, 128, 128]));
    }

    #[test]
    fn test_empty_caption_leaves_canvas_untouched() {
        let font = builtin_font();
        let mut canvas = RgbImage::from_pixel(60, 60, Rgb([7, 7, 7]));
        let before = canvas.clone();

        let layout = composite(&mut canvas, &Caption::default(), Band::Bottom, &font, 20, &config());

        assert!(layout.is_empty());
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_oversize_text_is_clipped_not_panicking() {
        let font = builtin_font();
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 128, 0]));
        let caption = Caption::new("enormous caption text", Alignment::Right);

        let layout = composite(&mut canvas, &caption, Band::Bottom, &font, 200, &config());
        assert!(layout.x < 0);
        assert_eq!(canvas.dimensions(), (100, 100));
    }
}
