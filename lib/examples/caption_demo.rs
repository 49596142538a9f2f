/// Caption demo: build a test image, caption it three ways and save the results
///
/// Output goes to ./demo_memes. Pass a font family name as the first
/// argument to try a system font instead of the built-in one, and an
/// alignment as the second to render only that variant.
use image::{DynamicImage, Rgb, RgbImage};
use memecap::{
    Alignment, BUILTIN_FONT_NAME, FontProvider, FontSpec, MemeConfig, MemeRequest, SystemFonts,
    compose, save_png,
};
use std::path::PathBuf;

fn main() -> Result<(), memecap::MemeError> {
    env_logger::init();

    println!("memecap - Caption Demo");
    println!("======================\n");

    // A 900x500 sky-over-grass landscape
    let (width, height) = (900, 500);
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let pixel = if y < height * 2 / 3 {
                let shade = (y * 155 / height) as u8;
                Rgb([100 + shade / 2, 160 + shade / 3, 255])
            } else {
                Rgb([40, 140 + ((x + y) % 40) as u8, 40])
            };
            img.put_pixel(x, y, pixel);
        }
    }
    let source = DynamicImage::ImageRgb8(img);
    println!("Created test image: {}x{}", width, height);

    let fonts = SystemFonts::scan();
    let font_name = std::env::args().nth(1).unwrap_or_else(|| BUILTIN_FONT_NAME.to_string());
    println!("{} fonts available, using '{}'", fonts.font_names().len(), font_name);

    let config = MemeConfig {
        output_dir: PathBuf::from("demo_memes"),
        ..Default::default()
    };

    let captions = [
        ("top left", "bottom left"),
        ("one does not simply", "caption a landscape"),
        ("right aligned", "with a caption long enough to wrap twice"),
    ];

    // Alignment can come from the command line as left/center/right
    let only: Option<Alignment> = match std::env::args().nth(2) {
        Some(arg) => match arg.parse() {
            Ok(alignment) => Some(alignment),
            Err(e) => {
                eprintln!("{e}");
                return Ok(());
            }
        },
        None => None,
    };

    for (alignment, (top, bottom)) in Alignment::ALL.into_iter().zip(captions) {
        if only.is_some_and(|only| only != alignment) {
            continue;
        }

        let stem = alignment.as_str();
        let request = MemeRequest::new(format!("{stem}.png"), FontSpec::new(&font_name, 48))
            .with_top(top, alignment)
            .with_bottom(bottom, alignment);

        let composition = compose(&source, &request, &config, &fonts)?;
        for warning in &composition.warnings {
            println!("  ! {}", warning);
        }

        let path = save_png(
            &composition.image,
            &request.image_path,
            &config.output_dir,
            memecap::output::now(),
        )?;
        println!(
            "✓ {:<6} top {:?} at ({}, {}) -> {}",
            stem,
            composition.top.text,
            composition.top.x,
            composition.top.y,
            path.display()
        );
    }

    println!("\nDemo complete!");
    Ok(())
}
