mod app;

use app::MemeApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Meme Generator")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Meme Generator",
        options,
        Box::new(|cc| Ok(Box::new(MemeApp::new(cc)))),
    )
}

/// 32x32 icon: a grey picture with white caption bars
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;

            let is_caption = (4..=7).contains(&y) || (24..=27).contains(&y);
            let is_text = is_caption && (6..26).contains(&x) && x % 3 != 0;
            let is_outline = is_caption && (5..27).contains(&x) && !is_text;

            let rgb = if is_text {
                [255, 255, 255]
            } else if is_outline {
                [0, 0, 0]
            } else {
                [90, 110, 130]
            };

            pixels[idx..idx + 3].copy_from_slice(&rgb);
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
