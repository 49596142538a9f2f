use crate::canvas::{Placement, fit_to_canvas};
use crate::compositor::{Band, CaptionLayout, composite};
use crate::config::MemeConfig;
use crate::error::{MemeError, Warning};
use crate::fonts::{FontProvider, resolve_font};
use crate::output::{now, save_png};
use crate::request::MemeRequest;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// A captioned image held in memory
#[derive(Debug, Clone)]
pub struct Composition {
    pub image: RgbImage,
    pub placement: Placement,
    pub top: CaptionLayout,
    pub bottom: CaptionLayout,
    pub warnings: Vec<Warning>,
}

/// Outcome of a successful generation
#[derive(Debug, Clone)]
pub struct Generation {
    pub path: PathBuf,
    pub warnings: Vec<Warning>,
}

impl Generation {
    /// File name of the written meme, for status messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Decode the source image
pub fn load_source(path: &Path) -> Result<DynamicImage, MemeError> {
    image::open(path).map_err(|source| MemeError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Fit a decoded image to the canvas and draw both captions on it
///
/// Pipeline:
/// 0. Validate the configuration
/// 1. Letterbox the source onto the configured canvas
/// 2. Resolve the font, falling back to the built-in one
/// 3. Wrap, measure, place and draw the top caption
/// 4. Same for the bottom caption
pub fn compose(
    source: &DynamicImage,
    request: &MemeRequest,
    config: &MemeConfig,
    fonts: &dyn FontProvider,
) -> Result<Composition, MemeError> {
    config.validate()?;

    // Step 1: Letterbox
    let fitted = fit_to_canvas(
        source,
        config.canvas_width,
        config.canvas_height,
        config.background,
    );
    let mut image = fitted.canvas;

    // Step 2: Font
    let resolved = resolve_font(fonts, &request.font, config.fallback_font_size);

    // Steps 3-4: Captions
    let top = composite(
        &mut image,
        &request.top,
        Band::Top,
        &resolved.font,
        resolved.size,
        config,
    );
    let bottom = composite(
        &mut image,
        &request.bottom,
        Band::Bottom,
        &resolved.font,
        resolved.size,
        config,
    );

    Ok(Composition {
        image,
        placement: fitted.placement,
        top,
        bottom,
        warnings: resolved.warning.into_iter().collect(),
    })
}

/// Generate a meme and write it to `config.output_dir`
///
/// Runs synchronously to completion. Font problems are returned as
/// warnings; everything else aborts with an error and writes nothing.
pub fn generate(
    request: &MemeRequest,
    config: &MemeConfig,
    fonts: &dyn FontProvider,
) -> Result<Generation, MemeError> {
    generate_at(request, config, fonts, now())
}

/// [`generate`] with an explicit timestamp for the output name
pub fn generate_at(
    request: &MemeRequest,
    config: &MemeConfig,
    fonts: &dyn FontProvider,
    at: OffsetDateTime,
) -> Result<Generation, MemeError> {
    if request.is_missing_image() {
        return Err(MemeError::MissingImage);
    }
    config.validate()?;

    let source = load_source(&request.image_path)?;
    let composition = compose(&source, request, config, fonts)?;
    let path = save_png(
        &composition.image,
        &request.image_path,
        &config.output_dir,
        at,
    )?;

    Ok(Generation {
        path,
        warnings: composition.warnings,
    })
}
