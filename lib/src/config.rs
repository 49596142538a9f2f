use crate::error::MemeError;
use std::path::PathBuf;

/// Name of the directory memes are written to.
pub const OUTPUT_DIR_NAME: &str = "created_memes";

/// Configuration for meme generation
#[derive(Debug, Clone)]
pub struct MemeConfig {
    /// Canvas
    pub canvas_width: u32,  // default 600
    pub canvas_height: u32, // default 600
    pub background: [u8; 3], // RGB, default white

    /// Caption layout
    pub wrap_width: usize,    // characters per line, default 20
    pub margin_divisor: u32,  // vertical margin = height / divisor, default 15
    pub side_padding: i32,    // left/right padding in pixels, default 20
    pub line_spacing: u32,    // extra pixels between wrapped lines, default 4

    /// Outline
    pub border_width: i32,   // outline radius in pixels, default 2
    pub text_color: [u8; 3], // default white
    pub outline_color: [u8; 3], // default black

    /// Size used when the requested font size itself is unusable
    pub fallback_font_size: u32, // default 10

    /// Where memes are written
    pub output_dir: PathBuf,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            // Canvas
            canvas_width: 600,
            canvas_height: 600,
            background: [255, 255, 255],

            // Caption layout
            wrap_width: 20,
            margin_divisor: 15,
            side_padding: 20,
            line_spacing: 4,

            // Outline
            border_width: 2,
            text_color: [255, 255, 255],
            outline_color: [0, 0, 0],

            fallback_font_size: 10,

            output_dir: default_output_dir(),
        }
    }
}

impl MemeConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), MemeError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(MemeError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.wrap_width == 0 {
            return Err(MemeError::InvalidConfig(
                "wrap_width must be at least 1".to_string(),
            ));
        }
        if self.margin_divisor == 0 {
            return Err(MemeError::InvalidConfig(
                "margin_divisor must be at least 1".to_string(),
            ));
        }
        if self.border_width < 0 {
            return Err(MemeError::InvalidConfig(format!(
                "border_width must be >= 0, got {}",
                self.border_width
            )));
        }
        if self.fallback_font_size == 0 {
            return Err(MemeError::InvalidConfig(
                "fallback_font_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `created_memes` beside the running executable, or beside the working
/// directory when the executable path is unknown.
// TODO: offer a platform documents directory once users can pick a location.
pub fn default_output_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(OUTPUT_DIR_NAME)
}
