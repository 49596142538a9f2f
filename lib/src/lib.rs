//! memecap - put top and bottom captions on an image
//!
//! The source image is letterboxed onto a fixed canvas, each caption is
//! uppercased, wrapped to a fixed character width and drawn in white with a
//! black outline, and the result is written as a PNG named after the source.
//!
//! # Example
//! ```no_run
//! use memecap::{Alignment, BuiltinFonts, FontSpec, MemeConfig, MemeRequest, generate};
//!
//! let request = MemeRequest::new("cat.jpg", FontSpec::new("Default", 50))
//!     .with_top("one does not simply", Alignment::Center)
//!     .with_bottom("write a meme generator", Alignment::Center);
//! let generation = generate(&request, &MemeConfig::default(), &BuiltinFonts).unwrap();
//! println!("saved {}", generation.path.display());
//! ```

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod output;
pub mod request;
pub mod reveal;
pub mod wrap;

// Re-export main types for convenience
pub use canvas::{FittedImage, Placement, fit_to_canvas};
pub use compositor::{Band, CaptionLayout, composite};
pub use config::MemeConfig;
pub use error::{FontError, MemeError, Warning};
pub use fonts::{BUILTIN_FONT_NAME, BuiltinFonts, FontProvider, SystemFonts};
pub use generator::{Composition, Generation, compose, generate, generate_at};
pub use output::save_png;
pub use request::{Alignment, Caption, FontSpec, MemeRequest};
pub use reveal::{FolderRevealer, SystemRevealer, platform_revealer};
