use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single generation or folder reveal.
#[derive(Debug, Error)]
pub enum MemeError {
    #[error("no source image selected")]
    MissingImage,

    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two generations in the same second from the same source name.
    #[error("output file {} already exists", .0.display())]
    OutputCollision(PathBuf),

    #[error("memes folder {} not found", .0.display())]
    FolderMissing(PathBuf),

    #[error("could not open {}: {source}", path.display())]
    Reveal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Reasons a requested font could not be used. These never abort a
/// generation; they become a [`crate::Warning::FontFallback`].
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font '{0}' is not installed")]
    UnknownFamily(String),

    #[error("font size {0} is not supported")]
    InvalidSize(u32),

    #[error("font '{name}' has unreadable data: {reason}")]
    InvalidData { name: String, reason: String },

    #[error("failed to read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Non-fatal problems reported alongside a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    FontFallback { requested: String, reason: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::FontFallback { requested, reason } => write!(
                f,
                "Could not load font '{requested}' ({reason}). Using default font instead."
            ),
        }
    }
}
