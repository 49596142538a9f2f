//! The value a front end hands to [`crate::generate`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Horizontal placement of a caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("unknown alignment '{other}', expected left, center or right")),
        }
    }
}

/// One line of user text and where it sits horizontally
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caption {
    pub text: String,
    pub alignment: Alignment,
}

impl Caption {
    pub fn new(text: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            alignment,
        }
    }
}

/// Font family (or font file path) and pixel size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub name: String,
    pub size: u32,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Everything needed for one generation, captured from the form at the
/// moment the user asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeRequest {
    pub image_path: PathBuf,
    pub top: Caption,
    pub bottom: Caption,
    pub font: FontSpec,
}

impl MemeRequest {
    pub fn new(image_path: impl Into<PathBuf>, font: FontSpec) -> Self {
        Self {
            image_path: image_path.into(),
            top: Caption::default(),
            bottom: Caption::default(),
            font,
        }
    }

    pub fn with_top(mut self, text: impl Into<String>, alignment: Alignment) -> Self {
        self.top = Caption::new(text, alignment);
        self
    }

    pub fn with_bottom(mut self, text: impl Into<String>, alignment: Alignment) -> Self {
        self.bottom = Caption::new(text, alignment);
        self
    }

    /// True when no source image has been chosen.
    pub fn is_missing_image(&self) -> bool {
        self.image_path.as_os_str().is_empty()
    }
}
