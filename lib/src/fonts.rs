//! Font discovery and loading
//!
//! The compositor only ever sees an [`ab_glyph::FontArc`]. Where it came
//! from is the business of a [`FontProvider`]: the host's installed fonts
//! via `fontdb`, or just the embedded face.

use crate::error::{FontError, Warning};
use crate::request::FontSpec;
use ab_glyph::{FontArc, FontVec};
use fontdb::{Database, FaceInfo, Style, Weight};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Name under which the embedded font is listed
pub const BUILTIN_FONT_NAME: &str = "Default";

/// Largest pixel size a font is loaded at
pub const MAX_FONT_SIZE: u32 = u16::MAX as u32;

static BUILTIN_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// The embedded fallback face (DejaVu Sans Bold)
pub fn builtin_font() -> FontArc {
    static FONT: OnceLock<FontArc> = OnceLock::new();
    FONT.get_or_init(|| {
        FontArc::try_from_slice(BUILTIN_FONT_DATA).expect("embedded font data is valid")
    })
    .clone()
}

/// Source of fonts for the compositor
pub trait FontProvider {
    /// Names a user can pick from, built-in font first
    fn font_names(&self) -> Vec<String>;

    /// Load `name` for rendering at `size` pixels
    fn load(&self, name: &str, size: u32) -> Result<FontArc, FontError>;
}

/// Only the embedded font
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinFonts;

impl FontProvider for BuiltinFonts {
    fn font_names(&self) -> Vec<String> {
        vec![BUILTIN_FONT_NAME.to_string()]
    }

    fn load(&self, name: &str, size: u32) -> Result<FontArc, FontError> {
        check_size(size)?;
        if is_builtin(name) {
            Ok(builtin_font())
        } else {
            Err(FontError::UnknownFamily(name.to_string()))
        }
    }
}

/// Fonts installed on the host, plus the embedded one
pub struct SystemFonts {
    db: Database,
}

impl SystemFonts {
    /// Scan the host's font directories
    pub fn scan() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("found {} system font faces", db.len());
        Self { db }
    }

    /// Wrap an already populated database
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Best face for a family: upright first, then closest to regular weight
    fn find_face(&self, family: &str) -> Option<&FaceInfo> {
        self.db
            .faces()
            .filter(|face| {
                face.families
                    .iter()
                    .any(|(name, _)| name.eq_ignore_ascii_case(family))
            })
            .min_by_key(|face| {
                (
                    face.style != Style::Normal,
                    face.weight.0.abs_diff(Weight::NORMAL.0),
                )
            })
    }

    fn load_face(&self, name: &str, face: &FaceInfo) -> Result<FontArc, FontError> {
        self.db
            .with_face_data(face.id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
            })
            .ok_or_else(|| FontError::InvalidData {
                name: name.to_string(),
                reason: "face data unavailable".to_string(),
            })?
            .map(FontArc::new)
            .map_err(|e| FontError::InvalidData {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

impl FontProvider for SystemFonts {
    fn font_names(&self) -> Vec<String> {
        // Keyed by lowercase name so families differing only in case collapse
        let mut families = BTreeMap::new();
        for face in self.db.faces() {
            if let Some((name, _)) = face.families.first() {
                families
                    .entry(name.to_lowercase())
                    .or_insert_with(|| name.clone());
            }
        }
        families.remove(&BUILTIN_FONT_NAME.to_lowercase());

        std::iter::once(BUILTIN_FONT_NAME.to_string())
            .chain(families.into_values())
            .collect()
    }

    fn load(&self, name: &str, size: u32) -> Result<FontArc, FontError> {
        check_size(size)?;

        if is_builtin(name) {
            return Ok(builtin_font());
        }

        let path = Path::new(name);
        if path.is_file() {
            return load_font_file(path);
        }

        match self.find_face(name) {
            Some(face) => self.load_face(name, face),
            None => Err(FontError::UnknownFamily(name.to_string())),
        }
    }
}

/// Read a TrueType/OpenType file from disk
pub fn load_font_file(path: &Path) -> Result<FontArc, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(data).map_err(|e| FontError::InvalidData {
        name: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn is_builtin(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(BUILTIN_FONT_NAME)
}

fn check_size(size: u32) -> Result<(), FontError> {
    if (1..=MAX_FONT_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(FontError::InvalidSize(size))
    }
}

/// A font ready for drawing, and what happened while picking it
#[derive(Clone)]
pub struct ResolvedFont {
    pub font: FontArc,
    pub size: u32,
    pub warning: Option<Warning>,
}

/// Load the requested font, falling back to the embedded one on any failure
///
/// # Arguments
/// * `provider` - Where fonts come from
/// * `spec` - Requested family (or file) and size
/// * `fallback_size` - Size used when `spec.size` is outside `1..=MAX_FONT_SIZE`
///
/// # Returns
/// Always a usable font. A failed lookup is reported through `warning`.
pub fn resolve_font(provider: &dyn FontProvider, spec: &FontSpec, fallback_size: u32) -> ResolvedFont {
    match provider.load(&spec.name, spec.size) {
        Ok(font) => ResolvedFont {
            font,
            size: spec.size,
            warning: None,
        },
        Err(e) => {
            log::warn!("font '{}' unavailable: {}; using built-in font", spec.name, e);
            let size = if check_size(spec.size).is_ok() {
                spec.size
            } else {
                fallback_size
            };
            ResolvedFont {
                font: builtin_font(),
                size,
                warning: Some(Warning::FontFallback {
                    requested: spec.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn test_builtin_font_has_glyphs() {
        let font = builtin_font();
        assert_ne!(font.glyph_id('A').0, 0);
        assert_ne!(font.glyph_id('Z').0, 0);
    }

    #[test]
    fn test_builtin_provider_names() {
        assert_eq!(BuiltinFonts.font_names(), vec![BUILTIN_FONT_NAME.to_string()]);
    }

    #[test]
    fn test_builtin_provider_is_case_insensitive() {
        assert!(BuiltinFonts.load("default", 50).is_ok());
        assert!(BuiltinFonts.load("DEFAULT", 50).is_ok());
    }

    #[test]
    fn test_unknown_font_falls_back_with_warning() {
        let resolved = resolve_font(&BuiltinFonts, &FontSpec::new("Nonexistent123", 40), 10);
        assert_eq!(resolved.size, 40);
        match resolved.warning {
            Some(Warning::FontFallback { requested, .. }) => assert_eq!(requested, "Nonexistent123"),
            None => panic!("expected a fallback warning"),
        }
    }

    #[test]
    fn test_zero_size_uses_fallback_size() {
        let resolved = resolve_font(&BuiltinFonts, &FontSpec::new(BUILTIN_FONT_NAME, 0), 10);
        assert_eq!(resolved.size, 10);
        assert!(resolved.warning.is_some());
    }

    #[test]
    fn test_oversized_font_uses_fallback_size() {
        for size in [MAX_FONT_SIZE + 1, 100_000, u32::MAX] {
            let resolved = resolve_font(&BuiltinFonts, &FontSpec::new(BUILTIN_FONT_NAME, size), 10);
            assert_eq!(resolved.size, 10, "size {size}");
            match resolved.warning {
                Some(Warning::FontFallback { requested, reason }) => {
                    assert_eq!(requested, BUILTIN_FONT_NAME);
                    assert!(reason.contains(&size.to_string()), "{reason}");
                }
                None => panic!("expected a fallback warning for size {size}"),
            }
        }
    }

    #[test]
    fn test_largest_font_size_is_accepted() {
        assert!(BuiltinFonts.load(BUILTIN_FONT_NAME, MAX_FONT_SIZE).is_ok());
        assert!(matches!(
            BuiltinFonts.load(BUILTIN_FONT_NAME, MAX_FONT_SIZE + 1),
            Err(FontError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_known_font_has_no_warning() {
        let resolved = resolve_font(&BuiltinFonts, &FontSpec::new(BUILTIN_FONT_NAME, 50), 10);
        assert_eq!(resolved.size, 50);
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn test_system_fonts_lists_builtin_first() {
        let fonts = SystemFonts::with_database(Database::new());
        assert_eq!(fonts.font_names(), vec![BUILTIN_FONT_NAME.to_string()]);
        assert!(matches!(
            fonts.load("Nonexistent123", 50),
            Err(FontError::UnknownFamily(_))
        ));
        assert!(fonts.load(BUILTIN_FONT_NAME, 50).is_ok());
    }

    #[test]
    fn test_system_fonts_loads_registered_family() {
        let mut db = Database::new();
        db.load_font_data(BUILTIN_FONT_DATA.to_vec());
        let fonts = SystemFonts::with_database(db);

        let names = fonts.font_names();
        assert_eq!(names[0], BUILTIN_FONT_NAME);
        assert!(names.iter().any(|n| n == "DejaVu Sans"));
        assert!(fonts.load("dejavu sans", 30).is_ok());
    }

    #[test]
    fn test_font_file_path_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.ttf");
        std::fs::write(&path, BUILTIN_FONT_DATA).unwrap();

        let fonts = SystemFonts::with_database(Database::new());
        assert!(fonts.load(path.to_str().unwrap(), 30).is_ok());
    }

    #[test]
    fn test_garbage_font_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        assert!(matches!(
            load_font_file(&path),
            Err(FontError::InvalidData { .. })
        ));
    }
}
