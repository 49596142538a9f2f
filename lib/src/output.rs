use crate::error::MemeError;
use image::{ImageFormat, RgbImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use time::OffsetDateTime;
use time::macros::format_description;

/// Current wall-clock time in the local offset, or UTC when the local
/// offset cannot be determined
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `meme_{stem}_{YYYYMMDD_HHMMSS}.png`
///
/// The stem is the source file name without its last extension; a path
/// without a file name uses `image`.
pub fn output_file_name(source: &Path, at: OffsetDateTime) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let timestamp = at
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string());

    format!("meme_{stem}_{timestamp}.png")
}

/// Create `dir` and any missing parents; succeeds if it already exists
pub fn ensure_output_dir(dir: &Path) -> Result<(), MemeError> {
    std::fs::create_dir_all(dir).map_err(|source| MemeError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Encode a canvas as PNG
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, MemeError> {
    let mut bytes = Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(MemeError::Encode)?;
    Ok(bytes.into_inner())
}

/// Write `canvas` to `dir` under a name derived from `source` and `at`
///
/// The PNG is written to a temporary file in `dir` and moved into place
/// only once it is complete, so a failure never leaves a partial file.
/// An existing file with the same name is never replaced.
///
/// # Returns
/// The path of the written file
pub fn save_png(
    canvas: &RgbImage,
    source: &Path,
    dir: &Path,
    at: OffsetDateTime,
) -> Result<PathBuf, MemeError> {
    ensure_output_dir(dir)?;

    let path = dir.join(output_file_name(source, at));
    if path.exists() {
        return Err(MemeError::OutputCollision(path));
    }

    let bytes = encode_png(canvas)?;
    let write_error = |source: std::io::Error| MemeError::Write {
        path: path.clone(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(&bytes).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;

    tmp.persist_noclobber(&path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            MemeError::OutputCollision(path.clone())
        } else {
            write_error(e.error)
        }
    })?;

    log::info!("saved {}", path.display());
    Ok(path)
}
