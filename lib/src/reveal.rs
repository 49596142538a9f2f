//! Opening the output folder in the platform file browser

use crate::error::MemeError;
use std::path::Path;
use std::process::Command;

/// Shows a directory to the user
pub trait FolderRevealer {
    fn reveal(&self, dir: &Path) -> Result<(), MemeError>;
}

/// Launches the host's file browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRevealer;

impl SystemRevealer {
    #[cfg(target_os = "windows")]
    fn command(dir: &Path) -> Command {
        let mut cmd = Command::new("explorer");
        cmd.arg(dir);
        cmd
    }

    #[cfg(target_os = "macos")]
    fn command(dir: &Path) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg(dir);
        cmd
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn command(dir: &Path) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(dir);
        cmd
    }
}

impl FolderRevealer for SystemRevealer {
    fn reveal(&self, dir: &Path) -> Result<(), MemeError> {
        if !dir.is_dir() {
            return Err(MemeError::FolderMissing(dir.to_path_buf()));
        }

        log::debug!("opening {}", dir.display());
        // The browser outlives us; the child is not waited on
        Self::command(dir)
            .spawn()
            .map(drop)
            .map_err(|source| MemeError::Reveal {
                path: dir.to_path_buf(),
                source,
            })
    }
}

/// The revealer for the platform this binary was built for
pub fn platform_revealer() -> Box<dyn FolderRevealer> {
    Box::new(SystemRevealer)
}
