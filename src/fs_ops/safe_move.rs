//! Collision-safe move of one file into a destination directory.
//! Attempts atomic rename; on cross-filesystem errors, falls back to
//! copy+remove with the no-overwrite, no-data-loss guarantees preserved.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::HubError;

use super::atomic::try_atomic_move;
use super::copy::copy_then_remove;
use super::duplicate::disambiguate;

/// Move `src` into `dest_dir`, never overwriting an existing file.
///
/// The candidate name is the source basename; on collision a numeric counter
/// is inserted before the extension (" (1)", " (2)", ...). Returns the
/// destination path actually used on disk. The source no longer exists at its
/// original location on success (cut, not copy).
pub fn safe_move(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let meta = fs::symlink_metadata(src).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            anyhow::Error::new(HubError::SourceNotFound(src.to_path_buf()))
        } else {
            anyhow::Error::new(e).context(format!("stat source '{}'", src.display()))
        }
    })?;
    if !meta.is_file() {
        return Err(HubError::NotAFile(src.to_path_buf()).into());
    }
    if !dest_dir.is_dir() {
        return Err(HubError::DestinationMissing(dest_dir.to_path_buf()).into());
    }

    let file_name = src
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Source file missing a file name: {}", src.display()))?;
    let dest = disambiguate(dest_dir, file_name);

    match try_atomic_move(src, &dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
            Ok(dest)
        }
        Err(e) if is_cross_device(&e) => {
            warn!(error = %e, "Rename crossed filesystems, using copy+remove");
            copy_then_remove(src, &dest)?;
            info!(src = %src.display(), dest = %dest.display(), "Copied across filesystems and removed source");
            Ok(dest)
        }
        Err(e) => Err(e).with_context(|| {
            format!("move '{}' -> '{}'", src.display(), dest.display())
        }),
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind has no stable CrossDeviceLink variant, so detect
    // EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            if code == 17 {
                return true;
            }
        }
        let _ = code;
    }
    false
}
