//! Filesystem locations for pdfhub's own files.
//!
//! Everything lives under a per-user `pdfhub/` folder: the XML config in the
//! OS config directory, the log file in the OS data directory. Paths are only
//! written through after the symlink-ancestor check passes.

use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pdfhub";
const CONFIG_FILE: &str = "config.xml";
const LOG_FILE: &str = "pdfhub.log";

/// `<os config dir>/pdfhub/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    per_user_file(config_dir(), &[".config"], CONFIG_FILE)
}

/// `<os data dir>/pdfhub/pdfhub.log`.
pub fn default_log_path() -> Option<PathBuf> {
    per_user_file(data_dir(), &[".local", "share"], LOG_FILE)
}

// The HOME fallback only matters in stripped environments (containers
// without XDG variables); dirs covers every normal platform.
fn per_user_file(base: Option<PathBuf>, home_relative: &[&str], file: &str) -> Option<PathBuf> {
    let mut dir = base.or_else(|| {
        let home = std::env::var_os("HOME")?;
        let mut p = PathBuf::from(home);
        for seg in home_relative {
            p.push(seg);
        }
        Some(p)
    })?;
    dir.push(APP_DIR);
    dir.push(file);
    Some(dir)
}

/// True if any existing ancestor of `path` is a symlink. The config template
/// and the log file are never written through a redirected parent.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    for anc in path.ancestors().skip(1) {
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_under_the_app_dir() {
        if let Some(p) = default_config_path() {
            assert!(p.ends_with("pdfhub/config.xml"), "got {}", p.display());
        }
        if let Some(p) = default_log_path() {
            assert!(p.ends_with("pdfhub/pdfhub.log"), "got {}", p.display());
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_parent_is_detected() {
        let td = tempfile::tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(path_has_symlink_ancestor(&link.join("pdfhub.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("pdfhub.log")).unwrap());
    }

    #[test]
    fn missing_ancestors_are_not_an_error() {
        let td = tempfile::tempdir().unwrap();
        let deep = td.path().join("a/b/c/pdfhub.log");
        assert!(!path_has_symlink_ancestor(&deep).unwrap());
    }
}
