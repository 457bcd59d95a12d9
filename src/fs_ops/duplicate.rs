//! Numeric-suffix disambiguation for destination names.
//!
//! The mover never overwrites: when the requested name is taken, a counter is
//! inserted before the extension until a free path is found.
//!
//! Examples:
//! - "sheet.pdf" -> "sheet (1).pdf", "sheet (2).pdf", ...
//! - ".env" -> ".env (1)"
//! - "archive.tar.gz" -> "archive.tar (1).gz"

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Return a collision-free path for `name` inside `dest_dir`.
///
/// This only decides a name based on current filesystem state; single-user,
/// single-process use is assumed, so no locking guards the gap between the
/// existence check and the actual move.
pub fn disambiguate(dest_dir: &Path, name: &OsStr) -> PathBuf {
    disambiguate_with(dest_dir, name, |_| false)
}

/// Like [`disambiguate`], but a candidate is also rejected when `taken` says
/// so. Dry-run batches use this to account for names claimed earlier in the
/// same run, since nothing is written to disk between iterations.
pub(super) fn disambiguate_with(
    dest_dir: &Path,
    name: &OsStr,
    taken: impl Fn(&Path) -> bool,
) -> PathBuf {
    let candidate = dest_dir.join(name);
    if !candidate.exists() && !taken(&candidate) {
        return candidate;
    }

    // Extract stem and extension, preserving non-UTF8 via OsString.
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let mut n: u64 = 1;
    loop {
        let mut new_name = OsString::new();
        new_name.push(&stem);
        new_name.push(format!(" ({n})"));
        if let Some(ref e) = ext {
            new_name.push(".");
            new_name.push(e);
        }
        let candidate = dest_dir.join(&new_name);
        if !candidate.exists() && !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
