//! Published-folder scan: produces the ordered manifest entries.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::warn;

use crate::errors::HubError;

/// Point-in-time snapshot of one published file. Size and mtime are captured
/// once at scan time; rebuild the manifest to reflect filesystem changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfEntry {
    pub name: String,
    pub size_bytes: u64,
    pub modified_unix: i64,
}

/// Scan `dir` (immediate children only) for regular files whose name ends
/// with `suffix`, case-insensitively. Entries are sorted ascending by
/// lowercased name, the baseline order embedded in the rendered artifact.
///
/// A file that disappears between enumeration and stat is skipped with a
/// warning rather than failing the whole build.
pub fn scan_published(dir: &Path, suffix: &str) -> Result<Vec<PdfEntry>> {
    let suffix = suffix.to_lowercase();
    let rd = fs::read_dir(dir).map_err(|e| HubError::UnreadableDirectory {
        path: dir.to_path_buf(),
        context: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for entry in rd {
        let entry =
            entry.with_context(|| format!("read published directory '{}'", dir.display()))?;
        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            warn!(path = %entry.path().display(), "skipping non-UTF8 file name");
            continue;
        };
        if !name.to_lowercase().ends_with(&suffix) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(name, error = %e, "file vanished during scan, skipping");
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }
        let modified_unix = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        entries.push(PdfEntry {
            name: name.to_string(),
            size_bytes: meta.len(),
            modified_unix,
        });
    }

    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}
