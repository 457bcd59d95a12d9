//! Gallery manifest: scan the published folder and regenerate `index.html`.
//!
//! The artifact is written whole every build. Readers of a previously
//! published page never see a torn file: the new document is written to a
//! sibling temp file and renamed over the old one.

mod format;
mod render;
mod scan;

pub use format::{human_date, human_size};
pub use render::render_index;
pub use scan::{scan_published, PdfEntry};

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;

/// Scan the publish directory and regenerate its `index.html`.
/// Returns the artifact path and the number of listed files.
pub fn build_index(cfg: &Config) -> Result<(PathBuf, usize)> {
    let entries = scan_published(&cfg.publish_dir, &cfg.suffix)?;
    let folder = cfg
        .publish_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cfg.publish_dir.display().to_string());

    let html = render_index(&entries, &cfg.brand, &cfg.title, &folder);
    let index_path = cfg.publish_dir.join("index.html");

    if cfg.dry_run {
        info!(
            path = %index_path.display(),
            files = entries.len(),
            "dry-run: would write gallery index"
        );
        return Ok((index_path, entries.len()));
    }

    write_whole(&index_path, html.as_bytes())
        .with_context(|| format!("write gallery index '{}'", index_path.display()))?;

    info!(path = %index_path.display(), files = entries.len(), "gallery index written");
    Ok((index_path, entries.len()))
}

/// Write `bytes` to `path` atomically: temp file in the same directory,
/// fsync, then rename over the target.
fn write_whole(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().context("artifact path has no parent")?;
    let tmp = dir.join(format!(".index.{}.tmp", std::process::id()));

    let result = (|| -> Result<()> {
        let mut f = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .with_context(|| format!("create temp file '{}'", tmp.display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
        drop(f);

        // Windows rename does not replace an existing target.
        #[cfg(windows)]
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("remove stale artifact '{}'", path.display()))?;
        }

        fs::rename(&tmp, path)
            .with_context(|| format!("rename temp file into '{}'", path.display()))?;
        Ok(())
    })();

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            debug!(tmp = %tmp.display(), error = %e, "temp cleanup failed");
        }
    }
    result
}
