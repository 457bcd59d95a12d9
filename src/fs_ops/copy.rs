//! Copy+remove fallback for cross-filesystem moves.
//!
//! - Writes to a temp file in the destination directory (O_EXCL semantics;
//!   never clobbers), with large buffers and a final fsync.
//! - Atomically renames temp -> dest, then removes the source.
//! - The source is deleted only after the copy has fully landed under its
//!   final name, so a failure at any point leaves the source intact.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` to `dest` via a temp file, rename into place, then remove `src`.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow::anyhow!("destination has no parent: {}", dest.display()))?;

    let tmp_path = unique_temp_path(dest_dir);

    let src_len = std::fs::metadata(src)
        .map_err(io_error_with_help("stat source", src))?
        .len();

    let written = match copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };

    // Snapshot check: the source must not have changed size mid-copy.
    if written != src_len {
        let _ = std::fs::remove_file(&tmp_path);
        anyhow::bail!(
            "copy of '{}' incomplete: wrote {} bytes, expected {}",
            src.display(),
            written,
            src_len
        );
    }

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    std::fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    Ok(())
}

/// Copy `src` -> `dst` using buffered I/O, then fsync the destination.
/// `dst` is created with `create_new(true)` so we never clobber an existing file.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}

fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".pdfhub.{}.{}.tmp", pid, nanos))
}
