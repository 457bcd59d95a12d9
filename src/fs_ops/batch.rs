//! Batch move driver with per-file error isolation.
//!
//! One failing file never aborts the batch: its error is recorded and the
//! remaining files are still processed. The caller receives the full
//! per-item outcome list, in processing order, for the end-of-run trace
//! and summary.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;

use super::duplicate::disambiguate_with;
use super::safe_move::safe_move;
use super::scan::published_names;

/// How an exact-name match in the destination is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Treat the file as already published and skip it (keyword batch runs).
    SkipExisting,
    /// Move anyway; a genuine collision gets a numeric suffix (picked runs,
    /// where the caller already chose the files deliberately).
    Disambiguate,
}

/// Outcome for one file in a batch, in processing order.
#[derive(Debug)]
pub enum ItemOutcome {
    Moved { from: String, to: String },
    Skipped { name: String },
    Failed { name: String, error: String },
}

/// Per-item outcomes plus count accessors for the summary line.
#[derive(Debug, Default)]
pub struct MoveReport {
    pub items: Vec<ItemOutcome>,
}

impl MoveReport {
    pub fn moved(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, ItemOutcome::Moved { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, ItemOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, ItemOutcome::Failed { .. }))
            .count()
    }
}

/// Move `sources` into the configured publish directory.
///
/// The selection is an immutable input: whatever presentation layer produced
/// it (keyword scan, explicit names), this function only consumes it. The
/// destination name set is maintained across the batch so a pre-check skip
/// also applies to names claimed earlier in the same run.
pub fn move_batch(
    cfg: &Config,
    sources: &[PathBuf],
    policy: CollisionPolicy,
) -> Result<MoveReport> {
    let mut dest_names = published_names(&cfg.publish_dir)?;
    let mut report = MoveReport::default();

    for src in sources {
        let display_name = file_name_lossy(src);

        if policy == CollisionPolicy::SkipExisting && dest_names.contains(&display_name.to_lowercase())
        {
            debug!(name = %display_name, "already published, skipping");
            report.items.push(ItemOutcome::Skipped { name: display_name });
            continue;
        }

        if cfg.dry_run {
            // Project the destination without touching the filesystem: names
            // claimed earlier in this run count as taken even though nothing
            // was written.
            let dest = src
                .file_name()
                .map(|n| {
                    disambiguate_with(&cfg.publish_dir, n, |p| {
                        p.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| dest_names.contains(&n.to_lowercase()))
                    })
                })
                .unwrap_or_else(|| cfg.publish_dir.join(&display_name));
            info!(src = %src.display(), dest = %dest.display(), "dry-run: would move file");
            dest_names.insert(file_name_lossy(&dest).to_lowercase());
            report.items.push(ItemOutcome::Moved {
                from: display_name,
                to: file_name_lossy(&dest),
            });
            continue;
        }

        match safe_move(src, &cfg.publish_dir) {
            Ok(dest) => {
                let dest_name = file_name_lossy(&dest);
                dest_names.insert(dest_name.to_lowercase());
                report.items.push(ItemOutcome::Moved {
                    from: display_name,
                    to: dest_name,
                });
            }
            Err(e) => {
                report.items.push(ItemOutcome::Failed {
                    name: display_name,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    info!(
        moved = report.moved(),
        skipped = report.skipped(),
        errors = report.failed(),
        "batch move finished"
    );
    Ok(report)
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
