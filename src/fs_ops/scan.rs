//! Staging and destination scans for the movers.
//! All scans are non-recursive: only immediate children are considered.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::HubError;

/// Lowercased names of the regular files directly inside `dir`.
/// Used for the exact-name pre-check before batch moves.
pub fn published_names(dir: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    let rd = fs::read_dir(dir).map_err(|e| HubError::UnreadableDirectory {
        path: dir.to_path_buf(),
        context: e.to_string(),
    })?;
    for entry in rd {
        let entry = entry
            .with_context(|| format!("read destination directory '{}'", dir.display()))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_lowercase());
        }
    }
    Ok(names)
}

/// Staged files whose lowercased name ends with `suffix` and, when given,
/// contains `keyword` (both matched case-insensitively). Sorted by
/// case-insensitive name so batch runs process files in a stable order.
pub fn list_candidates(
    staging: &Path,
    suffix: &str,
    keyword: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let suffix = suffix.to_lowercase();
    let keyword = keyword.map(str::to_lowercase);

    let rd = fs::read_dir(staging).map_err(|e| HubError::UnreadableDirectory {
        path: staging.to_path_buf(),
        context: e.to_string(),
    })?;

    let mut out: Vec<(String, PathBuf)> = Vec::new();
    for entry in rd {
        let entry =
            entry.with_context(|| format!("read staging directory '{}'", staging.display()))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            debug!(path = %entry.path().display(), "skipping non-UTF8 file name");
            continue;
        };
        let name_l = name.to_lowercase();
        if !name_l.ends_with(&suffix) {
            continue;
        }
        if let Some(ref kw) = keyword {
            if !name_l.contains(kw.as_str()) {
                continue;
            }
        }
        out.push((name_l, entry.path()));
    }

    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out.into_iter().map(|(_, p)| p).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn keyword_filter_is_case_insensitive() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("Report_OPTIMISED.pdf"), b"x").unwrap();
        fs::write(td.path().join("draft.pdf"), b"x").unwrap();
        fs::write(td.path().join("notes.txt"), b"x").unwrap();

        let got = list_candidates(td.path(), ".pdf", Some("_optimised")).unwrap();
        assert_eq!(got, vec![td.path().join("Report_OPTIMISED.pdf")]);
    }

    #[test]
    fn no_keyword_lists_all_pdfs_sorted() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("b.pdf"), b"x").unwrap();
        fs::write(td.path().join("A.pdf"), b"x").unwrap();
        fs::write(td.path().join("c.txt"), b"x").unwrap();

        let got = list_candidates(td.path(), ".pdf", None).unwrap();
        assert_eq!(
            got,
            vec![td.path().join("A.pdf"), td.path().join("b.pdf")]
        );
    }

    #[test]
    fn directories_are_ignored() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("folder.pdf")).unwrap();

        let got = list_candidates(td.path(), ".pdf", None).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn published_names_are_lowercased() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("Sheet.PDF"), b"x").unwrap();

        let names = published_names(td.path()).unwrap();
        assert!(names.contains("sheet.pdf"));
    }

    #[test]
    fn unreadable_staging_is_typed() {
        let err = list_candidates(Path::new("/nonexistent/pdfhub"), ".pdf", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HubError>(),
            Some(HubError::UnreadableDirectory { .. })
        ));
    }
}
