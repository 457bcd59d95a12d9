//! Git publishing glue: turn the publish directory into a repository,
//! commit everything, and push to the configured remote.
//!
//! Each step shells out to the `git` binary; nothing here links a git
//! library. The commit message is produced by an injected callback so the
//! binary can prompt interactively while tests supply a fixed string.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::HubError;
use crate::output;

/// Run the full publish sequence against `cfg.publish_dir`.
///
/// `commit_message` is only invoked when the working tree is dirty.
pub fn push_all(cfg: &Config, commit_message: &mut dyn FnMut() -> String) -> Result<()> {
    if !git_available() {
        return Err(HubError::GitUnavailable.into());
    }
    let repo = &cfg.publish_dir;

    if cfg.dry_run {
        output::print_info(&format!(
            "dry-run: would commit and push '{}' to {} ({})",
            repo.display(),
            cfg.remote_name,
            cfg.remote_url
        ));
        return Ok(());
    }

    ensure_repo(repo, &cfg.branch)?;
    ensure_remote(repo, &cfg.remote_name, &cfg.remote_url)?;
    ensure_identity(repo)?;
    maybe_pull_rebase(repo, &cfg.remote_name, &cfg.branch);

    run_git(repo, &["add", "-A"])?;

    if working_tree_dirty(repo)? {
        let mut msg = commit_message();
        if msg.trim().is_empty() {
            msg = "update".to_string();
        }
        // A racing commit from elsewhere can empty the index between the
        // status check and here; treat that as nothing to commit.
        if let Err(e) = run_git(repo, &["commit", "-m", &msg]) {
            warn!(error = %e, "commit failed, continuing to push");
        }
    } else {
        info!("working tree clean, nothing to commit");
    }

    if !has_commits(repo)? {
        return Err(HubError::EmptyHistory.into());
    }

    run_git(repo, &["push", "-u", &cfg.remote_name, &cfg.branch])?;
    output::print_success(&format!(
        "pushed {} to {} ({})",
        cfg.branch, cfg.remote_name, cfg.remote_url
    ));
    Ok(())
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Initialise the repository if needed and force the branch name.
fn ensure_repo(repo: &Path, branch: &str) -> Result<()> {
    if !repo.join(".git").exists() {
        info!(repo = %repo.display(), "initialising git repository");
        run_git(repo, &["init"])?;
    }
    run_git(repo, &["branch", "-M", branch])?;
    Ok(())
}

/// Add the remote, or repoint it when the URL changed.
fn ensure_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    let existing = capture_git(repo, &["remote", "get-url", name]).ok();
    match existing {
        Some(current) if current.trim() == url => Ok(()),
        Some(_) => {
            info!(remote = name, url, "updating remote URL");
            run_git(repo, &["remote", "set-url", name, url])
        }
        None => {
            info!(remote = name, url, "adding remote");
            run_git(repo, &["remote", "add", name, url])
        }
    }
}

/// Set a repo-local identity when none is configured, so fresh machines can
/// commit without global setup.
fn ensure_identity(repo: &Path) -> Result<()> {
    if capture_git(repo, &["config", "user.name"]).is_err() {
        run_git(repo, &["config", "user.name", "Ronan Downes"])?;
    }
    if capture_git(repo, &["config", "user.email"]).is_err() {
        run_git(
            repo,
            &["config", "user.email", "ronandownes@users.noreply.github.com"],
        )?;
    }
    Ok(())
}

/// Rebase on the remote branch when it exists. Failure is non-fatal; a push
/// rejection later will tell the user what to reconcile.
fn maybe_pull_rebase(repo: &Path, remote: &str, branch: &str) {
    if let Err(e) = run_git(repo, &["fetch", remote]) {
        warn!(error = %e, "fetch failed, skipping rebase");
        return;
    }
    let remote_branch = match capture_git(repo, &["ls-remote", "--heads", remote, branch]) {
        Ok(out) => !out.trim().is_empty(),
        Err(e) => {
            warn!(error = %e, "ls-remote failed, skipping rebase");
            return;
        }
    };
    if !remote_branch {
        debug!(remote, branch, "remote branch absent, nothing to rebase on");
        return;
    }
    if let Err(e) = run_git(repo, &["pull", "--rebase", remote, branch]) {
        warn!(error = %e, "pull --rebase failed, continuing");
    }
}

fn working_tree_dirty(repo: &Path) -> Result<bool> {
    let out = capture_git(repo, &["status", "--porcelain"])?;
    Ok(!out.trim().is_empty())
}

fn has_commits(repo: &Path) -> Result<bool> {
    Ok(capture_git(repo, &["rev-parse", "--verify", "HEAD"]).is_ok())
}

/// Run git inheriting stdio, failing on a non-zero exit.
fn run_git(repo: &Path, args: &[&str]) -> Result<()> {
    debug!(?args, "git");
    let status = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .status()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !status.success() {
        return Err(HubError::GitFailed {
            op: args.join(" "),
            status: status.code().unwrap_or(-1),
        }
        .into());
    }
    Ok(())
}

/// Run git capturing stdout, failing on a non-zero exit.
fn capture_git(repo: &Path, args: &[&str]) -> Result<String> {
    debug!(?args, "git (capture)");
    let Output { status, stdout, .. } = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !status.success() {
        return Err(HubError::GitFailed {
            op: args.join(" "),
            status: status.code().unwrap_or(-1),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn git_present() -> bool {
        git_available()
    }

    #[test]
    fn ensure_repo_initialises_and_names_branch() {
        if !git_present() {
            return;
        }
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.pdf"), b"x").unwrap();

        ensure_repo(td.path(), "main").unwrap();
        assert!(td.path().join(".git").exists());
        // idempotent
        ensure_repo(td.path(), "main").unwrap();
    }

    #[test]
    fn ensure_remote_adds_then_repoints() {
        if !git_present() {
            return;
        }
        let td = tempdir().unwrap();
        ensure_repo(td.path(), "main").unwrap();

        ensure_remote(td.path(), "origin", "https://example.com/a.git").unwrap();
        let url = capture_git(td.path(), &["remote", "get-url", "origin"]).unwrap();
        assert_eq!(url.trim(), "https://example.com/a.git");

        ensure_remote(td.path(), "origin", "https://example.com/b.git").unwrap();
        let url = capture_git(td.path(), &["remote", "get-url", "origin"]).unwrap();
        assert_eq!(url.trim(), "https://example.com/b.git");
    }

    #[test]
    fn dirty_tree_is_detected_and_committed() {
        if !git_present() {
            return;
        }
        let td = tempdir().unwrap();
        ensure_repo(td.path(), "main").unwrap();
        ensure_identity(td.path()).unwrap();
        fs::write(td.path().join("a.pdf"), b"x").unwrap();

        run_git(td.path(), &["add", "-A"]).unwrap();
        assert!(working_tree_dirty(td.path()).unwrap());
        run_git(td.path(), &["commit", "-m", "update"]).unwrap();
        assert!(!working_tree_dirty(td.path()).unwrap());
        assert!(has_commits(td.path()).unwrap());
    }

    #[test]
    fn fresh_repo_has_no_commits() {
        if !git_present() {
            return;
        }
        let td = tempdir().unwrap();
        ensure_repo(td.path(), "main").unwrap();
        assert!(!has_commits(td.path()).unwrap());
    }
}
