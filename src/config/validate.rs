//! Config validation logic.
//! Verifies directory existence, readability/writability and that the two
//! directories are not the same path. The published folder normally lives
//! inside the staging folder, so containment is allowed; identity is not.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;

impl Config {
    /// Validate existence, readability/writability and distinct paths.
    ///
    /// - staging_dir must exist and be readable.
    /// - publish_dir is created if missing and must be writable.
    pub fn validate(&self) -> Result<()> {
        let staging = &self.staging_dir;
        let publish = &self.publish_dir;

        ensure_dir_exists_and_is_dir(staging, "staging_dir")?;
        ensure_readable(staging, "staging_dir")?;

        ensure_dir_is_or_create(publish, "publish_dir")?;
        ensure_writable(publish, "publish_dir")?;

        // Resolve symlinks before comparing; moving a folder into itself is
        // the one layout we refuse.
        let staging_real = fs::canonicalize(staging).unwrap_or_else(|_| staging.clone());
        let publish_real = fs::canonicalize(publish).unwrap_or_else(|_| publish.clone());
        if staging_real == publish_real {
            bail!(
                "staging_dir and publish_dir resolve to the same path: '{}'",
                staging_real.display()
            );
        }

        info!(
            "Config validated: staging='{}' publish='{}'",
            staging.display(),
            publish.display()
        );
        Ok(())
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!(
            "Cannot read {name} directory '{}'; check permissions",
            path.display()
        )
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    let probe = path.join(format!(".pdfhub_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            debug!("{name} writable: {}", path.display());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "Cannot write to {name} '{}'; check permissions",
                path.display()
            )
        }),
    }
}
