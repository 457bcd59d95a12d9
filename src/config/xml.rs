//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless PDFHUB_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields fail the parse (serde deny_unknown_fields) so typos surface early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{
    BRANCH_DEFAULT, BRAND_DEFAULT, KEYWORD_DEFAULT, PUBLISH_DIR_DEFAULT, REMOTE_URL_DEFAULT,
    STAGING_DIR_DEFAULT, TITLE_DEFAULT,
};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    staging_dir: Option<String>,
    publish_dir: Option<String>,
    keyword: Option<String>,
    brand: Option<String>,
    title: Option<String>,
    remote_url: Option<String>,
    remote_name: Option<String>,
    branch: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Outcome of config resolution at startup.
#[derive(Debug)]
pub enum LoadResult {
    /// No config existed; a template was written at this path.
    CreatedTemplate(PathBuf),
    /// A config file was found and parsed.
    Loaded(Config),
    /// No config path could be determined; caller should use defaults.
    Missing,
}

/// Resolve and load the config file.
///
/// Search order:
///  - $PDFHUB_CONFIG (explicit; must exist and parse)
///  - OS default (dirs config dir / pdfhub/config.xml); a template is written
///    there on first run so users get a documented starting point.
pub fn load_or_init() -> Result<LoadResult> {
    if let Some(p) = env::var_os("PDFHUB_CONFIG") {
        let path = PathBuf::from(p);
        if !path.exists() {
            bail!(
                "PDFHUB_CONFIG points to a missing file: {}",
                path.display()
            );
        }
        return Ok(LoadResult::Loaded(load_from_path(&path)?));
    }

    let Some(cfg_path) = default_config_path() else {
        return Ok(LoadResult::Missing);
    };

    if !cfg_path.exists() {
        create_template_config(&cfg_path)
            .with_context(|| format!("create template config at '{}'", cfg_path.display()))?;
        return Ok(LoadResult::CreatedTemplate(cfg_path));
    }

    Ok(LoadResult::Loaded(load_from_path(&cfg_path)?))
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    let trimmed = |s: &Option<String>| -> Option<String> {
        s.as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };

    if let Some(s) = trimmed(&parsed.staging_dir) {
        cfg.staging_dir = PathBuf::from(s);
    }
    if let Some(s) = trimmed(&parsed.publish_dir) {
        cfg.publish_dir = PathBuf::from(s);
    }
    if let Some(s) = trimmed(&parsed.keyword) {
        cfg.keyword = s;
    }
    if let Some(s) = trimmed(&parsed.brand) {
        cfg.brand = s;
    }
    if let Some(s) = trimmed(&parsed.title) {
        cfg.title = s;
    }
    if let Some(s) = trimmed(&parsed.remote_url) {
        cfg.remote_url = s;
    }
    if let Some(s) = trimmed(&parsed.remote_name) {
        cfg.remote_name = s;
    }
    if let Some(s) = trimmed(&parsed.branch) {
        cfg.branch = s;
    }
    if let Some(s) = trimmed(&parsed.log_level) {
        if let Some(level) = LogLevel::parse(&s) {
            cfg.log_level = level;
        }
    }
    if let Some(s) = trimmed(&parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(s));
    }

    cfg
}

/// Create the default template config file and parent directory.
/// Refuses to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/pdfhub.log".into());

    let content = format!(
        "<!--\n  pdfhub configuration (XML)\n\n  Fields:\n    staging_dir  -> folder where newly produced PDFs land\n    publish_dir  -> published folder; also holds the generated index.html\n    keyword      -> case-insensitive substring a name must contain for `pdfhub move`\n    brand        -> site branding shown in the gallery header\n    title        -> gallery page title\n    remote_url   -> git remote URL used by `pdfhub push`\n    remote_name  -> git remote name (normally origin)\n    branch       -> branch pushed to\n    log_level    -> quiet | normal | info | debug\n    log_file     -> path to log file (optional; stdout/stderr still used)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <staging_dir>{}</staging_dir>\n  <publish_dir>{}</publish_dir>\n  <keyword>{}</keyword>\n  <brand>{}</brand>\n  <title>{}</title>\n  <remote_url>{}</remote_url>\n  <remote_name>origin</remote_name>\n  <branch>{}</branch>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        STAGING_DIR_DEFAULT,
        PUBLISH_DIR_DEFAULT,
        KEYWORD_DEFAULT,
        BRAND_DEFAULT,
        TITLE_DEFAULT,
        REMOTE_URL_DEFAULT,
        BRANCH_DEFAULT,
        suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}
