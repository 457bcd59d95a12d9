//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{
    BRANCH_DEFAULT, BRAND_DEFAULT, KEYWORD_DEFAULT, PDF_SUFFIX, PUBLISH_DIR_DEFAULT,
    REMOTE_NAME_DEFAULT, REMOTE_URL_DEFAULT, STAGING_DIR_DEFAULT, TITLE_DEFAULT,
};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration shared by the mover, builder and pusher.
///
/// Everything the old per-script constants expressed lives here so every
/// operation receives one explicit value instead of reading globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where newly produced PDFs land before publishing
    pub staging_dir: PathBuf,
    /// Published folder; also holds the generated index.html
    pub publish_dir: PathBuf,
    /// Case-insensitive substring a staged name must contain for batch moves
    pub keyword: String,
    /// File suffix filter, matched case-insensitively (".pdf")
    pub suffix: String,
    /// Site branding shown in the gallery header
    pub brand: String,
    /// Gallery page title
    pub title: String,
    /// Remote repository URL for `push`
    pub remote_url: String,
    /// Remote name (normally "origin")
    pub remote_name: String,
    /// Branch pushed to
    pub branch: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print actions but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from(STAGING_DIR_DEFAULT),
            publish_dir: PathBuf::from(PUBLISH_DIR_DEFAULT),
            keyword: KEYWORD_DEFAULT.to_string(),
            suffix: PDF_SUFFIX.to_string(),
            brand: BRAND_DEFAULT.to_string(),
            title: TITLE_DEFAULT.to_string(),
            remote_url: REMOTE_URL_DEFAULT.to_string(),
            remote_name: REMOTE_NAME_DEFAULT.to_string(),
            branch: BRANCH_DEFAULT.to_string(),
            log_level: LogLevel::Normal,
            // paths::default_log_path() returns Option<PathBuf>; best-effort.
            log_file: paths::default_log_path(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(staging_dir: impl Into<PathBuf>, publish_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            publish_dir: publish_dir.into(),
            ..Default::default()
        }
    }
}
