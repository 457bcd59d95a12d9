//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the pdfhub library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Publish PDFs: move, pick, build the gallery, push to GitHub"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override the staging directory (normally configured via XML).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the staging directory")]
    pub staging_dir: Option<PathBuf>,

    /// Override the publish directory (normally configured via XML).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the publish directory")]
    pub publish_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: log actions but do not modify the filesystem or the remote.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files or the remote"
    )]
    pub dry_run: bool,

    /// Print where pdfhub will look for the config file (or PDFHUB_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by pdfhub and exit"
    )]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move keyword-matching PDFs from staging to the publish folder.
    Move {
        /// Substring a staged name must contain (case-insensitive).
        #[arg(long, help = "Override the keyword filter (default from config)")]
        keyword: Option<String>,
    },
    /// Move explicitly named staged PDFs, regardless of keyword.
    Pick {
        /// List unpublished staged PDFs instead of moving.
        #[arg(short, long, help = "List staged PDFs not yet published")]
        list: bool,

        /// File names (not paths) inside the staging directory.
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },
    /// Regenerate the gallery index.html from the publish folder.
    Build,
    /// Build, commit and push the publish folder to the configured remote.
    Push {
        /// Commit message (prompted for interactively when omitted).
        #[arg(short, long, help = "Commit message; omit to be prompted")]
        message: Option<String>,

        /// Skip the gallery rebuild before pushing.
        #[arg(long, help = "Push without regenerating index.html first")]
        no_build: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(sd) = &self.staging_dir {
            cfg.staging_dir = sd.clone();
        }
        if let Some(pd) = &self.publish_dir {
            cfg.publish_dir = pd.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
