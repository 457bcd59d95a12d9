//! Tracing setup for the pdfhub binary.
//!
//! One stdout layer is always installed, compact by default or JSON with
//! `--json`. When the config names a log file, a non-blocking file layer in
//! the same format is added. File logging is refused when an ancestor of the
//! path is a symlink; on Unix the file is created 0600 and opened with
//! O_NOFOLLOW. A refused or unopenable log file downgrades to stdout-only
//! with a warning instead of failing the run.

use anyhow::Result;
use chrono::Local;
use pdfhub::config::path_has_symlink_ancestor;
use pdfhub::output as out;
use pdfhub::LogLevel;
use std::fmt as stdfmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

/// Timestamps as DD/MM/YY HH:MM:SS local time.
struct HubTime;
impl FormatTime for HubTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

/// Console verbosity to subscriber filter. RUST_LOG is deliberately ignored;
/// the config file and CLI flags are the only knobs.
fn verbosity(lvl: &LogLevel) -> EnvFilter {
    EnvFilter::new(match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    })
}

/// One fmt layer; `writer` of None means stdout.
fn fmt_layer(json: bool, writer: Option<NonBlocking>) -> Box<dyn Layer<Registry> + Send + Sync> {
    if json {
        let format = tsfmt::format().json().with_timer(HubTime);
        match writer {
            Some(w) => tsfmt::layer().event_format(format).with_writer(w).boxed(),
            None => tsfmt::layer().event_format(format).boxed(),
        }
    } else {
        let layer = tsfmt::layer()
            .with_timer(HubTime)
            .with_target(true)
            .compact();
        match writer {
            Some(w) => layer.with_writer(w).boxed(),
            None => layer.boxed(),
        }
    }
}

/// Open the log file for appending, creating parents as needed.
/// Refuses symlinked ancestors; on Unix, 0600 and O_NOFOLLOW.
fn open_log_writer(path: &Path) -> io::Result<File> {
    if path_has_symlink_ancestor(path)? {
        return Err(io::Error::other(format!(
            "ancestor of '{}' is a symlink",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
        opts.custom_flags(libc::O_NOFOLLOW);
    }
    opts.open(path)
}

/// Install the global subscriber. Returns the appender guard when a file
/// layer was added; the caller holds it until exit so buffered lines flush.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers = vec![fmt_layer(json, None)];
    let mut guard = None;

    if let Some(path) = log_file {
        match open_log_writer(path) {
            Ok(file) => {
                let (writer, g) = tracing_appender::non_blocking(file);
                layers.push(fmt_layer(json, Some(writer)));
                guard = Some(g);
            }
            Err(e) => {
                out::print_warn(&format!(
                    "File logging to '{}' is disabled: {e}. Logs continue on stdout.",
                    path.display()
                ));
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(verbosity(lvl))
        .init();
    Ok(guard)
}
