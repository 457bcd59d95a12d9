//! User-facing output for the command line.
//!
//! Two surfaces live here. Prefixed status lines (`info:`, `warn:`, ...) are
//! colored when the target stream is a terminal. The per-file MOVED/SKIPPED/
//! ERROR trace and its closing summary block are plain text on stdout; their
//! shape is part of the tool's interface, since shell scripts parse them.

use owo_colors::{OwoColorize, Style};

use crate::fs_ops::{ItemOutcome, MoveReport};

fn emit(prefix: &str, style: Style, stream: atty::Stream, msg: &str) {
    let colored = atty::is(stream);
    match (stream, colored) {
        (atty::Stream::Stdout, true) => println!("{} {}", prefix.style(style), msg),
        (atty::Stream::Stdout, false) => println!("{prefix} {msg}"),
        (_, true) => eprintln!("{} {}", prefix.style(style), msg),
        (_, false) => eprintln!("{prefix} {msg}"),
    }
}

pub fn print_info(msg: &str) {
    emit("info:", Style::new().cyan().bold(), atty::Stream::Stdout, msg);
}

pub fn print_warn(msg: &str) {
    emit("warn:", Style::new().yellow().bold(), atty::Stream::Stderr, msg);
}

pub fn print_error(msg: &str) {
    emit("error:", Style::new().red().bold(), atty::Stream::Stderr, msg);
}

pub fn print_success(msg: &str) {
    emit("ok:", Style::new().green().bold(), atty::Stream::Stdout, msg);
}

/// Plain stdout line with no prefix, for output users script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Print the per-file trace for a batch move, then the summary counts.
pub fn print_report(report: &MoveReport) {
    for item in &report.items {
        print_user(&trace_line(item));
    }
    print_user("");
    print_user("Summary");
    print_user("-------");
    print_user(&format!("Moved:   {}", report.moved()));
    print_user(&format!("Skipped: {}", report.skipped()));
    print_user(&format!("Errors:  {}", report.failed()));
}

/// One stable trace line per outcome. A move that kept its name omits the
/// arrow; a disambiguated move shows the name actually used on disk.
fn trace_line(item: &ItemOutcome) -> String {
    match item {
        ItemOutcome::Moved { from, to } if from == to => format!("MOVED: {from}"),
        ItemOutcome::Moved { from, to } => format!("MOVED: {from} -> {to}"),
        ItemOutcome::Skipped { name } => format!("SKIPPED: {name} (already published)"),
        ItemOutcome::Failed { name, error } => format!("ERROR: {name}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrenamed_move_has_no_arrow() {
        let item = ItemOutcome::Moved {
            from: "a.pdf".into(),
            to: "a.pdf".into(),
        };
        assert_eq!(trace_line(&item), "MOVED: a.pdf");
    }

    #[test]
    fn disambiguated_move_shows_final_name() {
        let item = ItemOutcome::Moved {
            from: "a.pdf".into(),
            to: "a (1).pdf".into(),
        };
        assert_eq!(trace_line(&item), "MOVED: a.pdf -> a (1).pdf");
    }

    #[test]
    fn skip_and_error_lines_carry_context() {
        let skipped = ItemOutcome::Skipped { name: "a.pdf".into() };
        assert_eq!(trace_line(&skipped), "SKIPPED: a.pdf (already published)");

        let failed = ItemOutcome::Failed {
            name: "b.pdf".into(),
            error: "permission denied".into(),
        };
        assert_eq!(trace_line(&failed), "ERROR: b.pdf: permission denied");
    }
}
