//! Application orchestrator.
//! Loads/merges config, initializes logging, validates paths and dispatches
//! the requested subcommand.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

use pdfhub::cli::{Args, Command};
use pdfhub::config::{default_config_path, load_or_init, LoadResult};
use pdfhub::fs_ops::{list_candidates, move_batch, published_names, CollisionPolicy};
use pdfhub::output as out;
use pdfhub::{gallery, git, Config};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("PDFHUB_CONFIG") {
            out::print_info(&format!("Using PDFHUB_CONFIG (explicit):\n  {}\n", cfg_env));
            out::print_info("To override, unset PDFHUB_CONFIG or set it to another file.");
            return Ok(());
        }
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default pdfhub config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    // Resolve config (may write a first-run template, before logging init)
    let mut cfg = match load_or_init()? {
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template pdfhub config was written to: {}",
                path.display()
            ));
            out::print_info("Edit the file to set `staging_dir` and `publish_dir`, then re-run this command.");
            out::print_info("To use a different location set PDFHUB_CONFIG.");
            return Ok(());
        }
        LoadResult::Loaded(cfg) => cfg,
        LoadResult::Missing => Config::default(),
    };

    // Apply CLI overrides (CLI wins)
    args.apply_overrides(&mut cfg);

    // Initialize logging; the guard must live until exit to flush the appender.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting pdfhub: {:?}", args);

    cfg.validate()?;

    match args.command.unwrap_or(Command::Move { keyword: None }) {
        Command::Move { keyword } => run_move(&cfg, keyword.as_deref()),
        Command::Pick { list, names } => run_pick(&cfg, list, &names),
        Command::Build => run_build(&cfg),
        Command::Push { message, no_build } => run_push(&cfg, message, no_build),
    }
}

/// `pdfhub move`: batch move of keyword-matching staged PDFs.
fn run_move(cfg: &Config, keyword: Option<&str>) -> Result<()> {
    let keyword = keyword.unwrap_or(&cfg.keyword);
    let sources = list_candidates(&cfg.staging_dir, &cfg.suffix, Some(keyword))?;
    if sources.is_empty() {
        out::print_info(&format!(
            "No staged PDFs matching '{}' in '{}'",
            keyword,
            cfg.staging_dir.display()
        ));
        return Ok(());
    }

    let report = move_batch(cfg, &sources, CollisionPolicy::SkipExisting)?;
    out::print_report(&report);
    Ok(())
}

/// `pdfhub pick`: move explicitly named staged PDFs, or list the unpublished
/// candidates when `--list` is given or no names were supplied.
fn run_pick(cfg: &Config, list: bool, names: &[String]) -> Result<()> {
    if list || names.is_empty() {
        let published = published_names(&cfg.publish_dir)?;
        let candidates = list_candidates(&cfg.staging_dir, &cfg.suffix, None)?;
        let mut shown = 0usize;
        for path in &candidates {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if published.contains(&name.to_lowercase()) {
                continue;
            }
            out::print_user(name);
            shown += 1;
        }
        if shown == 0 {
            out::print_info("Nothing to pick: every staged PDF is already published.");
        }
        return Ok(());
    }

    // Explicit names are moved even on collision; the caller chose them.
    let sources: Vec<_> = names.iter().map(|n| cfg.staging_dir.join(n)).collect();
    let report = move_batch(cfg, &sources, CollisionPolicy::Disambiguate)?;
    out::print_report(&report);
    Ok(())
}

/// `pdfhub build`: regenerate the gallery artifact.
fn run_build(cfg: &Config) -> Result<()> {
    let (path, count) = gallery::build_index(cfg)?;
    out::print_success(&format!(
        "Gallery index with {} PDF(s): {}",
        count,
        path.display()
    ));
    Ok(())
}

/// `pdfhub push`: rebuild the gallery (unless told not to), then commit and
/// push the publish folder.
fn run_push(cfg: &Config, message: Option<String>, no_build: bool) -> Result<()> {
    if !no_build {
        // A stale or missing index is not a reason to skip publishing.
        if let Err(e) = run_build(cfg) {
            out::print_warn(&format!("Gallery rebuild failed, pushing anyway: {e:#}"));
        }
    }

    let mut provide = || match &message {
        Some(m) => m.clone(),
        None => prompt_commit_message(),
    };
    git::push_all(cfg, &mut provide)
}

/// Read a commit message from stdin; a blank line means "update".
fn prompt_commit_message() -> String {
    print!("Commit message [update]: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return "update".to_string();
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        "update".to_string()
    } else {
        trimmed.to_string()
    }
}
