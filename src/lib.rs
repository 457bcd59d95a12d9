//! Core library for `pdfhub`.
//!
//! Maintains a folder of PDF files published as a static site. The library
//! holds the reusable pieces: a collision-safe mover, a gallery manifest
//! builder, the XML config layer, and the git push glue. The binary in
//! `main.rs` is a thin driver that wires CLI flags into a `Config` and
//! dispatches to one of the operations.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod gallery;
pub mod git;
pub mod output;

pub use config::{Config, LogLevel};
pub use errors::HubError;
