//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_or_init, LoadResult};

/// Defaults shared across submodules. These mirror the deployment this tool
/// was written for: the published folder lives inside the staging folder.
pub const STAGING_DIR_DEFAULT: &str = "/srv/pdfhub";
pub const PUBLISH_DIR_DEFAULT: &str = "/srv/pdfhub/pdf";
pub const KEYWORD_DEFAULT: &str = "_optimised";
pub const PDF_SUFFIX: &str = ".pdf";
pub const BRAND_DEFAULT: &str = "Mr Downes Maths";
pub const TITLE_DEFAULT: &str = "PDF Gallery";
pub const REMOTE_URL_DEFAULT: &str = "https://github.com/ronandownes/PDF.git";
pub const REMOTE_NAME_DEFAULT: &str = "origin";
pub const BRANCH_DEFAULT: &str = "main";
