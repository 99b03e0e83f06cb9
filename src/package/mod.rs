//! Installer packaging
//!
//! Sibling backend of the project-file generator. It shares no data with the
//! object graph: it renders an installer script template, hands it to an
//! external compiler and reports success or failure.
//!
//! ## Modules
//!
//! - `nsis` - NSIS (`makensis`) installers

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod nsis;

pub use nsis::{NsisPackager, PackageConfig, PackageOutcome, find_installer_program};

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that occur while packaging
#[derive(Debug, Error, Diagnostic)]
pub enum PackageError {
    #[error("Could not find NSIS installer template file: {}", .0.display())]
    #[diagnostic(code(pbxgen::package::template_not_found), help("pass the template with --template"))]
    TemplateNotFound(PathBuf),

    #[error("Cannot find NSIS compiler `{0}`")]
    #[diagnostic(
        code(pbxgen::package::tool_not_found),
        help("install NSIS or pass the compiler with --program")
    )]
    ToolNotFound(String),

    #[error("Problem running NSIS command: {command}. Please check {} for errors", log_path.display())]
    #[diagnostic(code(pbxgen::package::tool_failed))]
    ToolFailed { command: String, log_path: PathBuf },

    #[error("I/O error: {0}")]
    #[diagnostic(code(pbxgen::package::io))]
    Io(#[from] io::Error),
}
