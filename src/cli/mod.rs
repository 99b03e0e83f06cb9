//! CLI module for pbxgen
//!
//! ## Commands
//!
//! - `render <description>` - Build a graph from a JSON description and write its objects block
//! - `id [--key KEY]...` - Print object identifiers
//! - `package --template T --toplevel DIR` - Build an NSIS installer
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::version::PBXGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Xcode project file generator
#[derive(Parser, Debug)]
#[command(name = "pbxgen")]
#[command(version = PBXGEN_VERSION)]
#[command(about = "Generate Xcode project object graphs and installers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the objects block of a JSON graph description
    Render {
        /// Graph description (JSON)
        #[arg(value_name = "DESCRIPTION")]
        description: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Format version; overrides the description's own
        #[arg(long = "format-version", value_name = "N")]
        format_version: Option<u32>,
    },

    /// Print object identifiers (sequential when no key is given)
    Id {
        /// Hashing keys for content-derived identifiers
        #[arg(short, long = "key", value_name = "KEY")]
        keys: Vec<String>,
        /// Number of sequential identifiers to print when no key is given
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Build an NSIS installer from a script template
    Package {
        /// Installer script template
        #[arg(long, value_name = "FILE")]
        template: PathBuf,
        /// Directory receiving project.nsi and NSISOutput.log
        #[arg(long, value_name = "DIR")]
        toplevel: PathBuf,
        /// NSIS compiler (default: search for makensis)
        #[arg(long, value_name = "FILE")]
        program: Option<PathBuf>,
        /// Extra directories searched for makensis
        #[arg(long = "search-dir", value_name = "DIR")]
        search_dirs: Vec<PathBuf>,
        /// Template substitution
        #[arg(short = 'D', value_name = "NAME=VALUE")]
        defines: Vec<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Render {
            description,
            output,
            format_version,
        } => commands::render_file(&description, output.as_deref(), format_version),
        Command::Id { keys, count } => commands::print_ids(&keys, count),
        Command::Package {
            template,
            toplevel,
            program,
            search_dirs,
            defines,
        } => commands::package(&template, &toplevel, program, &search_dirs, &defines),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::try_parse_from(["pbxgen", "render", "graph.json", "-o", "out.pbxproj"]).unwrap();
        if let Command::Render {
            description,
            output,
            format_version,
        } = cli.command
        {
            assert_eq!(description, PathBuf::from("graph.json"));
            assert_eq!(output, Some(PathBuf::from("out.pbxproj")));
            assert_eq!(format_version, None);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_parse_render_format_version() {
        let cli = Cli::try_parse_from(["pbxgen", "render", "graph.json", "--format-version", "15"]).unwrap();
        assert!(matches!(cli.command, Command::Render { format_version: Some(15), .. }));
    }

    #[test]
    fn test_cli_parse_id() {
        let cli = Cli::try_parse_from(["pbxgen", "id", "-k", "rootgroup", "--key", "target:app"]).unwrap();
        if let Command::Id { keys, count } = cli.command {
            assert_eq!(keys, vec!["rootgroup", "target:app"]);
            assert_eq!(count, 1);
        } else {
            panic!("Expected Id command");
        }
    }

    #[test]
    fn test_cli_parse_package() {
        let cli = Cli::try_parse_from([
            "pbxgen",
            "package",
            "--template",
            "NSIS.template.in",
            "--toplevel",
            "_CPack",
            "-D",
            "NAME=Demo",
            "-D",
            "VERSION=1.0",
        ])
        .unwrap();
        if let Command::Package { defines, program, .. } = cli.command {
            assert_eq!(defines, vec!["NAME=Demo", "VERSION=1.0"]);
            assert!(program.is_none());
        } else {
            panic!("Expected Package command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["pbxgen"]).is_err());
    }
}
