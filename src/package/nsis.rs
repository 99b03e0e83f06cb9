//! NSIS installer generation
//!
//! Renders an installer script from a template, runs `makensis` on it and,
//! when the compiler cannot be launched or exits non-zero, leaves the captured
//! output in `NSISOutput.log` next to the script.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::PackageError;

/// Script written into the toplevel directory.
pub const SCRIPT_FILE_NAME: &str = "project.nsi";
/// Log written into the toplevel directory when the compiler fails.
pub const LOG_FILE_NAME: &str = "NSISOutput.log";

const PROGRAM_NAMES: &[&str] = &["makensis", "makensis.exe"];

/// Inputs of one packaging run
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Directory receiving the script and the failure log
    pub toplevel: PathBuf,
    /// Installer script template (`@VAR@` / `${VAR}` placeholders)
    pub template: PathBuf,
    /// Values substituted into the template
    pub options: BTreeMap<String, String>,
}

impl PackageConfig {
    pub fn new(template: impl Into<PathBuf>, toplevel: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            toplevel: toplevel.into(),
            options: BTreeMap::new(),
        }
    }

    /// Set a template substitution
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn script_path(&self) -> PathBuf {
        self.toplevel.join(SCRIPT_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.toplevel.join(LOG_FILE_NAME)
    }
}

/// Result of a successful packaging run
#[derive(Debug)]
pub struct PackageOutcome {
    pub script: PathBuf,
    pub command: String,
    pub output: String,
}

/// Runs one NSIS compiler
#[derive(Debug, Clone)]
pub struct NsisPackager {
    program: PathBuf,
}

impl NsisPackager {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Locate the compiler in `search_dirs`, then on `PATH`.
    pub fn locate(search_dirs: &[PathBuf]) -> Result<Self, PackageError> {
        find_installer_program(search_dirs).map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line as written to the log.
    pub fn command_line(&self, script: &Path) -> String {
        format!("\"{}\" \"{}\"", self.program.display(), script.display())
    }

    /// Render the template and compile it.
    #[tracing::instrument(skip_all, fields(template = %config.template.display()))]
    pub fn compress(&self, config: &PackageConfig) -> Result<PackageOutcome, PackageError> {
        if !config.template.is_file() {
            return Err(PackageError::TemplateNotFound(config.template.clone()));
        }

        let script = config.script_path();
        tracing::info!("Configure file: {} to {}", config.template.display(), script.display());
        fs::create_dir_all(&config.toplevel)?;
        configure_file(&config.template, &script, &config.options)?;

        let command = self.command_line(&script);
        tracing::info!("Execute: {}", command);

        let run = Command::new(&self.program).arg(&script).output();
        let (success, output) = match run {
            Ok(out) => {
                let mut text = String::from_utf8_lossy(&out.stdout).to_string();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                (out.status.success(), text)
            }
            Err(e) => (false, format!("failed to launch: {e}")),
        };

        if !success {
            let log_path = config.log_path();
            fs::write(&log_path, format!("# Run command: {command}\n# Output:\n{output}\n"))?;
            tracing::warn!(log = %log_path.display(), "Problem running NSIS command: {}", command);
            return Err(PackageError::ToolFailed { command, log_path });
        }

        Ok(PackageOutcome { script, command, output })
    }
}

/// Find `makensis` in `search_dirs`, then in the directories of `PATH`.
pub fn find_installer_program(search_dirs: &[PathBuf]) -> Result<PathBuf, PackageError> {
    let path_dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default();

    search_dirs
        .iter()
        .chain(path_dirs.iter())
        .flat_map(|dir| PROGRAM_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| PackageError::ToolNotFound(PROGRAM_NAMES[0].to_string()))
}

/// Render `template` into `output`.
pub fn configure_file(template: &Path, output: &Path, options: &BTreeMap<String, String>) -> Result<(), PackageError> {
    let text = fs::read_to_string(template)?;
    fs::write(output, substitute(&text, options))?;
    Ok(())
}

/// Replace `@NAME@` and `${NAME}` with option values; unknown names become empty.
///
/// Delimiters around anything that is not a variable name are kept verbatim.
pub fn substitute(text: &str, options: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(['@', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (open, close) = if tail.starts_with("${") {
            ("${", Some('}'))
        } else if tail.starts_with('@') {
            ("@", Some('@'))
        } else {
            ("$", None)
        };
        if let Some(close) = close {
            let body = &tail[open.len()..];
            if let Some(end) = body.find(close) {
                let name = &body[..end];
                if is_variable_name(name) {
                    if let Some(value) = options.get(name) {
                        out.push_str(value);
                    }
                    rest = &body[end + close.len_utf8()..];
                    continue;
                }
            }
        }

        out.push_str(open);
        rest = &tail[open.len()..];
    }
    out.push_str(rest);
    out
}

fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
