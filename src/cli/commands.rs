//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::description::GraphDescription;
use crate::identity::IdentityService;
use crate::package::{NsisPackager, PackageConfig};
use crate::serialize::{self, SerializeConfig};

use super::{CliError, CliResult, ExitCode};

/// Maximum description file size (16 MB)
const MAX_DESCRIPTION_SIZE: u64 = 16 * 1024 * 1024;

/// Build the described graph and write its objects block.
pub fn render_file(description: &Path, output: Option<&Path>, format_version: Option<u32>) -> CliResult<ExitCode> {
    let source = read_description(description)?;
    let desc = GraphDescription::from_json(&source)
        .map_err(|e| CliError::failure(format!("Error in {}: {}", description.display(), e)))?;

    // A fresh service per run keeps sequential identifiers reproducible.
    let graph = desc
        .build(Arc::new(IdentityService::new()))
        .map_err(|e| CliError::failure(format!("Error in {}: {}", description.display(), e)))?;

    let config = SerializeConfig::new()
        .with_format_version(format_version.or(desc.format_version).unwrap_or(serialize::DEFAULT_FORMAT_VERSION));

    let text = serialize::serialize_to_string(&graph, &config)
        .map_err(|e| CliError::failure(format!("Serialization error: {}", e)))?;

    match output {
        Some(path) => fs::write(path, text)
            .map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e)))?,
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one identifier per key, or `count` sequential identifiers.
pub fn print_ids(keys: &[String], count: usize) -> CliResult<ExitCode> {
    let ids = IdentityService::new();
    let mut stdout = io::stdout().lock();
    let lines: Vec<String> = if keys.is_empty() {
        (0..count).map(|_| ids.sequential_id()).collect()
    } else {
        keys.iter().map(|key| format!("{}  {}", ids.hashed_id(key), key)).collect()
    };
    for line in lines {
        writeln!(stdout, "{line}").map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the NSIS backend.
pub fn package(
    template: &Path,
    toplevel: &Path,
    program: Option<PathBuf>,
    search_dirs: &[PathBuf],
    defines: &[String],
) -> CliResult<ExitCode> {
    let options = parse_defines(defines)?;
    let mut config = PackageConfig::new(template, toplevel);
    config.options = options;

    let packager = match program {
        Some(program) => NsisPackager::new(program),
        None => NsisPackager::locate(search_dirs).map_err(report)?,
    };

    let outcome = packager.compress(&config).map_err(report)?;
    println!("Generated {}", outcome.script.display());
    Ok(ExitCode::SUCCESS)
}

fn report(err: crate::package::PackageError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

/// Parse `NAME=VALUE` pairs.
fn parse_defines(defines: &[String]) -> CliResult<BTreeMap<String, String>> {
    defines
        .iter()
        .map(|define| {
            define
                .split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| CliError::failure(format!("Invalid definition '{}': expected NAME=VALUE", define)))
        })
        .collect()
}

fn read_description(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))?;
    if metadata.len() > MAX_DESCRIPTION_SIZE {
        tracing::warn!(path = %path.display(), size = metadata.len(), "description too large");
        return Err(CliError::failure(format!(
            "Description '{}' is larger than {} bytes",
            path.display(),
            MAX_DESCRIPTION_SIZE
        )));
    }
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))
}
