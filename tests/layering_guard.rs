//! Layering guardrails to keep the vocabulary crate free of the graph layer.
//!
//! `pbxgen_core` holds the entity-type table and quoting rules and must stay dependency-free, so that the
//! vocabulary can be shared by tools that never build a graph. This test scans its `Cargo.toml` and fails if it
//! grows a `[dependencies]` entry.

#[test]
fn core_crate_has_no_runtime_dependencies() {
    let manifest = include_str!("../crates/pbxgen_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            panic!("`pbxgen_core` must not depend on other crates, found `{line_no_comment}`");
        }
    }
}
