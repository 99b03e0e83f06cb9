//! pbxproj serializer
//!
//! Renders a finished [`ObjectGraph`] as the `objects = { ... };` block of an
//! Xcode project file.
//!
//! - Objects are written in graph order, attributes in insertion order
//! - File references and build files use a single-line layout when the
//!   declared format version is above 15
//! - Names and string values are quoted only when the IDE parser needs it
//!
//! The graph is lowered to a token stream first and only then written, so a
//! graph with an unresolvable reference produces an error and no output.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod emit;
mod layout;
mod writer;

pub use config::{DEFAULT_FORMAT_VERSION, SerializeConfig};
pub use layout::{Layout, Separator};
pub use writer::{Token, TokenWriter, render};

use std::io;

use thiserror::Error;

use crate::graph::{ModelError, NodeKind, ObjectGraph, ObjectRef};
use emit::Emitter;

/// Errors raised while writing a graph
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("attribute `{attribute}` references an object that was never linked")]
    UnsetReference { attribute: String },

    #[error("attribute `{attribute}` references {handle}, which is not an object of this graph")]
    UnresolvedReference { attribute: String, handle: ObjectRef },

    #[error("attribute `{attribute}` lists a {kind}; list elements must be strings or objects")]
    InvalidListElement { attribute: String, kind: NodeKind },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Lower the whole graph to its token stream.
pub fn tokens<'g>(graph: &'g ObjectGraph, config: &SerializeConfig) -> Result<Vec<Token<'g>>, SerializeError> {
    let mut emitter = Emitter::new(graph, config.format_version);
    emitter.emit_graph()?;
    Ok(emitter.finish())
}

/// Write the graph's `objects` block to `out`.
#[tracing::instrument(skip_all, fields(objects = graph.object_count(), format_version = config.format_version))]
pub fn serialize<W: io::Write>(graph: &ObjectGraph, config: &SerializeConfig, out: &mut W) -> Result<(), SerializeError> {
    let text = serialize_to_string(graph, config)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    tracing::debug!(bytes = text.len(), "wrote objects block");
    Ok(())
}

/// Render the graph's `objects` block as a string.
pub fn serialize_to_string(graph: &ObjectGraph, config: &SerializeConfig) -> Result<String, SerializeError> {
    Ok(render(&tokens(graph, config)?))
}

/// Render a single object, as it would appear inside the `objects` block.
pub fn render_object(graph: &ObjectGraph, handle: ObjectRef, config: &SerializeConfig) -> Result<String, SerializeError> {
    let object = graph.object(handle)?;
    let mut emitter = Emitter::new(graph, config.format_version);
    emitter.emit_object(object)?;
    Ok(render(&emitter.finish()))
}
