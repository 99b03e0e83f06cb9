#![forbid(unsafe_code)]
//! Xcode project object graphs
//!
//! `pbxgen` builds the in-memory object graph of an Xcode project file and
//! writes its `objects = { ... };` block in the textual property-list format
//! Xcode reads. It also carries a small NSIS installer backend.
//!
//! ## Layers
//!
//! - `identity` - 24-character object identifiers (sequential or content-derived)
//! - `graph` - the node model and the object arena
//! - `serialize` - format-version-aware writer for the objects block
//! - `description` - JSON graph descriptions used by the CLI
//! - `package` - NSIS installer generation
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli`, `serialize` and
//!   `package` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod description;
pub mod graph;
pub mod identity;
pub mod package;
pub mod serialize;
pub mod version;

pub use pbxgen_core::isa::{self, PbxType};

pub use graph::{Attributes, ModelError, Node, NodeKind, ObjectGraph, ObjectRef, PbxObject};
pub use identity::IdentityService;
pub use serialize::{SerializeConfig, SerializeError, serialize, serialize_to_string};
