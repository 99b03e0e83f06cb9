//! Provide the shared, pure vocabulary of the Xcode project-file grammar.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the object graph can use to tag entities and pick their layout, and
//! - the serializer can use to decide how scalar text is written.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no graph types.
//! - Current scope: the closed entity-type registry (`isa` names) and the quoting/escaping rules for
//!   attribute names and string values.
//!
//! ## Examples
//! ```rust
//! use pbxgen_core::isa::{self, PbxType};
//! use pbxgen_core::quoting;
//!
//! assert_eq!(isa::as_str(PbxType::Group), "PBXGroup");
//! assert_eq!(quoting::quote(""), "\"\"");
//! ```

pub mod isa;
pub mod quoting;

/// Name of the reserved attribute every object carries for its entity type.
///
/// The serializer writes this entry as `isa = <Name>;` before any other attribute and never as a normal
/// attribute.
pub const ISA_ATTRIBUTE: &str = "isa";

/// Attribute name whose object reference is written without the referenced object's comment.
///
/// A target dependency's proxy points back at the remote target with this name; the comment there would
/// duplicate the one on `remoteInfo`.
pub const REMOTE_GLOBAL_ID_ATTRIBUTE: &str = "remoteGlobalIDString";

/// Number of characters in every object identifier.
pub const OBJECT_ID_LEN: usize = 24;

/// Highest format version that still renders every object in the expanded layout.
pub const LAST_EXPANDED_FORMAT_VERSION: u32 = 15;
