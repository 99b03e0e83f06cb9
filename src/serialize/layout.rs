//! Per-object layout selection
//!
//! Newer format versions write file references and build files on a single
//! line. Every other object, and every object in older versions, uses the
//! expanded tab-indented layout.

use pbxgen_core::LAST_EXPANDED_FORMAT_VERSION;
use pbxgen_core::isa::{self, PbxType};

/// Text written between fields of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Newline,
    Space,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Newline => "\n",
            Separator::Space => " ",
        }
    }
}

/// Separator and indentation multiplier active inside one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub separator: Separator,
    /// Multiplies every indentation level; `0` disables indentation.
    pub indent_factor: usize,
}

impl Layout {
    pub const EXPANDED: Layout = Layout {
        separator: Separator::Newline,
        indent_factor: 1,
    };

    pub const COMPACT: Layout = Layout {
        separator: Separator::Space,
        indent_factor: 0,
    };

    /// Layout for an object of type `isa` in a file of `format_version`.
    pub fn select(format_version: u32, isa: PbxType) -> Layout {
        if format_version > LAST_EXPANDED_FORMAT_VERSION && isa::is_leaf_reference(isa) {
            Layout::COMPACT
        } else {
            Layout::EXPANDED
        }
    }

    pub fn is_expanded(self) -> bool {
        self.separator == Separator::Newline
    }

    /// Indentation units for logical `level`.
    pub fn indent(self, level: usize) -> usize {
        level * self.indent_factor
    }
}
