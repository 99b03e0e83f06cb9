//! Define the closed entity-type vocabulary of the Xcode project file.
//!
//! This module is the single source of truth for `isa` names: a stable identifier ([`PbxType`]) plus a
//! const metadata table ([`PBX_TYPES`]) that records canonical spellings, categories and whether the
//! entity is a leaf reference.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; the IDE never accepts other spellings.
//! - [`PBX_TYPES`] is ordered exactly like [`PbxType`]; the table is indexed by discriminant.
//! - `None` is a terminal sentinel. It has a spelling so that it can be printed, but the graph layer
//!   refuses to create objects with it.
//!
//! ## Examples
//! ```rust
//! use pbxgen_core::isa::{self, PbxType};
//!
//! assert_eq!(isa::from_str("PBXBuildFile"), Some(PbxType::BuildFile));
//! assert!(isa::is_leaf_reference(PbxType::FileReference));
//! assert!(!isa::is_leaf_reference(PbxType::Group));
//! ```

use std::fmt;

/// Stable identifier for every entity type an object can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PbxType {
    Group,
    BuildStyle,
    Project,
    HeadersBuildPhase,
    SourcesBuildPhase,
    FrameworksBuildPhase,
    NativeTarget,
    FileReference,
    BuildFile,
    ContainerItemProxy,
    TargetDependency,
    ShellScriptBuildPhase,
    ResourcesBuildPhase,
    ApplicationReference,
    ExecutableFileReference,
    LibraryReference,
    ToolTarget,
    LibraryTarget,
    AggregateTarget,
    BuildConfiguration,
    ConfigurationList,
    CopyFilesBuildPhase,
    None,
}

/// High-level grouping for documentation and tooling.
///
/// Categories are metadata only; layout decisions go through [`is_leaf_reference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PbxCategory {
    Group,
    Project,
    BuildPhase,
    Target,
    Reference,
    Dependency,
    Configuration,
    Sentinel,
}

/// Metadata for an entity type.
#[derive(Debug, Clone, Copy)]
pub struct PbxTypeInfo {
    pub id: PbxType,
    pub canonical: &'static str,
    pub category: PbxCategory,
    /// Eligible for the single-line layout of newer format versions.
    pub leaf_reference: bool,
}

/// Registry of all entity types, in [`PbxType`] declaration order.
pub const PBX_TYPES: &[PbxTypeInfo] = &[
    info(PbxType::Group, "PBXGroup", PbxCategory::Group),
    info(PbxType::BuildStyle, "PBXBuildStyle", PbxCategory::Configuration),
    info(PbxType::Project, "PBXProject", PbxCategory::Project),
    info(PbxType::HeadersBuildPhase, "PBXHeadersBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::SourcesBuildPhase, "PBXSourcesBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::FrameworksBuildPhase, "PBXFrameworksBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::NativeTarget, "PBXNativeTarget", PbxCategory::Target),
    leaf(PbxType::FileReference, "PBXFileReference"),
    leaf(PbxType::BuildFile, "PBXBuildFile"),
    info(PbxType::ContainerItemProxy, "PBXContainerItemProxy", PbxCategory::Dependency),
    info(PbxType::TargetDependency, "PBXTargetDependency", PbxCategory::Dependency),
    info(PbxType::ShellScriptBuildPhase, "PBXShellScriptBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::ResourcesBuildPhase, "PBXResourcesBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::ApplicationReference, "PBXApplicationReference", PbxCategory::Reference),
    info(PbxType::ExecutableFileReference, "PBXExecutableFileReference", PbxCategory::Reference),
    info(PbxType::LibraryReference, "PBXLibraryReference", PbxCategory::Reference),
    info(PbxType::ToolTarget, "PBXToolTarget", PbxCategory::Target),
    info(PbxType::LibraryTarget, "PBXLibraryTarget", PbxCategory::Target),
    info(PbxType::AggregateTarget, "PBXAggregateTarget", PbxCategory::Target),
    info(PbxType::BuildConfiguration, "XCBuildConfiguration", PbxCategory::Configuration),
    info(PbxType::ConfigurationList, "XCConfigurationList", PbxCategory::Configuration),
    info(PbxType::CopyFilesBuildPhase, "PBXCopyFilesBuildPhase", PbxCategory::BuildPhase),
    info(PbxType::None, "None", PbxCategory::Sentinel),
];

/// Metadata for `id`.
pub fn info_for(id: PbxType) -> &'static PbxTypeInfo {
    &PBX_TYPES[id as usize]
}

/// Canonical spelling, as written after `isa = `.
pub fn as_str(id: PbxType) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: PbxType) -> PbxCategory {
    info_for(id).category
}

/// Whether `id` is one of the two leaf-reference entity types (file reference and build file).
pub fn is_leaf_reference(id: PbxType) -> bool {
    info_for(id).leaf_reference
}

/// Lookup by canonical spelling.
///
/// ## Returns
/// - `Some(PbxType)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<PbxType> {
    PBX_TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

impl fmt::Display for PbxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

// --- helpers -----------------------------------------------------------------

const fn info(id: PbxType, canonical: &'static str, category: PbxCategory) -> PbxTypeInfo {
    PbxTypeInfo {
        id,
        canonical,
        category,
        leaf_reference: false,
    }
}

const fn leaf(id: PbxType, canonical: &'static str) -> PbxTypeInfo {
    PbxTypeInfo {
        id,
        canonical,
        category: PbxCategory::Reference,
        leaf_reference: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_canonical_spelling() {
        assert_eq!(PbxType::BuildConfiguration.to_string(), "XCBuildConfiguration");
        assert_eq!(PbxType::None.to_string(), "None");
    }

    #[test]
    fn test_only_file_reference_and_build_file_are_leaves() {
        let leaves: Vec<PbxType> = PBX_TYPES.iter().filter(|t| t.leaf_reference).map(|t| t.id).collect();
        assert_eq!(leaves, vec![PbxType::FileReference, PbxType::BuildFile]);
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!(from_str("PBXGroup"), Some(PbxType::Group));
        assert_eq!(from_str("pbxgroup"), None);
        assert_eq!(from_str(""), None);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category(PbxType::SourcesBuildPhase), PbxCategory::BuildPhase);
        assert_eq!(category(PbxType::None), PbxCategory::Sentinel);
    }
}
