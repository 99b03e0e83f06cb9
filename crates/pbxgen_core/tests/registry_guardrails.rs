use std::collections::HashMap;

use pbxgen_core::isa::{self, PbxType};
use pbxgen_core::quoting;

#[test]
fn pbx_types_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, PbxType> = HashMap::new();

    for info in isa::PBX_TYPES {
        assert_eq!(
            isa::from_str(info.canonical),
            Some(info.id),
            "entity type spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(isa::as_str(info.id), info.canonical, "as_str mismatch for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate entity type spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn pbx_types_table_is_indexed_by_discriminant() {
    for (index, info) in isa::PBX_TYPES.iter().enumerate() {
        assert_eq!(info.id as usize, index, "registry out of order at {}", info.canonical);
    }
    assert_eq!(isa::PBX_TYPES.last().map(|t| t.id), Some(PbxType::None));
}

#[test]
fn pbx_types_spellings_never_need_quotes() {
    // `isa = <Name>;` is written without going through the quoting rules.
    for info in isa::PBX_TYPES {
        assert!(!quoting::needs_quotes(info.canonical), "{} would need quotes", info.canonical);
    }
}

#[test]
fn reserved_attribute_names_are_bare() {
    assert!(!quoting::needs_quotes(pbxgen_core::ISA_ATTRIBUTE));
    assert!(!quoting::needs_quotes(pbxgen_core::REMOTE_GLOBAL_ID_ATTRIBUTE));
}
