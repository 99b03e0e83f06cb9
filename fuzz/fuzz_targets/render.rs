#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use pbxgen::description::GraphDescription;
use pbxgen::identity::IdentityService;
use pbxgen::serialize::{self, SerializeConfig};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the description loader
        if let Ok(desc) = GraphDescription::from_json(s) {
            // If loading succeeds, fuzz graph construction and the writer
            if let Ok(graph) = desc.build(Arc::new(IdentityService::new())) {
                let version = desc.format_version.unwrap_or(serialize::DEFAULT_FORMAT_VERSION);
                let _ = serialize::serialize_to_string(&graph, &SerializeConfig::new().with_format_version(version));
            }
        }
    }
});
