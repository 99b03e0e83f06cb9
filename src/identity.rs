//! Object identifier generation
//!
//! Every object in a project file carries a 24-character identifier. The IDE
//! keys user data (breakpoints, schemes, UI state) on these identifiers, so an
//! object that represents the same entity must get the same identifier on
//! every regeneration.
//!
//! ## Modes
//!
//! - **Sequential** (no hashing key): `01` followed by a 22-digit, zero-padded
//!   counter. Reproducible only if objects are created in the same order and
//!   the counter is reset between passes.
//! - **Content-derived** (hashing key): `02` followed by the hex of the key's
//!   SHA-256 digest, truncated to 24 characters. Cached per key.
//!
//! ## Notes
//!
//! - No collision detection is performed, within or across modes.
//! - Cache and counter share one lock; the lock is never held while writing
//!   output or touching the graph.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use pbxgen_core::OBJECT_ID_LEN;
use sha2::{Digest, Sha256};

/// Prefix of sequence-derived identifiers.
pub const SEQUENCE_PREFIX: &str = "01";
/// Prefix of content-derived identifiers.
pub const HASH_PREFIX: &str = "02";

const SEQUENCE_DIGITS: usize = 22;
const DIGEST_BYTES: usize = 12;

static SHARED: Lazy<Arc<IdentityService>> = Lazy::new(|| Arc::new(IdentityService::new()));

#[derive(Debug, Default)]
struct IdentityState {
    /// `<prefix>-<hashing key>` to issued identifier.
    cache: HashMap<String, String>,
    sequence: u64,
}

/// Issues object identifiers for one or more generation passes.
#[derive(Debug, Default)]
pub struct IdentityService {
    state: Mutex<IdentityState>,
}

impl IdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide service, for callers that do not thread their own through graph construction.
    pub fn shared() -> Arc<IdentityService> {
        Arc::clone(&SHARED)
    }

    /// Issue an identifier: sequential without a key (or with an empty one), content-derived otherwise.
    pub fn issue(&self, hashing_key: Option<&str>) -> String {
        match hashing_key {
            Some(key) if !key.is_empty() => self.hashed_id(key),
            _ => self.sequential_id(),
        }
    }

    /// Next sequence-derived identifier. The first one after a reset ends in `1`.
    pub fn sequential_id(&self) -> String {
        let index = {
            let mut state = self.state.lock();
            state.sequence += 1;
            state.sequence
        };
        tracing::trace!(index, "issued sequential object id");
        normalize_id(&format!("{SEQUENCE_PREFIX}{index:0width$}", width = SEQUENCE_DIGITS))
    }

    /// Content-derived identifier for `key`; the same key always yields the same identifier.
    pub fn hashed_id(&self, key: &str) -> String {
        let lookup = format!("{HASH_PREFIX}-{key}");
        let id = {
            let mut state = self.state.lock();
            state
                .cache
                .entry(lookup)
                .or_insert_with(|| content_id(HASH_PREFIX, key))
                .clone()
        };
        tracing::debug!(key, %id, "resolved content-derived object id");
        normalize_id(&id)
    }

    /// Restart the sequence at zero. Call between independent generation passes.
    pub fn reset_sequence(&self) {
        self.state.lock().sequence = 0;
    }

    /// Restart the sequence and forget every cached content-derived identifier.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.sequence = 0;
        state.cache.clear();
    }

    /// Number of content-derived identifiers issued since the last [`clear`](Self::clear).
    pub fn cached_len(&self) -> usize {
        self.state.lock().cache.len()
    }
}

/// `prefix` followed by the hex of the first 12 digest bytes of `key`, cut to 24 characters.
pub fn content_id(prefix: &str, key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let mut id = format!("{prefix}{}", hex::encode(&digest[..DIGEST_BYTES]));
    id.truncate(OBJECT_ID_LEN);
    id
}

/// Strip `-` separators and cut to 24 characters.
pub fn normalize_id(id: &str) -> String {
    id.chars().filter(|&c| c != '-').take(OBJECT_ID_LEN).collect()
}
