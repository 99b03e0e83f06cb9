//! Serialization configuration

/// Format version used when the caller does not pick one (`objectVersion = 46`).
pub const DEFAULT_FORMAT_VERSION: u32 = 46;

/// Serialization configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeConfig {
    /// Declared project-file format version; selects layout quirks
    pub format_version: u32,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            format_version: DEFAULT_FORMAT_VERSION,
        }
    }
}

impl SerializeConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared format version
    pub fn with_format_version(mut self, version: u32) -> Self {
        self.format_version = version;
        self
    }
}
