use std::fmt;

/// Library name reported to the search service.
pub const LIBRARY_NAME: &str = env!("CARGO_PKG_NAME");

/// Library version, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage-agent string added to every client the widget tree uses, so the
/// search service can attribute traffic. Formats as `"<library> <version>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageAgent {
    library: String,
    version: String,
}

impl UsageAgent {
    pub fn new(library: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            version: version.into(),
        }
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for UsageAgent {
    fn default() -> Self {
        Self::new(LIBRARY_NAME, VERSION)
    }
}

impl fmt::Display for UsageAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.library, self.version)
    }
}
