use thiserror::Error;

/// Boxed error produced by a collaborator (client factory, search client).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum InstantSearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client factory failed: {0}")]
    ClientFactory(#[source] BoxError),

    #[error("Failed to add algolia agent: {0}")]
    AgentTagging(#[source] BoxError),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, InstantSearchError>;

impl From<std::io::Error> for InstantSearchError {
    fn from(e: std::io::Error) -> Self {
        InstantSearchError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for InstantSearchError {
    fn from(e: serde_json::Error) -> Self {
        InstantSearchError::Json(e.to_string())
    }
}

impl InstantSearchError {
    /// True when the props handed to the component were inconsistent, as
    /// opposed to a collaborator failing.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, InstantSearchError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unreachable;

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "host unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    #[test]
    fn config_error_is_misconfiguration() {
        let e = InstantSearchError::Config("no client".into());
        assert!(e.is_misconfiguration());
        assert_eq!(e.to_string(), "Configuration error: no client");
    }

    #[test]
    fn factory_error_is_not_misconfiguration() {
        let e = InstantSearchError::ClientFactory(Box::new(Unreachable));
        assert!(!e.is_misconfiguration());
        assert_eq!(e.to_string(), "Client factory failed: host unreachable");
    }

    #[test]
    fn factory_error_keeps_original_source() {
        let e = InstantSearchError::ClientFactory(Box::new(Unreachable));
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.downcast_ref::<Unreachable>().is_some());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: InstantSearchError = io.into();
        assert!(matches!(e, InstantSearchError::Io(_)));
    }

    #[test]
    fn json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: InstantSearchError = err.into();
        assert!(matches!(e, InstantSearchError::Json(_)));
    }
}
