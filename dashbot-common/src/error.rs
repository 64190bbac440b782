// ================================================================
// File: dashbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found error: {0}")]
    NotFound(String),

    /// The chat platform rejected or failed an operation.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Missing or unusable startup configuration. Fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_inner_message() {
        let err = Error::Platform("Missing Access".into());
        assert_eq!(err.to_string(), "Platform error: Missing Access");
    }

    #[test]
    fn plain_strings_become_parse_errors() {
        let err: Error = "bad input".into();
        assert!(matches!(err, Error::Parse(ref s) if s == "bad input"));
    }
}
