//! Error types for codemention-core

/// Result type alias for codemention operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for codemention operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration (bad configFileType, malformed rule line, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration source exists but has no retrievable content
    #[error("{0}")]
    MissingContent(String),

    /// Syntax the configuration format recognises but does not support
    #[error("Unsupported syntax: {0}")]
    UnsupportedSyntax(String),

    /// Comment template parse or evaluation error
    #[error("Template error: {0}")]
    Template(String),

    /// HTTP/API error
    #[error("HTTP error: {0}")]
    Http(String),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(String),

    /// GitHub event parsing error
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Runtime error (Tokio, threading, etc.)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Error::Template(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the URL, never headers, so the token cannot leak here
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Other(format!("Invalid base64 content: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_content_displays_bare_message() {
        let err = Error::MissingContent("No content for .github/codemention.yml".into());
        assert_eq!(err.to_string(), "No content for .github/codemention.yml");
    }

    #[test]
    fn test_error_messages_never_contain_token_patterns() {
        let token_patterns = ["ghp_", "gho_", "ghs_", "github_pat_", "Bearer "];
        let errors: Vec<Error> = vec![
            Error::Config("config error".into()),
            Error::Http("GitHub API returned 404 Not Found for /repos/o/r/contents".into()),
            Error::RateLimitExceeded("rate limit exceeded".into()),
        ];

        for err in &errors {
            let display = format!("{}", err);
            let debug = format!("{:?}", err);
            for pattern in &token_patterns {
                assert!(!display.contains(pattern), "Display leaks '{}'", pattern);
                assert!(!debug.contains(pattern), "Debug leaks '{}'", pattern);
            }
        }
    }
}
