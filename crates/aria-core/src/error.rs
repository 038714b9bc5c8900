//! Error types for the aria library.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every failure an aria operation can surface to the command line.
#[derive(Error, Debug)]
pub enum AriaError {
    /// A required credential or setting is missing or invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The model provider could not be reached or rejected the request
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// Model output or a stored document is not valid JSON
    #[error("Parse error: {message}")]
    Parse { message: String },
    /// A plan document is missing required fields or has wrong field types
    #[error("Schema error: {message}")]
    Schema { message: String },
    /// A referenced file, directory or template does not exist
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Reading answers from the terminal failed
    #[error("Terminal error: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

/// Builder for network errors with an optional transport source.
pub struct NetworkErrorBuilder {
    message: String,
}

impl NetworkErrorBuilder {
    /// Create a new network error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the underlying transport error.
    pub fn with_source(self, source: reqwest::Error) -> AriaError {
        AriaError::Network {
            message: format!("{}: {source}", self.message),
            source: Some(source),
        }
    }

    /// Build the error without a transport source (e.g. a bad HTTP status).
    pub fn build(self) -> AriaError {
        AriaError::Network {
            message: self.message,
            source: None,
        }
    }
}

impl AriaError {
    /// Creates a builder for network errors.
    pub fn network(message: impl Into<String>) -> NetworkErrorBuilder {
        NetworkErrorBuilder::new(message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Creates a not-found error for a plan file.
    pub fn plan_not_found(path: &Path) -> Self {
        Self::NotFound {
            what: "Plan file",
            name: path.display().to_string(),
        }
    }

    /// Creates a not-found error for any filesystem path.
    pub fn path_not_found(path: &Path) -> Self {
        Self::NotFound {
            what: "Path",
            name: path.display().to_string(),
        }
    }

    /// Creates a file system error for the given path.
    pub fn file_system(path: &Path, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classify a serde_json failure on a document: malformed text is a parse
    /// error, well-formed JSON of the wrong shape is a schema error.
    pub fn from_document_error(context: &str, error: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        match error.classify() {
            Category::Data => Self::schema(format!("{context}: {error}")),
            Category::Io | Category::Syntax | Category::Eof => {
                Self::parse(format!("{context}: {error}"))
            }
        }
    }
}

/// Extension trait for mapping I/O results onto [`AriaError::FileSystem`].
pub trait IoResultExt<T> {
    /// Attach the path the I/O operation was working on.
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| AriaError::file_system(path, e))
    }
}

/// Result type alias for aria operations
pub type Result<T> = std::result::Result<T, AriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_path() {
        let err = AriaError::plan_not_found(Path::new("missing.json"));
        assert_eq!(err.to_string(), "Plan file not found: missing.json");
    }

    #[test]
    fn test_document_error_classification() {
        let syntax = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        assert!(matches!(
            AriaError::from_document_error("bad", &syntax),
            AriaError::Parse { .. }
        ));

        let data = serde_json::from_str::<Vec<u32>>("{\"a\": 1}").unwrap_err();
        assert!(matches!(
            AriaError::from_document_error("bad", &data),
            AriaError::Schema { .. }
        ));
    }

    #[test]
    fn test_network_error_without_source() {
        let err = AriaError::network("HTTP 500 Internal Server Error").build();
        assert!(err.to_string().contains("HTTP 500"));
    }
}
