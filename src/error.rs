use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the mkpilot pipeline.
///
/// A missing ignore-pattern file is deliberately not represented here:
/// it is a normal case handled by returning an empty pattern set.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Invalid ignore pattern.
    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// YAML read/write failure (mkdocs.yml).
    #[error("YAML error in '{path}': {message}")]
    Yaml {
        /// File the error refers to
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// PDF text extraction failure.
    #[error("Failed to extract text from '{path}': {message}")]
    Pdf {
        /// Path to the PDF
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// LLM summarization failure.
    #[error("Summarization failed: {message}")]
    Summarize {
        /// Error message
        message: String,
    },

    /// External command (git, mkdocs) failure.
    #[error("Command '{program}' failed: {message}")]
    Command {
        /// Program that was invoked
        program: String,
        /// Error message or captured stderr
        message: String,
    },

    /// Directory recursion exceeded the configured depth cap.
    #[error("Directory tree at '{path}' exceeds maximum depth of {limit}")]
    DepthExceeded {
        /// Directory where the cap was hit
        path: PathBuf,
        /// Configured depth limit
        limit: usize,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a YAML error with file context.
    #[must_use]
    pub fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a PDF extraction error.
    #[must_use]
    pub fn pdf(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Pdf {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a summarization error.
    #[must_use]
    pub fn summarize(message: impl Into<String>) -> Self {
        Self::Summarize {
            message: message.into(),
        }
    }

    /// Creates an external command error.
    #[must_use]
    pub fn command(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Summarize {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Summarize {
            message: format!("malformed API response: {e}"),
        }
    }
}
