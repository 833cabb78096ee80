//! Error types for document loading.
//!
//! Covers the failure modes at the loader boundary: missing files, other I/O
//! failures, malformed JSON, and unreadable resolver configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a document or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document path does not exist.
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// File I/O failure other than a missing file.
    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Resolver configuration could not be parsed.
    #[error("invalid configuration in '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Config { path, .. } => path,
        }
    }

    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
