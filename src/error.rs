//! Global error handling for folder-export
//!
//! Only failures that make the export unusable surface here. Problems with
//! individual source files are rendered into the output instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The destination file could not be created or written
    #[error("Failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A pattern file could not be read or compiled
    #[error("Failed to load patterns from {path}: {source}")]
    PatternSource {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Creates an ExportError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ExportError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for tagging write failures with the output path
pub trait OutputResultExt<T> {
    /// Convert an io error into [`ExportError::Output`] for `path`
    fn output_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> OutputResultExt<T> for io::Result<T> {
    fn output_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| ExportError::Output {
            path: path.to_path_buf(),
            source,
        })
    }
}
