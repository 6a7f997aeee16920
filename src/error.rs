//! Global error handling for projdump
//!
//! Only failures that abort a whole scan (or the front end) travel through
//! this type. Per-file read problems are rendered into the report instead, and
//! settings problems are recovered by falling back to the built-in rules.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for projdump operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// Scan root does not exist
    #[error("Root path not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Scan root exists but is not a directory
    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Top-level directory listing failed
    #[error("Failed to scan directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Settings could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for projdump operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Creates a ScanError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ScanError::$error_type(format!($($arg)*))
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

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            ScanError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Lets the binary keep an io::Result<()> main
impl From<ScanError> for io::Error {
    fn from(err: ScanError) -> Self {
        let kind = match &err {
            ScanError::RootNotFound(_) => io::ErrorKind::NotFound,
            ScanError::Io(e) => e.kind(),
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}
