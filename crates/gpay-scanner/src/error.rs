//! Scanner configuration and capture errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving scanner configuration or reading a
/// recorded keystroke log.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// One or more settings are out of range. All violations are listed.
    #[error("invalid scanner configuration: {}", .errors.join("; "))]
    InvalidConfig {
        /// Every violation found.
        errors: Vec<String>,
    },

    /// No hardware profile has this name.
    #[error("unknown scanner profile {name:?} (expected one of: {known})")]
    UnknownProfile {
        /// The requested name.
        name: String,
        /// Comma-separated known profile names.
        known: String,
    },

    /// A configuration or replay file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A configuration file is not valid YAML for [`crate::ScannerConfigFile`].
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// An environment variable holds an unusable value.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A line of a keystroke log could not be read.
    #[error("invalid keystroke at line {line}: {reason}")]
    InvalidKeystroke {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type ScannerResult<T> = Result<T, ScannerError>;

/// Map a read failure to [`ScannerError::FileNotFound`] when the file is
/// missing.
pub(crate) fn read_error(path: &std::path::Path, err: std::io::Error) -> ScannerError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ScannerError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ScannerError::Io(err)
    }
}
