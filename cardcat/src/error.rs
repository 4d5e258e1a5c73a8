//! Error types for the Cardcat outer surfaces.
//!
//! The parsing core never fails loudly: recognizers and generators answer
//! `None` for any input they cannot handle. The types here cover the parts
//! that touch the outside world:
//!
//! - [`FormatError`] - Unknown catalog format tags (reported by the CLI
//!   argument parser)
//! - [`ConfigError`] - Engine configuration loading and validation
//! - [`ScanError`] - Library directory traversal
//! - [`CardcatError`] - Top-level wrapper used by the CLI
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Format Errors
// =============================================================================

/// Errors when resolving a catalog format tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The tag does not name a registered format.
    #[error("Unknown catalog format: '{0}' (expected one of: calibre, flat, oml, opf)")]
    UnknownFormat(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading or validating an [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected shape.
    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field holds a value the engine cannot work with.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Scan Errors
// =============================================================================

/// Errors while walking a library directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist or is not a directory.
    #[error("Library root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Directory traversal failed.
    #[error("Failed to walk library: {0}")]
    WalkError(#[from] walkdir::Error),
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level error for the command-line tool.
#[derive(Debug, Error)]
pub enum CardcatError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scan error.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path or author list did not fit any requested format.
    #[error("No match: {0}")]
    NoMatch(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type for CLI operations.
pub type CardcatResult<T> = Result<T, CardcatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ConfigError -> CardcatError
        let config_err = ConfigError::InvalidValue {
            field: "priority".into(),
            message: "must list at least one format".into(),
        };
        let top: CardcatError = config_err.into();
        assert!(top.to_string().starts_with("Config error"));

        // ScanError -> CardcatError
        let scan_err = ScanError::NotADirectory(PathBuf::from("books"));
        let top: CardcatError = scan_err.into();
        assert!(top.to_string().contains("books"));
    }

    #[test]
    fn test_invalid_value_format() {
        let err = ConfigError::InvalidValue {
            field: "max_authors".into(),
            message: "must be at least 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("max_authors"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_unknown_format_lists_choices() {
        let err = FormatError::UnknownFormat("dewey".into());
        assert!(err.to_string().contains("'dewey'"));
        assert!(err.to_string().contains("calibre, flat, oml, opf"));
    }

    #[test]
    fn test_not_a_directory_shows_path() {
        let err = ScanError::NotADirectory(PathBuf::from("/no/such/library"));
        assert!(err.to_string().contains("/no/such/library"));
    }
}
