//! Error types for storybook operations.
//!
//! This module defines [`StorybookError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `StorybookError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `StorybookError::Other`) for unexpected errors
//! - Loading the library never fails; only writes and user input surface errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for storybook operations.
#[derive(Debug, Error)]
pub enum StorybookError {
    /// Cover color is not a `#RRGGBB` hex value.
    #[error("Invalid cover color '{value}': expected #RRGGBB")]
    InvalidCoverColor { value: String },

    /// Book index outside the library.
    #[error("Book {index} does not exist (library has {len} books)")]
    BookIndexOutOfRange { index: usize, len: usize },

    /// Image file could not be read.
    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Library could not be serialized for storage.
    #[error("Failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A prompt was needed but no answer is available without a terminal.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for storybook operations.
pub type Result<T> = std::result::Result<T, StorybookError>;
