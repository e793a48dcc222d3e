//! Error types for sane-figs operations.

use crate::library::Library;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or applying a style.
#[derive(Error, Debug)]
pub enum Error {
    /// No preset with this name is registered.
    #[error("unknown preset '{name}' (available: {})", .available.join(", "))]
    UnknownPreset {
        /// Requested name.
        name: String,
        /// Registered preset names at lookup time.
        available: Vec<String>,
    },

    /// No colorway with this name is registered.
    #[error("unknown colorway '{name}' (available: {})", .available.join(", "))]
    UnknownColorway {
        /// Requested name.
        name: String,
        /// Registered colorway names at lookup time.
        available: Vec<String>,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {message}")]
    ConfigValidation {
        /// Dotted path of the offending field, e.g. `watermark.opacity`.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A library was explicitly requested but is not installed.
    #[error("library '{0}' was requested but is not installed")]
    LibraryNotAvailable(Library),

    /// A library name did not match any supported plotting library.
    #[error("unknown library '{0}' (supported: matplotlib, seaborn, plotly, altair)")]
    UnknownLibrary(String),

    /// A watermark image could not be read or decoded.
    #[error("watermark resource '{}' is unusable: {message}", .path.display())]
    WatermarkResource {
        /// Path of the image resource.
        path: PathBuf,
        /// Decoder or I/O message.
        message: String,
    },

    /// A registry entry with this name already exists.
    #[error("{kind} '{name}' is already registered; use replace to overwrite it")]
    AlreadyRegistered {
        /// Registry kind (`preset` or `colorway`).
        kind: &'static str,
        /// Conflicting name.
        name: String,
    },

    /// Built-in registry entries cannot be removed.
    #[error("cannot unregister built-in {kind} '{name}'")]
    BuiltinProtected {
        /// Registry kind (`preset` or `colorway`).
        kind: &'static str,
        /// Built-in name.
        name: String,
    },

    /// A preset or colorway document does not exist.
    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// A preset or colorway document could not be parsed.
    #[error("document error at line {line}: {message}")]
    DocumentParse {
        /// Line number where the error occurred (1-indexed, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The activation handle does not belong to a live activation.
    #[error("activation {0} is not active")]
    UnknownActivation(u64),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for a [`Error::ConfigValidation`] error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending field for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ConfigValidation { field, .. } => Some(field),
            _ => None,
        }
    }
}
