//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `lintwright` library. It uses the `thiserror` library to create an
//! `Error` enum covering all anticipated failure modes, providing clear
//! and descriptive error messages.
//!
//! Two kinds of problems exist in this tool and only one of them lives here:
//!
//! - **Feature-level problems** (an existing `.eslintrc.json` would be
//!   clobbered, a `lint-staged` field is already embedded in the manifest)
//!   are *not* errors. The owning task reports them through the
//!   [`crate::report::ReportSink`] and the pipeline keeps going.
//! - **Faults** (I/O failures, malformed manifests, a package runner that
//!   cannot spawn) are represented by this `Error` enum, abort the pipeline,
//!   and surface to the caller.
//!
//! The `Result<T>` alias is used throughout the library to keep signatures
//! short.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for lintwright operations
#[derive(Error, Debug)]
pub enum Error {
    /// The target directory is missing or is not a directory.
    ///
    /// Raised before any task executes; the pipeline never starts.
    #[error("Invalid target directory: {}{}", path.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    InvalidTarget {
        path: PathBuf,
        /// Optional hint for how to fix the target issue
        hint: Option<String>,
    },

    /// The project manifest could not be read, parsed, or written.
    #[error("Manifest error for {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// A bundled template could not be materialized at its destination.
    #[error("Template error: {name} -> {}: {message}", dest.display())]
    Template {
        name: String,
        dest: PathBuf,
        message: String,
    },

    /// A file backup operation failed.
    #[error("Backup error for {}: {message}", path.display())]
    Backup { path: PathBuf, message: String },

    /// An external package-manager invocation failed.
    #[error("Package runner failed: {command} - {message}")]
    PackageRunner { command: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
