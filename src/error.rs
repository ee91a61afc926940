//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `rolegraph` library. It uses the `thiserror` library to create a
//! comprehensive `Error` enum covering every anticipated failure mode of
//! role resolution, with enough context to make each failure actionable.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing all errors that can occur
//!   while locating, loading, and resolving roles. Each variant carries
//!   contextual information (role name, offending path, cycle chain).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`,
//!   used throughout the library to simplify function signatures.
//!
//! None of these errors are recoverable within the resolution subsystem:
//! dependency graphs are static configuration, not flaky I/O, so every
//! error aborts the resolution of the root role that triggered it and is
//! surfaced verbatim to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for role resolution operations
#[derive(Error, Debug)]
pub enum Error {
    /// A role reference could not be located in any of the configured
    /// search paths.
    ///
    /// Includes the searched paths and optionally a hint naming a
    /// similarly-named role that does exist.
    #[error("Role not found: {name} (searched: {searched}){}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    RoleNotFound {
        name: String,
        searched: String,
        /// Optional "did you mean" hint
        hint: Option<String>,
    },

    /// More than one candidate entry file exists in a scope directory.
    ///
    /// Silently picking one candidate over another would make behavior
    /// depend on filesystem enumeration order, which is non-portable, so
    /// this is a hard failure.
    #[error("Ambiguous entry file in {}: found {}", directory.display(), candidates.join(", "))]
    ConfigAmbiguity {
        directory: PathBuf,
        candidates: Vec<String>,
    },

    /// A YAML/JSON document failed to parse.
    #[error("Failed to parse {}: {message}", path.display())]
    DocumentParse { path: PathBuf, message: String },

    /// A loaded scope violates a structural invariant, e.g. a `vars`
    /// document whose top level is a list instead of a mapping.
    #[error("Invalid definition for role '{role}': {message}")]
    RoleLoad { role: String, message: String },

    /// A role transitively depends on itself.
    #[error("Cycle detected in role dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
