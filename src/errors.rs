/*!
 * Error types for the sptcheck application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while parsing a raw script line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SptParseError {
    /// Line does not begin with a recognized marker glyph
    #[error("line does not start with \u{25CF} or \u{25CB}")]
    MissingStartMarker,

    /// The second occurrence of the leading marker is missing
    #[error("closing marker not found after the anchor ID")]
    MissingClosingMarker,

    /// Both markers are adjacent, leaving an empty anchor ID
    #[error("anchor ID between markers is empty")]
    EmptyAnchorId,

    /// The closing marker is not followed by exactly one ASCII space
    #[error("marker must be followed by exactly one space")]
    MissingSpaceAfterMarker,
}

/// Errors that can occur while reading or applying patch documents
#[derive(Error, Debug)]
pub enum PatchError {
    /// Patch document names no target and its file name cannot be decoded
    #[error("unable to resolve target file for patch: {0}")]
    UnresolvedTarget(String),

    /// Patch document is structurally malformed
    #[error("malformed patch document {path}: {reason}")]
    Malformed {
        /// Patch file path
        path: String,
        /// What went wrong
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from line parsing
    #[error("Parse error: {0}")]
    Parse(#[from] SptParseError),

    /// Error from patch handling
    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
