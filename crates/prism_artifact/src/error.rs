//! Error types for artifact materialization.

use std::path::PathBuf;

/// Errors produced while materializing artifact content.
///
/// Diagnostics are a separate, non-fatal channel; a hard failure is always
/// signaled through one of these variants, never through diagnostic
/// content.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// No representation, direct or derived, can produce the requested
    /// materialization.
    #[error("artifact '{artifact}' has no representation that can produce {requested}")]
    NotFound {
        /// The artifact's name.
        artifact: String,
        /// The materialization that was asked for.
        requested: &'static str,
    },

    /// An I/O error while reading or writing a file-backed representation.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
