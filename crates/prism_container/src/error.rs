//! Error types for container parsing and module library loading.

use prism_artifact::{ArtifactError, ArtifactKind, ArtifactPayload};

/// Errors produced while parsing a container or deserializing a module
/// library from it.
///
/// The pipeline is fail-fast: no partially constructed library is ever
/// observable through an error path.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Malformed container bytes: truncation, a bad tag, or a chunk length
    /// overrunning the remaining buffer.
    #[error("container format error at byte {offset}: {reason}")]
    Format {
        /// Byte offset at which the problem was detected.
        offset: usize,
        /// Description of the structural problem.
        reason: String,
    },

    /// A well-formed container whose contents do not match the expected
    /// compiler schema or version.
    #[error("container schema error: {reason}")]
    Schema {
        /// Description of the schema mismatch.
        reason: String,
    },

    /// The artifact's descriptor says it cannot carry a module library.
    #[error("artifact of kind {kind:?} with payload {payload:?} cannot carry a module library")]
    Unsupported {
        /// The artifact's kind.
        kind: ArtifactKind,
        /// The artifact's payload classification.
        payload: ArtifactPayload,
    },

    /// Obtaining the artifact's bytes failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
